//! Dashboard endpoint

use crate::fleet::{FleetError, FleetService, Identity};
use crate::rest::response;
use actix_web::{web, HttpResponse};

/// `GET /api/dashboard/vehicles`
pub async fn vehicles(
    identity: Identity,
    fleet: web::Data<FleetService>,
) -> Result<HttpResponse, FleetError> {
    let rows = fleet.vehicles_with_distance(&identity).await.map_err(|e| {
        rest_error!("(vehicles) failed to compute distances: {}", e);
        e
    })?;
    Ok(response::ok(rows, "OK"))
}
