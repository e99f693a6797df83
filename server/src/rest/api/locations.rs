//! GPS location and trip endpoints

use crate::fleet::{FleetError, FleetService, Identity, NewLocation};
use crate::rest::response;
use actix_web::{web, HttpResponse};
use uuid::Uuid;

/// `GET /api/vehicles/{vehicle_id}/locations`
pub async fn index(
    identity: Identity,
    fleet: web::Data<FleetService>,
    vehicle_id: web::Path<Uuid>,
) -> Result<HttpResponse, FleetError> {
    let locations = fleet
        .list_locations(&identity, vehicle_id.into_inner())
        .await?;
    Ok(response::ok(locations, "OK"))
}

/// `POST /api/vehicles/{vehicle_id}/locations`
pub async fn store(
    identity: Identity,
    fleet: web::Data<FleetService>,
    vehicle_id: web::Path<Uuid>,
    body: web::Json<NewLocation>,
) -> Result<HttpResponse, FleetError> {
    let location = fleet
        .create_location(&identity, vehicle_id.into_inner(), body.into_inner())
        .await?;
    Ok(response::created(location, "Location created"))
}

/// `GET /api/vehicles/{vehicle_id}/trip`
pub async fn trip(
    identity: Identity,
    fleet: web::Data<FleetService>,
    vehicle_id: web::Path<Uuid>,
) -> Result<HttpResponse, FleetError> {
    let summary = fleet
        .trip_summary(&identity, vehicle_id.into_inner())
        .await?;
    Ok(response::ok(summary, "OK"))
}
