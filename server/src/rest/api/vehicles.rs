//! Vehicle registry endpoints

use crate::fleet::{FleetError, FleetService, Identity, VehicleData};
use crate::rest::response;
use actix_web::{web, HttpResponse};
use uuid::Uuid;

/// `GET /api/vehicles`
pub async fn index(
    identity: Identity,
    fleet: web::Data<FleetService>,
) -> Result<HttpResponse, FleetError> {
    rest_debug!("(index) user {}.", identity.user_id);
    let vehicles = fleet.list_vehicles(&identity).await?;
    Ok(response::ok(vehicles, "OK"))
}

/// `POST /api/vehicles`
pub async fn store(
    identity: Identity,
    fleet: web::Data<FleetService>,
    body: web::Json<VehicleData>,
) -> Result<HttpResponse, FleetError> {
    rest_debug!("(store) user {}.", identity.user_id);
    let vehicle = fleet.create_vehicle(&identity, body.into_inner()).await?;
    Ok(response::created(vehicle, "Vehicle created"))
}

/// `PUT /api/vehicles/{vehicle_id}`
pub async fn update(
    identity: Identity,
    fleet: web::Data<FleetService>,
    vehicle_id: web::Path<Uuid>,
    body: web::Json<VehicleData>,
) -> Result<HttpResponse, FleetError> {
    let vehicle_id = vehicle_id.into_inner();
    rest_debug!("(update) user {}, vehicle {}.", identity.user_id, vehicle_id);
    let vehicle = fleet
        .update_vehicle(&identity, vehicle_id, body.into_inner())
        .await?;
    Ok(response::ok(vehicle, "Vehicle updated"))
}

/// `DELETE /api/vehicles/{vehicle_id}`
pub async fn destroy(
    identity: Identity,
    fleet: web::Data<FleetService>,
    vehicle_id: web::Path<Uuid>,
) -> Result<HttpResponse, FleetError> {
    let vehicle_id = vehicle_id.into_inner();
    rest_debug!("(destroy) user {}, vehicle {}.", identity.user_id, vehicle_id);
    fleet.delete_vehicle(&identity, vehicle_id).await?;
    Ok(response::no_content())
}
