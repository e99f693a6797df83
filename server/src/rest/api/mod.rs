//! REST API endpoint handlers

pub mod dashboard;
pub mod health;
pub mod locations;
pub mod vehicles;

use crate::fleet::FleetError;

/// Fallback for unknown API routes
pub async fn not_found() -> Result<actix_web::HttpResponse, FleetError> {
    Err(FleetError::NotFound)
}

/// Fallback for known API routes called with an unsupported method
pub async fn method_not_allowed() -> Result<actix_web::HttpResponse, FleetError> {
    Err(FleetError::MethodNotAllowed)
}
