//! Readiness endpoint

use crate::rest::response;
use actix_web::HttpResponse;
use serde::Serialize;

/// Readiness payload
#[derive(Debug, Copy, Clone, Serialize)]
pub struct ReadyResponse {
    /// Always true once the server accepts requests
    pub ready: bool,
}

/// Returns ready:true when service is available
pub async fn health_check() -> HttpResponse {
    rest_debug!("(health_check) entry.");
    response::ok(ReadyResponse { ready: true }, "OK")
}
