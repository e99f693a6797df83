//! JSON envelope shared by every endpoint
//!
//! Success bodies are `{"message": .., "data": ..}`, failures are
//! `{"message": .., "errors": ..}`.

use crate::fleet::FleetError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::Value;

/// Success body
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Human readable outcome
    pub message: String,

    /// Payload
    pub data: T,
}

/// Failure body
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Human readable outcome
    pub message: String,

    /// Per-field details, if any
    pub errors: Option<Value>,
}

/// 200 with `data`
pub fn ok<T: Serialize>(data: T, message: &str) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse {
        message: message.to_string(),
        data,
    })
}

/// 201 with the created `data`
pub fn created<T: Serialize>(data: T, message: &str) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse {
        message: message.to_string(),
        data,
    })
}

/// 204 without a body
pub fn no_content() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Failure with `status`
pub fn fail(status: StatusCode, message: &str, errors: Option<Value>) -> HttpResponse {
    HttpResponse::build(status).json(ApiError {
        message: message.to_string(),
        errors,
    })
}

impl ResponseError for FleetError {
    fn status_code(&self) -> StatusCode {
        match self {
            FleetError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            FleetError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            FleetError::Unauthenticated => StatusCode::UNAUTHORIZED,
            FleetError::Forbidden => StatusCode::FORBIDDEN,
            FleetError::NotFound => StatusCode::NOT_FOUND,
            FleetError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            FleetError::Conflict(_) => StatusCode::CONFLICT,
            FleetError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            FleetError::Validation(errors) => {
                fail(status, "Validation error", serde_json::to_value(errors).ok())
            }
            FleetError::MalformedBody(detail) => fail(
                status,
                "Malformed request body",
                Some(Value::String(detail.clone())),
            ),
            FleetError::Unauthenticated => fail(status, "Unauthenticated", None),
            FleetError::Forbidden => fail(status, "Forbidden", None),
            FleetError::NotFound => fail(status, "Not found", None),
            FleetError::MethodNotAllowed => fail(status, "Method not allowed", None),
            FleetError::Conflict(detail) => {
                rest_warn!("(error_response) conflict: {}", detail);
                fail(status, "Conflict", None)
            }
            FleetError::Storage(e) => {
                // details stay in the log
                rest_error!("(error_response) storage error: {}", e);
                fail(status, "Internal server error", None)
            }
        }
    }
}
