//! Caller identity extraction
//!
//! Tokens are verified by the authenticating gateway in front of this
//! service, which forwards the user id in [`USER_ID_HEADER`].

use crate::fleet::{FleetError, Identity};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

/// Header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "X-User-Id";

impl FromRequest for Identity {
    type Error = FleetError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req))
    }
}

fn identity_from_request(req: &HttpRequest) -> Result<Identity, FleetError> {
    let Some(value) = req.headers().get(USER_ID_HEADER) else {
        rest_debug!("(identity_from_request) no {} header.", USER_ID_HEADER);
        return Err(FleetError::Unauthenticated);
    };

    value
        .to_str()
        .ok()
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .map(Identity::new)
        .ok_or_else(|| {
            rest_warn!("(identity_from_request) malformed {} header.", USER_ID_HEADER);
            FleetError::Unauthenticated
        })
}
