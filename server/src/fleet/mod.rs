//! Fleet services
//!
//! Owner-scoped vehicle management, GPS location ingestion and distance
//! reporting. Every operation takes the caller's [`Identity`] explicitly;
//! there is no ambient "current user".

#[macro_use]
pub mod macros;
pub mod dashboard;
pub mod locations;
pub mod validation;
pub mod vehicles;

pub use dashboard::VehicleDistance;
pub use validation::{NewLocation, ValidationErrors, VehicleData};

use crate::distance::DistancePolicy;
use crate::storage::{FleetStorage, StorageError, Vehicle};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;
use uuid::Uuid;

/// The authenticated caller
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Id of the user making the request
    pub user_id: Uuid,
}

impl Identity {
    /// Identity of `user_id`
    pub fn new(user_id: Uuid) -> Self {
        Identity { user_id }
    }
}

/// Errors returned by the fleet services
#[derive(Debug, Clone, PartialEq)]
pub enum FleetError {
    /// Request body failed validation
    Validation(ValidationErrors),

    /// Request body could not be parsed
    MalformedBody(String),

    /// No identity provided
    Unauthenticated,

    /// The resource belongs to someone else
    Forbidden,

    /// The resource doesn't exist
    NotFound,

    /// The resource exists but not for this HTTP method
    MethodNotAllowed,

    /// A concurrent write violated a unique constraint
    Conflict(String),

    /// The storage backend failed
    Storage(StorageError),
}

impl Display for FleetError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            FleetError::Validation(errors) => write!(f, "Validation error: {}", errors),
            FleetError::MalformedBody(detail) => write!(f, "Malformed request body: {}", detail),
            FleetError::Unauthenticated => write!(f, "Unauthenticated"),
            FleetError::Forbidden => write!(f, "Forbidden"),
            FleetError::NotFound => write!(f, "Not found"),
            FleetError::MethodNotAllowed => write!(f, "Method not allowed"),
            FleetError::Conflict(detail) => write!(f, "Conflict: {}", detail),
            FleetError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for FleetError {}

impl From<StorageError> for FleetError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound => FleetError::NotFound,
            StorageError::Conflict(detail) => FleetError::Conflict(detail),
            other => FleetError::Storage(other),
        }
    }
}

impl From<ValidationErrors> for FleetError {
    fn from(errors: ValidationErrors) -> Self {
        FleetError::Validation(errors)
    }
}

/// Entry point for all fleet operations
#[derive(Clone)]
pub struct FleetService {
    storage: Arc<dyn FleetStorage>,
    policy: DistancePolicy,
}

impl std::fmt::Debug for FleetService {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.debug_struct("FleetService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl FleetService {
    /// Create a service over `storage`, summing trips with `policy`
    pub fn new(storage: Arc<dyn FleetStorage>, policy: DistancePolicy) -> Self {
        FleetService { storage, policy }
    }

    /// Load a vehicle and make sure `identity` owns it
    async fn owned_vehicle(&self, identity: &Identity, id: Uuid) -> Result<Vehicle, FleetError> {
        let Some(vehicle) = self.storage.vehicle_by_id(id).await? else {
            fleet_debug!("(owned_vehicle) vehicle {} not found.", id);
            return Err(FleetError::NotFound);
        };

        if vehicle.owner_id != identity.user_id {
            fleet_warn!(
                "(owned_vehicle) user {} is not the owner of vehicle {}.",
                identity.user_id,
                id
            );
            return Err(FleetError::Forbidden);
        }

        Ok(vehicle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_map_to_fleet_errors() {
        assert_eq!(FleetError::from(StorageError::NotFound), FleetError::NotFound);
        assert_eq!(
            FleetError::from(StorageError::Conflict(String::from("plate"))),
            FleetError::Conflict(String::from("plate"))
        );
        assert_eq!(
            FleetError::from(StorageError::Unavailable(String::from("down"))),
            FleetError::Storage(StorageError::Unavailable(String::from("down")))
        );
    }
}
