/// test utilities. Provides log macros and fixtures for unit tests.
use crate::distance::DistancePolicy;
use crate::fleet::{FleetService, Identity, NewLocation, VehicleData};
use crate::storage::MemoryStorage;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Writes a debug! message to the test::ut logger
#[macro_export]
macro_rules! ut_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "test::ut", $($arg)+)
    };
}

/// Writes an info! message to the test::ut logger
#[macro_export]
macro_rules! ut_info {
    ($($arg:tt)+) => {
        log::info!(target: "test::ut", $($arg)+)
    };
}

/// Writes an warn! message to the test::ut logger
#[macro_export]
macro_rules! ut_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "test::ut", $($arg)+)
    };
}

/// Writes an error! message to the test::ut logger
#[macro_export]
macro_rules! ut_error {
    ($($arg:tt)+) => {
        log::error!(target: "test::ut", $($arg)+)
    };
}

/// A fleet service over fresh in-memory storage, and an identity to use it
pub fn fleet_service() -> (FleetService, Identity) {
    let storage = Arc::new(MemoryStorage::new());
    let identity = Identity::new(Uuid::new_v4());
    ut_debug!("(fleet_service) new fleet for user {}.", identity.user_id);
    (
        FleetService::new(storage, DistancePolicy::default()),
        identity,
    )
}

/// Valid vehicle fields with the given plate
pub fn vehicle_data(plate_number: &str) -> VehicleData {
    VehicleData {
        plate_number: Some(plate_number.to_string()),
        brand: Some(String::from("Toyota")),
        model: Some(String::from("Corolla")),
    }
}

/// Location fields for one fix
pub fn fix_data(latitude: f64, longitude: f64, timestamp: Option<DateTime<Utc>>) -> NewLocation {
    NewLocation {
        latitude: Some(latitude),
        longitude: Some(longitude),
        timestamp: timestamp.map(|time| time.to_rfc3339()),
    }
}
