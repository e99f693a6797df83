//! Storage
//! Persisted vehicles and GPS location rows, behind the [`FleetStorage`]
//! trait so the fleet services never depend on a concrete backend.

#[macro_use]
pub mod macros;
pub mod memory;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use memory::MemoryStorage;

use crate::distance::GeoFix;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// A registered vehicle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    /// Vehicle id
    pub id: Uuid,

    /// The user owning this vehicle
    #[serde(skip)]
    pub owner_id: Uuid,

    /// Registration plate, stored upper case
    pub plate_number: String,

    /// Manufacturer
    pub brand: String,

    /// Model name
    pub model: String,

    /// Insertion time
    pub created_at: DateTime<Utc>,

    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// A stored GPS fix for one vehicle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpsLocation {
    /// Location id
    pub id: Uuid,

    /// Vehicle that reported the fix
    pub vehicle_id: Uuid,

    /// Decimal degrees
    pub latitude: f64,

    /// Decimal degrees
    pub longitude: f64,

    /// Time of the fix, if the tracker reported one
    pub timestamp: Option<DateTime<Utc>>,

    /// Insertion time
    pub created_at: DateTime<Utc>,
}

impl From<&GpsLocation> for GeoFix {
    fn from(location: &GpsLocation) -> Self {
        GeoFix {
            latitude: location.latitude,
            longitude: location.longitude,
            timestamp: location.timestamp,
        }
    }
}

/// Errors returned by a storage backend
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// No row with the requested id
    NotFound,

    /// A unique constraint was violated
    Conflict(String),

    /// The backend could not complete the operation
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            StorageError::NotFound => write!(f, "Record not found."),
            StorageError::Conflict(detail) => write!(f, "Conflict: {}.", detail),
            StorageError::Unavailable(detail) => write!(f, "Storage unavailable: {}.", detail),
        }
    }
}

impl std::error::Error for StorageError {}

/// Storage operations needed by the fleet services.
///
/// Implementations must return locations ordered by timestamp ascending,
/// fixes without a timestamp first, ties in insertion order. The distance
/// engine relies on this ordering and does not sort on its own.
#[async_trait]
pub trait FleetStorage: Send + Sync {
    /// All vehicles of `owner_id`, newest first
    async fn vehicles_by_owner(&self, owner_id: Uuid) -> Result<Vec<Vehicle>, StorageError>;

    /// A single vehicle, if it exists
    async fn vehicle_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, StorageError>;

    /// The vehicle holding `plate_number`, regardless of owner
    async fn vehicle_by_plate(&self, plate_number: &str)
        -> Result<Option<Vehicle>, StorageError>;

    /// Insert a new vehicle. Fails with [`StorageError::Conflict`] on a
    /// duplicate plate.
    async fn insert_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, StorageError>;

    /// Replace an existing vehicle
    async fn update_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, StorageError>;

    /// Remove a vehicle together with its locations
    async fn delete_vehicle(&self, id: Uuid) -> Result<(), StorageError>;

    /// All fixes of a vehicle, ordered by timestamp
    async fn locations_by_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Vec<GpsLocation>, StorageError>;

    /// Append a fix. Fails with [`StorageError::NotFound`] for an unknown
    /// vehicle.
    async fn insert_location(&self, location: GpsLocation) -> Result<GpsLocation, StorageError>;
}
