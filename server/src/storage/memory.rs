//! In-process storage backend

use super::{FleetStorage, GpsLocation, StorageError, Vehicle};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tables {
    // insertion order is kept, it breaks ties when sorting
    vehicles: Vec<Vehicle>,
    locations: Vec<GpsLocation>,
}

/// [`FleetStorage`] kept in memory. Data is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FleetStorage for MemoryStorage {
    async fn vehicles_by_owner(&self, owner_id: Uuid) -> Result<Vec<Vehicle>, StorageError> {
        let tables = self.tables.read().await;
        let mut vehicles: Vec<Vehicle> = tables
            .vehicles
            .iter()
            .rev()
            .filter(|vehicle| vehicle.owner_id == owner_id)
            .cloned()
            .collect();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(vehicles)
    }

    async fn vehicle_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables.vehicles.iter().find(|vehicle| vehicle.id == id).cloned())
    }

    async fn vehicle_by_plate(
        &self,
        plate_number: &str,
    ) -> Result<Option<Vehicle>, StorageError> {
        let tables = self.tables.read().await;
        Ok(tables
            .vehicles
            .iter()
            .find(|vehicle| vehicle.plate_number.eq_ignore_ascii_case(plate_number))
            .cloned())
    }

    async fn insert_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, StorageError> {
        let mut tables = self.tables.write().await;
        if tables
            .vehicles
            .iter()
            .any(|other| other.plate_number.eq_ignore_ascii_case(&vehicle.plate_number))
        {
            storage_warn!(
                "(insert_vehicle) plate {} is already registered.",
                vehicle.plate_number
            );
            return Err(StorageError::Conflict(format!(
                "duplicate plate number {}",
                vehicle.plate_number
            )));
        }

        storage_debug!("(insert_vehicle) inserting vehicle {}.", vehicle.id);
        tables.vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update_vehicle(&self, vehicle: Vehicle) -> Result<Vehicle, StorageError> {
        let mut tables = self.tables.write().await;
        if tables.vehicles.iter().any(|other| {
            other.id != vehicle.id && other.plate_number.eq_ignore_ascii_case(&vehicle.plate_number)
        }) {
            storage_warn!(
                "(update_vehicle) plate {} is already registered.",
                vehicle.plate_number
            );
            return Err(StorageError::Conflict(format!(
                "duplicate plate number {}",
                vehicle.plate_number
            )));
        }

        let Some(existing) = tables
            .vehicles
            .iter_mut()
            .find(|existing| existing.id == vehicle.id)
        else {
            return Err(StorageError::NotFound);
        };

        storage_debug!("(update_vehicle) updating vehicle {}.", vehicle.id);
        *existing = vehicle.clone();
        Ok(vehicle)
    }

    async fn delete_vehicle(&self, id: Uuid) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        let before = tables.vehicles.len();
        tables.vehicles.retain(|vehicle| vehicle.id != id);
        if tables.vehicles.len() == before {
            return Err(StorageError::NotFound);
        }

        tables.locations.retain(|location| location.vehicle_id != id);
        storage_debug!("(delete_vehicle) removed vehicle {} and its locations.", id);
        Ok(())
    }

    async fn locations_by_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Vec<GpsLocation>, StorageError> {
        let tables = self.tables.read().await;
        let mut locations: Vec<GpsLocation> = tables
            .locations
            .iter()
            .filter(|location| location.vehicle_id == vehicle_id)
            .cloned()
            .collect();

        // stable: `None` sorts first, equal timestamps keep insertion order
        locations.sort_by_key(|location| location.timestamp);
        Ok(locations)
    }

    async fn insert_location(&self, location: GpsLocation) -> Result<GpsLocation, StorageError> {
        let mut tables = self.tables.write().await;
        if !tables
            .vehicles
            .iter()
            .any(|vehicle| vehicle.id == location.vehicle_id)
        {
            return Err(StorageError::NotFound);
        }

        tables.locations.push(location.clone());
        Ok(location)
    }
}
