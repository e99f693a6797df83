//! Vehicle registry operations

use super::validation::{ValidVehicle, VehicleData};
use super::{FleetError, FleetService, Identity};
use crate::storage::Vehicle;
use chrono::Utc;
use uuid::Uuid;

impl FleetService {
    /// Vehicles owned by `identity`, newest first
    pub async fn list_vehicles(&self, identity: &Identity) -> Result<Vec<Vehicle>, FleetError> {
        Ok(self.storage.vehicles_by_owner(identity.user_id).await?)
    }

    /// Register a new vehicle for `identity`
    pub async fn create_vehicle(
        &self,
        identity: &Identity,
        data: VehicleData,
    ) -> Result<Vehicle, FleetError> {
        let valid = self.validate_vehicle(&data, None).await?;
        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            owner_id: identity.user_id,
            plate_number: valid.plate_number,
            brand: valid.brand,
            model: valid.model,
            created_at: now,
            updated_at: now,
        };

        let vehicle = self.storage.insert_vehicle(vehicle).await?;
        fleet_info!(
            "(create_vehicle) user {} registered vehicle {} ({}).",
            identity.user_id,
            vehicle.id,
            vehicle.plate_number
        );
        Ok(vehicle)
    }

    /// Replace the fields of a vehicle owned by `identity`
    pub async fn update_vehicle(
        &self,
        identity: &Identity,
        id: Uuid,
        data: VehicleData,
    ) -> Result<Vehicle, FleetError> {
        let mut vehicle = self.owned_vehicle(identity, id).await?;
        let valid = self.validate_vehicle(&data, Some(id)).await?;

        vehicle.plate_number = valid.plate_number;
        vehicle.brand = valid.brand;
        vehicle.model = valid.model;
        vehicle.updated_at = Utc::now();

        let vehicle = self.storage.update_vehicle(vehicle).await?;
        fleet_info!("(update_vehicle) vehicle {} updated.", vehicle.id);
        Ok(vehicle)
    }

    /// Remove a vehicle owned by `identity` and all of its locations
    pub async fn delete_vehicle(&self, identity: &Identity, id: Uuid) -> Result<(), FleetError> {
        self.owned_vehicle(identity, id).await?;
        self.storage.delete_vehicle(id).await?;
        fleet_info!("(delete_vehicle) vehicle {} deleted.", id);
        Ok(())
    }

    /// Field validation plus plate uniqueness, ignoring the vehicle being
    /// updated.
    async fn validate_vehicle(
        &self,
        data: &VehicleData,
        ignore_id: Option<Uuid>,
    ) -> Result<ValidVehicle, FleetError> {
        let valid = data.validate()?;

        if let Some(existing) = self.storage.vehicle_by_plate(&valid.plate_number).await? {
            if Some(existing.id) != ignore_id {
                let mut errors = super::ValidationErrors::default();
                errors.add("plate_number", "This plate number already exists.");
                return Err(FleetError::Validation(errors));
            }
        }

        Ok(valid)
    }
}
