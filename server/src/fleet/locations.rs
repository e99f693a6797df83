//! GPS location ingestion and per-vehicle trip summaries

use super::validation::NewLocation;
use super::{FleetError, FleetService, Identity};
use crate::distance::{GeoFix, TripSummary};
use crate::storage::GpsLocation;
use chrono::Utc;
use uuid::Uuid;

impl FleetService {
    /// Fixes of a vehicle owned by `identity`, ordered by timestamp
    pub async fn list_locations(
        &self,
        identity: &Identity,
        vehicle_id: Uuid,
    ) -> Result<Vec<GpsLocation>, FleetError> {
        self.owned_vehicle(identity, vehicle_id).await?;
        Ok(self.storage.locations_by_vehicle(vehicle_id).await?)
    }

    /// Record a fix for a vehicle owned by `identity`
    pub async fn create_location(
        &self,
        identity: &Identity,
        vehicle_id: Uuid,
        data: NewLocation,
    ) -> Result<GpsLocation, FleetError> {
        self.owned_vehicle(identity, vehicle_id).await?;
        let valid = data.validate()?;

        let location = GpsLocation {
            id: Uuid::new_v4(),
            vehicle_id,
            latitude: valid.latitude,
            longitude: valid.longitude,
            timestamp: valid.timestamp,
            created_at: Utc::now(),
        };

        let location = self.storage.insert_location(location).await?;
        fleet_debug!(
            "(create_location) vehicle {} at ({}, {}).",
            vehicle_id,
            location.latitude,
            location.longitude
        );
        Ok(location)
    }

    /// Distance travelled by a vehicle owned by `identity`
    pub async fn trip_summary(
        &self,
        identity: &Identity,
        vehicle_id: Uuid,
    ) -> Result<TripSummary, FleetError> {
        self.owned_vehicle(identity, vehicle_id).await?;
        let fixes = self.fixes(vehicle_id).await?;
        Ok(TripSummary::compute(vehicle_id, &fixes, &self.policy))
    }

    /// Ordered fixes of a vehicle, without ownership checks
    pub(super) async fn fixes(&self, vehicle_id: Uuid) -> Result<Vec<GeoFix>, FleetError> {
        let locations = self.storage.locations_by_vehicle(vehicle_id).await?;
        Ok(locations.iter().map(GeoFix::from).collect())
    }
}
