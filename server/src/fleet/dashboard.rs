//! Fleet dashboard: travelled distance per vehicle

use super::{FleetError, FleetService, Identity};
use crate::storage::Vehicle;
use futures::future::join_all;
use serde::Serialize;
use uuid::Uuid;

/// One dashboard row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleDistance {
    /// Vehicle id
    pub id: Uuid,

    /// Registration plate
    pub plate_number: String,

    /// Manufacturer
    pub brand: String,

    /// Model name
    pub model: String,

    /// Guarded trip distance, rounded to 3 decimal places
    pub total_distance_km: f64,
}

impl FleetService {
    /// Travelled distance of every vehicle owned by `identity`, in the same
    /// order as [`FleetService::list_vehicles`].
    ///
    /// Vehicles are independent, so their fixes are loaded and summed
    /// concurrently.
    pub async fn vehicles_with_distance(
        &self,
        identity: &Identity,
    ) -> Result<Vec<VehicleDistance>, FleetError> {
        let vehicles = self.storage.vehicles_by_owner(identity.user_id).await?;
        fleet_debug!(
            "(vehicles_with_distance) computing distance for {} vehicles of user {}.",
            vehicles.len(),
            identity.user_id
        );

        join_all(vehicles.into_iter().map(|vehicle| self.vehicle_distance(vehicle)))
            .await
            .into_iter()
            .collect()
    }

    async fn vehicle_distance(&self, vehicle: Vehicle) -> Result<VehicleDistance, FleetError> {
        let fixes = self.fixes(vehicle.id).await?;
        Ok(VehicleDistance {
            id: vehicle.id,
            plate_number: vehicle.plate_number,
            brand: vehicle.brand,
            model: vehicle.model,
            total_distance_km: self.policy.total_distance(&fixes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{haversine, round_km, GeoFix};
    use crate::test_util::{fix_data, fleet_service, vehicle_data};
    use chrono::{Duration, TimeZone, Utc};

    #[tokio::test]
    async fn test_vehicles_with_distance() {
        crate::get_log_handle().await;
        ut_info!("(test_vehicles_with_distance) Start.");

        let (fleet, identity) = fleet_service();
        let idle = fleet
            .create_vehicle(&identity, vehicle_data("ABC-1234"))
            .await
            .unwrap();
        let moving = fleet
            .create_vehicle(&identity, vehicle_data("XYZ-999"))
            .await
            .unwrap();

        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        for (latitude, longitude, minutes) in [(31.9, 35.9, 0), (31.91, 35.91, 5), (31.92, 35.92, 10)]
        {
            fleet
                .create_location(
                    &identity,
                    moving.id,
                    fix_data(latitude, longitude, Some(t0 + Duration::minutes(minutes))),
                )
                .await
                .unwrap();
        }

        let rows = fleet.vehicles_with_distance(&identity).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, moving.id);
        assert_eq!(rows[0].plate_number, "XYZ-999");
        assert_eq!(rows[0].total_distance_km, 2.917);
        assert_eq!(rows[1].id, idle.id);
        assert_eq!(rows[1].total_distance_km, 0.0);

        let stranger = Identity::new(Uuid::new_v4());
        assert!(fleet.vehicles_with_distance(&stranger).await.unwrap().is_empty());

        ut_info!("(test_vehicles_with_distance) Success.");
    }

    #[tokio::test]
    async fn test_dashboard_applies_the_guards() {
        crate::get_log_handle().await;
        ut_info!("(test_dashboard_applies_the_guards) Start.");

        let (fleet, identity) = fleet_service();
        let vehicle = fleet
            .create_vehicle(&identity, vehicle_data("ABC-1234"))
            .await
            .unwrap();

        // valid leg, GPS jump, valid leg, four hour gap, valid leg
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let track = [
            (31.9, 35.9, 0),
            (31.91, 35.91, 5),
            (32.5, 36.5, 10),
            (32.51, 36.51, 15),
            (32.52, 36.52, 255),
        ];
        for (latitude, longitude, minutes) in track {
            fleet
                .create_location(
                    &identity,
                    vehicle.id,
                    fix_data(latitude, longitude, Some(t0 + Duration::minutes(minutes))),
                )
                .await
                .unwrap();
        }

        let fixes: Vec<GeoFix> = track
            .iter()
            .map(|&(latitude, longitude, _)| GeoFix {
                latitude,
                longitude,
                timestamp: None,
            })
            .collect();
        let unguarded: f64 = fixes
            .windows(2)
            .map(|pair| haversine::distance(&pair[0], &pair[1]))
            .sum();
        let guarded = round_km(
            haversine::distance(&fixes[0], &fixes[1]) + haversine::distance(&fixes[2], &fixes[3]),
        );

        let rows = fleet.vehicles_with_distance(&identity).await.unwrap();
        assert_eq!(rows[0].total_distance_km, guarded);
        assert!(rows[0].total_distance_km < round_km(unguarded));

        // the per-vehicle endpoint agrees with the dashboard
        let summary = fleet.trip_summary(&identity, vehicle.id).await.unwrap();
        assert_eq!(summary.total_distance_km, rows[0].total_distance_km);

        ut_info!("(test_dashboard_applies_the_guards) Success.");
    }
}
