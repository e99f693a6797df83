//! Mock data for tests and demo deployments

use super::{FleetStorage, GpsLocation, StorageError, Vehicle};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use uuid::Uuid;

/// Demo vehicles: plate, brand, model and the first fix of their track
const DEMO_VEHICLES: [(&str, &str, &str, f64, f64); 2] = [
    ("JOD-1234", "Toyota", "Corolla", 32.5556789, 35.1234567),
    ("JOD-5678", "Nissan", "Altima", 31.9556789, 35.9345678),
];

/// Number of fixes generated per demo vehicle
const DEMO_TRACK_LEN: usize = 12;

/// Build a vehicle record owned by `owner_id`
pub fn vehicle(owner_id: Uuid, plate_number: &str) -> Vehicle {
    let now = Utc::now();
    Vehicle {
        id: Uuid::new_v4(),
        owner_id,
        plate_number: plate_number.to_uppercase(),
        brand: String::from("Toyota"),
        model: String::from("Corolla"),
        created_at: now,
        updated_at: now,
    }
}

/// Build a location record for `vehicle_id`
pub fn location(
    vehicle_id: Uuid,
    latitude: f64,
    longitude: f64,
    timestamp: Option<DateTime<Utc>>,
) -> GpsLocation {
    GpsLocation {
        id: Uuid::new_v4(),
        vehicle_id,
        latitude,
        longitude,
        timestamp,
        created_at: Utc::now(),
    }
}

/// A track of `len` fixes one minute apart, each a few hundred meters from
/// the previous one.
pub fn jittered_track(
    vehicle_id: Uuid,
    start: (f64, f64),
    start_time: DateTime<Utc>,
    len: usize,
) -> Vec<GpsLocation> {
    let mut rng = rand::thread_rng();
    let (mut latitude, mut longitude) = start;
    (0..len)
        .map(|i| {
            if i > 0 {
                latitude += rng.gen_range(-0.003..0.003);
                longitude += rng.gen_range(-0.003..0.003);
            }
            location(
                vehicle_id,
                latitude,
                longitude,
                Some(start_time + Duration::minutes(i as i64)),
            )
        })
        .collect()
}

/// Insert the demo vehicles and their tracks for `owner_id`
pub async fn seed_demo_data(
    storage: &dyn FleetStorage,
    owner_id: Uuid,
) -> Result<Vec<Vehicle>, StorageError> {
    let start_time = Utc::now() - Duration::hours(1);
    let mut vehicles = vec![];
    for (plate_number, brand, model, latitude, longitude) in DEMO_VEHICLES {
        let mut demo = vehicle(owner_id, plate_number);
        demo.brand = String::from(brand);
        demo.model = String::from(model);
        let demo = storage.insert_vehicle(demo).await?;

        for fix in jittered_track(demo.id, (latitude, longitude), start_time, DEMO_TRACK_LEN) {
            storage.insert_location(fix).await?;
        }

        storage_info!(
            "(seed_demo_data) seeded vehicle {} ({}) for owner {}.",
            demo.plate_number,
            demo.id,
            owner_id
        );
        vehicles.push(demo);
    }

    Ok(vehicles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{compute_total_distance, GeoFix};
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn test_seed_demo_data() {
        crate::get_log_handle().await;
        ut_info!("(test_seed_demo_data) Start.");

        let storage = MemoryStorage::new();
        let owner = Uuid::new_v4();
        let vehicles = seed_demo_data(&storage, owner).await.unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(storage.vehicles_by_owner(owner).await.unwrap().len(), 2);

        for demo in vehicles {
            let locations = storage.locations_by_vehicle(demo.id).await.unwrap();
            assert_eq!(locations.len(), DEMO_TRACK_LEN);

            // every leg is well under the jump guard, so nothing is dropped
            let fixes: Vec<GeoFix> = locations.iter().map(GeoFix::from).collect();
            assert!(compute_total_distance(&fixes) > 0.0);
        }

        // seeding twice hits the unique plate constraint
        let again = seed_demo_data(&storage, owner).await;
        assert!(matches!(again, Err(StorageError::Conflict(_))));

        ut_info!("(test_seed_demo_data) Success.");
    }
}
