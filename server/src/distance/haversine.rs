//! Implementation of the Haversine formula for calculating the distance
//! between two points on a sphere.
//!
//! See [Wikipedia](https://en.wikipedia.org/wiki/Haversine_formula) for
//! more.
//!
//! **Distance is returned in kilometers**.

use super::GeoFix;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the great-circle distance between two fixes.
///
/// # Notes
/// The formula does ***not*** take altitude into account, and the result
/// is never rounded here. Rounding happens once, on the trip total.
pub fn distance(start: &GeoFix, end: &GeoFix) -> f64 {
    let d_lat = (end.latitude - start.latitude).to_radians();
    let d_lon = (end.longitude - start.longitude).to_radians();
    let lat1 = start.latitude.to_radians();
    let lat2 = end.latitude.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // sqrt(a) can land a hair above 1.0 for near-antipodal points
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

#[cfg(test)]
pub mod haversine_test {
    use super::*;

    fn fix(latitude: f64, longitude: f64) -> GeoFix {
        GeoFix {
            latitude,
            longitude,
            timestamp: None,
        }
    }

    #[test]
    fn haversine_distance_in_kilometers() {
        let start = fix(32.5556789, 35.1234567);
        let end = fix(31.9556789, 35.9345678);
        assert!((distance(&start, &end) - 101.334).abs() < 1e-3);
    }

    #[test]
    fn haversine_short_leg() {
        let start = fix(31.9, 35.9);
        let end = fix(31.91, 35.91);
        assert!((distance(&start, &end) - 1.459).abs() < 1e-3);
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = fix(32.5556789, 35.1234567);
        let b = fix(31.9556789, 35.9345678);
        assert_eq!(distance(&a, &b), distance(&b, &a));
    }

    #[test]
    fn haversine_coincident_points() {
        let a = fix(31.9, 35.9);
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn haversine_antipodal_points_stay_finite() {
        let north = fix(90.0, 0.0);
        let south = fix(-90.0, 0.0);
        let d = distance(&north, &south);
        assert!(d.is_finite());
        assert!((d - 20015.087).abs() < 1e-3);

        let east = fix(0.0, 180.0);
        let west = fix(0.0, 0.0);
        assert!((distance(&east, &west) - 20015.087).abs() < 1e-3);
    }
}
