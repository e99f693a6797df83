//! Input validation for vehicles and locations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Max length of a plate number
const PLATE_NUMBER_MAX_LEN: usize = 50;

/// Max length of brand and model names
const NAME_MAX_LEN: usize = 100;

/// Validation messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Record a message for `field`
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// True if no field failed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Vehicle fields as submitted by a client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleData {
    /// e.g. `ABC-1234`
    pub plate_number: Option<String>,

    /// Manufacturer
    pub brand: Option<String>,

    /// Model name
    pub model: Option<String>,
}

/// Vehicle fields after validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidVehicle {
    /// Upper case
    pub plate_number: String,

    /// Trimmed
    pub brand: String,

    /// Trimmed
    pub model: String,
}

/// A GPS fix as submitted by a client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewLocation {
    /// Decimal degrees
    pub latitude: Option<f64>,

    /// Decimal degrees
    pub longitude: Option<f64>,

    /// RFC 3339 time of the fix, parsed during validation
    pub timestamp: Option<String>,
}

/// A GPS fix after validation
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ValidLocation {
    /// [-90, 90]
    pub latitude: f64,

    /// [-180, 180]
    pub longitude: f64,

    /// Time of the fix
    pub timestamp: Option<DateTime<Utc>>,
}

/// Blank strings count as missing
fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Matches `^[A-Z]{2,4}-[0-9]{3,4}$`, ignoring case
pub fn is_valid_plate(plate_number: &str) -> bool {
    let Some((letters, digits)) = plate_number.split_once('-') else {
        return false;
    };

    (2..=4).contains(&letters.len())
        && letters.chars().all(|c| c.is_ascii_alphabetic())
        && (3..=4).contains(&digits.len())
        && digits.chars().all(|c| c.is_ascii_digit())
}

fn required_name(errors: &mut ValidationErrors, field: &str, value: &Option<String>) -> String {
    match present(value) {
        None => {
            errors.add(field, format!("The {} field is required.", field));
            String::new()
        }
        Some(name) if name.chars().count() > NAME_MAX_LEN => {
            errors.add(
                field,
                format!(
                    "The {} field must not be greater than {} characters.",
                    field, NAME_MAX_LEN
                ),
            );
            String::new()
        }
        Some(name) => name.to_string(),
    }
}

impl VehicleData {
    /// Check every field, collecting all failures.
    ///
    /// Plate uniqueness needs storage and is checked by the service.
    pub fn validate(&self) -> Result<ValidVehicle, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let plate_number = match present(&self.plate_number) {
            None => {
                errors.add("plate_number", "Plate number is required.");
                String::new()
            }
            Some(plate) if plate.chars().count() > PLATE_NUMBER_MAX_LEN => {
                errors.add(
                    "plate_number",
                    format!(
                        "The plate number field must not be greater than {} characters.",
                        PLATE_NUMBER_MAX_LEN
                    ),
                );
                String::new()
            }
            Some(plate) if !is_valid_plate(plate) => {
                errors.add("plate_number", "The plate number field format is invalid.");
                String::new()
            }
            Some(plate) => plate.to_ascii_uppercase(),
        };

        let brand = required_name(&mut errors, "brand", &self.brand);
        let model = required_name(&mut errors, "model", &self.model);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidVehicle {
            plate_number,
            brand,
            model,
        })
    }
}

fn coordinate(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<f64>,
    limit: f64,
) -> f64 {
    match value {
        None => {
            errors.add(field, format!("The {} field is required.", field));
            0.0
        }
        Some(degrees) if !degrees.is_finite() || degrees.abs() > limit => {
            errors.add(
                field,
                format!("The {} field must be between -{} and {}.", field, limit, limit),
            );
            0.0
        }
        Some(degrees) => degrees,
    }
}

/// Optional RFC 3339 time, normalized to UTC. Blank counts as missing.
fn fix_time(errors: &mut ValidationErrors, value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value.map(str::trim).filter(|value| !value.is_empty())?;
    match DateTime::parse_from_rfc3339(value) {
        Ok(time) => Some(time.with_timezone(&Utc)),
        Err(_) => {
            errors.add("timestamp", "The timestamp field must be a valid date.");
            None
        }
    }
}

impl NewLocation {
    /// Check coordinates are present, finite and in range
    pub fn validate(&self) -> Result<ValidLocation, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let latitude = coordinate(&mut errors, "latitude", self.latitude, 90.0);
        let longitude = coordinate(&mut errors, "longitude", self.longitude, 180.0);
        let timestamp = fix_time(&mut errors, self.timestamp.as_deref());

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidLocation {
            latitude,
            longitude,
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn data(plate: &str, brand: &str, model: &str) -> VehicleData {
        VehicleData {
            plate_number: Some(plate.to_string()),
            brand: Some(brand.to_string()),
            model: Some(model.to_string()),
        }
    }

    #[test]
    fn plate_pattern() {
        for plate in ["AB-123", "ABC-1234", "abcd-9999", "Jod-5678"] {
            assert!(is_valid_plate(plate), "{plate} should be valid");
        }
        for plate in [
            "A-123", "ABCDE-123", "AB-12", "AB-12345", "AB123", "AB-12A", "A1-123", "AB--123",
            "ÄB-123",
        ] {
            assert!(!is_valid_plate(plate), "{plate} should be invalid");
        }
    }

    #[test]
    fn valid_vehicle_is_normalized() {
        let valid = data(" abc-1234 ", " Toyota ", "Corolla").validate().unwrap();
        assert_eq!(
            valid,
            ValidVehicle {
                plate_number: String::from("ABC-1234"),
                brand: String::from("Toyota"),
                model: String::from("Corolla"),
            }
        );
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let errors = VehicleData::default().validate().unwrap_err();
        assert_eq!(
            errors.get("plate_number"),
            Some(&[String::from("Plate number is required.")][..])
        );
        assert_eq!(
            errors.get("brand"),
            Some(&[String::from("The brand field is required.")][..])
        );
        assert_eq!(
            errors.get("model"),
            Some(&[String::from("The model field is required.")][..])
        );
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let errors = data("   ", "", "Corolla").validate().unwrap_err();
        assert!(errors.get("plate_number").is_some());
        assert!(errors.get("brand").is_some());
        assert!(errors.get("model").is_none());
    }

    #[test]
    fn long_names_are_rejected() {
        let long = "x".repeat(101);
        let errors = data("ABC-1234", &long, &long).validate().unwrap_err();
        assert_eq!(
            errors.get("brand"),
            Some(&[String::from(
                "The brand field must not be greater than 100 characters."
            )][..])
        );
        assert!(data("ABC-1234", &"x".repeat(100), "Corolla")
            .validate()
            .is_ok());
    }

    #[test]
    fn bad_plate_format() {
        let errors = data("ABC1234", "Toyota", "Corolla").validate().unwrap_err();
        assert_eq!(
            errors.get("plate_number"),
            Some(&[String::from("The plate number field format is invalid.")][..])
        );
    }

    #[test]
    fn location_ranges() {
        let ok = NewLocation {
            latitude: Some(-90.0),
            longitude: Some(180.0),
            timestamp: None,
        };
        assert!(ok.validate().is_ok());

        let bad = NewLocation {
            latitude: Some(90.5),
            longitude: Some(f64::NAN),
            timestamp: None,
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(
            errors.get("latitude"),
            Some(&[String::from("The latitude field must be between -90 and 90.")][..])
        );
        assert_eq!(
            errors.get("longitude"),
            Some(&[String::from("The longitude field must be between -180 and 180.")][..])
        );

        let errors = NewLocation::default().validate().unwrap_err();
        assert!(errors.get("latitude").is_some());
        assert!(errors.get("longitude").is_some());
    }

    #[test]
    fn location_timestamps() {
        let at = |timestamp: &str| NewLocation {
            latitude: Some(31.9),
            longitude: Some(35.9),
            timestamp: Some(timestamp.to_string()),
        };

        let valid = at("2024-05-01T10:00:00+02:00").validate().unwrap();
        assert_eq!(
            valid.timestamp,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap())
        );
        assert_eq!(at("  ").validate().unwrap().timestamp, None);

        for bad in ["yesterday", "2024-13-01T00:00:00Z", "2024-05-01 08:00"] {
            let errors = at(bad).validate().unwrap_err();
            assert_eq!(
                errors.get("timestamp"),
                Some(&[String::from("The timestamp field must be a valid date.")][..]),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn errors_serialize_as_field_map() {
        let mut errors = ValidationErrors::default();
        errors.add("brand", "The brand field is required.");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "brand": ["The brand field is required."] })
        );
    }
}
