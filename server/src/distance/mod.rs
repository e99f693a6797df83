//! Trip distance computation.
//!
//! Turns an ordered sequence of GPS fixes into a travelled distance in
//! kilometers. Consecutive fixes are joined with great-circle legs
//! ([`haversine::distance`]); a leg is left out of the total when the fixes
//! are too far apart in time (the tracker dropped out or the vehicle was
//! transported) or in space (a GPS jump). The chain always advances to the
//! newest fix, so a single bad leg never hides the legs after it.
//!
//! Everything here is pure: no I/O, no logging, no mutation of the input.

pub mod haversine;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// Fixes further apart in time than this do not contribute distance
pub const MAX_FIX_GAP_MINUTES: i64 = 120;

/// Legs longer than this are considered GPS jumps
pub const MAX_FIX_JUMP_KM: f64 = 10.0;

/// One GPS observation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoFix {
    /// Decimal degrees, [-90, 90]
    pub latitude: f64,

    /// Decimal degrees, [-180, 180]
    pub longitude: f64,

    /// Legacy records may not carry a time
    pub timestamp: Option<DateTime<Utc>>,
}

/// Thresholds used to reject legs while summing a trip.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DistancePolicy {
    /// Maximum time between two fixes for their leg to count
    pub max_gap: Duration,

    /// Maximum length of a single leg, in kilometers
    pub max_jump_km: f64,
}

/// Thresholds that can not describe a usable policy
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PolicyError {
    /// Gap is zero, negative or too large to represent
    InvalidGap(i64),

    /// Jump is zero, negative or not finite
    InvalidJump(f64),
}

impl Display for PolicyError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            PolicyError::InvalidGap(minutes) => {
                write!(f, "Invalid max fix gap: {} minutes.", minutes)
            }
            PolicyError::InvalidJump(km) => write!(f, "Invalid max fix jump: {} km.", km),
        }
    }
}

impl std::error::Error for PolicyError {}

impl Default for DistancePolicy {
    fn default() -> Self {
        DistancePolicy {
            max_gap: Duration::minutes(MAX_FIX_GAP_MINUTES),
            max_jump_km: MAX_FIX_JUMP_KM,
        }
    }
}

impl DistancePolicy {
    /// Build a policy from a gap in minutes and a jump in kilometers.
    ///
    /// Both thresholds must be strictly positive, and the jump finite.
    pub fn new(max_gap_minutes: i64, max_jump_km: f64) -> Result<Self, PolicyError> {
        let max_gap = Duration::try_minutes(max_gap_minutes)
            .filter(|gap| *gap > Duration::zero())
            .ok_or(PolicyError::InvalidGap(max_gap_minutes))?;

        if !max_jump_km.is_finite() || max_jump_km <= 0.0 {
            return Err(PolicyError::InvalidJump(max_jump_km));
        }

        Ok(DistancePolicy {
            max_gap,
            max_jump_km,
        })
    }

    /// Total distance travelled along `fixes`, in kilometers, rounded to
    /// 3 decimal places.
    ///
    /// `fixes` must already be ordered by timestamp; they are not re-sorted.
    pub fn total_distance(&self, fixes: &[GeoFix]) -> f64 {
        let Some((first, rest)) = fixes.split_first() else {
            return 0.0;
        };

        let mut total = 0.0;
        let mut prev = first;
        for cur in rest {
            if let Some(leg) = self.leg_distance(prev, cur) {
                total += leg;
            }
            prev = cur;
        }

        round_km(total)
    }

    /// Distance between two consecutive fixes, or `None` when the leg is
    /// rejected by the gap or jump guard.
    fn leg_distance(&self, prev: &GeoFix, cur: &GeoFix) -> Option<f64> {
        if let (Some(from), Some(to)) = (prev.timestamp, cur.timestamp) {
            let elapsed_ms = (to - from).num_milliseconds().abs();
            if elapsed_ms > self.max_gap.num_milliseconds() {
                return None;
            }
        }

        let leg = haversine::distance(prev, cur);
        (leg <= self.max_jump_km).then_some(leg)
    }
}

/// Total distance along `fixes` with the default 120 minute / 10 km guards.
pub fn compute_total_distance(fixes: &[GeoFix]) -> f64 {
    DistancePolicy::default().total_distance(fixes)
}

/// Round kilometers to 3 decimal places, halves away from zero.
pub fn round_km(km: f64) -> f64 {
    (km * 1000.0).round() / 1000.0
}

/// Distance travelled by one vehicle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct TripSummary {
    /// Vehicle the fixes belong to
    pub vehicle_id: Uuid,

    /// Rounded to 3 decimal places
    pub total_distance_km: f64,
}

impl TripSummary {
    /// Summarize one vehicle's ordered fixes under `policy`
    pub fn compute(vehicle_id: Uuid, fixes: &[GeoFix], policy: &DistancePolicy) -> Self {
        TripSummary {
            vehicle_id,
            total_distance_km: policy.total_distance(fixes),
        }
    }
}
