//! # Config
//!
//! Define and implement config options for module

use config::{ConfigError, Environment};
use dotenv::dotenv;
use serde::Deserialize;
use uuid::Uuid;

use crate::distance::{DistancePolicy, PolicyError, MAX_FIX_GAP_MINUTES, MAX_FIX_JUMP_KM};

/// struct holding configuration options
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// port to be used for the REST server
    pub docker_port_rest: u16,

    /// path to log configuration YAML file
    pub log_config: String,

    /// fixes further apart in time than this do not contribute distance
    pub max_fix_gap_minutes: i64,

    /// legs longer than this are treated as GPS jumps
    pub max_fix_jump_km: f64,

    /// owner of the demo vehicles seeded by the `mock` feature
    pub demo_owner_id: Uuid,
}

impl Default for Config {
    fn default() -> Self {
        log::warn!("(default) Creating Config object with default values.");
        Self::new()
    }
}

impl Config {
    /// Default values for Config
    pub fn new() -> Self {
        Config {
            docker_port_rest: 8000,
            log_config: String::from("log4rs.yaml"),
            max_fix_gap_minutes: MAX_FIX_GAP_MINUTES,
            max_fix_jump_km: MAX_FIX_JUMP_KM,
            demo_owner_id: Uuid::nil(),
        }
    }

    /// Create a new `Config` object using environment variables
    ///
    /// Fails if the distance thresholds can not form a [`DistancePolicy`].
    pub fn try_from_env() -> Result<Self, ConfigError> {
        // read .env file if present
        dotenv().ok();
        let default_config = Config::default();

        let config: Config = config::Config::builder()
            .set_default("docker_port_rest", default_config.docker_port_rest)?
            .set_default("log_config", default_config.log_config)?
            .set_default("max_fix_gap_minutes", default_config.max_fix_gap_minutes)?
            .set_default("max_fix_jump_km", default_config.max_fix_jump_km)?
            .set_default("demo_owner_id", default_config.demo_owner_id.to_string())?
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()?;

        config
            .distance_policy()
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        Ok(config)
    }

    /// Distance filtering policy described by this configuration
    pub fn distance_policy(&self) -> Result<DistancePolicy, PolicyError> {
        DistancePolicy::new(self.max_fix_gap_minutes, self.max_fix_jump_km)
    }
}
