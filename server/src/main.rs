//! REST server entry point

use anyhow::Context;
use log::info;
use std::sync::Arc;
use svc_fleet::storage::{FleetStorage, MemoryStorage};
use svc_fleet::*;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> anyhow::Result<()> {
    // Will use default config settings if no environment vars are found.
    let config =
        Config::try_from_env().context("Failed to load configuration from environment")?;

    // Try to load log configuration from the provided log file.
    // Will default to stdout debug logging if the file can not be loaded.
    if let Err(e) = load_logger_config_from_file(config.log_config.as_str()).await {
        log::error!("(main) {}", e);
    }

    info!("(main) Server startup.");

    let storage: Arc<dyn FleetStorage> = Arc::new(MemoryStorage::new());

    cfg_if::cfg_if! {
        if #[cfg(feature = "mock")] {
            storage::mock::seed_demo_data(storage.as_ref(), config.demo_owner_id)
                .await
                .context("Failed to seed demo data")?;
        }
    }

    rest::server::rest_server(config, storage, None)
        .await
        .context("REST server failed")?;

    info!("(main) server shutdown.");

    // Make sure all log message are written/ displayed before shutdown
    log::logger().flush();

    Ok(())
}
