//! REST server implementation

use super::api::{dashboard, health, locations, method_not_allowed, not_found, vehicles};
use crate::config::Config;
use crate::fleet::{FleetError, FleetService};
use crate::shutdown_signal;
use crate::storage::FleetStorage;
use actix_web::dev::Service;
use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{web, App, HttpRequest, HttpServer};
use std::sync::Arc;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    FleetError::MalformedBody(err.to_string()).into()
}

fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    rest_debug!("(path_error) {}: {}", req.path(), err);
    FleetError::NotFound.into()
}

/// Register all routes. The [`FleetService`] must be provided as
/// `web::Data` by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(resource("/health").route(web::get().to(health::health_check)))
        .service(
            web::scope("/api")
                .service(
                    resource("/vehicles")
                        .route(web::get().to(vehicles::index))
                        .route(web::post().to(vehicles::store)),
                )
                .service(
                    resource("/vehicles/{vehicle_id}")
                        .route(web::put().to(vehicles::update))
                        .route(web::delete().to(vehicles::destroy)),
                )
                .service(
                    resource("/vehicles/{vehicle_id}/locations")
                        .route(web::get().to(locations::index))
                        .route(web::post().to(locations::store)),
                )
                .service(
                    resource("/vehicles/{vehicle_id}/trip").route(web::get().to(locations::trip)),
                )
                .service(
                    resource("/dashboard/vehicles").route(web::get().to(dashboard::vehicles)),
                )
                .default_service(web::to(not_found)),
        );
}

/// A resource answering 405 for methods it has no route for
fn resource(path: &str) -> actix_web::Resource {
    web::resource(path).default_service(web::to(method_not_allowed))
}

/// The REST server for this service. Runs until ctrl-c, or until
/// `shutdown_rx` fires when provided.
pub async fn rest_server(
    config: Config,
    storage: Arc<dyn FleetStorage>,
    shutdown_rx: Option<tokio::sync::oneshot::Receiver<()>>,
) -> std::io::Result<()> {
    let rest_addr = format!("0.0.0.0:{}", config.docker_port_rest);
    let policy = config
        .distance_policy()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let fleet = web::Data::new(FleetService::new(storage, policy));

    rest_info!("(rest_server) starting REST server at {}.", rest_addr);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(fleet.clone())
            .wrap_fn(|req, srv| {
                rest_debug!("(rest_server) {} {}", req.method(), req.uri());
                srv.call(req)
            })
            .configure(configure)
    })
    .bind(&rest_addr)?
    .disable_signals()
    .run();

    let handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal("rest", shutdown_rx).await;
        handle.stop(true).await;
    });

    server.await?;
    rest_info!("(rest_server) REST server stopped.");
    Ok(())
}
