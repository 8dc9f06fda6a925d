//! Server construction and route wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::warn;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{FixtureTokenVerifier, TokenVerifier};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::vehicles::{
    add_vehicle_view, compare_vehicles, compare_view, create_vehicle, delete_vehicle,
    edit_vehicle, list_vehicles, search_vehicles, vehicle_detail,
};
use crate::outbound::identity::{DEFAULT_VERIFY_TIMEOUT, HttpTokenVerifier};
use crate::outbound::persistence::{MemoryUserDirectory, MemoryVehicleStore};

fn build_verifier(config: &ServerConfig) -> std::io::Result<Arc<dyn TokenVerifier>> {
    match &config.verifier_url {
        Some(url) => {
            let verifier = HttpTokenVerifier::new(url.clone(), DEFAULT_VERIFY_TIMEOUT)
                .map_err(|e| std::io::Error::other(format!("verifier client failed: {e}")))?;
            Ok(Arc::new(verifier))
        }
        None => {
            warn!("no verifier endpoint configured, every session resolves anonymous");
            Ok(Arc::new(FixtureTokenVerifier::default()))
        }
    }
}

/// Assemble the HTTP state for the configured backing services.
///
/// # Errors
/// Propagates [`std::io::Error`] when the verifier client cannot be built.
pub fn build_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let verifier = build_verifier(config)?;
    Ok(web::Data::new(HttpState::new(
        Arc::new(MemoryVehicleStore::new()),
        Arc::new(MemoryUserDirectory::new()),
        verifier,
    )))
}

#[cfg(debug_assertions)]
async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    use utoipa::OpenApi;
    web::Json(ApiDoc::openapi())
}

/// Build the application with every catalogue route registered.
pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(state)
        .service(list_vehicles)
        .service(add_vehicle_view)
        .service(create_vehicle)
        .service(vehicle_detail)
        .service(edit_vehicle)
        .service(delete_vehicle)
        .service(search_vehicles)
        .service(compare_view)
        .service(compare_vehicles);

    #[cfg(debug_assertions)]
    let app = app.route("/api-docs/openapi.json", web::get().to(openapi_json));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when building the verifier client or
/// binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let state = build_state(&config)?;

    let server = HttpServer::new(move || build_app(state.clone()))
        .bind(config.bind_addr)?
        .run();

    Ok(server)
}
