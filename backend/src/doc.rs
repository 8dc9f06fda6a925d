//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the catalogue routes. The generated document is served at
//! `/api-docs/openapi.json` in debug builds.

use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, openapi};

use crate::domain::{Error, ErrorCode, Vehicle};
use crate::inbound::http::vehicles::{
    AddVehicleForm, CatalogueResponse, CompareForm, ComparisonResponse, EditVehicleForm,
    SearchForm, VehicleDetailResponse, VehicleSummary, ViewerResponse,
};

/// Enrich the generated document with the token cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(openapi::Components::default);

        components.add_security_scheme(
            "TokenCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "token",
                "Identity token issued by the external provider.",
            ))),
        );
    }
}

/// OpenAPI document for the catalogue API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "EV catalogue API",
        description = "HTTP interface for cataloguing, searching, and comparing electric vehicles."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("TokenCookie" = [])),
    paths(
        crate::inbound::http::vehicles::list_vehicles,
        crate::inbound::http::vehicles::add_vehicle_view,
        crate::inbound::http::vehicles::create_vehicle,
        crate::inbound::http::vehicles::vehicle_detail,
        crate::inbound::http::vehicles::edit_vehicle,
        crate::inbound::http::vehicles::delete_vehicle,
        crate::inbound::http::vehicles::search_vehicles,
        crate::inbound::http::vehicles::compare_view,
        crate::inbound::http::vehicles::compare_vehicles,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Vehicle,
        VehicleSummary,
        ViewerResponse,
        CatalogueResponse,
        VehicleDetailResponse,
        ComparisonResponse,
        AddVehicleForm,
        EditVehicleForm,
        SearchForm,
        CompareForm,
    )),
    tags(
        (name = "catalogue", description = "Create, view, edit, and delete vehicles"),
        (name = "search", description = "Attribute search over the catalogue"),
        (name = "compare", description = "Side-by-side comparison")
    )
)]
pub struct ApiDoc;
