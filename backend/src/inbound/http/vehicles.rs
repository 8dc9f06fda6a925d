//! Vehicle catalogue HTTP handlers.
//!
//! ```text
//! GET  /
//! GET  /add-ev/
//! POST /add-ev/
//! GET  /ev-detail/{id}/
//! POST /ev-detail/{id}/edit
//! POST /ev-detail/{id}/delete
//! POST /search-ev/
//! GET  /compare-evs/
//! POST /compare-evs/
//! ```
//!
//! Mutating routes run the session gate first and answer anonymous requests
//! with a redirect to the home surface, never an error page.

use actix_web::{HttpResponse, get, post, web};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::search::{SearchValidationError, VehicleFilter};
use crate::domain::{CatalogueEntry, Error, UserProfile, Vehicle, VehicleComparison, VehicleUpdate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::{TokenCookie, redirect_home, redirect_to};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_f64_field, parse_i32_field, parse_vehicle_id};

/// Form body for `POST /add-ev/`.
///
/// The add form submits the WLTP range under the short name `range`; the
/// edit form uses the full attribute name.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddVehicleForm {
    pub name: String,
    pub manufacturer: String,
    pub year: String,
    pub battery_size: String,
    pub range: String,
    pub cost: String,
    pub power: String,
}

/// Form body for `POST /ev-detail/{id}/edit`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct EditVehicleForm {
    pub name: String,
    pub manufacturer: String,
    pub year: String,
    pub battery_size: String,
    pub wltp_range: String,
    pub cost: String,
    pub power: String,
}

/// Form body for `POST /search-ev/`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SearchForm {
    pub attribute: String,
    pub text_value: Option<String>,
    pub min_value: Option<String>,
    pub max_value: Option<String>,
}

/// Form body for `POST /compare-evs/`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CompareForm {
    pub ev1: String,
    pub ev2: String,
}

/// Authenticated viewer, when the request carried a verifiable token.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewerResponse {
    pub subject: String,
    pub display_name: String,
}

impl From<UserProfile> for ViewerResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            subject: profile.subject.to_string(),
            display_name: profile.display_name,
        }
    }
}

/// One catalogued vehicle with its store identifier.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    pub id: String,
    #[serde(flatten)]
    pub vehicle: Vehicle,
}

impl From<CatalogueEntry> for VehicleSummary {
    fn from(entry: CatalogueEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            vehicle: entry.vehicle,
        }
    }
}

/// Catalogue listing returned by the home, search, and compare-picker views.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer: Option<ViewerResponse>,
    pub vehicles: Vec<VehicleSummary>,
}

/// Single-vehicle view returned by the detail route.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetailResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer: Option<ViewerResponse>,
    pub vehicle: VehicleSummary,
}

/// Side-by-side comparison returned by `POST /compare-evs/`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResponse {
    pub first: VehicleSummary,
    pub second: VehicleSummary,
}

impl From<VehicleComparison> for ComparisonResponse {
    fn from(comparison: VehicleComparison) -> Self {
        Self {
            first: comparison.first.into(),
            second: comparison.second.into(),
        }
    }
}

async fn resolve_viewer(
    state: &HttpState,
    token: &TokenCookie,
) -> ApiResult<Option<ViewerResponse>> {
    let Some(claims) = state.sessions.resolve(token.raw()).await else {
        return Ok(None);
    };
    let profile = state.profiles.get_or_create(&claims.subject).await?;
    Ok(Some(ViewerResponse::from(profile)))
}

async fn collect_vehicles(
    state: &HttpState,
    filter: &VehicleFilter,
) -> ApiResult<Vec<VehicleSummary>> {
    let entries: Vec<CatalogueEntry> = state
        .store
        .stream(filter)
        .await
        .map_err(Error::from)?
        .try_collect()
        .await
        .map_err(Error::from)?;
    Ok(entries.into_iter().map(VehicleSummary::from).collect())
}

fn parse_add_form(form: AddVehicleForm) -> ApiResult<Vehicle> {
    Ok(Vehicle::from(VehicleUpdate {
        name: form.name,
        manufacturer: form.manufacturer,
        year: parse_i32_field(&form.year, "year")?,
        battery_size: parse_i32_field(&form.battery_size, "battery_size")?,
        wltp_range: parse_i32_field(&form.range, "range")?,
        cost: parse_f64_field(&form.cost, "cost")?,
        power: parse_f64_field(&form.power, "power")?,
    }))
}

fn parse_edit_form(form: EditVehicleForm) -> ApiResult<VehicleUpdate> {
    Ok(VehicleUpdate {
        name: form.name,
        manufacturer: form.manufacturer,
        year: parse_i32_field(&form.year, "year")?,
        battery_size: parse_i32_field(&form.battery_size, "battery_size")?,
        wltp_range: parse_i32_field(&form.wltp_range, "wltp_range")?,
        cost: parse_f64_field(&form.cost, "cost")?,
        power: parse_f64_field(&form.power, "power")?,
    })
}

fn map_search_validation_error(err: SearchValidationError) -> Error {
    let message = err.to_string();
    match err {
        SearchValidationError::UnknownAttribute { attribute } => Error::invalid_request(message)
            .with_details(json!({
                "field": "attribute",
                "value": attribute,
                "code": "unknown_attribute",
            })),
        SearchValidationError::InvalidBound { bound, value } => Error::invalid_request(message)
            .with_details(json!({
                "field": bound.field_name(),
                "value": value,
                "code": "invalid_integer",
            })),
    }
}

/// List the full catalogue.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Catalogue listing", body = CatalogueResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "listVehicles"
)]
#[get("/")]
pub async fn list_vehicles(
    state: web::Data<HttpState>,
    token: TokenCookie,
) -> ApiResult<web::Json<CatalogueResponse>> {
    let viewer = resolve_viewer(&state, &token).await?;
    let vehicles = collect_vehicles(&state, &VehicleFilter::Unfiltered).await?;
    Ok(web::Json(CatalogueResponse { viewer, vehicles }))
}

/// Context for the add-vehicle view. Browsing the form needs no identity;
/// only the submission is gated.
#[utoipa::path(
    get,
    path = "/add-ev/",
    responses((status = 200, description = "Add-vehicle view context", body = CatalogueResponse)),
    tags = ["catalogue"],
    operation_id = "addVehicleView"
)]
#[get("/add-ev/")]
pub async fn add_vehicle_view(
    state: web::Data<HttpState>,
    token: TokenCookie,
) -> ApiResult<web::Json<CatalogueResponse>> {
    let viewer = resolve_viewer(&state, &token).await?;
    Ok(web::Json(CatalogueResponse {
        viewer,
        vehicles: Vec::new(),
    }))
}

/// Create a vehicle from the add form.
#[utoipa::path(
    post,
    path = "/add-ev/",
    request_body(
        content = AddVehicleForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 302, description = "Created; redirect to the add view (or home when anonymous)"),
        (status = 400, description = "Invalid form value", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "createVehicle"
)]
#[post("/add-ev/")]
pub async fn create_vehicle(
    state: web::Data<HttpState>,
    token: TokenCookie,
    form: web::Form<AddVehicleForm>,
) -> ApiResult<HttpResponse> {
    if state.sessions.resolve(token.raw()).await.is_none() {
        return Ok(redirect_home());
    }

    let vehicle = parse_add_form(form.into_inner())?;
    state.store.create(&vehicle).await.map_err(Error::from)?;
    Ok(redirect_to("/add-ev/"))
}

/// Show one vehicle.
#[utoipa::path(
    get,
    path = "/ev-detail/{id}/",
    params(("id" = String, Path, description = "Store-assigned vehicle identifier")),
    responses(
        (status = 200, description = "Vehicle detail", body = VehicleDetailResponse),
        (status = 404, description = "Unknown vehicle", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "vehicleDetail"
)]
#[get("/ev-detail/{id}/")]
pub async fn vehicle_detail(
    state: web::Data<HttpState>,
    token: TokenCookie,
    path: web::Path<String>,
) -> ApiResult<web::Json<VehicleDetailResponse>> {
    let id = parse_vehicle_id(&path.into_inner(), "id")?;
    let viewer = resolve_viewer(&state, &token).await?;

    let vehicle = state
        .store
        .get(&id)
        .await
        .map_err(Error::from)?
        .ok_or_else(|| Error::not_found(format!("vehicle {id} was not found")))?;

    Ok(web::Json(VehicleDetailResponse {
        viewer,
        vehicle: CatalogueEntry { id, vehicle }.into(),
    }))
}

/// Rewrite a vehicle's attributes from the edit form.
#[utoipa::path(
    post,
    path = "/ev-detail/{id}/edit",
    params(("id" = String, Path, description = "Store-assigned vehicle identifier")),
    request_body(
        content = EditVehicleForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 302, description = "Updated; redirect to the detail view (or home when anonymous)"),
        (status = 400, description = "Invalid form value", body = Error),
        (status = 404, description = "Unknown vehicle", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "editVehicle"
)]
#[post("/ev-detail/{id}/edit")]
pub async fn edit_vehicle(
    state: web::Data<HttpState>,
    token: TokenCookie,
    path: web::Path<String>,
    form: web::Form<EditVehicleForm>,
) -> ApiResult<HttpResponse> {
    if state.sessions.resolve(token.raw()).await.is_none() {
        return Ok(redirect_home());
    }

    let id = parse_vehicle_id(&path.into_inner(), "id")?;
    let update = parse_edit_form(form.into_inner())?;
    state
        .store
        .update(&id, &update)
        .await
        .map_err(Error::from)?;
    Ok(redirect_to(&format!("/ev-detail/{id}/")))
}

/// Remove a vehicle from the catalogue.
#[utoipa::path(
    post,
    path = "/ev-detail/{id}/delete",
    params(("id" = String, Path, description = "Store-assigned vehicle identifier")),
    responses(
        (status = 302, description = "Deleted; redirect home (also the anonymous answer)"),
        (status = 404, description = "Unknown vehicle", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "deleteVehicle"
)]
#[post("/ev-detail/{id}/delete")]
pub async fn delete_vehicle(
    state: web::Data<HttpState>,
    token: TokenCookie,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    if state.sessions.resolve(token.raw()).await.is_none() {
        return Ok(redirect_home());
    }

    let id = parse_vehicle_id(&path.into_inner(), "id")?;
    state.store.delete(&id).await.map_err(Error::from)?;
    Ok(redirect_home())
}

/// Search the catalogue by attribute.
#[utoipa::path(
    post,
    path = "/search-ev/",
    request_body(
        content = SearchForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Matching vehicles", body = CatalogueResponse),
        (status = 400, description = "Invalid search input", body = Error)
    ),
    tags = ["search"],
    operation_id = "searchVehicles"
)]
#[post("/search-ev/")]
pub async fn search_vehicles(
    state: web::Data<HttpState>,
    form: web::Form<SearchForm>,
) -> ApiResult<web::Json<CatalogueResponse>> {
    let form = form.into_inner();
    let filter = VehicleFilter::from_form(
        &form.attribute,
        form.text_value.as_deref(),
        form.min_value.as_deref(),
        form.max_value.as_deref(),
    )
    .map_err(map_search_validation_error)?;

    let vehicles = collect_vehicles(&state, &filter).await?;
    Ok(web::Json(CatalogueResponse {
        viewer: None,
        vehicles,
    }))
}

/// List the catalogue for the comparison pickers.
#[utoipa::path(
    get,
    path = "/compare-evs/",
    responses((status = 200, description = "Catalogue listing", body = CatalogueResponse)),
    tags = ["compare"],
    operation_id = "compareView"
)]
#[get("/compare-evs/")]
pub async fn compare_view(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<CatalogueResponse>> {
    let vehicles = collect_vehicles(&state, &VehicleFilter::Unfiltered).await?;
    Ok(web::Json(CatalogueResponse {
        viewer: None,
        vehicles,
    }))
}

/// Compare two vehicles side by side.
#[utoipa::path(
    post,
    path = "/compare-evs/",
    request_body(
        content = CompareForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Both vehicles' full attribute sets", body = ComparisonResponse),
        (status = 404, description = "Either selection is unknown", body = Error)
    ),
    tags = ["compare"],
    operation_id = "compareVehicles"
)]
#[post("/compare-evs/")]
pub async fn compare_vehicles(
    state: web::Data<HttpState>,
    form: web::Form<CompareForm>,
) -> ApiResult<web::Json<ComparisonResponse>> {
    let form = form.into_inner();
    let first = parse_vehicle_id(&form.ev1, "ev1")?;
    let second = parse_vehicle_id(&form.ev2, "ev2")?;

    let comparison = state
        .comparator
        .compare(&first, &second)
        .await
        .map_err(Error::from)?;
    Ok(web::Json(ComparisonResponse::from(comparison)))
}
