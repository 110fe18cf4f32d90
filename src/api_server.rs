// Axum API Server Module
//
// Purpose: JSON surface over a single advisor session — the presentation
// boundary of the core: per-domain update sinks plus the current-value and
// prediction read endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::crop_picker::{CategoryFilter, CropPicker};
use crate::data::{CropCategory, ReferenceData, Season, SoilType};
use crate::location::MapSurface;
use crate::session::AdvisorSession;
use crate::soil_analysis::SoilQuality;
use crate::view_builder::build_view;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub reference: Arc<ReferenceData>,
    pub session: Arc<RwLock<AdvisorSession>>,
}

impl AppState {
    pub fn new(data_dir: &str) -> anyhow::Result<Self> {
        tracing::info!(data_dir, "loading reference data");
        let reference = Arc::new(ReferenceData::load(data_dir)?);
        let session = Arc::new(RwLock::new(AdvisorSession::new(reference.clone())));
        Ok(AppState { reference, session })
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Reference lookups
        .route("/api/crops", get(list_crops))
        .route("/api/states", get(list_states))
        .route("/api/cities", get(list_cities))
        // Slot update sinks
        .route("/api/location", post(mark_location))
        .route("/api/crop", post(choose_crop))
        .route("/api/farm", post(update_farm_field))
        .route("/api/soil", post(update_soil_field))
        // Read surface
        .route("/api/weather", get(get_weather))
        .route("/api/prediction", get(get_prediction))
        .route("/api/view", get(get_view))
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

#[derive(Debug, Deserialize)]
struct CropFilterQuery {
    q: Option<String>,
    category: Option<String>,
}

/// Filtered catalog listing: the same intersection the picker applies.
async fn list_crops(
    State(state): State<AppState>,
    Query(params): Query<CropFilterQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut picker = CropPicker::new(state.reference.clone());

    if let Some(q) = params.q {
        picker.set_search(q);
    }
    if let Some(category) = params.category {
        let filter = CategoryFilter::parse(&category)
            .ok_or_else(|| AppError::BadRequest(format!("unknown category: {}", category)))?;
        picker.set_category(filter);
    }

    let crops: Vec<_> = picker.visible_crops().into_iter().cloned().collect();
    Ok(Json(serde_json::json!({
        "rows": crops.len(),
        "data": crops,
    })))
}

async fn list_states(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "states": state.reference.states() }))
}

#[derive(Debug, Deserialize)]
struct CityQuery {
    state: String,
}

/// Cities for a state; unknown states yield an empty list, not an error.
async fn list_cities(
    State(state): State<AppState>,
    Query(params): Query<CityQuery>,
) -> Json<serde_json::Value> {
    let cities = state.reference.cities_for_state(&params.state);
    Json(serde_json::json!({ "cities": cities }))
}

#[derive(Debug, Deserialize)]
struct GestureRequest {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// A pointer gesture on the map surface: derives and stores the location.
async fn mark_location(
    State(state): State<AppState>,
    Json(gesture): Json<GestureRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if gesture.width <= 0.0 || gesture.height <= 0.0 {
        return Err(AppError::BadRequest(
            "surface dimensions must be positive".to_string(),
        ));
    }

    let mut session = state.session.write().await;
    session.mark_location(MapSurface::new(gesture.width, gesture.height), gesture.x, gesture.y);

    let location = session.advisor().location();
    Ok(Json(serde_json::json!({ "location": location })))
}

#[derive(Debug, Deserialize)]
struct CropChoiceRequest {
    category: String,
    name: String,
}

async fn choose_crop(
    State(state): State<AppState>,
    Json(request): Json<CropChoiceRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let category = CropCategory::parse(&request.category)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut session = state.session.write().await;
    if !session.choose_crop(category, &request.name) {
        return Err(AppError::NotFound(format!(
            "crop '{}' not found under {}",
            request.name, request.category
        )));
    }

    Ok(Json(serde_json::json!({ "crop": session.advisor().crop() })))
}

/// One field edit, mirroring the form's field-level update operations.
#[derive(Debug, Deserialize)]
struct FieldUpdate {
    field: String,
    value: Option<String>,
}

async fn update_farm_field(
    State(state): State<AppState>,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<serde_json::Value>, AppError> {
    let value = update.value.unwrap_or_default();
    let mut session = state.session.write().await;

    match update.field.as_str() {
        "season" => {
            let season = if value.is_empty() {
                None
            } else {
                Some(Season::parse(&value).map_err(|e| AppError::BadRequest(e.to_string()))?)
            };
            session.set_farm_season(season);
        }
        "soil_type" => {
            let soil_type = if value.is_empty() {
                None
            } else {
                Some(SoilType::parse(&value).map_err(|e| AppError::BadRequest(e.to_string()))?)
            };
            session.set_farm_soil_type(soil_type);
        }
        "area" => session.set_farm_area_input(&value),
        "state" => session.set_farm_state(value),
        "city" => session.set_farm_city(value),
        other => {
            return Err(AppError::BadRequest(format!(
                "unknown farm field: {}",
                other
            )))
        }
    }

    Ok(Json(serde_json::json!({
        "farm": session.advisor().farm_details(),
        "available_cities": session.available_cities(),
    })))
}

async fn update_soil_field(
    State(state): State<AppState>,
    Json(update): Json<FieldUpdate>,
) -> Result<Json<serde_json::Value>, AppError> {
    let value = update.value.unwrap_or_default();
    let mut session = state.session.write().await;

    match update.field.as_str() {
        "quality" => {
            let quality = if value.is_empty() {
                None
            } else {
                Some(SoilQuality::parse(&value).ok_or_else(|| {
                    AppError::BadRequest(format!("unknown soil quality: {}", value))
                })?)
            };
            session.set_soil_quality(quality);
        }
        "ph" => session.set_soil_ph_input(&value),
        "nitrogen" => session.set_soil_nitrogen_input(&value),
        "phosphorus" => session.set_soil_phosphorus_input(&value),
        "potassium" => session.set_soil_potassium_input(&value),
        "organic_matter" => session.set_soil_organic_matter_input(&value),
        other => {
            return Err(AppError::BadRequest(format!(
                "unknown soil field: {}",
                other
            )))
        }
    }

    Ok(Json(serde_json::json!({
        "soil": session.advisor().soil_profile(),
    })))
}

/// Mock weather for the marked location; nulls when nothing is marked.
async fn get_weather(State(state): State<AppState>) -> Json<serde_json::Value> {
    let session = state.session.read().await;
    Json(serde_json::json!({
        "weather": session.weather(),
        "advisories": session.advisories(),
    }))
}

/// The published outcome: a result, or the waiting state with its checklist.
async fn get_prediction(State(state): State<AppState>) -> Json<serde_json::Value> {
    let session = state.session.read().await;
    Json(serde_json::json!({ "prediction": session.advisor().outcome() }))
}

/// The full render model.
async fn get_view(State(state): State<AppState>) -> Json<serde_json::Value> {
    let session = state.session.read().await;
    Json(serde_json::json!(build_view(&session)))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(serde_json::json!({ "error": message }));
        (status, body).into_response()
    }
}
