//! City CRUD request handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::api::dto::{CityResponse, CreateCityRequest, UpdateCityRequest};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Creates city-related routes.
///
/// Routes:
/// - GET /        - List all cities with their supermarket collections
/// - POST /       - Create a new city
/// - GET /:id     - Get city by ID (scalar fields only)
/// - PUT /:id     - Update city by ID
/// - DELETE /:id  - Delete city by ID
pub fn city_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cities).post(create_city))
        .route("/{id}", get(get_city).put(update_city).delete(delete_city))
}

/// GET /api/cities - List all cities
///
/// Returns a JSON array of all cities, each with its supermarket
/// collection eagerly loaded.
async fn list_cities(State(state): State<AppState>) -> Result<Json<Vec<CityResponse>>, AppError> {
    let cities = state.services.cities.find_all().await?;
    let responses = cities
        .into_iter()
        .map(|(city, markets)| CityResponse::with_markets(city, markets))
        .collect();
    Ok(Json(responses))
}

/// GET /api/cities/:id - Get city by ID
///
/// Returns the city's scalar fields or 404 if not found.
async fn get_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CityResponse>, AppError> {
    let city = state.services.cities.find_one(id).await?;
    Ok(Json(CityResponse::from(city)))
}

/// POST /api/cities - Create new city
///
/// Returns 201 Created with the created city and its generated id,
/// or 412 when the country is not in the allow-list.
async fn create_city(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCityRequest>,
) -> Result<(StatusCode, Json<CityResponse>), AppError> {
    let city = state.services.cities.create(payload.into_new_city()).await?;
    Ok((StatusCode::CREATED, Json(CityResponse::from(city))))
}

/// PUT /api/cities/:id - Update city
///
/// Shallow-merges the supplied fields over the persisted record.
async fn update_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateCityRequest>,
) -> Result<Json<CityResponse>, AppError> {
    let city = state
        .services
        .cities
        .update(id, payload.into_update_city())
        .await?;
    Ok(Json(CityResponse::from(city)))
}

/// DELETE /api/cities/:id - Delete city
///
/// Returns 204 No Content on success.
async fn delete_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.services.cities.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
