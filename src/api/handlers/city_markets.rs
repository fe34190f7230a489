//! Association request handlers, nested under a city resource.
//!
//! These endpoints manage the many-to-one link between a city and its
//! supermarkets.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::api::dto::{CityResponse, SupermarketRef, SupermarketResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates the association routes, nested under
/// `/api/cities/{city_id}/supermarkets`.
///
/// Routes:
/// - GET /             - List the city's supermarket collection
/// - PUT /             - Replace the city's whole collection
/// - POST /:market_id   - Add a supermarket to the city
/// - GET /:market_id    - Get one supermarket from the city's collection
/// - DELETE /:market_id - Remove a supermarket from the city
pub fn city_market_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_city_markets).put(replace_city_markets))
        .route(
            "/{market_id}",
            post(add_market_to_city)
                .get(get_market_from_city)
                .delete(remove_market_from_city),
        )
}

/// POST /api/cities/:city_id/supermarkets/:market_id - Associate a
/// supermarket with a city
///
/// Returns the updated city with its full supermarket collection.
/// Re-adding an already associated pair is a no-op success.
async fn add_market_to_city(
    State(state): State<AppState>,
    Path((city_id, market_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<CityResponse>, AppError> {
    let (city, markets) = state
        .services
        .city_markets
        .add_market_to_city(city_id, market_id)
        .await?;
    Ok(Json(CityResponse::with_markets(city, markets)))
}

/// GET /api/cities/:city_id/supermarkets/:market_id - Get one supermarket
/// from the city's collection
///
/// Returns 412 when both entities exist but are not associated.
async fn get_market_from_city(
    State(state): State<AppState>,
    Path((city_id, market_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SupermarketResponse>, AppError> {
    let market = state
        .services
        .city_markets
        .find_market_from_city(city_id, market_id)
        .await?;
    Ok(Json(SupermarketResponse::from(market)))
}

/// GET /api/cities/:city_id/supermarkets - List the city's collection
async fn list_city_markets(
    State(state): State<AppState>,
    Path(city_id): Path<Uuid>,
) -> Result<Json<Vec<SupermarketResponse>>, AppError> {
    let markets = state
        .services
        .city_markets
        .find_markets_from_city(city_id)
        .await?;
    let responses = markets.into_iter().map(SupermarketResponse::from).collect();
    Ok(Json(responses))
}

/// PUT /api/cities/:city_id/supermarkets - Replace the city's collection
///
/// The body is a list of supermarket references; the persisted collection
/// becomes exactly that set. Prior associations are discarded.
async fn replace_city_markets(
    State(state): State<AppState>,
    Path(city_id): Path<Uuid>,
    Json(payload): Json<Vec<SupermarketRef>>,
) -> Result<Json<CityResponse>, AppError> {
    let market_ids: Vec<Uuid> = payload.into_iter().map(|m| m.id).collect();
    let (city, markets) = state
        .services
        .city_markets
        .update_markets_from_city(city_id, &market_ids)
        .await?;
    Ok(Json(CityResponse::with_markets(city, markets)))
}

/// DELETE /api/cities/:city_id/supermarkets/:market_id - Remove a
/// supermarket from the city's collection
///
/// Returns 204 No Content on success; the supermarket itself survives.
async fn remove_market_from_city(
    State(state): State<AppState>,
    Path((city_id, market_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    state
        .services
        .city_markets
        .delete_market_from_city(city_id, market_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
