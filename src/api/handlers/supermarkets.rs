//! Supermarket CRUD request handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::api::dto::{CreateSupermarketRequest, SupermarketResponse, UpdateSupermarketRequest};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::ValidatedJson;

/// Creates supermarket-related routes.
///
/// Routes:
/// - GET /        - List all supermarkets with their owning cities
/// - POST /       - Create a new supermarket
/// - GET /:id     - Get supermarket by ID
/// - PUT /:id     - Update supermarket by ID
/// - DELETE /:id  - Delete supermarket by ID
pub fn supermarket_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_supermarkets).post(create_supermarket))
        .route(
            "/{id}",
            get(get_supermarket)
                .put(update_supermarket)
                .delete(delete_supermarket),
        )
}

/// GET /api/supermarkets - List all supermarkets
///
/// Returns a JSON array of all supermarkets, each with its owning city
/// loaded when associated.
async fn list_supermarkets(
    State(state): State<AppState>,
) -> Result<Json<Vec<SupermarketResponse>>, AppError> {
    let markets = state.services.supermarkets.find_all().await?;
    let responses = markets
        .into_iter()
        .map(|(market, city)| SupermarketResponse::with_city(market, city))
        .collect();
    Ok(Json(responses))
}

/// GET /api/supermarkets/:id - Get supermarket by ID
async fn get_supermarket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SupermarketResponse>, AppError> {
    let market = state.services.supermarkets.find_one(id).await?;
    Ok(Json(SupermarketResponse::from(market)))
}

/// POST /api/supermarkets - Create new supermarket
///
/// Returns 201 Created with the created supermarket and its generated id,
/// or 412 when the name is not strictly longer than 10 characters.
async fn create_supermarket(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateSupermarketRequest>,
) -> Result<(StatusCode, Json<SupermarketResponse>), AppError> {
    let market = state
        .services
        .supermarkets
        .create(payload.into_new_supermarket())
        .await?;
    Ok((StatusCode::CREATED, Json(SupermarketResponse::from(market))))
}

/// PUT /api/supermarkets/:id - Update supermarket
///
/// Shallow-merges the supplied fields over the persisted record.
async fn update_supermarket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateSupermarketRequest>,
) -> Result<Json<SupermarketResponse>, AppError> {
    let market = state
        .services
        .supermarkets
        .update(id, payload.into_update_supermarket())
        .await?;
    Ok(Json(SupermarketResponse::from(market)))
}

/// DELETE /api/supermarkets/:id - Delete supermarket
///
/// Returns 204 No Content on success.
async fn delete_supermarket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.services.supermarkets.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
