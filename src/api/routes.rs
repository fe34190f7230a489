//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Routes
/// - `/api/cities` - City CRUD operations
/// - `/api/cities/{city_id}/supermarkets` - Association operations
/// - `/api/supermarkets` - Supermarket CRUD operations
/// - `/api/health` - Health check
/// - `/swagger-ui` - Interactive API documentation
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID middleware (runs first) - generates/propagates request IDs
/// 2. Logging middleware (runs second) - logs requests with request IDs
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .nest("/cities", handlers::cities::city_routes())
        .nest(
            "/cities/{city_id}/supermarkets",
            handlers::city_markets::city_market_routes(),
        )
        .nest("/supermarkets", handlers::supermarkets::supermarket_routes())
        .nest("/health", handlers::health::health_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Middleware is applied in reverse order - last added runs first
        // So logging runs after request_id has set the ID
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
