//! Health check request handlers.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use diesel_async::RunQueryDsl;
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health status of a single component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Up,
    Down,
}

/// Response body for the health endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: ComponentStatus,
    pub version: &'static str,
    pub database: ComponentStatus,
}

/// Creates health check routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}

/// GET /api/health - Service and database health
///
/// Returns 200 when the database answers a trivial query, 503 otherwise.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = check_database(&state).await;
    let status = if database == ComponentStatus::Up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if status == StatusCode::OK {
                ComponentStatus::Up
            } else {
                ComponentStatus::Down
            },
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}

async fn check_database(state: &AppState) -> ComponentStatus {
    match state.db_pool.get().await {
        Ok(mut conn) => match diesel::sql_query("SELECT 1").execute(&mut conn).await {
            Ok(_) => ComponentStatus::Up,
            Err(e) => {
                tracing::warn!(error = %e, "Database health check query failed");
                ComponentStatus::Down
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "Database health check could not acquire a connection");
            ComponentStatus::Down
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serializes_lowercase_status() {
        let response = HealthResponse {
            status: ComponentStatus::Up,
            version: "0.1.0",
            database: ComponentStatus::Down,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "up");
        assert_eq!(json["database"], "down");
    }
}
