// handlers/public/service.rs - GET / and GET /health

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "geomark-api",
        "version": version,
        "description": "Shared map annotations with owner and admin access control",
        "endpoints": {
            "auth": "POST /register, POST /login (public)",
            "locations": "GET /locations (public), POST /locations, PUT|DELETE /locations/:id (identified)",
            "users": "GET /users, PUT /users/:id/role, DELETE /users/:id (admin)",
            "health": "GET /health (public)",
        }
    }))
}

/// Pings both stores.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let accounts = state.bounded("ping_accounts", state.accounts.ping()).await;
    let locations = state.bounded("ping_locations", state.locations.ping()).await;

    match accounts.and(locations) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
