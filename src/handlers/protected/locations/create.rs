use axum::extract::State;

use crate::database::models::{LocationRecord, NewLocation};
use crate::middleware::{ApiResponse, ApiResult, JsonBody, Requestor};
use crate::state::AppState;

/// POST /locations - the owner is always the resolved requestor.
pub async fn location_post(
    State(state): State<AppState>,
    Requestor(requestor): Requestor,
    JsonBody(input): JsonBody<NewLocation>,
) -> ApiResult {
    let location = LocationRecord::create(input, requestor.email);
    state
        .bounded("insert_location", state.locations.insert_location(&location))
        .await?;

    tracing::info!("Location {} created by {}", location.id, location.created_by);
    Ok(ApiResponse::created("Location added").with("data", &location))
}
