use axum::extract::{Path, State};

use super::load_owned;
use crate::database::models::LocationUpdate;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody, Requestor};
use crate::state::AppState;

/// PUT /locations/:id - owner or admin only. Replaces name, category,
/// coordinates and address from the body; omitted fields become empty.
///
/// The body is read after the access decision, so a forbidden caller learns
/// nothing about body validation. The write itself is conditional on the
/// owner seen at load time.
pub async fn location_put(
    State(state): State<AppState>,
    Requestor(requestor): Requestor,
    Path(id): Path<String>,
    body: Result<JsonBody<LocationUpdate>, ApiError>,
) -> ApiResult {
    let location = load_owned(&state, &requestor, &id, "edit").await?;
    let JsonBody(update) = body?;

    let updated = state
        .bounded(
            "update_location",
            state.locations.update_location(location.id, &location.created_by, &update),
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Location not found"))?;

    tracing::info!("Location {} updated by {}", updated.id, requestor.email);
    Ok(ApiResponse::ok("Location updated").with("data", &updated))
}
