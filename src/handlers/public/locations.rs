// handlers/public/locations.rs - GET /locations

use axum::{extract::State, Json};

use crate::database::models::LocationRecord;
use crate::middleware::ApiResult;
use crate::state::AppState;

/// GET /locations - every record, no authentication. Always a JSON array.
pub async fn locations_get(State(state): State<AppState>) -> ApiResult<Json<Vec<LocationRecord>>> {
    let locations = state
        .bounded("list_locations", state.locations.list_locations())
        .await?;
    Ok(Json(locations))
}
