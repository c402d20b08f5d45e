// handlers/protected/locations/mod.rs - location mutations
//
// Every handler here resolves the requestor first. Update and delete then load
// the target and ask the access evaluator before touching the store.

pub mod create; // POST /locations
pub mod delete; // DELETE /locations/:id
pub mod update; // PUT /locations/:id

pub use create::location_post;
pub use delete::location_delete;
pub use update::location_put;

use crate::access::{decide, Verdict};
use crate::database::models::{Account, LocationRecord};
use crate::error::ApiError;
use crate::handlers::utils::parse_id;
use crate::state::AppState;

/// Loads the location and checks the requestor may mutate it.
pub(crate) async fn load_owned(
    state: &AppState,
    requestor: &Account,
    raw_id: &str,
    action: &str,
) -> Result<LocationRecord, ApiError> {
    let id = parse_id(raw_id, "Location")?;

    let location = state
        .bounded("location_by_id", state.locations.location_by_id(id))
        .await?
        .ok_or_else(|| ApiError::not_found("Location not found"))?;

    match decide(requestor.role, &requestor.email, &location.created_by) {
        Verdict::Allow => Ok(location),
        Verdict::Deny => {
            tracing::warn!(
                "{} denied {} on location {} owned by {}",
                requestor.email,
                action,
                location.id,
                location.created_by
            );
            Err(ApiError::forbidden(format!(
                "You are not allowed to {} another user's location",
                action
            )))
        }
    }
}
