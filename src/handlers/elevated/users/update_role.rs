use axum::extract::{Path, State};
use serde::Deserialize;

use super::admin_only;
use crate::database::models::Role;
use crate::error::ApiError;
use crate::handlers::utils::parse_id;
use crate::middleware::{ApiResponse, ApiResult, JsonBody, Requestor};
use crate::state::AppState;

/// Only "user" and "admin" deserialize; anything else is malformed input.
#[derive(Debug, Deserialize)]
pub struct RoleInput {
    pub role: Role,
}

/// PUT /users/:id/role - overwrite the target's role. Admins may demote
/// themselves.
pub async fn user_role_put(
    State(state): State<AppState>,
    Requestor(requestor): Requestor,
    Path(id): Path<String>,
    body: Result<JsonBody<RoleInput>, ApiError>,
) -> ApiResult {
    admin_only(&requestor, "update role")?;
    let id = parse_id(&id, "User")?;
    let JsonBody(input) = body?;

    let account = state
        .bounded("set_role", state.accounts.set_role(id, input.role))
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    tracing::info!("{} set role of {} to {}", requestor.email, account.email, account.role);
    Ok(ApiResponse::ok("User role updated").with("data", &account))
}
