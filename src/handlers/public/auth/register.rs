// handlers/public/auth/register.rs - POST /register

use axum::extract::State;

use super::AuthInput;
use crate::database::models::Account;
use crate::handlers::utils::require_present;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

/// POST /register - create a new account with the `user` role.
///
/// Email collisions are rejected by the store itself, so two concurrent
/// registrations of the same email produce exactly one account.
pub async fn register_post(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<AuthInput>,
) -> ApiResult {
    require_present(&input.email, "email")?;
    require_present(&input.password, "password")?;

    let account = Account::register(input.email, input.password);
    state
        .bounded("insert_account", state.accounts.insert_account(&account))
        .await?;

    tracing::info!("Registered account {} ({})", account.email, account.id);
    Ok(ApiResponse::created("Registration succeeded").with("data", &account))
}
