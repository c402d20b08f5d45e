use axum::{extract::State, Json};

use super::admin_only;
use crate::database::models::Account;
use crate::middleware::{ApiResult, Requestor};
use crate::state::AppState;

/// GET /users - all accounts, passwords omitted.
pub async fn users_get(
    State(state): State<AppState>,
    Requestor(requestor): Requestor,
) -> ApiResult<Json<Vec<Account>>> {
    admin_only(&requestor, "list users")?;

    let accounts = state
        .bounded("list_accounts", state.accounts.list_accounts())
        .await?;
    Ok(Json(accounts))
}
