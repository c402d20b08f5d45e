use axum::extract::{Path, State};

use super::admin_only;
use crate::error::ApiError;
use crate::handlers::utils::parse_id;
use crate::middleware::{ApiResponse, ApiResult, Requestor};
use crate::state::AppState;

/// DELETE /users/:id - removes the account only. Locations it created stay
/// and keep its email in `created_by`.
pub async fn user_delete(
    State(state): State<AppState>,
    Requestor(requestor): Requestor,
    Path(id): Path<String>,
) -> ApiResult {
    admin_only(&requestor, "delete user")?;
    let id = parse_id(&id, "User")?;

    let removed = state
        .bounded("delete_account", state.accounts.delete_account(id))
        .await?;
    if !removed {
        return Err(ApiError::not_found("User not found"));
    }

    tracing::info!("{} deleted account {}", requestor.email, id);
    Ok(ApiResponse::ok("User deleted"))
}

#[cfg(test)]
mod tests {
    use crate::testing::TestContext;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn delete_keeps_orphaned_locations() {
        let ctx = TestContext::with_admin("root@x.com", "secret");
        let id = ctx.register("a@x.com", "p1").await;
        ctx.create_location("a@x.com", "Orphan").await;

        let (status, _) = ctx.delete(&format!("/users/{}", id), Some("root@x.com")).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = ctx.get("/locations", None).await;
        assert_eq!(body[0]["created_by"], "a@x.com");

        // The deleted identity no longer resolves
        let (status, _) = ctx.get("/users", Some("a@x.com")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_admin_cannot_delete() {
        let ctx = TestContext::new();
        let id = ctx.register("a@x.com", "p1").await;
        ctx.register("b@x.com", "p2").await;

        let (status, _) = ctx.delete(&format!("/users/{}", id), Some("b@x.com")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
