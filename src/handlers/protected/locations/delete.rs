use axum::extract::{Path, State};

use super::load_owned;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Requestor};
use crate::state::AppState;

/// DELETE /locations/:id - owner or admin only.
pub async fn location_delete(
    State(state): State<AppState>,
    Requestor(requestor): Requestor,
    Path(id): Path<String>,
) -> ApiResult {
    let location = load_owned(&state, &requestor, &id, "delete").await?;

    let removed = state
        .bounded(
            "delete_location",
            state.locations.delete_location(location.id, &location.created_by),
        )
        .await?;
    if !removed {
        return Err(ApiError::not_found("Location not found"));
    }

    tracing::info!("Location {} deleted by {}", location.id, requestor.email);
    Ok(ApiResponse::ok("Location deleted"))
}

#[cfg(test)]
mod tests {
    use crate::testing::TestContext;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn non_owner_cannot_delete_but_admin_can() {
        let ctx = TestContext::with_admin("root@x.com", "secret");
        ctx.register("owner@x.com", "p1").await;
        ctx.register("other@x.com", "p2").await;
        let id = ctx.create_location("owner@x.com", "Lighthouse").await;
        let uri = format!("/locations/{}", id);

        let (status, _) = ctx.delete(&uri, Some("other@x.com")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (_, body) = ctx.get("/locations", None).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));

        let (status, body) = ctx.delete(&uri, Some("root@x.com")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Location deleted");

        let (_, body) = ctx.get("/locations", None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn owner_deletes_once() {
        let ctx = TestContext::new();
        ctx.register("a@x.com", "p1").await;
        let id = ctx.create_location("a@x.com", "Kiosk").await;
        let uri = format!("/locations/{}", id);

        let (status, _) = ctx.delete(&uri, Some("a@x.com")).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = ctx.delete(&uri, Some("a@x.com")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
