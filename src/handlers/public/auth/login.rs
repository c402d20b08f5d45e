// handlers/public/auth/login.rs - POST /login

use axum::extract::State;

use super::AuthInput;
use crate::auth::generate_jwt;
use crate::error::ApiError;
use crate::handlers::utils::require_present;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

/// POST /login - exact email + password match.
///
/// On success returns the account (without its password) and a bearer token
/// that identity resolution accepts in place of the `X-User-Email` header.
pub async fn login_post(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<AuthInput>,
) -> ApiResult {
    require_present(&input.email, "email")?;
    require_present(&input.password, "password")?;

    let account = state
        .bounded(
            "account_by_credentials",
            state.accounts.account_by_credentials(&input.email, &input.password),
        )
        .await?
        .ok_or_else(|| {
            tracing::warn!("Failed login for {}", input.email);
            ApiError::invalid_credentials("Invalid email or password")
        })?;

    let token = generate_jwt(&account, &state.config.security).map_err(|e| {
        tracing::error!("Token generation failed: {}", e);
        ApiError::store_failure("Could not issue a session token")
    })?;

    tracing::info!("Login for {} ({})", account.email, account.role);
    Ok(ApiResponse::ok("Login succeeded")
        .with("user", &account)
        .with("token", token))
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::testing::TestContext;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn wrong_password_returns_no_account() {
        let ctx = TestContext::new();
        ctx.register("a@x.com", "p1").await;

        let (status, body) = ctx
            .post("/login", None, json!({"email": "a@x.com", "password": "nope"}))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "INVALID_CREDENTIALS");
        assert!(body.get("user").is_none());
        assert!(body.get("token").is_none());
    }

    #[tokio::test]
    async fn login_returns_role_and_token() {
        let ctx = TestContext::new();
        ctx.register("a@x.com", "p1").await;

        let (status, body) = ctx
            .post("/login", None, json!({"email": "a@x.com", "password": "p1"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["role"], "user");
        assert!(body["user"].get("password").is_none());
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn staging_defaults_issue_tokens() {
        let ctx = TestContext::with_config(AppConfig::staging());
        ctx.register("a@x.com", "p1").await;

        let (status, body) = ctx
            .post("/login", None, json!({"email": "a@x.com", "password": "p1"}))
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    }
}
