use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::auth::validate_jwt;
use crate::database::models::Account;
use crate::error::ApiError;
use crate::state::AppState;

pub const IDENTITY_HEADER: &str = "x-user-email";

/// The resolved caller of a request, backed by a stored account.
#[derive(Clone, Debug)]
pub struct Requestor(pub Account);

/// Where the claimed identity came from
#[derive(Debug, PartialEq, Eq)]
enum Claimed {
    Token(String),
    Header(String),
}

#[async_trait]
impl FromRequestParts<AppState> for Requestor {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // A token is bound to the account it was issued for, not just the email
        let (email, token_account) =
            match claimed_identity(&parts.headers, state.config.security.trust_identity_header)? {
                Claimed::Token(token) => {
                    let claims = validate_jwt(&token, &state.config.security).map_err(|e| {
                        tracing::debug!("Rejected bearer token: {}", e);
                        ApiError::unauthenticated("Invalid or expired token")
                    })?;
                    (claims.sub, Some(claims.account_id))
                }
                Claimed::Header(email) => (email, None),
            };

        let account = state
            .bounded("account_by_email", state.accounts.account_by_email(&email))
            .await?
            .ok_or_else(|| {
                tracing::warn!("Identity '{}' does not match any account", email);
                ApiError::unknown_identity("User not recognized")
            })?;

        if token_account.is_some_and(|id| id != account.id) {
            tracing::warn!("Token for {} was issued to a previous account", email);
            return Err(ApiError::unauthenticated("Invalid or expired token"));
        }

        Ok(Requestor(account))
    }
}

/// Bearer token first, then the identity header when it is trusted.
fn claimed_identity(headers: &HeaderMap, trust_header: bool) -> Result<Claimed, ApiError> {
    if let Some(value) = headers.get(axum::http::header::AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| ApiError::unauthenticated("Invalid Authorization header format"))?;
        let token = value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::unauthenticated("Authorization header must use Bearer token format"))?;
        return Ok(Claimed::Token(token.to_string()));
    }

    if trust_header {
        let email = headers
            .get(IDENTITY_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !email.is_empty() {
            return Ok(Claimed::Header(email.to_string()));
        }
    }

    Err(ApiError::unauthenticated("You must be logged in"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn missing_everything_is_unauthenticated() {
        let err = claimed_identity(&HeaderMap::new(), true).unwrap_err();
        assert_eq!(err.error_code(), "UNAUTHENTICATED");
    }

    #[test]
    fn empty_header_is_unauthenticated() {
        let mut headers = HeaderMap::new();
        headers.insert(IDENTITY_HEADER, HeaderValue::from_static(""));
        assert!(claimed_identity(&headers, true).is_err());
    }

    #[test]
    fn header_ignored_when_untrusted() {
        let mut headers = HeaderMap::new();
        headers.insert(IDENTITY_HEADER, HeaderValue::from_static("a@x.com"));
        assert_eq!(claimed_identity(&headers, true).unwrap(), Claimed::Header("a@x.com".into()));
        assert!(claimed_identity(&headers, false).is_err());
    }

    #[test]
    fn bearer_token_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert(IDENTITY_HEADER, HeaderValue::from_static("a@x.com"));
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(claimed_identity(&headers, true).unwrap(), Claimed::Token("abc.def.ghi".into()));
    }

    #[test]
    fn non_bearer_authorization_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        assert!(claimed_identity(&headers, true).is_err());
    }

    #[tokio::test]
    async fn token_outlives_neither_deleted_account_nor_reused_email() {
        use crate::testing::TestContext;
        use axum::http::StatusCode;
        use serde_json::json;

        let ctx = TestContext::with_admin("root@x.com", "secret");
        let first_id = ctx.register("a@x.com", "p1").await;
        let location = ctx.create_location("a@x.com", "Kiosk").await;
        let token = ctx.login_token("a@x.com", "p1").await;

        let (status, _) = ctx.delete(&format!("/users/{}", first_id), Some("root@x.com")).await;
        assert_eq!(status, StatusCode::OK);
        ctx.register("a@x.com", "p2").await;

        let (status, body) = ctx
            .put_with_token(&format!("/locations/{}", location), &token, json!({"name": "Taken over"}))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHENTICATED");

        let fresh = ctx.login_token("a@x.com", "p2").await;
        let (status, _) = ctx
            .put_with_token(&format!("/locations/{}", location), &fresh, json!({"name": "Reclaimed"}))
            .await;
        assert_eq!(status, StatusCode::OK);
    }
}
