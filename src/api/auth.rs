use std::sync::Arc;

use poem_openapi::{auth::Bearer, payload::Json, OpenApi, SecurityScheme, Tags};

use crate::coordinators::AuthCoordinator;
use crate::errors::auth::AuthError;
use crate::types::dto::auth::{
    LoginRequest, RefreshRequest, RegisterRequest, RegisterResponse, RevokeResponse, TokenResponse,
};

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(Bearer);

#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

/// Authentication API endpoints
pub struct AuthApi {
    coordinator: Arc<AuthCoordinator>,
}

impl AuthApi {
    pub fn new(coordinator: Arc<AuthCoordinator>) -> Self {
        Self { coordinator }
    }
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with email and password to receive an access and refresh token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let tokens = self.coordinator.login(&body.email, &body.password).await?;

        Ok(Json(TokenResponse {
            token: tokens.token,
            refresh_token: tokens.refresh_token,
            expiration: tokens.expiration,
        }))
    }

    /// Register a new user account
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<Json<RegisterResponse>, AuthError> {
        let created = self
            .coordinator
            .register(&body.email, &body.password)
            .await?;

        Ok(Json(RegisterResponse {
            user_id: created.id,
            email: created.email,
        }))
    }

    /// Exchange a refresh token for new tokens (the old one stops working)
    #[oai(path = "/refresh", method = "post", tag = "AuthTags::Authentication")]
    async fn refresh(&self, body: Json<RefreshRequest>) -> Result<Json<TokenResponse>, AuthError> {
        let tokens = self.coordinator.refresh(&body.refresh_token).await?;

        Ok(Json(TokenResponse {
            token: tokens.token,
            refresh_token: tokens.refresh_token,
            expiration: tokens.expiration,
        }))
    }

    /// Revoke the caller's refresh token
    #[oai(path = "/revoke", method = "post", tag = "AuthTags::Authentication")]
    async fn revoke(&self, auth: BearerAuth) -> Result<Json<RevokeResponse>, AuthError> {
        let claims = self
            .coordinator
            .token_service()
            .validate_access_token(&auth.0.token)?;

        self.coordinator.revoke(&claims.sub).await?;

        Ok(Json(RevokeResponse {
            message: "Refresh token revoked".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_auth;
    use chrono::Utc;
    use poem_openapi::auth::Bearer;

    async fn test_api() -> (AuthApi, Arc<AuthCoordinator>) {
        let (coordinator, store) = setup_test_auth().await;
        store
            .add_user("a@x.com", "pw123", &["Customer"])
            .await
            .expect("Failed to create test user");
        let coordinator = Arc::new(coordinator);
        (AuthApi::new(coordinator.clone()), coordinator)
    }

    #[tokio::test]
    async fn login_returns_decodable_token_and_future_expiration() {
        let (api, coordinator) = test_api().await;

        let response = api
            .login(Json(LoginRequest {
                email: "a@x.com".to_string(),
                password: "pw123".to_string(),
            }))
            .await
            .unwrap();

        assert!(!response.refresh_token.is_empty());
        assert!(response.expiration > Utc::now().timestamp());

        let claims = coordinator
            .token_service()
            .validate_access_token(&response.token)
            .unwrap();
        assert_eq!(claims.roles, vec!["Customer".to_string()]);
    }

    #[tokio::test]
    async fn login_failures_share_one_response_shape() {
        let (api, _) = test_api().await;

        let absent = api
            .login(Json(LoginRequest {
                email: "ghost@x.com".to_string(),
                password: "pw123".to_string(),
            }))
            .await;
        let mismatch = api
            .login(Json(LoginRequest {
                email: "a@x.com".to_string(),
                password: "wrong".to_string(),
            }))
            .await;

        let bodies: Vec<_> = [absent, mismatch]
            .into_iter()
            .map(|r| match r {
                Err(AuthError::InvalidCredentials(json)) => {
                    (json.0.error.clone(), json.0.message.clone())
                }
                other => panic!("expected InvalidCredentials, got {:?}", other),
            })
            .collect();
        assert_eq!(bodies[0], bodies[1]);
    }

    #[tokio::test]
    async fn register_then_login() {
        let (api, _) = test_api().await;

        let created = api
            .register(Json(RegisterRequest {
                email: "b@x.com".to_string(),
                password: "pw456".to_string(),
            }))
            .await
            .unwrap();
        assert_eq!(created.email, "b@x.com");

        let login = api
            .login(Json(LoginRequest {
                email: "b@x.com".to_string(),
                password: "pw456".to_string(),
            }))
            .await;
        assert!(login.is_ok());
    }

    #[tokio::test]
    async fn register_duplicate_email_is_400() {
        let (api, _) = test_api().await;

        let result = api
            .register(Json(RegisterRequest {
                email: "A@X.com".to_string(),
                password: "pw456".to_string(),
            }))
            .await;

        assert!(matches!(result, Err(AuthError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn refresh_rotates_and_old_token_dies() {
        let (api, _) = test_api().await;

        let login = api
            .login(Json(LoginRequest {
                email: "a@x.com".to_string(),
                password: "pw123".to_string(),
            }))
            .await
            .unwrap();

        let refreshed = api
            .refresh(Json(RefreshRequest {
                refresh_token: login.refresh_token.clone(),
            }))
            .await
            .unwrap();
        assert_ne!(refreshed.refresh_token, login.refresh_token);

        let stale = api
            .refresh(Json(RefreshRequest {
                refresh_token: login.refresh_token.clone(),
            }))
            .await;
        assert!(matches!(stale, Err(AuthError::InvalidRefreshToken(_))));
    }

    #[tokio::test]
    async fn revoke_requires_valid_bearer_and_kills_refresh() {
        let (api, _) = test_api().await;

        let login = api
            .login(Json(LoginRequest {
                email: "a@x.com".to_string(),
                password: "pw123".to_string(),
            }))
            .await
            .unwrap();

        let bad = api
            .revoke(BearerAuth(Bearer {
                token: "not-a-jwt".to_string(),
            }))
            .await;
        assert!(matches!(bad, Err(AuthError::InvalidToken(_))));

        api.revoke(BearerAuth(Bearer {
            token: login.token.clone(),
        }))
        .await
        .unwrap();

        let after = api
            .refresh(Json(RefreshRequest {
                refresh_token: login.refresh_token.clone(),
            }))
            .await;
        assert!(after.is_err());
    }
}
