use std::sync::Arc;

use crate::errors::internal::InternalError;
use crate::services::TokenService;
use crate::stores::CredentialStore;
use crate::types::db::user;

/// Provider slot used for the best-effort access-token cache.
const TOKEN_CACHE_PROVIDER: &str = "default";
const TOKEN_CACHE_NAME: &str = "access_token";

/// Role granted to every self-registered user.
pub const DEFAULT_ROLE: &str = "Customer";

/// Tokens handed back to a successfully authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub token: String,
    pub refresh_token: String,
    /// Access token expiry, unix seconds.
    pub expiration: i64,
}

/// Orchestrates the authentication workflows by composing the credential
/// store and the token service. Contains no persistence or crypto of its
/// own - it only sequences the steps.
pub struct AuthCoordinator {
    credential_store: Arc<CredentialStore>,
    token_service: Arc<TokenService>,
}

impl AuthCoordinator {
    pub fn new(credential_store: Arc<CredentialStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            credential_store,
            token_service,
        }
    }

    /// The login flow:
    ///
    /// 1. look up the user by email (absent coalesces into invalid
    ///    credentials),
    /// 2. verify the password (same error on mismatch),
    /// 3. load the user's roles,
    /// 4. issue the access token,
    /// 5. generate a fresh refresh token,
    /// 6. overwrite the stored refresh token + expiry and rotate the
    ///    security stamp,
    /// 7. cache the access token, best-effort.
    ///
    /// Storage failures during step 6 propagate as-is; they are
    /// infrastructure errors, never credential errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, InternalError> {
        let user = self
            .credential_store
            .verify_credentials(email, password)
            .await?;

        self.issue_tokens(&user).await
    }

    /// Exchange a live refresh token for a new access token and a new
    /// refresh token. Rotation means the presented token stops working
    /// the moment the exchange succeeds.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, InternalError> {
        let token_hash = self.token_service.hash_refresh_token(refresh_token);
        let user = self
            .credential_store
            .validate_refresh_token(&token_hash)
            .await?;

        self.issue_tokens(&user).await
    }

    /// Create a user with the default role.
    pub async fn register(&self, email: &str, password: &str) -> Result<user::Model, InternalError> {
        let created = self
            .credential_store
            .add_user(email, password, &[DEFAULT_ROLE])
            .await?;

        tracing::info!(user_id = %created.id, "user registered");
        Ok(created)
    }

    /// Drop the caller's refresh token, ending the refresh chain.
    pub async fn revoke(&self, user_id: &str) -> Result<(), InternalError> {
        self.credential_store.revoke_refresh_token(user_id).await?;
        tracing::info!(user_id = %user_id, "refresh token revoked");
        Ok(())
    }

    pub fn token_service(&self) -> Arc<TokenService> {
        self.token_service.clone()
    }

    async fn issue_tokens(&self, user: &user::Model) -> Result<AuthTokens, InternalError> {
        let roles = self.credential_store.roles_for_user(&user.id).await?;

        let issued = self
            .token_service
            .issue_access_token(&user.id, &user.email, roles)?;

        let refresh_token = self.token_service.generate_refresh_token();
        let token_hash = self.token_service.hash_refresh_token(&refresh_token);
        let expires_at = self.token_service.refresh_token_expiration();

        self.credential_store
            .store_refresh_token(&user.id, &token_hash, expires_at)
            .await?;

        // Best-effort cache; the contract does not depend on it.
        if let Err(e) = self
            .credential_store
            .cache_token(&user.id, TOKEN_CACHE_PROVIDER, TOKEN_CACHE_NAME, &issued.token)
            .await
        {
            tracing::warn!(user_id = %user.id, "access token cache write failed: {:?}", e);
        }

        Ok(AuthTokens {
            token: issued.token,
            refresh_token,
            expiration: issued.expires_at,
        })
    }
}
