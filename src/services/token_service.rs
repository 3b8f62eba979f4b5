use std::fmt;

use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::prelude::*;
use sha2::Sha256;
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::errors::internal::{CredentialError, InternalError};
use crate::types::internal::Claims;

type HmacSha256 = Hmac<Sha256>;

/// An access token fresh off the press, together with its expiry and id.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
    pub jti: String,
}

/// Issues and validates signed access tokens and generates the opaque
/// refresh tokens that accompany them.
///
/// Access tokens are HS256 JWTs carrying the user id and role names, scoped
/// to the configured issuer and audience. Refresh tokens are random and never
/// stored in the clear - `hash_refresh_token` produces the HMAC-SHA256 digest
/// that goes to the database.
pub struct TokenService {
    settings: JwtSettings,
}

impl TokenService {
    pub fn new(settings: JwtSettings) -> Self {
        Self { settings }
    }

    /// Issue a signed access token embedding the user's id, email and roles.
    pub fn issue_access_token(
        &self,
        user_id: &str,
        email: &str,
        roles: Vec<String>,
    ) -> Result<IssuedToken, InternalError> {
        let now = Utc::now().timestamp();
        let expires_at = now + self.settings.token_validity_minutes * 60;
        let jti = Uuid::new_v4().to_string();

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            roles,
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
            iat: now,
            exp: expires_at,
            jti: jti.clone(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.settings.secret.as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_generation", e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_at,
            jti,
        })
    }

    /// Validate an access token's signature, expiry, issuer and audience.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, InternalError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.settings.issuer]);
        validation.set_audience(&[&self.settings.audience]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                InternalError::from(CredentialError::ExpiredToken("jwt".to_string()))
            }
            _ => InternalError::from(CredentialError::invalid_token(
                "jwt",
                "invalid signature or malformed",
            )),
        })?;

        Ok(token_data.claims)
    }

    /// Generate a cryptographically random refresh token (32 bytes, base64).
    pub fn generate_refresh_token(&self) -> String {
        let mut rng = rand::rng();
        let random_bytes: [u8; 32] = rng.random();
        general_purpose::STANDARD.encode(random_bytes)
    }

    /// HMAC-SHA256 a refresh token for at-rest storage, hex encoded.
    pub fn hash_refresh_token(&self, token: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(self.settings.refresh_token_secret.as_bytes())
                .expect("HMAC can take key of any size");
        mac.update(token.as_bytes());
        format!("{:x}", mac.finalize().into_bytes())
    }

    /// Expiry for a refresh token issued now (unix seconds).
    pub fn refresh_token_expiration(&self) -> i64 {
        Utc::now().timestamp() + self.settings.refresh_token_validity_days * 24 * 60 * 60
    }

    pub fn refresh_token_validity_days(&self) -> i64 {
        self.settings.refresh_token_validity_days
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.settings.issuer)
            .field("audience", &self.settings.audience)
            .field("token_validity_minutes", &self.settings.token_validity_minutes)
            .field(
                "refresh_token_validity_days",
                &self.settings.refresh_token_validity_days,
            )
            .finish()
    }
}
