use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address to authenticate
    pub email: String,

    /// Plaintext password
    pub password: String,
}

/// Response model for login and refresh: signed access token plus the
/// opaque refresh token and the access token's expiry.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed JWT access token
    pub token: String,

    /// Opaque refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Access token expiry (unix seconds)
    pub expiration: i64,
}

/// Request model for user registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Email address (unique, case-insensitive)
    pub email: String,

    /// Plaintext password
    #[oai(validator(min_length = 1))]
    pub password: String,
}

/// Response model for user registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Id of the newly created user
    pub user_id: String,

    /// Registered email address
    pub email: String,
}

/// Request model for token refresh
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token to exchange for new tokens
    pub refresh_token: String,
}

/// Response model for token revocation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RevokeResponse {
    /// Success message
    pub message: String,
}
