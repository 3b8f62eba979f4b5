use poem_openapi::{payload::Json, ApiResponse};
use std::fmt;

use crate::errors::internal::{CredentialError, InternalError};
use crate::types::dto::common::ErrorResponse;

/// Error surface of the authentication endpoints.
///
/// Only two kinds reach callers of the login flow: invalid credentials
/// (absent user and wrong password are indistinguishable) and internal
/// failures. The token variants exist for the refresh and revoke endpoints.
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Invalid email or password
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Email already registered
    #[oai(status = 400)]
    DuplicateEmail(Json<ErrorResponse>),

    /// Invalid or malformed JWT
    #[oai(status = 401)]
    InvalidToken(Json<ErrorResponse>),

    /// JWT has expired
    #[oai(status = 401)]
    ExpiredToken(Json<ErrorResponse>),

    /// Invalid refresh token
    #[oai(status = 401)]
    InvalidRefreshToken(Json<ErrorResponse>),

    /// Refresh token has expired
    #[oai(status = 401)]
    ExpiredRefreshToken(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AuthError {
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(ErrorResponse::new(
            "invalid_credentials",
            "Invalid email or password",
            401,
        )))
    }

    pub fn duplicate_email() -> Self {
        AuthError::DuplicateEmail(Json(ErrorResponse::new(
            "duplicate_email",
            "A user with this email already exists",
            400,
        )))
    }

    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Json(ErrorResponse::new(
            "invalid_token",
            "Invalid or malformed JWT",
            401,
        )))
    }

    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(Json(ErrorResponse::new(
            "expired_token",
            "JWT has expired",
            401,
        )))
    }

    pub fn invalid_refresh_token() -> Self {
        AuthError::InvalidRefreshToken(Json(ErrorResponse::new(
            "invalid_refresh_token",
            "Invalid refresh token",
            401,
        )))
    }

    pub fn expired_refresh_token() -> Self {
        AuthError::ExpiredRefreshToken(Json(ErrorResponse::new(
            "expired_refresh_token",
            "Refresh token has expired",
            401,
        )))
    }

    pub fn internal_error() -> Self {
        AuthError::InternalError(Json(ErrorResponse::new(
            "internal_error",
            "Internal server error",
            500,
        )))
    }

    pub fn message(&self) -> &str {
        match self {
            AuthError::InvalidCredentials(json)
            | AuthError::DuplicateEmail(json)
            | AuthError::InvalidToken(json)
            | AuthError::ExpiredToken(json)
            | AuthError::InvalidRefreshToken(json)
            | AuthError::ExpiredRefreshToken(json)
            | AuthError::InternalError(json) => &json.0.message,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<InternalError> for AuthError {
    fn from(err: InternalError) -> Self {
        match err {
            InternalError::Credential(cred) => match cred {
                CredentialError::InvalidCredentials => AuthError::invalid_credentials(),
                // UserNotFound must never leak through a credential check;
                // coalesce it like a bad password.
                CredentialError::UserNotFound(_) => AuthError::invalid_credentials(),
                CredentialError::DuplicateEmail(_) => AuthError::duplicate_email(),
                CredentialError::InvalidToken { .. } => AuthError::invalid_token(),
                CredentialError::ExpiredToken(_) => AuthError::expired_token(),
                CredentialError::InvalidRefreshToken => AuthError::invalid_refresh_token(),
                CredentialError::ExpiredRefreshToken => AuthError::expired_refresh_token(),
                CredentialError::PasswordHashingFailed(msg) => {
                    tracing::error!("Password hashing failure: {}", msg);
                    AuthError::internal_error()
                }
            },
            other => {
                tracing::error!("Auth endpoint internal error: {:?}", other);
                AuthError::internal_error()
            }
        }
    }
}
