use std::env;

use thiserror::Error;

const MIN_SECRET_LENGTH: usize = 32;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required setting '{0}' is missing")]
    Missing(String),

    #[error("Setting '{name}' must be at least {expected} characters, got {actual}")]
    TooShort {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Setting '{name}' has an invalid value: {message}")]
    Invalid { name: String, message: String },
}

/// Token issuance settings.
///
/// Secrets are required and length-checked at startup; expiry windows fall
/// back to defaults when unset. `secret` signs access tokens,
/// `refresh_token_secret` keys the HMAC under which refresh tokens are
/// stored.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub refresh_token_secret: String,
    pub issuer: String,
    pub audience: String,
    pub token_validity_minutes: i64,
    pub refresh_token_validity_days: i64,
}

impl JwtSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: required_secret("JWT_SECRET")?,
            refresh_token_secret: required_secret("REFRESH_TOKEN_SECRET")?,
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "storefront".to_string()),
            audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| "storefront".to_string()),
            token_validity_minutes: optional_i64("JWT_TOKEN_VALIDITY_MINUTES", 15)?,
            refresh_token_validity_days: optional_i64("REFRESH_TOKEN_VALIDITY_DAYS", 7)?,
        })
    }
}

/// Top-level application settings loaded once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    pub jwt: JwtSettings,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://storefront.db?mode=rwc".to_string()),
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            jwt: JwtSettings::from_env()?,
        })
    }
}

fn required_secret(name: &str) -> Result<String, ConfigError> {
    let value = env::var(name).map_err(|_| ConfigError::Missing(name.to_string()))?;
    if value.len() < MIN_SECRET_LENGTH {
        return Err(ConfigError::TooShort {
            name: name.to_string(),
            expected: MIN_SECRET_LENGTH,
            actual: value.len(),
        });
    }
    Ok(value)
}

fn optional_i64(name: &str, default: i64) -> Result<i64, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            name: name.to_string(),
            message: format!("'{}' is not an integer", raw),
        }),
    }
}

#[cfg(test)]
impl JwtSettings {
    /// Fixed settings for unit tests; no environment access.
    pub fn for_tests() -> Self {
        Self {
            secret: "test-secret-key-minimum-32-characters-long".to_string(),
            refresh_token_secret: "test-refresh-secret-minimum-32-chars".to_string(),
            issuer: "storefront-tests".to_string(),
            audience: "storefront-tests".to_string(),
            token_validity_minutes: 15,
            refresh_token_validity_days: 7,
        }
    }
}
