use thiserror::Error;

/// Credential and token failures.
///
/// `InvalidCredentials` deliberately covers both "no such user" and "wrong
/// password" so the API cannot be used to enumerate registered emails.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User already exists: {0}")]
    DuplicateEmail(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Password hashing failed: {0}")]
    PasswordHashingFailed(String),

    #[error("Invalid token: {token_type} - {reason}")]
    InvalidToken { token_type: String, reason: String },

    #[error("Expired token: {0}")]
    ExpiredToken(String),

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Refresh token has expired")]
    ExpiredRefreshToken,
}

impl CredentialError {
    pub fn invalid_token(token_type: &str, reason: &str) -> Self {
        Self::InvalidToken {
            token_type: token_type.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {operation} failed: {source}")]
    Operation {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Starting transaction failed: {source}")]
    TransactionBegin {
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Committing transaction failed: {source}")]
    TransactionCommit {
        #[source]
        source: sea_orm::DbErr,
    },
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
}

/// Internal error type for store, service and coordinator operations.
///
/// Never exposed over HTTP directly - the API layer converts into the
/// `ApiResponse` error enums, which decide the status code.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse { value_type: String, message: String },
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> Self {
        Self::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn crypto(operation: &str, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    pub fn parse(value_type: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::Catalog(CatalogError::NotFound { entity, id })
    }
}
