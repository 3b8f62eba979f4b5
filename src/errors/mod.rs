// Two-layer error design: `internal` holds thiserror enums returned by
// stores, services and coordinators; `auth` and `catalog` hold the
// ApiResponse enums that decide HTTP status codes.

pub mod auth;
pub mod catalog;
pub mod internal;

pub use auth::AuthError;
pub use catalog::CatalogApiError;
pub use internal::{CatalogError, CredentialError, DatabaseError, InternalError};
