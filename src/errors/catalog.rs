use poem_openapi::{payload::Json, ApiResponse};

use crate::errors::internal::{CatalogError, InternalError};
use crate::types::dto::common::ErrorResponse;

/// Error surface of the catalog endpoints.
#[derive(ApiResponse, Debug)]
pub enum CatalogApiError {
    /// Requested row does not exist (or is soft-deleted)
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Request failed validation
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl CatalogApiError {
    pub fn not_found(entity: &str, id: i32) -> Self {
        CatalogApiError::NotFound(Json(ErrorResponse::new(
            "not_found",
            format!("{} {} not found", entity, id),
            404,
        )))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        CatalogApiError::BadRequest(Json(ErrorResponse::new("bad_request", message, 400)))
    }

    pub fn internal_error() -> Self {
        CatalogApiError::InternalError(Json(ErrorResponse::new(
            "internal_error",
            "Internal server error",
            500,
        )))
    }
}

impl From<InternalError> for CatalogApiError {
    fn from(err: InternalError) -> Self {
        match err {
            InternalError::Catalog(CatalogError::NotFound { entity, id }) => {
                CatalogApiError::not_found(entity, id)
            }
            other => {
                tracing::error!("Catalog endpoint internal error: {:?}", other);
                CatalogApiError::internal_error()
            }
        }
    }
}
