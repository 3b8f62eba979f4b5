use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::errors::catalog::CatalogApiError;
use crate::stores::BrandStore;
use crate::types::dto::catalog::{BrandRequest, BrandResponse};

#[derive(Tags)]
enum BrandTags {
    /// Brand management endpoints
    Brands,
}

/// Brand CRUD endpoints
pub struct BrandsApi {
    store: Arc<BrandStore>,
}

impl BrandsApi {
    pub fn new(store: Arc<BrandStore>) -> Self {
        Self { store }
    }
}

#[OpenApi(prefix_path = "/brands")]
impl BrandsApi {
    /// Create a brand
    #[oai(path = "/", method = "post", tag = "BrandTags::Brands")]
    async fn create(
        &self,
        body: Json<BrandRequest>,
    ) -> Result<Json<BrandResponse>, CatalogApiError> {
        let created = self.store.create(&body.name).await?;
        Ok(Json(created.into()))
    }

    /// List all brands
    #[oai(path = "/", method = "get", tag = "BrandTags::Brands")]
    async fn list(&self) -> Result<Json<Vec<BrandResponse>>, CatalogApiError> {
        let rows = self.store.list().await?;
        Ok(Json(rows.into_iter().map(Into::into).collect()))
    }

    /// Fetch a single brand by id
    #[oai(path = "/:id", method = "get", tag = "BrandTags::Brands")]
    async fn get(&self, id: Path<i32>) -> Result<Json<BrandResponse>, CatalogApiError> {
        Ok(Json(self.store.get(id.0).await?.into()))
    }

    /// Update a brand
    #[oai(path = "/:id", method = "put", tag = "BrandTags::Brands")]
    async fn update(
        &self,
        id: Path<i32>,
        body: Json<BrandRequest>,
    ) -> Result<Json<BrandResponse>, CatalogApiError> {
        Ok(Json(self.store.update(id.0, &body.name).await?.into()))
    }

    /// Soft-delete a brand
    #[oai(path = "/:id", method = "delete", tag = "BrandTags::Brands")]
    async fn delete(&self, id: Path<i32>) -> Result<(), CatalogApiError> {
        self.store.delete(id.0).await?;
        Ok(())
    }
}
