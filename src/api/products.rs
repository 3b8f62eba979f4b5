use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::errors::catalog::CatalogApiError;
use crate::stores::{ProductInput, ProductStore};
use crate::types::dto::catalog::{ProductRequest, ProductResponse};

#[derive(Tags)]
enum ProductTags {
    /// Product management endpoints
    Products,
}

/// Product CRUD endpoints
pub struct ProductsApi {
    store: Arc<ProductStore>,
}

impl ProductsApi {
    pub fn new(store: Arc<ProductStore>) -> Self {
        Self { store }
    }
}

impl From<ProductRequest> for ProductInput {
    fn from(body: ProductRequest) -> Self {
        Self {
            title: body.title,
            description: body.description,
            brand_id: body.brand_id,
            price: body.price,
            discount: body.discount,
            category_ids: body.category_ids,
        }
    }
}

#[OpenApi(prefix_path = "/products")]
impl ProductsApi {
    /// Create a product with its category links
    #[oai(path = "/", method = "post", tag = "ProductTags::Products")]
    async fn create(
        &self,
        body: Json<ProductRequest>,
    ) -> Result<Json<ProductResponse>, CatalogApiError> {
        let (created, category_ids) = self.store.create(body.0.into()).await?;
        Ok(Json(ProductResponse::from_model(created, category_ids)))
    }

    /// List all products (soft-deleted rows are excluded)
    #[oai(path = "/", method = "get", tag = "ProductTags::Products")]
    async fn list(&self) -> Result<Json<Vec<ProductResponse>>, CatalogApiError> {
        let rows = self.store.list().await?;
        Ok(Json(
            rows.into_iter()
                .map(|(model, ids)| ProductResponse::from_model(model, ids))
                .collect(),
        ))
    }

    /// Fetch a single product by id
    #[oai(path = "/:id", method = "get", tag = "ProductTags::Products")]
    async fn get(&self, id: Path<i32>) -> Result<Json<ProductResponse>, CatalogApiError> {
        let (model, category_ids) = self.store.get(id.0).await?;
        Ok(Json(ProductResponse::from_model(model, category_ids)))
    }

    /// Update a product, replacing its category links
    #[oai(path = "/:id", method = "put", tag = "ProductTags::Products")]
    async fn update(
        &self,
        id: Path<i32>,
        body: Json<ProductRequest>,
    ) -> Result<Json<ProductResponse>, CatalogApiError> {
        let (model, category_ids) = self.store.update(id.0, body.0.into()).await?;
        Ok(Json(ProductResponse::from_model(model, category_ids)))
    }

    /// Soft-delete a product
    #[oai(path = "/:id", method = "delete", tag = "ProductTags::Products")]
    async fn delete(&self, id: Path<i32>) -> Result<(), CatalogApiError> {
        self.store.delete(id.0).await?;
        Ok(())
    }
}
