use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::errors::catalog::CatalogApiError;
use crate::stores::CategoryStore;
use crate::types::dto::catalog::{CategoryRequest, CategoryResponse};

#[derive(Tags)]
enum CategoryTags {
    /// Category management endpoints
    Categories,
}

/// Category CRUD endpoints
pub struct CategoriesApi {
    store: Arc<CategoryStore>,
}

impl CategoriesApi {
    pub fn new(store: Arc<CategoryStore>) -> Self {
        Self { store }
    }
}

#[OpenApi(prefix_path = "/categories")]
impl CategoriesApi {
    /// Create a category
    #[oai(path = "/", method = "post", tag = "CategoryTags::Categories")]
    async fn create(
        &self,
        body: Json<CategoryRequest>,
    ) -> Result<Json<CategoryResponse>, CatalogApiError> {
        let created = self
            .store
            .create(&body.name, body.parent_id, body.priority)
            .await?;
        Ok(Json(created.into()))
    }

    /// List all categories ordered by priority
    #[oai(path = "/", method = "get", tag = "CategoryTags::Categories")]
    async fn list(&self) -> Result<Json<Vec<CategoryResponse>>, CatalogApiError> {
        let rows = self.store.list().await?;
        Ok(Json(rows.into_iter().map(Into::into).collect()))
    }

    /// Fetch a single category by id
    #[oai(path = "/:id", method = "get", tag = "CategoryTags::Categories")]
    async fn get(&self, id: Path<i32>) -> Result<Json<CategoryResponse>, CatalogApiError> {
        Ok(Json(self.store.get(id.0).await?.into()))
    }

    /// Update a category
    #[oai(path = "/:id", method = "put", tag = "CategoryTags::Categories")]
    async fn update(
        &self,
        id: Path<i32>,
        body: Json<CategoryRequest>,
    ) -> Result<Json<CategoryResponse>, CatalogApiError> {
        let updated = self
            .store
            .update(id.0, &body.name, body.parent_id, body.priority)
            .await?;
        Ok(Json(updated.into()))
    }

    /// Soft-delete a category
    #[oai(path = "/:id", method = "delete", tag = "CategoryTags::Categories")]
    async fn delete(&self, id: Path<i32>) -> Result<(), CatalogApiError> {
        self.store.delete(id.0).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;

    #[tokio::test]
    async fn listing_respects_priority_order() {
        let db = setup_test_db().await;
        let api = CategoriesApi::new(Arc::new(CategoryStore::new(db)));

        api.create(Json(CategoryRequest {
            name: "Second".to_string(),
            parent_id: None,
            priority: 2,
        }))
        .await
        .unwrap();
        api.create(Json(CategoryRequest {
            name: "First".to_string(),
            parent_id: None,
            priority: 1,
        }))
        .await
        .unwrap();

        let listed = api.list().await.unwrap();
        let names: Vec<_> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }
}
