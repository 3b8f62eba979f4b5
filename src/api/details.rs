use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::errors::catalog::CatalogApiError;
use crate::stores::DetailStore;
use crate::types::dto::catalog::{DetailRequest, DetailResponse};

#[derive(Tags)]
enum DetailTags {
    /// Detail management endpoints
    Details,
}

/// Detail CRUD endpoints
pub struct DetailsApi {
    store: Arc<DetailStore>,
}

impl DetailsApi {
    pub fn new(store: Arc<DetailStore>) -> Self {
        Self { store }
    }
}

#[OpenApi(prefix_path = "/details")]
impl DetailsApi {
    /// Create a detail entry
    #[oai(path = "/", method = "post", tag = "DetailTags::Details")]
    async fn create(
        &self,
        body: Json<DetailRequest>,
    ) -> Result<Json<DetailResponse>, CatalogApiError> {
        let created = self
            .store
            .create(&body.title, body.description.clone(), body.category_id)
            .await?;
        Ok(Json(created.into()))
    }

    /// List all detail entries
    #[oai(path = "/", method = "get", tag = "DetailTags::Details")]
    async fn list(&self) -> Result<Json<Vec<DetailResponse>>, CatalogApiError> {
        let rows = self.store.list().await?;
        Ok(Json(rows.into_iter().map(Into::into).collect()))
    }

    /// Fetch a single detail entry by id
    #[oai(path = "/:id", method = "get", tag = "DetailTags::Details")]
    async fn get(&self, id: Path<i32>) -> Result<Json<DetailResponse>, CatalogApiError> {
        Ok(Json(self.store.get(id.0).await?.into()))
    }

    /// Update a detail entry
    #[oai(path = "/:id", method = "put", tag = "DetailTags::Details")]
    async fn update(
        &self,
        id: Path<i32>,
        body: Json<DetailRequest>,
    ) -> Result<Json<DetailResponse>, CatalogApiError> {
        let updated = self
            .store
            .update(id.0, &body.title, body.description.clone(), body.category_id)
            .await?;
        Ok(Json(updated.into()))
    }

    /// Soft-delete a detail entry
    #[oai(path = "/:id", method = "delete", tag = "DetailTags::Details")]
    async fn delete(&self, id: Path<i32>) -> Result<(), CatalogApiError> {
        self.store.delete(id.0).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::CategoryStore;
    use crate::test::utils::setup_test_db;

    #[tokio::test]
    async fn detail_endpoints_round_trip() {
        let db = setup_test_db().await;
        let category = CategoryStore::new(db.clone())
            .create("Specs", None, 0)
            .await
            .unwrap();
        let api = DetailsApi::new(Arc::new(DetailStore::new(db)));

        let created = api
            .create(Json(DetailRequest {
                title: "Weight".to_string(),
                description: Some("1.2kg".to_string()),
                category_id: category.id,
            }))
            .await
            .unwrap();

        let fetched = api.get(Path(created.id)).await.unwrap();
        assert_eq!(fetched.category_id, category.id);

        api.delete(Path(created.id)).await.unwrap();
        assert!(matches!(
            api.get(Path(created.id)).await,
            Err(CatalogApiError::NotFound(_))
        ));
    }
}
