use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::internal::InternalError;
use crate::types::db::detail;

/// Free-form detail entries attached to a category.
pub struct DetailStore {
    db: DatabaseConnection,
}

impl DetailStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        title: &str,
        description: Option<String>,
        category_id: i32,
    ) -> Result<detail::Model, InternalError> {
        let now = Utc::now().timestamp();
        detail::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description),
            category_id: Set(category_id),
            created_at: Set(now),
            updated_at: Set(now),
            is_deleted: Set(false),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_detail", e))
    }

    pub async fn get(&self, id: i32) -> Result<detail::Model, InternalError> {
        detail::Entity::find_by_id(id)
            .filter(detail::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_detail", e))?
            .ok_or_else(|| InternalError::not_found("detail", id))
    }

    pub async fn list(&self) -> Result<Vec<detail::Model>, InternalError> {
        detail::Entity::find()
            .filter(detail::Column::IsDeleted.eq(false))
            .order_by_asc(detail::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_details", e))
    }

    pub async fn update(
        &self,
        id: i32,
        title: &str,
        description: Option<String>,
        category_id: i32,
    ) -> Result<detail::Model, InternalError> {
        let found = self.get(id).await?;

        let mut active: detail::ActiveModel = found.into();
        active.title = Set(title.to_string());
        active.description = Set(description);
        active.category_id = Set(category_id);
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_detail", e))
    }

    pub async fn delete(&self, id: i32) -> Result<(), InternalError> {
        let found = self.get(id).await?;

        let mut active: detail::ActiveModel = found.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_detail", e))?;
        Ok(())
    }
}
