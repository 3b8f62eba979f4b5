use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::internal::InternalError;
use crate::types::db::category;

/// Catalog categories, optionally nested via `parent_id` and ordered by
/// `priority` within a listing.
pub struct CategoryStore {
    db: DatabaseConnection,
}

impl CategoryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        name: &str,
        parent_id: Option<i32>,
        priority: i32,
    ) -> Result<category::Model, InternalError> {
        let now = Utc::now().timestamp();
        category::ActiveModel {
            name: Set(name.to_string()),
            parent_id: Set(parent_id),
            priority: Set(priority),
            created_at: Set(now),
            updated_at: Set(now),
            is_deleted: Set(false),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_category", e))
    }

    pub async fn get(&self, id: i32) -> Result<category::Model, InternalError> {
        category::Entity::find_by_id(id)
            .filter(category::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_category", e))?
            .ok_or_else(|| InternalError::not_found("category", id))
    }

    /// Live categories ordered by priority, then id.
    pub async fn list(&self) -> Result<Vec<category::Model>, InternalError> {
        category::Entity::find()
            .filter(category::Column::IsDeleted.eq(false))
            .order_by_asc(category::Column::Priority)
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_categories", e))
    }

    pub async fn update(
        &self,
        id: i32,
        name: &str,
        parent_id: Option<i32>,
        priority: i32,
    ) -> Result<category::Model, InternalError> {
        let found = self.get(id).await?;

        let mut active: category::ActiveModel = found.into();
        active.name = Set(name.to_string());
        active.parent_id = Set(parent_id);
        active.priority = Set(priority);
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_category", e))
    }

    pub async fn delete(&self, id: i32) -> Result<(), InternalError> {
        let found = self.get(id).await?;

        let mut active: category::ActiveModel = found.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_category", e))?;
        Ok(())
    }
}
