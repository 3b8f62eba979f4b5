use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::internal::InternalError;
use crate::types::db::brand;

/// Catalog brands. Soft-deleted rows stay in the table but never surface
/// through reads.
pub struct BrandStore {
    db: DatabaseConnection,
}

impl BrandStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: &str) -> Result<brand::Model, InternalError> {
        let now = Utc::now().timestamp();
        brand::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            is_deleted: Set(false),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_brand", e))
    }

    pub async fn get(&self, id: i32) -> Result<brand::Model, InternalError> {
        brand::Entity::find_by_id(id)
            .filter(brand::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_brand", e))?
            .ok_or_else(|| InternalError::not_found("brand", id))
    }

    pub async fn list(&self) -> Result<Vec<brand::Model>, InternalError> {
        brand::Entity::find()
            .filter(brand::Column::IsDeleted.eq(false))
            .order_by_asc(brand::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_brands", e))
    }

    pub async fn update(&self, id: i32, name: &str) -> Result<brand::Model, InternalError> {
        let found = self.get(id).await?;

        let mut active: brand::ActiveModel = found.into();
        active.name = Set(name.to_string());
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_brand", e))
    }

    pub async fn delete(&self, id: i32) -> Result<(), InternalError> {
        let found = self.get(id).await?;

        let mut active: brand::ActiveModel = found.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_brand", e))?;
        Ok(())
    }
}
