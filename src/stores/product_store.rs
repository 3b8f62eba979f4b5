use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::errors::internal::{DatabaseError, InternalError};
use crate::types::db::{product, product_category};

/// Catalog products plus their category links. Deletes are soft: rows are
/// flagged and disappear from reads, the join rows stay until the product
/// row itself goes.
pub struct ProductStore {
    db: DatabaseConnection,
}

/// Fields accepted when creating or updating a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub title: String,
    pub description: Option<String>,
    pub brand_id: Option<i32>,
    pub price: f64,
    pub discount: f64,
    pub category_ids: Vec<i32>,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a product and its category links in one transaction.
    pub async fn create(
        &self,
        input: ProductInput,
    ) -> Result<(product::Model, Vec<i32>), InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionBegin { source: e })?;

        let now = Utc::now().timestamp();
        let created = product::ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            brand_id: Set(input.brand_id),
            price: Set(input.price),
            discount: Set(input.discount),
            created_at: Set(now),
            updated_at: Set(now),
            is_deleted: Set(false),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| InternalError::database("insert_product", e))?;

        for category_id in &input.category_ids {
            product_category::Entity::insert(product_category::ActiveModel {
                product_id: Set(created.id),
                category_id: Set(*category_id),
            })
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("insert_product_category", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| DatabaseError::TransactionCommit { source: e })?;

        Ok((created, input.category_ids))
    }

    /// Fetch a live (non-deleted) product with its category ids.
    pub async fn get(&self, id: i32) -> Result<(product::Model, Vec<i32>), InternalError> {
        let found = product::Entity::find_by_id(id)
            .filter(product::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_product", e))?
            .ok_or_else(|| InternalError::not_found("product", id))?;

        let category_ids = self.category_ids(id).await?;
        Ok((found, category_ids))
    }

    /// All live products, oldest first.
    pub async fn list(&self) -> Result<Vec<(product::Model, Vec<i32>)>, InternalError> {
        let rows = product::Entity::find()
            .filter(product::Column::IsDeleted.eq(false))
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_products", e))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let category_ids = self.category_ids(row.id).await?;
            out.push((row, category_ids));
        }
        Ok(out)
    }

    /// Update a live product, replacing its category links.
    pub async fn update(
        &self,
        id: i32,
        input: ProductInput,
    ) -> Result<(product::Model, Vec<i32>), InternalError> {
        let found = product::Entity::find_by_id(id)
            .filter(product::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_product", e))?
            .ok_or_else(|| InternalError::not_found("product", id))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionBegin { source: e })?;

        let mut active: product::ActiveModel = found.into();
        active.title = Set(input.title);
        active.description = Set(input.description);
        active.brand_id = Set(input.brand_id);
        active.price = Set(input.price);
        active.discount = Set(input.discount);
        active.updated_at = Set(Utc::now().timestamp());
        let updated = active
            .update(&txn)
            .await
            .map_err(|e| InternalError::database("update_product", e))?;

        product_category::Entity::delete_many()
            .filter(product_category::Column::ProductId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("clear_product_categories", e))?;

        for category_id in &input.category_ids {
            product_category::Entity::insert(product_category::ActiveModel {
                product_id: Set(id),
                category_id: Set(*category_id),
            })
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("insert_product_category", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| DatabaseError::TransactionCommit { source: e })?;

        Ok((updated, input.category_ids))
    }

    /// Soft-delete a live product.
    pub async fn delete(&self, id: i32) -> Result<(), InternalError> {
        let found = product::Entity::find_by_id(id)
            .filter(product::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_product", e))?
            .ok_or_else(|| InternalError::not_found("product", id))?;

        let mut active: product::ActiveModel = found.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("delete_product", e))?;

        Ok(())
    }

    async fn category_ids(&self, product_id: i32) -> Result<Vec<i32>, InternalError> {
        let rows = product_category::Entity::find()
            .filter(product_category::Column::ProductId.eq(product_id))
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("product_category_ids", e))?;

        let mut ids: Vec<i32> = rows.into_iter().map(|r| r.category_id).collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::CategoryStore;
    use crate::test::utils::setup_test_db;

    fn input(title: &str, category_ids: Vec<i32>) -> ProductInput {
        ProductInput {
            title: title.to_string(),
            description: None,
            brand_id: None,
            price: 19.99,
            discount: 0.0,
            category_ids,
        }
    }

    async fn seed_categories(db: &DatabaseConnection, names: &[&str]) -> Vec<i32> {
        let store = CategoryStore::new(db.clone());
        let mut ids = Vec::new();
        for name in names {
            let created = store.create(name, None, 0).await.unwrap();
            ids.push(created.id);
        }
        ids
    }

    #[tokio::test]
    async fn created_product_round_trips_with_categories() {
        let db = setup_test_db().await;
        let cat_ids = seed_categories(&db, &["Electronics", "Gadgets"]).await;
        let store = ProductStore::new(db);

        let (created, links) = store
            .create(input("Headphones", cat_ids.clone()))
            .await
            .unwrap();
        let (fetched, fetched_links) = store.get(created.id).await.unwrap();

        assert_eq!(fetched.title, "Headphones");
        assert_eq!(links, cat_ids);
        assert_eq!(fetched_links, cat_ids);
    }

    #[tokio::test]
    async fn update_replaces_category_links() {
        let db = setup_test_db().await;
        let cat_ids = seed_categories(&db, &["A", "B", "C"]).await;
        let store = ProductStore::new(db);

        let (created, _) = store
            .create(input("Widget", vec![cat_ids[0], cat_ids[1]]))
            .await
            .unwrap();
        store
            .update(created.id, input("Widget v2", vec![cat_ids[2]]))
            .await
            .unwrap();

        let (updated, links) = store.get(created.id).await.unwrap();
        assert_eq!(updated.title, "Widget v2");
        assert_eq!(links, vec![cat_ids[2]]);
    }

    #[tokio::test]
    async fn soft_deleted_product_disappears_from_reads() {
        let db = setup_test_db().await;
        let store = ProductStore::new(db);

        let (created, _) = store.create(input("Doomed", vec![])).await.unwrap();
        store.delete(created.id).await.unwrap();

        assert!(matches!(
            store.get(created.id).await,
            Err(InternalError::Catalog(_))
        ));
        assert!(store.list().await.unwrap().is_empty());

        // Deleting again is a 404, not a second flip
        assert!(matches!(
            store.delete(created.id).await,
            Err(InternalError::Catalog(_))
        ));
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let db = setup_test_db().await;
        let store = ProductStore::new(db);

        assert!(matches!(
            store.get(999).await,
            Err(InternalError::Catalog(_))
        ));
    }
}
