use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Settings;
use crate::services::TokenService;
use crate::stores::{BrandStore, CategoryStore, CredentialStore, DetailStore, ProductStore};

/// Centralized application data following the main-owned stores pattern.
///
/// Everything is created once at startup and shared behind `Arc`s; API
/// services and coordinators borrow from here instead of constructing
/// their own stores.
pub struct AppData {
    pub db: DatabaseConnection,
    pub token_service: Arc<TokenService>,
    pub credential_store: Arc<CredentialStore>,
    pub product_store: Arc<ProductStore>,
    pub brand_store: Arc<BrandStore>,
    pub category_store: Arc<CategoryStore>,
    pub detail_store: Arc<DetailStore>,
}

impl AppData {
    /// Wire up all stores and services. The connection should already be
    /// migrated.
    pub fn init(settings: &Settings, db: DatabaseConnection) -> Self {
        tracing::debug!("Creating stores...");
        let token_service = Arc::new(TokenService::new(settings.jwt.clone()));
        let credential_store = Arc::new(CredentialStore::new(db.clone()));
        let product_store = Arc::new(ProductStore::new(db.clone()));
        let brand_store = Arc::new(BrandStore::new(db.clone()));
        let category_store = Arc::new(CategoryStore::new(db.clone()));
        let detail_store = Arc::new(DetailStore::new(db.clone()));
        tracing::debug!("Stores created");

        Self {
            db,
            token_service,
            credential_store,
            product_store,
            brand_store,
            category_store,
            detail_store,
        }
    }
}
