use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use storefront_backend::config::JwtSettings;
use storefront_backend::coordinators::AuthCoordinator;
use storefront_backend::services::TokenService;
use storefront_backend::stores::CredentialStore;

pub fn test_jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: "integration-secret-key-32-characters!!".to_string(),
        refresh_token_secret: "integration-refresh-secret-32-chars!!!".to_string(),
        issuer: "storefront-integration".to_string(),
        audience: "storefront-integration".to_string(),
        token_validity_minutes: 15,
        refresh_token_validity_days: 7,
    }
}

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn setup_auth() -> (AuthCoordinator, Arc<CredentialStore>, Arc<TokenService>) {
    let db = setup_db().await;
    let credential_store = Arc::new(CredentialStore::new(db));
    let token_service = Arc::new(TokenService::new(test_jwt_settings()));
    let coordinator = AuthCoordinator::new(credential_store.clone(), token_service.clone());
    (coordinator, credential_store, token_service)
}
