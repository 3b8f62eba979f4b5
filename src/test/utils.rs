use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::config::JwtSettings;
use crate::coordinators::AuthCoordinator;
use crate::services::TokenService;
use crate::stores::CredentialStore;

/// Fresh in-memory database with the full schema applied.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Auth coordinator wired against a fresh in-memory database, plus the
/// credential store it uses, for direct state assertions.
pub async fn setup_test_auth() -> (AuthCoordinator, Arc<CredentialStore>) {
    let db = setup_test_db().await;
    let credential_store = Arc::new(CredentialStore::new(db));
    let token_service = Arc::new(TokenService::new(JwtSettings::for_tests()));
    let coordinator = AuthCoordinator::new(credential_store.clone(), token_service);
    (coordinator, credential_store)
}
