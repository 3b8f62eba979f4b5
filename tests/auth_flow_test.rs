// End-to-end authentication flow: register, login, refresh, revoke.

mod common;

use chrono::Utc;
use common::setup_auth;
use storefront_backend::errors::internal::{CredentialError, InternalError};

#[tokio::test]
async fn customer_login_scenario() {
    let (coordinator, store, token_service) = setup_auth().await;
    store
        .add_user("a@x.com", "pw123", &["Customer"])
        .await
        .expect("Failed to create user");

    let tokens = coordinator.login("a@x.com", "pw123").await.unwrap();

    let claims = token_service.validate_access_token(&tokens.token).unwrap();
    assert_eq!(claims.roles, vec!["Customer".to_string()]);
    assert!(!tokens.refresh_token.is_empty());
    assert!(tokens.expiration > Utc::now().timestamp());
}

#[tokio::test]
async fn token_claims_track_current_roles_exactly() {
    let (coordinator, store, token_service) = setup_auth().await;
    let created = store
        .add_user("multi@x.com", "pw123", &["Admin", "Customer"])
        .await
        .unwrap();

    let tokens = coordinator.login("multi@x.com", "pw123").await.unwrap();
    let claims = token_service.validate_access_token(&tokens.token).unwrap();

    assert_eq!(claims.sub, created.id);
    assert_eq!(
        claims.roles,
        vec!["Admin".to_string(), "Customer".to_string()]
    );
}

#[tokio::test]
async fn failed_logins_never_reveal_which_field_was_wrong() {
    let (coordinator, store, _) = setup_auth().await;
    store
        .add_user("a@x.com", "pw123", &["Customer"])
        .await
        .unwrap();

    let absent = coordinator.login("unregistered@x.com", "whatever").await;
    let mismatch = coordinator.login("a@x.com", "wrong").await;

    let messages: Vec<String> = [absent, mismatch]
        .into_iter()
        .map(|r| match r {
            Err(InternalError::Credential(e @ CredentialError::InvalidCredentials)) => {
                e.to_string()
            }
            other => panic!("expected InvalidCredentials, got {:?}", other),
        })
        .collect();
    assert_eq!(messages[0], messages[1]);
    assert!(!messages[0].to_lowercase().contains("user"));
}

#[tokio::test]
async fn refresh_chain_honors_rotation_and_revocation() {
    let (coordinator, store, _) = setup_auth().await;
    let created = store
        .add_user("a@x.com", "pw123", &["Customer"])
        .await
        .unwrap();

    // Two logins: only the second refresh token survives.
    let first = coordinator.login("a@x.com", "pw123").await.unwrap();
    let second = coordinator.login("a@x.com", "pw123").await.unwrap();
    assert!(coordinator.refresh(&first.refresh_token).await.is_err());

    // Refresh rotates again.
    let rotated = coordinator.refresh(&second.refresh_token).await.unwrap();
    assert!(coordinator.refresh(&second.refresh_token).await.is_err());

    // Revoke kills the live chain.
    coordinator.revoke(&created.id).await.unwrap();
    assert!(coordinator.refresh(&rotated.refresh_token).await.is_err());

    let user = store.get_user_by_id(&created.id).await.unwrap();
    assert!(user.refresh_token_hash.is_none());
    assert!(user.refresh_token_expires_at.is_none());
}

#[tokio::test]
async fn login_updates_stored_refresh_state_each_time() {
    let (coordinator, store, _) = setup_auth().await;
    let created = store
        .add_user("a@x.com", "pw123", &["Customer"])
        .await
        .unwrap();

    coordinator.login("a@x.com", "pw123").await.unwrap();
    let after_first = store.get_user_by_id(&created.id).await.unwrap();

    coordinator.login("a@x.com", "pw123").await.unwrap();
    let after_second = store.get_user_by_id(&created.id).await.unwrap();

    assert!(after_first.refresh_token_hash.is_some());
    assert_ne!(
        after_first.refresh_token_hash,
        after_second.refresh_token_hash
    );
    assert_ne!(after_first.security_stamp, after_second.security_stamp);
}
