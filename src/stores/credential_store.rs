use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use crate::errors::internal::{CredentialError, InternalError};
use crate::types::db::{role, user, user_role, user_token};

/// Persists user records: email, password hash, role assignments and the
/// single active refresh token each user may hold.
///
/// Emails are stored twice - as entered and normalized (trimmed, lowercased);
/// all lookups go through the normalized column.
pub struct CredentialStore {
    db: DatabaseConnection,
}

impl CredentialStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Canonical form used for uniqueness and lookups.
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Create a user with the given roles, hashing the password with
    /// Argon2id. Roles that do not exist yet are created.
    ///
    /// # Errors
    /// `CredentialError::DuplicateEmail` when the normalized email is taken.
    pub async fn add_user(
        &self,
        email: &str,
        password: &str,
        roles: &[&str],
    ) -> Result<user::Model, InternalError> {
        let normalized = Self::normalize_email(email);

        let existing = user::Entity::find()
            .filter(user::Column::NormalizedEmail.eq(&normalized))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))?;
        if existing.is_some() {
            return Err(CredentialError::DuplicateEmail(normalized).into());
        }

        let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError::PasswordHashingFailed(e.to_string()))?
            .to_string();

        let now = Utc::now().timestamp();
        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            email: Set(email.trim().to_string()),
            normalized_email: Set(normalized),
            password_hash: Set(password_hash),
            security_stamp: Set(Uuid::new_v4().to_string()),
            refresh_token_hash: Set(None),
            refresh_token_expires_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // The pre-check above races with concurrent registers; the unique
        // constraint on normalized_email is the real gate.
        let created = new_user
            .insert(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    CredentialError::DuplicateEmail(Self::normalize_email(email)).into()
                }
                _ => InternalError::database("insert_user", e),
            })?;

        for role_name in roles {
            let role_id = self.find_or_create_role(role_name).await?;
            user_role::Entity::insert(user_role::ActiveModel {
                user_id: Set(created.id.clone()),
                role_id: Set(role_id),
            })
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_user_role", e))?;
        }

        Ok(created)
    }

    /// Verify email + password, returning the user on success.
    ///
    /// An unknown email and a wrong password both surface as
    /// `InvalidCredentials` so callers cannot probe which one failed.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<user::Model, InternalError> {
        let normalized = Self::normalize_email(email);

        let found = user::Entity::find()
            .filter(user::Column::NormalizedEmail.eq(&normalized))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))?;

        let found = found.ok_or(CredentialError::InvalidCredentials)?;

        let parsed_hash = PasswordHash::new(&found.password_hash)
            .map_err(|_| CredentialError::InvalidCredentials)?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| CredentialError::InvalidCredentials)?;

        Ok(found)
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Result<user::Model, InternalError> {
        user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("get_user_by_id", e))?
            .ok_or_else(|| CredentialError::UserNotFound(user_id.to_string()).into())
    }

    /// Role names assigned to the user, sorted for stable claims.
    pub async fn roles_for_user(&self, user_id: &str) -> Result<Vec<String>, InternalError> {
        let rows: Vec<(user_role::Model, Option<role::Model>)> = user_role::Entity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .find_also_related(role::Entity)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("roles_for_user", e))?;

        let mut names: Vec<String> = rows
            .into_iter()
            .filter_map(|(_, r)| r.map(|r| r.name))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Overwrite the user's refresh token columns and rotate the security
    /// stamp. The overwrite implicitly invalidates any prior refresh token.
    pub async fn store_refresh_token(
        &self,
        user_id: &str,
        token_hash: &str,
        expires_at: i64,
    ) -> Result<(), InternalError> {
        let found = self.get_user_by_id(user_id).await?;

        let mut active: user::ActiveModel = found.into();
        active.refresh_token_hash = Set(Some(token_hash.to_string()));
        active.refresh_token_expires_at = Set(Some(expires_at));
        active.security_stamp = Set(Uuid::new_v4().to_string());
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("store_refresh_token", e))?;

        Ok(())
    }

    /// Resolve a refresh-token hash to its user, enforcing expiry.
    ///
    /// # Errors
    /// `InvalidRefreshToken` when no user holds the hash,
    /// `ExpiredRefreshToken` when the stored expiry has passed.
    pub async fn validate_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<user::Model, InternalError> {
        let found = user::Entity::find()
            .filter(user::Column::RefreshTokenHash.eq(token_hash))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("validate_refresh_token", e))?;

        let found = found.ok_or(CredentialError::InvalidRefreshToken)?;

        let expires_at = found
            .refresh_token_expires_at
            .ok_or(CredentialError::InvalidRefreshToken)?;
        if expires_at < Utc::now().timestamp() {
            return Err(CredentialError::ExpiredRefreshToken.into());
        }

        Ok(found)
    }

    /// Clear the user's refresh token and rotate the security stamp.
    pub async fn revoke_refresh_token(&self, user_id: &str) -> Result<(), InternalError> {
        let found = self.get_user_by_id(user_id).await?;

        let mut active: user::ActiveModel = found.into();
        active.refresh_token_hash = Set(None);
        active.refresh_token_expires_at = Set(None);
        active.security_stamp = Set(Uuid::new_v4().to_string());
        active.updated_at = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("revoke_refresh_token", e))?;

        Ok(())
    }

    /// Upsert a cached token value for (user, provider, name).
    ///
    /// Callers treat this as best-effort; the login flow logs failures
    /// instead of propagating them.
    pub async fn cache_token(
        &self,
        user_id: &str,
        provider: &str,
        name: &str,
        value: &str,
    ) -> Result<(), InternalError> {
        let row = user_token::ActiveModel {
            user_id: Set(user_id.to_string()),
            provider: Set(provider.to_string()),
            name: Set(name.to_string()),
            value: Set(value.to_string()),
        };

        user_token::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    user_token::Column::UserId,
                    user_token::Column::Provider,
                    user_token::Column::Name,
                ])
                .update_column(user_token::Column::Value)
                .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| InternalError::database("cache_token", e))?;

        Ok(())
    }

    async fn find_or_create_role(&self, name: &str) -> Result<i32, InternalError> {
        let existing = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_role", e))?;
        if let Some(found) = existing {
            return Ok(found.id);
        }

        let created = role::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| InternalError::database("insert_role", e))?;

        Ok(created.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;

    #[tokio::test]
    async fn add_user_normalizes_email_and_assigns_roles() {
        let db = setup_test_db().await;
        let store = CredentialStore::new(db);

        let created = store
            .add_user("  Jane.Doe@Example.COM ", "pw123", &["Customer"])
            .await
            .unwrap();

        assert_eq!(created.normalized_email, "jane.doe@example.com");
        assert_eq!(created.email, "Jane.Doe@Example.COM");
        assert!(created.refresh_token_hash.is_none());

        let roles = store.roles_for_user(&created.id).await.unwrap();
        assert_eq!(roles, vec!["Customer".to_string()]);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let db = setup_test_db().await;
        let store = CredentialStore::new(db);

        store
            .add_user("a@x.com", "pw123", &["Customer"])
            .await
            .unwrap();
        let result = store.add_user("A@X.COM", "other", &["Customer"]).await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::DuplicateEmail(_)))
        ));
    }

    #[tokio::test]
    async fn concurrent_registers_surface_duplicate_email_not_a_storage_error() {
        let db = setup_test_db().await;
        let store = CredentialStore::new(db);

        // Both calls can pass the pre-check before either inserts; the loser
        // must still come back as DuplicateEmail, not a database error.
        let (a, b) = tokio::join!(
            store.add_user("a@x.com", "pw123", &["Customer"]),
            store.add_user("A@x.com", "other", &["Customer"]),
        );

        let (winner, loser) = match (a, b) {
            (Ok(u), Err(e)) | (Err(e), Ok(u)) => (u, e),
            other => panic!("expected one success and one failure, got {:?}", other),
        };
        assert_eq!(winner.normalized_email, "a@x.com");
        assert!(matches!(
            loser,
            InternalError::Credential(CredentialError::DuplicateEmail(_))
        ));
    }

    #[tokio::test]
    async fn verify_credentials_accepts_any_email_casing() {
        let db = setup_test_db().await;
        let store = CredentialStore::new(db);

        store
            .add_user("a@x.com", "pw123", &["Customer"])
            .await
            .unwrap();

        let found = store.verify_credentials("A@x.Com", "pw123").await.unwrap();
        assert_eq!(found.normalized_email, "a@x.com");
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_fail_identically() {
        let db = setup_test_db().await;
        let store = CredentialStore::new(db);

        store
            .add_user("a@x.com", "pw123", &["Customer"])
            .await
            .unwrap();

        let absent = store.verify_credentials("nobody@x.com", "pw123").await;
        let mismatch = store.verify_credentials("a@x.com", "wrong").await;

        for result in [absent, mismatch] {
            assert!(matches!(
                result,
                Err(InternalError::Credential(CredentialError::InvalidCredentials))
            ));
        }
    }

    #[tokio::test]
    async fn stored_refresh_token_overwrites_and_rotates_stamp() {
        let db = setup_test_db().await;
        let store = CredentialStore::new(db);

        let created = store
            .add_user("a@x.com", "pw123", &["Customer"])
            .await
            .unwrap();
        let stamp_before = created.security_stamp.clone();

        store
            .store_refresh_token(&created.id, "hash-one", 4_000_000_000)
            .await
            .unwrap();
        let after_first = store.get_user_by_id(&created.id).await.unwrap();

        store
            .store_refresh_token(&created.id, "hash-two", 4_000_000_000)
            .await
            .unwrap();
        let after_second = store.get_user_by_id(&created.id).await.unwrap();

        assert_eq!(after_first.refresh_token_hash.as_deref(), Some("hash-one"));
        assert_eq!(after_second.refresh_token_hash.as_deref(), Some("hash-two"));
        assert_ne!(after_first.security_stamp, stamp_before);
        assert_ne!(after_second.security_stamp, after_first.security_stamp);

        // The overwritten hash no longer resolves
        let stale = store.validate_refresh_token("hash-one").await;
        assert!(matches!(
            stale,
            Err(InternalError::Credential(CredentialError::InvalidRefreshToken))
        ));
        let current = store.validate_refresh_token("hash-two").await.unwrap();
        assert_eq!(current.id, created.id);
    }

    #[tokio::test]
    async fn expired_refresh_token_is_rejected() {
        let db = setup_test_db().await;
        let store = CredentialStore::new(db);

        let created = store
            .add_user("a@x.com", "pw123", &["Customer"])
            .await
            .unwrap();
        let past = Utc::now().timestamp() - 60;
        store
            .store_refresh_token(&created.id, "old-hash", past)
            .await
            .unwrap();

        let result = store.validate_refresh_token("old-hash").await;
        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::ExpiredRefreshToken))
        ));
    }

    #[tokio::test]
    async fn revoke_clears_refresh_columns() {
        let db = setup_test_db().await;
        let store = CredentialStore::new(db);

        let created = store
            .add_user("a@x.com", "pw123", &["Customer"])
            .await
            .unwrap();
        store
            .store_refresh_token(&created.id, "hash", 4_000_000_000)
            .await
            .unwrap();

        store.revoke_refresh_token(&created.id).await.unwrap();
        let after = store.get_user_by_id(&created.id).await.unwrap();

        assert!(after.refresh_token_hash.is_none());
        assert!(after.refresh_token_expires_at.is_none());
    }

    #[tokio::test]
    async fn cache_token_upserts() {
        let db = setup_test_db().await;
        let store = CredentialStore::new(db.clone());

        let created = store
            .add_user("a@x.com", "pw123", &["Customer"])
            .await
            .unwrap();

        store
            .cache_token(&created.id, "default", "access_token", "first")
            .await
            .unwrap();
        store
            .cache_token(&created.id, "default", "access_token", "second")
            .await
            .unwrap();

        let rows = user_token::Entity::find().all(&db).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, "second");
    }
}
