//! User service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use soundlink_common::{AppError, AppResult, IdGenerator};
use soundlink_db::{entities::user, repositories::UserRepository};
use validator::Validate;

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for creating a new user.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(length(min = 1, max = 128))]
    pub username: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Input for updating a user.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserInput {
    #[validate(length(min = 1, max = 128))]
    pub username: Option<String>,

    #[validate(email)]
    pub email: Option<String>,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new user and issue an access token.
    pub async fn create(&self, input: CreateUserInput) -> AppResult<user::Model> {
        input.validate()?;

        if self
            .user_repo
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        let password_hash = hash_password(&input.password)?;

        let user_model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            username_lower: Set(input.username.to_lowercase()),
            username: Set(input.username),
            email: Set(input.email),
            password_hash: Set(password_hash),
            token: Set(Some(self.id_gen.generate_token())),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        let user = self.user_repo.create(user_model).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Get a user by ID.
    pub async fn get(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// List users, oldest first.
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<user::Model>> {
        self.user_repo.list(limit, offset).await
    }

    /// Authenticate a user by token.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Authenticate a user by username and password.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        Ok(user)
    }

    /// Regenerate a user's authentication token, invalidating the old one.
    pub async fn regenerate_token(&self, user_id: &str) -> AppResult<String> {
        let user = self.user_repo.get_by_id(user_id).await?;
        let new_token = self.id_gen.generate_token();

        let mut active: user::ActiveModel = user.into();
        active.token = Set(Some(new_token.clone()));
        active.updated_at = Set(Some(Utc::now().into()));

        self.user_repo.update(active).await?;

        Ok(new_token)
    }

    /// Update a user's username and/or email.
    pub async fn update(&self, id: &str, input: UpdateUserInput) -> AppResult<user::Model> {
        input.validate()?;

        let user = self.user_repo.get_by_id(id).await?;

        if let Some(username) = &input.username {
            let renamed = username.to_lowercase() != user.username_lower;
            if renamed && self.user_repo.find_by_username(username).await?.is_some() {
                return Err(AppError::Conflict("Username already taken".to_string()));
            }
        }

        let mut active: user::ActiveModel = user.into();

        if let Some(username) = input.username {
            active.username_lower = Set(username.to_lowercase());
            active.username = Set(username);
        }
        if let Some(email) = input.email {
            active.email = Set(Some(email));
        }

        active.updated_at = Set(Some(Utc::now().into()));

        self.user_repo.update(active).await
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: &str, username: &str, password_hash: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            username_lower: username.to_lowercase(),
            email: None,
            password_hash: password_hash.to_string(),
            token: Some("test_token".to_string()),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_service(db: Arc<DatabaseConnection>) -> UserService {
        UserService::new(UserRepository::new(db))
    }

    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password_123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("test_password_123", &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(verify_password("test", "invalid_hash").is_err());
    }

    #[test]
    fn test_hash_password_different_each_time() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();

        assert_ne!(hash1, hash2);
    }

    #[tokio::test]
    async fn test_create_rejects_short_password() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = create_test_service(db);

        let result = service
            .create(CreateUserInput {
                username: "alice".to_string(),
                email: None,
                password: "short".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = create_test_service(db);

        let result = service
            .create(CreateUserInput {
                username: "alice".to_string(),
                email: Some("not-an-email".to_string()),
                password: "password123".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_taken_username() {
        let existing = create_test_user("user1", "Alice", "hash");
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service
            .create(CreateUserInput {
                username: "alice".to_string(),
                email: None,
                password: "password123".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_success() {
        let created = create_test_user("user1", "alice", "hash");
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new(), vec![created]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let user = service
            .create(CreateUserInput {
                username: "alice".to_string(),
                email: Some("alice@example.com".to_string()),
                password: "password123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
        assert!(user.token.is_some());
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let hash = hash_password("password123").unwrap();
        let user = create_test_user("user1", "alice", &hash);
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service.authenticate("alice", "password123").await.unwrap();
        assert_eq!(result.id, "user1");
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let hash = hash_password("password123").unwrap();
        let user = create_test_user("user1", "alice", &hash);
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service.authenticate("alice", "wrong-password").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service.authenticate("nobody", "password123").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_authenticate_by_token_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service.authenticate_by_token("invalid").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = create_test_service(db);

        match service.get("nonexistent").await {
            Err(AppError::UserNotFound(id)) => assert_eq!(id, "nonexistent"),
            other => panic!("Expected UserNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_rejects_taken_username() {
        let user = create_test_user("user1", "alice", "hash");
        let other = create_test_user("user2", "bob", "hash");
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .append_query_results([[other]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service
            .update(
                "user1",
                UpdateUserInput {
                    username: Some("Bob".to_string()),
                    email: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_email() {
        let user = create_test_user("user1", "alice", "hash");
        let mut updated = user.clone();
        updated.email = Some("alice@example.com".to_string());
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .append_query_results([[updated]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service
            .update(
                "user1",
                UpdateUserInput {
                    username: None,
                    email: Some("alice@example.com".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(result.email.as_deref(), Some("alice@example.com"));
    }
}
