//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `soundlink_test`)
//!   `TEST_DB_PASSWORD` (default: `soundlink_test`)
//!   `TEST_DB_NAME` (default: `soundlink_test`)

#![allow(clippy::unwrap_used)]

use chrono::Utc;
use sea_orm::Set;
use soundlink_common::{AppError, IdGenerator};
use soundlink_db::{
    entities::user,
    repositories::{FollowingRepository, UserRepository},
    test_utils::{TestDatabase, TestDbConfig},
};

async fn create_user(repo: &UserRepository, username: &str) -> user::Model {
    let id_gen = IdGenerator::new();
    repo.create(user::ActiveModel {
        id: Set(id_gen.generate()),
        username: Set(username.to_string()),
        username_lower: Set(username.to_lowercase()),
        email: Set(None),
        password_hash: Set("hash".to_string()),
        token: Set(Some(id_gen.generate_token())),
        created_at: Set(Utc::now().into()),
        updated_at: Set(None),
    })
    .await
    .unwrap()
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let result = TestDatabase::with_config(TestDbConfig::default()).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_follow_edge_lifecycle() {
    let db = TestDatabase::new().await.unwrap();
    db.cleanup().await.unwrap();

    let users = UserRepository::new(db.connection());
    let following = FollowingRepository::new(db.connection());

    let alice = create_user(&users, "alice").await;
    let bob = create_user(&users, "bob").await;

    following.create_edge(&alice.id, &bob.id).await.unwrap();
    assert!(following.edge_exists(&alice.id, &bob.id).await.unwrap());
    // Edges are directed.
    assert!(!following.edge_exists(&bob.id, &alice.id).await.unwrap());

    let duplicate = following.create_edge(&alice.id, &bob.id).await;
    assert!(matches!(duplicate, Err(AppError::AlreadyFollowing(_))));
    assert_eq!(following.count_following(&alice.id).await.unwrap(), 1);

    following.delete_edge(&alice.id, &bob.id).await.unwrap();
    assert!(following.list_following(&alice.id).await.unwrap().is_empty());
    assert!(!following.edge_exists(&alice.id, &bob.id).await.unwrap());

    let again = following.delete_edge(&alice.id, &bob.id).await;
    assert!(matches!(again, Err(AppError::NotFollowing(_))));

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_unique_index_rejects_duplicate_edge() {
    use sea_orm::{ActiveModelTrait, SqlErr};
    use soundlink_db::entities::following as following_entity;

    let db = TestDatabase::new().await.unwrap();
    db.cleanup().await.unwrap();

    let users = UserRepository::new(db.connection());
    let following = FollowingRepository::new(db.connection());

    let alice = create_user(&users, "alice").await;
    let bob = create_user(&users, "bob").await;
    following.create_edge(&alice.id, &bob.id).await.unwrap();

    // A raw insert of the same pair is refused by the index itself.
    let raw = following_entity::ActiveModel {
        id: Set(IdGenerator::new().generate()),
        follower_id: Set(alice.id.clone()),
        followee_id: Set(bob.id.clone()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db.conn.as_ref())
    .await
    .unwrap_err();
    assert!(matches!(
        raw.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    // The repository maps the same violation to AlreadyFollowing.
    match following.create_edge(&alice.id, &bob.id).await {
        Err(AppError::AlreadyFollowing(id)) => assert_eq!(id, bob.id),
        other => panic!("Expected AlreadyFollowing, got {other:?}"),
    }
    assert_eq!(following.count_following(&alice.id).await.unwrap(), 1);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_duplicate_username_is_conflict() {
    let db = TestDatabase::new().await.unwrap();
    db.cleanup().await.unwrap();

    let users = UserRepository::new(db.connection());
    create_user(&users, "alice").await;

    let id_gen = IdGenerator::new();
    let result = users
        .create(user::ActiveModel {
            id: Set(id_gen.generate()),
            username: Set("Alice".to_string()),
            username_lower: Set("alice".to_string()),
            email: Set(None),
            password_hash: Set("hash".to_string()),
            token: Set(Some(id_gen.generate_token())),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_list_following_in_creation_order() {
    let db = TestDatabase::new().await.unwrap();
    db.cleanup().await.unwrap();

    let users = UserRepository::new(db.connection());
    let following = FollowingRepository::new(db.connection());

    let alice = create_user(&users, "alice").await;
    let bob = create_user(&users, "bob").await;
    let carol = create_user(&users, "carol").await;

    following.create_edge(&alice.id, &carol.id).await.unwrap();
    following.create_edge(&alice.id, &bob.id).await.unwrap();

    let listed: Vec<String> = following
        .list_following(&alice.id)
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(listed, vec!["carol", "bob"]);
    assert_eq!(following.count_followers(&bob.id).await.unwrap(), 1);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_deleting_user_removes_edges() {
    use sea_orm::{EntityTrait, ModelTrait};

    let db = TestDatabase::new().await.unwrap();
    db.cleanup().await.unwrap();

    let users = UserRepository::new(db.connection());
    let following = FollowingRepository::new(db.connection());

    let alice = create_user(&users, "alice").await;
    let bob = create_user(&users, "bob").await;
    following.create_edge(&alice.id, &bob.id).await.unwrap();

    let bob_row = soundlink_db::entities::User::find_by_id(bob.id.clone())
        .one(db.conn.as_ref())
        .await
        .unwrap()
        .unwrap();
    bob_row.delete(db.conn.as_ref()).await.unwrap();

    assert!(following.list_following(&alice.id).await.unwrap().is_empty());

    db.cleanup().await.unwrap();
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(config.database_url().starts_with("postgres://"));
}
