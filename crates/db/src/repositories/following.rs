//! Following repository (the follow graph store).

use std::collections::HashMap;
use std::sync::Arc;

use crate::entities::{Following, User, following, user};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use soundlink_common::{AppError, AppResult, IdGenerator};

/// Following repository for database operations.
///
/// Edges are only ever inserted or deleted. Uniqueness of the
/// `(follower_id, followee_id)` pair is guaranteed by a unique index;
/// [`Self::create_edge`] maps a violation of that index to
/// [`AppError::AlreadyFollowing`] so concurrent follows cannot produce
/// a second edge.
#[derive(Clone)]
pub struct FollowingRepository {
    db: Arc<DatabaseConnection>,
    id_gen: IdGenerator,
}

impl FollowingRepository {
    /// Create a new following repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            id_gen: IdGenerator::new(),
        }
    }

    /// Find a following relationship by follower and followee.
    pub async fn find_by_pair(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> AppResult<Option<following::Model>> {
        Following::find()
            .filter(following::Column::FollowerId.eq(follower_id))
            .filter(following::Column::FolloweeId.eq(followee_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user is following another user.
    pub async fn edge_exists(&self, follower_id: &str, followee_id: &str) -> AppResult<bool> {
        Ok(self.find_by_pair(follower_id, followee_id).await?.is_some())
    }

    /// Create a follow edge stamped with the current time.
    ///
    /// A duplicate pair is rejected by the unique index, not by a prior
    /// lookup, and surfaces as [`AppError::AlreadyFollowing`].
    pub async fn create_edge(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> AppResult<following::Model> {
        if follower_id == followee_id {
            return Err(AppError::SelfFollow);
        }

        let model = following::ActiveModel {
            id: Set(self.id_gen.generate()),
            follower_id: Set(follower_id.to_string()),
            followee_id: Set(followee_id.to_string()),
            created_at: Set(Utc::now().into()),
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| map_insert_error(&e, followee_id))
    }

    /// Delete the follow edge for a pair.
    pub async fn delete_edge(&self, follower_id: &str, followee_id: &str) -> AppResult<()> {
        let result = Following::delete_many()
            .filter(following::Column::FollowerId.eq(follower_id))
            .filter(following::Column::FolloweeId.eq(followee_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFollowing(followee_id.to_string()));
        }

        Ok(())
    }

    /// Get the users a user follows, oldest edge first.
    pub async fn list_following(&self, user_id: &str) -> AppResult<Vec<user::Model>> {
        let edges = Following::find()
            .filter(following::Column::FollowerId.eq(user_id))
            .order_by_asc(following::Column::CreatedAt)
            .order_by_asc(following::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if edges.is_empty() {
            return Ok(vec![]);
        }

        let followee_ids: Vec<String> = edges.into_iter().map(|e| e.followee_id).collect();

        let mut users: HashMap<String, user::Model> = User::find()
            .filter(user::Column::Id.is_in(followee_ids.clone()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        Ok(followee_ids
            .iter()
            .filter_map(|id| users.remove(id))
            .collect())
    }

    /// Count users a user follows.
    pub async fn count_following(&self, user_id: &str) -> AppResult<u64> {
        Following::find()
            .filter(following::Column::FollowerId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count followers of a user.
    pub async fn count_followers(&self, user_id: &str) -> AppResult<u64> {
        Following::find()
            .filter(following::Column::FolloweeId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

fn map_insert_error(err: &DbErr, followee_id: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::AlreadyFollowing(followee_id.to_string())
        }
        _ => AppError::Database(err.to_string()),
    }
}
