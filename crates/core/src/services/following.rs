//! Following service.

use soundlink_common::{AppError, AppResult};
use soundlink_db::{
    entities::{following, user},
    repositories::{FollowingRepository, UserRepository},
};

/// Following service for business logic.
///
/// Follow and unfollow are separate, strict operations: following an
/// already-followed user is an error rather than an implicit unfollow.
#[derive(Clone)]
pub struct FollowingService {
    following_repo: FollowingRepository,
    user_repo: UserRepository,
}

impl FollowingService {
    /// Create a new following service.
    #[must_use]
    pub const fn new(following_repo: FollowingRepository, user_repo: UserRepository) -> Self {
        Self {
            following_repo,
            user_repo,
        }
    }

    /// Follow a user.
    ///
    /// The existence check here gives a clean error for the common case;
    /// the unique index in [`FollowingRepository::create_edge`] settles races.
    pub async fn follow(&self, follower_id: &str, followee_id: &str) -> AppResult<following::Model> {
        let followee = self.user_repo.get_by_id(followee_id).await?;

        if follower_id == followee.id {
            return Err(AppError::SelfFollow);
        }

        if self
            .following_repo
            .edge_exists(follower_id, &followee.id)
            .await?
        {
            return Err(AppError::AlreadyFollowing(followee.id));
        }

        let following = self
            .following_repo
            .create_edge(follower_id, &followee.id)
            .await?;

        tracing::info!(
            follower_id = %follower_id,
            followee_id = %followee.id,
            "User followed"
        );

        Ok(following)
    }

    /// Unfollow a user.
    pub async fn unfollow(&self, follower_id: &str, followee_id: &str) -> AppResult<()> {
        let followee = self.user_repo.get_by_id(followee_id).await?;

        self.following_repo
            .delete_edge(follower_id, &followee.id)
            .await?;

        tracing::info!(
            follower_id = %follower_id,
            followee_id = %followee.id,
            "User unfollowed"
        );

        Ok(())
    }

    /// Get the users a user follows, in the order they were followed.
    pub async fn list_following(&self, user_id: &str) -> AppResult<Vec<user::Model>> {
        self.following_repo.list_following(user_id).await
    }

    /// Number of users a user follows and number of users following them.
    pub async fn counts(&self, user_id: &str) -> AppResult<(u64, u64)> {
        let following = self.following_repo.count_following(user_id).await?;
        let followers = self.following_repo.count_followers(user_id).await?;
        Ok((following, followers))
    }
}
