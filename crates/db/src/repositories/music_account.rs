//! Music account repository.

use std::sync::Arc;

use crate::entities::{MusicAccount, music_account};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    sea_query::OnConflict,
};
use soundlink_common::{AppError, AppResult};

/// Repository for linked music streaming accounts.
#[derive(Clone)]
pub struct MusicAccountRepository {
    db: Arc<DatabaseConnection>,
}

impl MusicAccountRepository {
    /// Create a new music account repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the linked account of a user.
    pub async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<music_account::Model>> {
        MusicAccount::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a linked account, replacing the credentials of an existing one.
    pub async fn upsert(&self, model: music_account::ActiveModel) -> AppResult<music_account::Model> {
        MusicAccount::insert(model)
            .on_conflict(
                OnConflict::column(music_account::Column::UserId)
                    .update_columns([
                        music_account::Column::AccessToken,
                        music_account::Column::RefreshToken,
                        music_account::Column::Scope,
                        music_account::Column::ExpiresAt,
                        music_account::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a linked account.
    pub async fn update(&self, model: music_account::ActiveModel) -> AppResult<music_account::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete the linked account of a user. Returns whether a row was removed.
    pub async fn delete(&self, user_id: &str) -> AppResult<bool> {
        let result = MusicAccount::delete_many()
            .filter(music_account::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}
