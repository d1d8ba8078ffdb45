//! Linking users to their music streaming accounts.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{NotSet, Set};
use serde::Serialize;
use soundlink_common::{AppError, AppResult, IdGenerator};
use soundlink_db::{entities::music_account, repositories::MusicAccountRepository};

use super::track::apply_grant;
use crate::music::MusicApi;

/// Where to send the user to grant access, and the state to verify on return.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizeRedirect {
    pub url: String,
    pub state: String,
}

/// Music account linking service.
#[derive(Clone)]
pub struct MusicLinkService {
    api: Arc<dyn MusicApi>,
    account_repo: MusicAccountRepository,
    id_gen: IdGenerator,
}

impl MusicLinkService {
    /// Create a new music link service.
    #[must_use]
    pub fn new(api: Arc<dyn MusicApi>, account_repo: MusicAccountRepository) -> Self {
        Self {
            api,
            account_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Start the authorization flow with a fresh random state.
    #[must_use]
    pub fn authorize(&self) -> AuthorizeRedirect {
        let state = self.id_gen.generate_token();
        AuthorizeRedirect {
            url: self.api.authorize_url(&state),
            state,
        }
    }

    /// Exchange an authorization code and store the resulting credentials.
    pub async fn link(&self, user_id: &str, code: &str) -> AppResult<music_account::Model> {
        if code.is_empty() {
            return Err(AppError::BadRequest("Authorization code is required".to_string()));
        }

        let grant = self.api.exchange_code(code).await.map_err(|e| {
            tracing::warn!(user_id = %user_id, error = %e, "Authorization code exchange failed");
            AppError::ExternalService(e.to_string())
        })?;

        let refresh_token = grant.refresh_token.clone().ok_or_else(|| {
            AppError::ExternalService("Token response did not include a refresh token".to_string())
        })?;

        let mut active = music_account::ActiveModel {
            user_id: Set(user_id.to_string()),
            refresh_token: Set(refresh_token),
            scope: Set(None),
            created_at: Set(Utc::now().into()),
            access_token: NotSet,
            expires_at: NotSet,
            updated_at: NotSet,
        };
        apply_grant(&mut active, grant).map_err(|e| {
            tracing::warn!(user_id = %user_id, error = %e, "Token response rejected");
            AppError::ExternalService(e.to_string())
        })?;

        let account = self.account_repo.upsert(active).await?;
        tracing::info!(user_id = %user_id, "Music account linked");

        Ok(account)
    }

    /// Remove the linked account.
    pub async fn unlink(&self, user_id: &str) -> AppResult<()> {
        if !self.account_repo.delete(user_id).await? {
            return Err(AppError::NotFound("Music account not linked".to_string()));
        }

        tracing::info!(user_id = %user_id, "Music account unlinked");
        Ok(())
    }

    /// Check whether a user has a linked account.
    pub async fn is_linked(&self, user_id: &str) -> AppResult<bool> {
        Ok(self.account_repo.find_by_user_id(user_id).await?.is_some())
    }
}
