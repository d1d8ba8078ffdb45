//! Track lookup: what a user is listening to.
//!
//! [`TrackService::current_track`] asks the music API for the current
//! playback, falls back to the most recently played track, and folds every
//! failure into a [`TrackStatus::Error`] so callers always get a renderable
//! result. [`normalize`] maps the upstream shape into the canonical status.

use std::convert::Infallible;
use std::sync::Arc;

use chrono::{Duration, Utc};
use sea_orm::Set;
use serde::Serialize;
use soundlink_common::AppError;
use soundlink_db::{entities::music_account, repositories::MusicAccountRepository};
use thiserror::Error;

use crate::music::{
    MusicApi, MusicApiError,
    dto::{CurrentlyPlaying, RecentlyPlayed, TokenGrant, TrackObject},
};

/// Placeholder for a missing track or artist name.
pub const NOT_AVAILABLE: &str = "N/A";

const NO_TRACK_MESSAGE: &str = "no current or recent track";
const NOT_LINKED_MESSAGE: &str = "link a music account to share what you are playing";
const REAUTH_MESSAGE: &str = "music API token is invalid or expired; re-authorization required";

/// Access tokens this close to expiry are refreshed before use.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// One of the upstream response shapes, classified once by the orchestrator.
#[derive(Debug, Clone)]
pub enum UpstreamTrack {
    /// Lookup failed; passed through to the caller.
    Error {
        error: String,
        message: Option<String>,
    },
    CurrentlyPlaying(CurrentlyPlaying),
    RecentlyPlayed(RecentlyPlayed),
    /// Nothing playing and no play history.
    Empty,
}

/// Canonical track status returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TrackStatus {
    Playback {
        is_playing: bool,
        track_name: String,
        artist_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        album_image_url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Error {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl TrackStatus {
    fn from_track(track: &TrackObject, is_playing: bool) -> Self {
        Self::Playback {
            is_playing,
            track_name: track.name.clone(),
            artist_name: track
                .artists
                .first()
                .map_or_else(|| NOT_AVAILABLE.to_string(), |a| a.name.clone()),
            album_image_url: track
                .album
                .as_ref()
                .and_then(|album| album.images.first())
                .map(|image| image.url.clone()),
            message: None,
        }
    }

    fn empty() -> Self {
        Self::Playback {
            is_playing: false,
            track_name: NOT_AVAILABLE.to_string(),
            artist_name: NOT_AVAILABLE.to_string(),
            album_image_url: None,
            message: Some(NO_TRACK_MESSAGE.to_string()),
        }
    }
}

/// Map an upstream shape into the canonical track status.
#[must_use]
pub fn normalize(upstream: UpstreamTrack) -> TrackStatus {
    match upstream {
        UpstreamTrack::Error { error, message } => TrackStatus::Error { error, message },
        UpstreamTrack::CurrentlyPlaying(current) => match current.item {
            Some(item) => TrackStatus::from_track(&item, current.is_playing.unwrap_or(true)),
            None => TrackStatus::empty(),
        },
        UpstreamTrack::RecentlyPlayed(recent) => match recent.items.first() {
            Some(history) => TrackStatus::from_track(&history.track, false),
            None => TrackStatus::empty(),
        },
        UpstreamTrack::Empty => TrackStatus::empty(),
    }
}

#[derive(Debug, Error)]
enum LookupError {
    #[error("music account not linked")]
    NotLinked,

    #[error(transparent)]
    Api(#[from] MusicApiError),

    #[error(transparent)]
    Store(#[from] AppError),
}

impl LookupError {
    fn into_upstream(self) -> UpstreamTrack {
        let message = match self {
            Self::NotLinked => NOT_LINKED_MESSAGE,
            Self::Api(_) | Self::Store(_) => REAUTH_MESSAGE,
        };
        UpstreamTrack::Error {
            error: self.to_string(),
            message: Some(message.to_string()),
        }
    }
}

/// Track lookup orchestrator.
#[derive(Clone)]
pub struct TrackService {
    api: Arc<dyn MusicApi>,
    account_repo: MusicAccountRepository,
}

impl TrackService {
    /// Create a new track service.
    #[must_use]
    pub fn new(api: Arc<dyn MusicApi>, account_repo: MusicAccountRepository) -> Self {
        Self { api, account_repo }
    }

    /// Look up what a user is playing, or last played.
    ///
    /// Never fails: an unlinked account, a rejected token or a transport
    /// problem all come back as [`TrackStatus::Error`].
    pub async fn current_track(&self, user_id: &str) -> Result<TrackStatus, Infallible> {
        let upstream = match self.fetch(user_id).await {
            Ok(upstream) => upstream,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Track lookup failed");
                e.into_upstream()
            }
        };

        Ok(normalize(upstream))
    }

    async fn fetch(&self, user_id: &str) -> Result<UpstreamTrack, LookupError> {
        let account = self
            .account_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(LookupError::NotLinked)?;

        let access_token = self.usable_access_token(account).await?;

        if let Some(current) = self.api.current_playing(&access_token).await? {
            if current.is_playing.unwrap_or(false) && current.item.is_some() {
                return Ok(UpstreamTrack::CurrentlyPlaying(current));
            }
        }

        match self.api.recently_played(&access_token, 1).await? {
            Some(recent) if !recent.items.is_empty() => Ok(UpstreamTrack::RecentlyPlayed(recent)),
            _ => Ok(UpstreamTrack::Empty),
        }
    }

    /// Return a valid access token, refreshing and persisting it when expired.
    async fn usable_access_token(
        &self,
        account: music_account::Model,
    ) -> Result<String, LookupError> {
        let deadline = Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECS);
        if account.expires_at > deadline {
            return Ok(account.access_token);
        }

        tracing::debug!(user_id = %account.user_id, "Refreshing music access token");

        let grant = self.api.refresh(&account.refresh_token).await?;
        let access_token = grant.access_token.clone();

        let mut active: music_account::ActiveModel = account.into();
        apply_grant(&mut active, grant)?;
        self.account_repo.update(active).await?;

        Ok(access_token)
    }
}

/// Copy a token grant onto a music account, keeping the old refresh token
/// and scope when the grant omits them.
///
/// Fails with [`MusicApiError::Parse`] when `expires_in` does not fit a
/// timestamp; the account is left untouched in that case.
pub(crate) fn apply_grant(
    active: &mut music_account::ActiveModel,
    grant: TokenGrant,
) -> Result<(), MusicApiError> {
    let now = Utc::now();
    let expires_at = Duration::try_seconds(grant.expires_in)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            MusicApiError::Parse(format!("token lifetime out of range: {}", grant.expires_in))
        })?;

    active.access_token = Set(grant.access_token);
    if let Some(refresh_token) = grant.refresh_token {
        active.refresh_token = Set(refresh_token);
    }
    if let Some(scope) = grant.scope {
        active.scope = Set(Some(scope));
    }
    active.expires_at = Set(expires_at.into());
    active.updated_at = Set(Some(now.into()));
    Ok(())
}
