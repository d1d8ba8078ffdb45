//! Trait definition for the external music API.

use async_trait::async_trait;

use super::MusicApiError;
use super::dto::{CurrentlyPlaying, RecentlyPlayed, TokenGrant};

/// Operations the track lookup and account linking need from the provider.
///
/// Access tokens are passed per call; implementations hold no per-user state.
#[async_trait]
pub trait MusicApi: Send + Sync {
    /// Current playback. `None` when nothing is playing (HTTP 204).
    async fn current_playing(
        &self,
        access_token: &str,
    ) -> Result<Option<CurrentlyPlaying>, MusicApiError>;

    /// Most recently played tracks, newest first.
    async fn recently_played(
        &self,
        access_token: &str,
        limit: u32,
    ) -> Result<Option<RecentlyPlayed>, MusicApiError>;

    /// Exchange a refresh token for a new access token.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, MusicApiError>;

    /// Exchange an authorization code for tokens.
    async fn exchange_code(&self, code: &str) -> Result<TokenGrant, MusicApiError>;

    /// URL a user visits to grant access; `state` is echoed back to the redirect.
    fn authorize_url(&self, state: &str) -> String;
}
