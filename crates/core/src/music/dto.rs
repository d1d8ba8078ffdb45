//! Music API wire types.
//!
//! These structs mirror the provider's JSON responses. Fields the track
//! lookup never reads are left out; serde ignores unknown keys.

use serde::Deserialize;

/// Response of `GET /me/player/currently-playing`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentlyPlaying {
    /// Absent in some responses; treated as playing when an item is present.
    pub is_playing: Option<bool>,
    /// `null` for ads or when nothing is loaded.
    pub item: Option<TrackObject>,
}

/// Response of `GET /me/player/recently-played`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentlyPlayed {
    #[serde(default)]
    pub items: Vec<PlayHistory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayHistory {
    pub track: TrackObject,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub album: Option<Album>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
}

/// Token endpoint response for both code exchange and refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    /// Omitted on refresh when the provider keeps the old refresh token.
    pub refresh_token: Option<String>,
    /// Lifetime of `access_token` in seconds.
    pub expires_in: i64,
    pub scope: Option<String>,
}
