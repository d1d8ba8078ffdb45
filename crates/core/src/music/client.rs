//! Spotify Web API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use soundlink_common::{AppError, AppResult, config::MusicConfig};
use url::Url;

use super::dto::{CurrentlyPlaying, RecentlyPlayed, TokenGrant};
use super::{MusicApi, MusicApiError};

/// Permissions requested when a user links an account.
pub const SCOPE: &str = "user-read-currently-playing user-read-recently-played";

/// HTTP client for the Spotify Web API and its accounts service.
#[derive(Clone)]
pub struct SpotifyClient {
    http_client: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    authorize_url: Url,
    token_url: String,
    api_base_url: String,
}

impl SpotifyClient {
    /// Create a client from the `music` configuration section.
    pub fn new(config: &MusicConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;

        let authorize_url = Url::parse(&config.authorize_url)
            .map_err(|e| AppError::Config(format!("Invalid music authorize_url: {e}")))?;

        Ok(Self {
            http_client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            authorize_url,
            token_url: config.token_url.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_player<T: DeserializeOwned>(
        &self,
        access_token: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, MusicApiError> {
        let response = self
            .http_client
            .get(format!("{}{path}", self.api_base_url))
            .bearer_auth(access_token)
            .query(query)
            .send()
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let response = check_status(response).await?;
        let body = response
            .json::<T>()
            .await
            .map_err(|e| MusicApiError::Parse(e.to_string()))?;

        Ok(Some(body))
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenGrant, MusicApiError> {
        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(form)
            .send()
            .await?;

        let response = check_status(response).await?;
        response
            .json::<TokenGrant>()
            .await
            .map_err(|e| MusicApiError::Parse(e.to_string()))
    }
}

async fn check_status(response: Response) -> Result<Response, MusicApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(MusicApiError::Unauthorized);
    }

    let body = response.text().await.unwrap_or_default();
    Err(MusicApiError::Status {
        status: status.as_u16(),
        body: body.chars().take(200).collect(),
    })
}

#[async_trait]
impl MusicApi for SpotifyClient {
    async fn current_playing(
        &self,
        access_token: &str,
    ) -> Result<Option<CurrentlyPlaying>, MusicApiError> {
        self.get_player(access_token, "/me/player/currently-playing", &[])
            .await
    }

    async fn recently_played(
        &self,
        access_token: &str,
        limit: u32,
    ) -> Result<Option<RecentlyPlayed>, MusicApiError> {
        self.get_player(
            access_token,
            "/me/player/recently-played",
            &[("limit", limit.to_string())],
        )
        .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, MusicApiError> {
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenGrant, MusicApiError> {
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ])
        .await
    }

    fn authorize_url(&self, state: &str) -> String {
        let mut url = self.authorize_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", SCOPE)
            .append_pair("state", state)
            .append_pair("show_dialog", "true");
        url.into()
    }
}
