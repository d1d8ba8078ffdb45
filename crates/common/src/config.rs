//! Application configuration.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// External music API configuration.
    pub music: MusicConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL of this instance.
    pub url: String,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Music streaming API (Spotify Web API) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MusicConfig {
    /// OAuth client ID registered with the provider.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Redirect URI registered with the provider.
    pub redirect_uri: String,
    /// Authorization endpoint the user is sent to.
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,
    /// Token endpoint for code exchange and refresh.
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// Base URL of the Web API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

fn default_authorize_url() -> String {
    "https://accounts.spotify.com/authorize".to_string()
}

fn default_token_url() -> String {
    "https://accounts.spotify.com/api/token".to_string()
}

fn default_api_base_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present, exported into the process environment)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `SOUNDLINK_ENV`)
    /// 4. Environment variables with `SOUNDLINK__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("SOUNDLINK_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SOUNDLINK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_music_defaults_applied() {
        let config = config::Config::builder()
            .set_override("server.url", "https://example.com")
            .unwrap()
            .set_override("database.url", "postgres://localhost/soundlink")
            .unwrap()
            .set_override("music.client_id", "id")
            .unwrap()
            .set_override("music.client_secret", "secret")
            .unwrap()
            .set_override("music.redirect_uri", "https://example.com/callback")
            .unwrap()
            .build()
            .unwrap();

        let config: Config = config.try_deserialize().unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.music.api_base_url, "https://api.spotify.com/v1");
        assert_eq!(config.music.token_url, "https://accounts.spotify.com/api/token");
        assert_eq!(config.music.timeout_secs, 10);
    }

    #[test]
    fn test_missing_music_section_fails() {
        let config = config::Config::builder()
            .set_override("server.url", "https://example.com")
            .unwrap()
            .set_override("database.url", "postgres://localhost/soundlink")
            .unwrap()
            .build()
            .unwrap();

        assert!(config.try_deserialize::<Config>().is_err());
    }
}
