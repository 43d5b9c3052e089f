use std::time::Duration;

use serde::Deserialize;

use crate::services::catalog::CatalogCredentials;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Spotify client-credentials pair. Missing values only fail once a
    /// playlist is generated.
    #[serde(default)]
    pub spotify_client_id: Option<String>,

    #[serde(default)]
    pub spotify_client_secret: Option<String>,

    /// Spotify Web API base URL
    #[serde(default = "default_spotify_api_url")]
    pub spotify_api_url: String,

    /// Spotify accounts token endpoint
    #[serde(default = "default_spotify_accounts_url")]
    pub spotify_accounts_url: String,

    /// Market passed to track searches
    #[serde(default = "default_spotify_market")]
    pub spotify_market: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Pause between consecutive searches of the same batch
    #[serde(default = "default_query_delay_ms")]
    pub query_delay_ms: u64,

    /// Pause when moving on to the next batch (next seed artist)
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    /// Per-request timeout of the outbound HTTP client
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_spotify_api_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_spotify_accounts_url() -> String {
    "https://accounts.spotify.com/api/token".to_string()
}

fn default_spotify_market() -> String {
    "US".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_query_delay_ms() -> u64 {
    150
}

fn default_batch_delay_ms() -> u64 {
    200
}

fn default_http_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Client credentials, if both halves are set and non-blank
    pub fn credentials(&self) -> Option<CatalogCredentials> {
        let client_id = self.spotify_client_id.as_deref().map(str::trim)?;
        let client_secret = self.spotify_client_secret.as_deref().map(str::trim)?;
        if client_id.is_empty() || client_secret.is_empty() {
            return None;
        }
        Some(CatalogCredentials {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }

    pub fn query_delay(&self) -> Duration {
        Duration::from_millis(self.query_delay_ms)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        envy::from_iter(vars.iter().map(|(k, v)| (k.to_string(), v.to_string()))).unwrap()
    }

    #[test]
    fn test_defaults_apply() {
        let config = config_from(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.spotify_market, "US");
        assert_eq!(config.query_delay(), Duration::from_millis(150));
        assert_eq!(config.batch_delay(), Duration::from_millis(200));
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_credentials_present() {
        let config = config_from(&[
            ("spotify_client_id", "abc"),
            ("spotify_client_secret", "shh"),
            ("port", "8080"),
        ]);
        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.client_id, "abc");
        assert_eq!(credentials.client_secret, "shh");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_blank_credentials_are_unset() {
        let config = config_from(&[
            ("spotify_client_id", "  "),
            ("spotify_client_secret", "shh"),
        ]);
        assert!(config.credentials().is_none());
    }
}
