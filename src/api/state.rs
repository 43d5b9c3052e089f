use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    services::{
        catalog::SpotifyClient,
        pacing::FixedIntervalPacer,
        PlaylistGenerator,
    },
};

/// Shared application state
///
/// Read-only after startup; concurrent requests share nothing mutable
/// except the catalog client's token cache.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<PlaylistGenerator>,
}

impl AppState {
    pub fn new(generator: PlaylistGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }

    /// Wires the Spotify client and the configured pacing into a generator
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let credentials = config.credentials();
        if credentials.is_none() {
            tracing::warn!("Spotify credentials are not configured; playlist generation will fail");
        }

        let client = Arc::new(SpotifyClient::new(
            credentials,
            config.spotify_api_url.clone(),
            config.spotify_accounts_url.clone(),
            config.spotify_market.clone(),
            config.http_timeout(),
        )?);
        let pacer = Arc::new(FixedIntervalPacer::new(
            config.query_delay(),
            config.batch_delay(),
        ));

        Ok(Self::new(PlaylistGenerator::new(
            client.clone(),
            client,
            pacer,
        )))
    }
}
