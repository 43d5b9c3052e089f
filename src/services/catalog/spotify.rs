//! Spotify Web API catalog client
//!
//! Implements both catalog capabilities over reqwest. The client-credentials
//! token is kept until shortly before it expires, so most requests skip the
//! accounts round trip.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client as HttpClient;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{
        catalog::{ArtistSearchResponse, TrackSearchResponse},
        AccessToken, CatalogArtist, CatalogTrack,
    },
    services::catalog::{CatalogAuth, CatalogCredentials, CatalogSearch},
};

/// Refresh the token this long before the provider says it expires
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

struct CachedToken {
    token: AccessToken,
    expires_at: DateTime<Utc>,
}

/// When a token issued `now` with `expires_in` seconds should be dropped from
/// the cache, or `None` if it is too short-lived or its lifetime does not fit
/// a timestamp.
fn cache_deadline(now: DateTime<Utc>, expires_in: u64) -> Option<DateTime<Utc>> {
    let lifetime = i64::try_from(expires_in)
        .ok()?
        .checked_sub(TOKEN_EXPIRY_MARGIN_SECS)
        .filter(|secs| *secs > 0)?;
    now.checked_add_signed(TimeDelta::try_seconds(lifetime)?)
}

pub struct SpotifyClient {
    http_client: HttpClient,
    credentials: Option<CatalogCredentials>,
    api_url: String,
    accounts_url: String,
    market: String,
    token: RwLock<Option<CachedToken>>,
}

impl SpotifyClient {
    pub fn new(
        credentials: Option<CatalogCredentials>,
        api_url: String,
        accounts_url: String,
        market: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            credentials,
            api_url: api_url.trim_end_matches('/').to_string(),
            accounts_url,
            market,
            token: RwLock::new(None),
        })
    }

    async fn cached_token(&self) -> Option<AccessToken> {
        let guard = self.token.read().await;
        guard
            .as_ref()
            .filter(|cached| cached.expires_at > Utc::now())
            .map(|cached| cached.token.clone())
    }

    /// Runs the client-credentials flow against the accounts service
    async fn request_token(&self) -> AppResult<AccessToken> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            AppError::Configuration(
                "SPOTIFY_CLIENT_ID or SPOTIFY_CLIENT_SECRET is not configured".to_string(),
            )
        })?;

        tracing::debug!(url = %self.accounts_url, "Requesting catalog access token");

        let response = self
            .http_client
            .post(&self.accounts_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Authentication(format!(
                "Spotify accounts returned status {}: {}",
                status, body
            )));
        }

        let token: AccessToken = response.json().await?;

        tracing::info!(
            token_type = %token.token_type,
            expires_in = token.expires_in,
            "Catalog access token acquired"
        );

        Ok(token)
    }

    async fn try_search_tracks(
        &self,
        token: &AccessToken,
        query: &str,
        limit: u32,
    ) -> AppResult<Vec<CatalogTrack>> {
        let url = format!("{}/search", self.api_url);
        let limit = limit.to_string();

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&token.access_token)
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", limit.as_str()),
                ("market", self.market.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Track search returned status {}",
                response.status()
            )));
        }

        let page: TrackSearchResponse = response.json().await?;
        Ok(page.tracks.map(|paging| paging.items).unwrap_or_default())
    }

    async fn try_lookup_artist(
        &self,
        token: &AccessToken,
        name: &str,
    ) -> AppResult<Option<CatalogArtist>> {
        let url = format!("{}/search", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&token.access_token)
            .query(&[("q", name), ("type", "artist"), ("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Artist lookup returned status {}",
                response.status()
            )));
        }

        let page: ArtistSearchResponse = response.json().await?;
        Ok(page
            .artists
            .and_then(|paging| paging.items.into_iter().next()))
    }
}

#[async_trait::async_trait]
impl CatalogAuth for SpotifyClient {
    async fn access_token(&self) -> AppResult<AccessToken> {
        if let Some(token) = self.cached_token().await {
            return Ok(token);
        }

        let token = self.request_token().await?;
        match cache_deadline(Utc::now(), token.expires_in) {
            Some(expires_at) => {
                *self.token.write().await = Some(CachedToken {
                    token: token.clone(),
                    expires_at,
                });
            }
            None => tracing::debug!(
                expires_in = token.expires_in,
                "Access token lifetime not cacheable"
            ),
        }

        Ok(token)
    }
}

#[async_trait::async_trait]
impl CatalogSearch for SpotifyClient {
    async fn search_tracks(
        &self,
        token: &AccessToken,
        query: &str,
        limit: u32,
    ) -> Vec<CatalogTrack> {
        match self.try_search_tracks(token, query, limit).await {
            Ok(tracks) => {
                tracing::debug!(query = %query, results = tracks.len(), "Track search completed");
                tracks
            }
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Track search failed");
                Vec::new()
            }
        }
    }

    async fn lookup_artist(&self, token: &AccessToken, name: &str) -> Option<CatalogArtist> {
        match self.try_lookup_artist(token, name).await {
            Ok(artist) => artist,
            Err(e) => {
                tracing::warn!(artist = %name, error = %e, "Artist lookup failed");
                None
            }
        }
    }
}
