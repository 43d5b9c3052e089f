//! Music catalog abstraction
//!
//! The pipeline talks to the catalog through two capabilities: acquiring an
//! access token (fatal when it fails) and searching (never fails, an
//! unusable response is an empty result). Spotify is the only implementation.

use crate::{
    error::AppResult,
    models::{AccessToken, CatalogArtist, CatalogTrack},
};

pub mod spotify;

pub use spotify::SpotifyClient;

/// Client-credentials pair handed to the catalog client at construction
#[derive(Clone, PartialEq, Eq)]
pub struct CatalogCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for CatalogCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Token acquisition for the catalog API
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogAuth: Send + Sync {
    /// Returns a bearer token, possibly cached.
    ///
    /// Fails when credentials are missing or the provider rejects them.
    async fn access_token(&self) -> AppResult<AccessToken>;
}

/// Search capabilities of the catalog API
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Full-text track search bounded to `limit` results.
    ///
    /// Any failure is logged and reported as an empty list.
    async fn search_tracks(&self, token: &AccessToken, query: &str, limit: u32)
        -> Vec<CatalogTrack>;

    /// Best artist match for `name`, if the catalog knows one
    async fn lookup_artist(&self, token: &AccessToken, name: &str) -> Option<CatalogArtist>;
}
