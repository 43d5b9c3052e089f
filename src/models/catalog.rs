use serde::Deserialize;

// ============================================================================
// Spotify Web API Types
// ============================================================================
//
// Every field is optional: the catalog is third-party and partial records
// must never fail deserialization of the whole page.

/// Track object as returned by `GET /search?type=track`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CatalogTrack {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<CatalogArtistRef>,
    #[serde(default)]
    pub album: Option<CatalogAlbum>,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
    #[serde(default)]
    pub external_ids: Option<ExternalIds>,
}

impl CatalogTrack {
    /// Name of the first credited artist
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().and_then(|a| a.name.as_deref())
    }

    /// International Standard Recording Code, when the catalog reports one
    pub fn isrc(&self) -> Option<&str> {
        self.external_ids
            .as_ref()
            .and_then(|ids| ids.isrc.as_deref())
            .filter(|isrc| !isrc.is_empty())
    }

    /// Largest album image (the catalog orders images widest first)
    pub fn cover_url(&self) -> Option<&str> {
        self.album
            .as_ref()
            .and_then(|album| album.images.first())
            .and_then(|image| image.url.as_deref())
    }

    pub fn catalog_url(&self) -> Option<&str> {
        self.external_urls
            .as_ref()
            .and_then(|urls| urls.spotify.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CatalogArtistRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CatalogAlbum {
    #[serde(default)]
    pub images: Vec<CatalogImage>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CatalogImage {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ExternalIds {
    #[serde(default)]
    pub isrc: Option<String>,
}

/// Artist object as returned by `GET /search?type=artist`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CatalogArtist {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl CatalogArtist {
    pub fn primary_genre(&self) -> Option<&str> {
        self.genres
            .iter()
            .map(String::as_str)
            .find(|genre| !genre.trim().is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Envelope of `GET /search?type=track`
#[derive(Debug, Default, Deserialize)]
pub struct TrackSearchResponse {
    #[serde(default)]
    pub tracks: Option<Paging<CatalogTrack>>,
}

/// Envelope of `GET /search?type=artist`
#[derive(Debug, Default, Deserialize)]
pub struct ArtistSearchResponse {
    #[serde(default)]
    pub artists: Option<Paging<CatalogArtist>>,
}

/// Token endpoint response of the client-credentials flow
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}
