use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::{catalog::CatalogTrack, request::PlaylistPath};

/// Rule of the query generator that produced a query. Partition key for
/// the diversity interleave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyTag {
    GenreBasic,
    GenreHipster,
    Recent,
    Temporal,
    ContextInstrumental,
    ContextChill,
    ContextEnergetic,
    GenreCombination,
    ArtistDirect,
    ArtistBroad,
    SimilarArtists,
    ArtistGenre,
    GenreGuess,
    ContextEnhanced,
    #[serde(other)]
    Unknown,
}

impl StrategyTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyTag::GenreBasic => "genre_basic",
            StrategyTag::GenreHipster => "genre_hipster",
            StrategyTag::Recent => "recent",
            StrategyTag::Temporal => "temporal",
            StrategyTag::ContextInstrumental => "context_instrumental",
            StrategyTag::ContextChill => "context_chill",
            StrategyTag::ContextEnergetic => "context_energetic",
            StrategyTag::GenreCombination => "genre_combination",
            StrategyTag::ArtistDirect => "artist_direct",
            StrategyTag::ArtistBroad => "artist_broad",
            StrategyTag::SimilarArtists => "similar_artists",
            StrategyTag::ArtistGenre => "artist_genre",
            StrategyTag::GenreGuess => "genre_guess",
            StrategyTag::ContextEnhanced => "context_enhanced",
            StrategyTag::Unknown => "unknown",
        }
    }

    /// How many catalog results a query of this strategy asks for. Direct
    /// matches get the most room, exploratory queries the least.
    pub fn result_limit(&self) -> u32 {
        match self {
            StrategyTag::ArtistDirect => 15,
            StrategyTag::ArtistGenre => 12,
            StrategyTag::ArtistBroad => 10,
            StrategyTag::SimilarArtists => 8,
            StrategyTag::ContextEnhanced => 6,
            StrategyTag::GenreGuess => 5,
            _ => 30,
        }
    }
}

impl Display for StrategyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One catalog query to run
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    pub query_text: String,
    pub strategy: StrategyTag,
    pub description: String,
    /// Maximum number of results requested from the catalog
    pub limit: u32,
    /// Queries sharing a batch (the genre set, or one seed artist) are paced
    /// with the short delay; a batch change uses the long one.
    pub batch: usize,
}

impl QueryDescriptor {
    pub fn new(
        strategy: StrategyTag,
        query_text: impl Into<String>,
        description: impl Into<String>,
        batch: usize,
    ) -> Self {
        Self {
            query_text: query_text.into(),
            strategy,
            description: description.into(),
            limit: strategy.result_limit(),
            batch,
        }
    }
}

/// A raw catalog track together with the query that found it
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTrack {
    pub track: CatalogTrack,
    pub strategy: StrategyTag,
    pub query: String,
}

impl CandidateTrack {
    pub fn new(track: CatalogTrack, descriptor: &QueryDescriptor) -> Self {
        Self {
            track,
            strategy: descriptor.strategy,
            query: descriptor.query_text.clone(),
        }
    }
}

/// Track shape consumed by the results page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub title: String,
    pub artist: String,
    #[serde(rename = "albumCover")]
    pub album_cover_url: Option<String>,
    #[serde(rename = "spotifyUrl")]
    pub catalog_url: Option<String>,
    #[serde(rename = "youtubeUrl")]
    pub video_search_url: String,
}

pub const GENERATION_METHOD: &str = "fixed_search_api";

/// Observational counters of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistMetadata {
    pub total_found: usize,
    pub after_deduplication: usize,
    pub final_count: usize,
    pub path: PlaylistPath,
    pub method: String,
    pub diversity_level: String,
}

/// Result of the pipeline, before it is wrapped in an HTTP response
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPlaylist {
    pub tracks: Vec<PlaylistTrack>,
    pub metadata: PlaylistMetadata,
}

/// Where the request parameters came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestSource {
    PostBody,
    QueryParameters,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratePlaylistResponse {
    pub success: bool,
    pub message: String,
    pub path: PlaylistPath,
    pub method: String,
    pub source: RequestSource,
    pub playlist: Vec<PlaylistTrack>,
    pub metadata: PlaylistMetadata,
    pub available_contexts: Vec<String>,
    pub timestamp: String,
}
