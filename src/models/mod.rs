pub mod catalog;
pub mod context;
pub mod playlist;
pub mod request;

pub use catalog::{AccessToken, CatalogArtist, CatalogTrack};
pub use context::{ContextWeights, Mood, WorkContext};
pub use playlist::{
    CandidateTrack, GeneratePlaylistResponse, GeneratedPlaylist, PlaylistMetadata, PlaylistTrack,
    QueryDescriptor, RequestSource, StrategyTag, GENERATION_METHOD,
};
pub use request::{
    GenerateQueryParams, GenerateRequestBody, GenerationRequest, PlaylistPath, MAX_GENRES,
    MAX_SEED_ARTISTS,
};
