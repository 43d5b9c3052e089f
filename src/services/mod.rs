pub mod catalog;
pub mod dedup;
pub mod formatter;
pub mod interleave;
pub mod orchestrator;
pub mod pacing;
pub mod playlist;
pub mod strategy;

pub use playlist::{PlaylistGenerator, PLAYLIST_SIZE};
