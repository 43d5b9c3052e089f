use crate::models::{CandidateTrack, CatalogTrack, PlaylistTrack};

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_ARTIST: &str = "Unknown Artist";
const VIDEO_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";

/// Search-results link for `artist title` on the video platform. Not a
/// guaranteed direct match.
pub fn video_search_url(artist: &str, title: &str) -> String {
    format!(
        "{}{}",
        VIDEO_SEARCH_URL,
        urlencoding::encode(&format!("{} {}", artist, title))
    )
}

pub fn format_track(track: &CatalogTrack) -> PlaylistTrack {
    let title = track
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_TITLE)
        .to_string();
    let artist = track
        .primary_artist()
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_ARTIST)
        .to_string();

    PlaylistTrack {
        video_search_url: video_search_url(&artist, &title),
        album_cover_url: track.cover_url().map(str::to_string),
        catalog_url: track.catalog_url().map(str::to_string),
        title,
        artist,
    }
}

/// Maps candidates to the playlist shape; never fails
pub fn format_playlist(candidates: &[CandidateTrack]) -> Vec<PlaylistTrack> {
    candidates
        .iter()
        .map(|candidate| format_track(&candidate.track))
        .collect()
}
