use std::collections::HashSet;

use crate::models::CandidateTrack;

/// Identity keys of a candidate. All keys share one namespace-prefixed set,
/// so a later candidate matching any key of an accepted one is dropped.
fn identity_keys(candidate: &CandidateTrack) -> Vec<String> {
    let track = &candidate.track;
    let mut keys = Vec::with_capacity(3);

    if let Some(id) = track.id.as_deref().filter(|id| !id.is_empty()) {
        keys.push(format!("id:{}", id));
    }

    keys.push(format!(
        "artist-title:{}-{}",
        track.primary_artist().unwrap_or_default(),
        track.name.as_deref().unwrap_or_default()
    )
    .to_lowercase());

    if let Some(isrc) = track.isrc() {
        keys.push(format!("isrc:{}", isrc));
    }

    keys
}

/// Drops every candidate that shares a catalog id, a case-insensitive
/// artist-title pair, or an ISRC with an earlier one. First occurrence wins.
pub fn dedupe(candidates: Vec<CandidateTrack>) -> Vec<CandidateTrack> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let keys = identity_keys(&candidate);
        if keys.iter().any(|key| seen.contains(key)) {
            continue;
        }
        seen.extend(keys);
        unique.push(candidate);
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        catalog::{CatalogArtistRef, ExternalIds},
        CatalogTrack, StrategyTag,
    };

    fn candidate(id: &str, artist: &str, title: &str, isrc: Option<&str>) -> CandidateTrack {
        CandidateTrack {
            track: CatalogTrack {
                id: Some(id.to_string()),
                name: Some(title.to_string()),
                artists: vec![CatalogArtistRef {
                    name: Some(artist.to_string()),
                }],
                external_ids: isrc.map(|isrc| ExternalIds {
                    isrc: Some(isrc.to_string()),
                }),
                ..Default::default()
            },
            strategy: StrategyTag::GenreBasic,
            query: "genre:test".to_string(),
        }
    }

    fn ids(candidates: &[CandidateTrack]) -> Vec<&str> {
        candidates
            .iter()
            .map(|c| c.track.id.as_deref().unwrap())
            .collect()
    }

    #[test]
    fn test_duplicate_id_dropped() {
        let unique = dedupe(vec![
            candidate("1", "Air", "La Femme d'Argent", None),
            candidate("1", "Air (remastered)", "Other", None),
        ]);
        assert_eq!(ids(&unique), vec!["1"]);
    }

    #[test]
    fn test_artist_title_case_insensitive() {
        let unique = dedupe(vec![
            candidate("1", "Portishead", "Glory Box", None),
            candidate("2", "PORTISHEAD", "glory box", None),
            candidate("3", "Portishead", "Roads", None),
        ]);
        assert_eq!(ids(&unique), vec!["1", "3"]);
    }

    #[test]
    fn test_isrc_match_dropped() {
        let unique = dedupe(vec![
            candidate("1", "Moby", "Porcelain", Some("USXX19900001")),
            candidate("2", "Moby", "Porcelain (Radio Edit)", Some("USXX19900001")),
        ]);
        assert_eq!(ids(&unique), vec!["1"]);
    }

    #[test]
    fn test_keys_are_unioned_across_candidates() {
        // Third candidate shares the id of the first and the ISRC of the second;
        // each key alone is enough to drop it.
        let unique = dedupe(vec![
            candidate("1", "A", "One", Some("ISRC1")),
            candidate("2", "B", "Two", Some("ISRC2")),
            candidate("9", "C", "Three", Some("ISRC2")),
            candidate("1", "D", "Four", None),
        ]);
        assert_eq!(ids(&unique), vec!["1", "2"]);
    }

    #[test]
    fn test_preserves_first_seen_order_and_is_idempotent() {
        let input = vec![
            candidate("3", "C", "Three", None),
            candidate("1", "A", "One", None),
            candidate("3", "C", "Three", None),
            candidate("2", "B", "Two", None),
            candidate("1", "A", "One", None),
        ];

        let once = dedupe(input.clone());
        assert_eq!(ids(&once), vec!["3", "1", "2"]);
        assert!(once.len() <= input.len());

        let twice = dedupe(once.clone());
        assert_eq!(twice, once);
    }

    #[test]
    fn test_missing_ids_do_not_collide() {
        let mut first = candidate("x", "A", "One", None);
        first.track.id = None;
        let mut second = candidate("x", "B", "Two", None);
        second.track.id = None;

        assert_eq!(dedupe(vec![first, second]).len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedupe(Vec::new()).is_empty());
    }
}
