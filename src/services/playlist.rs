use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{GeneratedPlaylist, GenerationRequest, PlaylistMetadata, GENERATION_METHOD},
    services::{
        catalog::{CatalogAuth, CatalogSearch},
        dedup::dedupe,
        formatter::format_playlist,
        interleave::interleave,
        orchestrator::SearchOrchestrator,
        pacing::Pacer,
        strategy::generate_queries,
    },
};

/// Number of tracks in a finished playlist
pub const PLAYLIST_SIZE: usize = 15;

/// End-to-end playlist assembly
///
/// Holds no per-request state: every call authenticates, generates queries,
/// searches, dedupes, interleaves, truncates and formats from scratch.
pub struct PlaylistGenerator {
    auth: Arc<dyn CatalogAuth>,
    catalog: Arc<dyn CatalogSearch>,
    pacer: Arc<dyn Pacer>,
    orchestrator: SearchOrchestrator,
}

impl PlaylistGenerator {
    pub fn new(
        auth: Arc<dyn CatalogAuth>,
        catalog: Arc<dyn CatalogSearch>,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        Self {
            orchestrator: SearchOrchestrator::new(catalog.clone(), pacer.clone()),
            auth,
            catalog,
            pacer,
        }
    }

    /// Builds a playlist for a validated request.
    ///
    /// Only token acquisition can fail; individual searches that fail shrink
    /// the playlist instead.
    pub async fn generate(&self, request: &GenerationRequest) -> AppResult<GeneratedPlaylist> {
        let path = request.path();
        tracing::info!(path = %path, "Starting playlist generation");

        let token = self.auth.access_token().await?;

        let queries = generate_queries(
            request,
            self.catalog.as_ref(),
            self.pacer.as_ref(),
            &token,
        )
        .await;
        let candidates = self.orchestrator.execute(&token, &queries).await;
        let total_found = candidates.len();

        let unique = dedupe(candidates);
        let after_deduplication = unique.len();

        let mut diverse = interleave(unique, &mut rand::thread_rng());
        diverse.truncate(PLAYLIST_SIZE);

        let tracks = format_playlist(&diverse);

        tracing::info!(
            path = %path,
            total_found,
            after_deduplication,
            final_count = tracks.len(),
            "Playlist generated"
        );

        Ok(GeneratedPlaylist {
            metadata: PlaylistMetadata {
                total_found,
                after_deduplication,
                final_count: tracks.len(),
                path,
                method: GENERATION_METHOD.to_string(),
                diversity_level: "high".to_string(),
            },
            tracks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{
        catalog::CatalogArtistRef, AccessToken, CatalogTrack, ContextWeights, PlaylistPath,
    };
    use crate::services::catalog::{MockCatalogAuth, MockCatalogSearch};
    use crate::services::pacing::NoPacing;

    fn token() -> AccessToken {
        AccessToken {
            access_token: "tok".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
        }
    }

    fn authenticated() -> MockCatalogAuth {
        let mut auth = MockCatalogAuth::new();
        auth.expect_access_token().returning(|| Ok(token()));
        auth
    }

    fn track(id: String, artist: &str) -> CatalogTrack {
        CatalogTrack {
            name: Some(format!("Track {}", id)),
            id: Some(id),
            artists: vec![CatalogArtistRef {
                name: Some(artist.to_string()),
            }],
            ..Default::default()
        }
    }

    fn generator(auth: MockCatalogAuth, catalog: MockCatalogSearch) -> PlaylistGenerator {
        PlaylistGenerator::new(Arc::new(auth), Arc::new(catalog), Arc::new(NoPacing))
    }

    #[tokio::test]
    async fn test_quick_path_counters() {
        let mut catalog = MockCatalogSearch::new();
        // Five distinct tracks per query
        catalog
            .expect_search_tracks()
            .returning(|_, query, _| {
                (0..5)
                    .map(|i| track(format!("{}-{}", query, i), "Various"))
                    .collect()
            });

        let request = GenerationRequest::Quick {
            genres: vec!["electronic".to_string(), "indie".to_string()],
            context: ContextWeights::new(0.7, 0.3, 0.4),
        };

        let playlist = generator(authenticated(), catalog)
            .generate(&request)
            .await
            .unwrap();

        let metadata = &playlist.metadata;
        assert_eq!(metadata.total_found, 12 * 5);
        assert_eq!(metadata.after_deduplication, 60);
        assert_eq!(metadata.final_count, PLAYLIST_SIZE);
        assert_eq!(playlist.tracks.len(), metadata.final_count);
        assert_eq!(metadata.path, PlaylistPath::Quick);
        assert_eq!(metadata.method, "fixed_search_api");
    }

    #[tokio::test]
    async fn test_precise_path_dedupes_overlapping_strategies() {
        let mut catalog = MockCatalogSearch::new();
        catalog.expect_lookup_artist().returning(|_, _| None);
        // Every query for the artist returns the same catalog of hits
        catalog
            .expect_search_tracks()
            .returning(|_, _, _| (0..4).map(|i| track(i.to_string(), "Portishead")).collect());

        let request = GenerationRequest::Precise {
            seed_artists: vec!["Portishead".to_string(); 3],
            context: ContextWeights::default(),
        };

        let playlist = generator(authenticated(), catalog)
            .generate(&request)
            .await
            .unwrap();

        assert_eq!(playlist.metadata.total_found, 3 * 7 * 4);
        assert_eq!(playlist.metadata.after_deduplication, 4);
        assert_eq!(playlist.metadata.final_count, 4);
        assert!(playlist.metadata.after_deduplication < playlist.metadata.total_found);
    }

    #[tokio::test]
    async fn test_all_searches_failing_yields_empty_playlist() {
        let mut catalog = MockCatalogSearch::new();
        catalog.expect_search_tracks().returning(|_, _, _| Vec::new());

        let request = GenerationRequest::Quick {
            genres: vec!["jazz".to_string()],
            context: ContextWeights::default(),
        };

        let playlist = generator(authenticated(), catalog)
            .generate(&request)
            .await
            .unwrap();

        assert!(playlist.tracks.is_empty());
        assert_eq!(playlist.metadata.total_found, 0);
        assert_eq!(playlist.metadata.final_count, 0);
    }

    #[tokio::test]
    async fn test_auth_failure_aborts_before_searching() {
        let mut auth = MockCatalogAuth::new();
        auth.expect_access_token()
            .returning(|| Err(AppError::Configuration("no credentials".to_string())));
        let mut catalog = MockCatalogSearch::new();
        catalog.expect_search_tracks().never();
        catalog.expect_lookup_artist().never();

        let request = GenerationRequest::Precise {
            seed_artists: vec!["Low".to_string()],
            context: ContextWeights::default(),
        };

        let result = generator(auth, catalog).generate(&request).await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_short_result_is_not_padded() {
        let mut catalog = MockCatalogSearch::new();
        catalog.expect_search_tracks().returning(|_, query, _| {
            if query == "genre:ska" {
                vec![track("only".to_string(), "The Specials")]
            } else {
                Vec::new()
            }
        });

        let request = GenerationRequest::Quick {
            genres: vec!["ska".to_string()],
            context: ContextWeights::default(),
        };

        let playlist = generator(authenticated(), catalog)
            .generate(&request)
            .await
            .unwrap();

        assert_eq!(playlist.tracks.len(), 1);
        assert_eq!(playlist.tracks[0].artist, "The Specials");
        assert_eq!(playlist.tracks[0].title, "Track only");
    }
}
