use std::sync::Arc;

use crate::{
    models::{AccessToken, CandidateTrack, QueryDescriptor},
    services::{
        catalog::CatalogSearch,
        pacing::{Pacer, PacingGap},
    },
};

/// Runs generated queries one after another against the catalog
///
/// A query that fails or finds nothing contributes zero candidates; the batch
/// always runs to the end.
pub struct SearchOrchestrator {
    catalog: Arc<dyn CatalogSearch>,
    pacer: Arc<dyn Pacer>,
}

impl SearchOrchestrator {
    pub fn new(catalog: Arc<dyn CatalogSearch>, pacer: Arc<dyn Pacer>) -> Self {
        Self { catalog, pacer }
    }

    /// Collects candidates in query order, then the catalog's result order
    pub async fn execute(
        &self,
        token: &AccessToken,
        descriptors: &[QueryDescriptor],
    ) -> Vec<CandidateTrack> {
        let mut candidates = Vec::new();
        let mut empty_queries = 0usize;

        for (i, descriptor) in descriptors.iter().enumerate() {
            if i > 0 {
                let gap = if descriptors[i - 1].batch == descriptor.batch {
                    PacingGap::SameBatch
                } else {
                    PacingGap::NextBatch
                };
                self.pacer.pause(gap).await;
            }

            let tracks = self
                .catalog
                .search_tracks(token, &descriptor.query_text, descriptor.limit)
                .await;

            if tracks.is_empty() {
                empty_queries += 1;
                tracing::debug!(
                    strategy = %descriptor.strategy,
                    query = %descriptor.query_text,
                    "No tracks found"
                );
                continue;
            }

            tracing::debug!(
                strategy = %descriptor.strategy,
                description = %descriptor.description,
                results = tracks.len(),
                "Strategy returned tracks"
            );

            candidates.extend(
                tracks
                    .into_iter()
                    .map(|track| CandidateTrack::new(track, descriptor)),
            );
        }

        if empty_queries > 0 {
            tracing::warn!(
                empty_queries,
                total_queries = descriptors.len(),
                "Some searches returned no tracks"
            );
        }

        tracing::info!(
            queries = descriptors.len(),
            candidates = candidates.len(),
            "Search strategies executed"
        );

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogTrack, StrategyTag};
    use crate::services::catalog::MockCatalogSearch;
    use crate::services::pacing::NoPacing;
    use std::sync::Mutex;

    /// Records the gaps it was asked to wait for
    #[derive(Default)]
    struct RecordingPacer {
        gaps: Mutex<Vec<PacingGap>>,
    }

    #[async_trait::async_trait]
    impl Pacer for RecordingPacer {
        async fn pause(&self, gap: PacingGap) {
            self.gaps.lock().unwrap().push(gap);
        }
    }

    fn token() -> AccessToken {
        AccessToken {
            access_token: "tok".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
        }
    }

    fn track(id: &str) -> CatalogTrack {
        CatalogTrack {
            id: Some(id.to_string()),
            name: Some(format!("Song {}", id)),
            ..Default::default()
        }
    }

    fn descriptor(strategy: StrategyTag, query: &str, batch: usize) -> QueryDescriptor {
        QueryDescriptor::new(strategy, query, query, batch)
    }

    #[tokio::test]
    async fn test_execute_tags_and_preserves_order() {
        let mut catalog = MockCatalogSearch::new();
        catalog
            .expect_search_tracks()
            .returning(|_, query, _| match query {
                "genre:jazz" => vec![track("a"), track("b")],
                "genre:jazz tag:hipster" => vec![track("c")],
                _ => Vec::new(),
            });

        let orchestrator = SearchOrchestrator::new(Arc::new(catalog), Arc::new(NoPacing));
        let descriptors = vec![
            descriptor(StrategyTag::GenreBasic, "genre:jazz", 0),
            descriptor(StrategyTag::GenreHipster, "genre:jazz tag:hipster", 0),
        ];

        let candidates = orchestrator.execute(&token(), &descriptors).await;

        let ids: Vec<_> = candidates
            .iter()
            .map(|c| c.track.id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(candidates[0].strategy, StrategyTag::GenreBasic);
        assert_eq!(candidates[0].query, "genre:jazz");
        assert_eq!(candidates[2].strategy, StrategyTag::GenreHipster);
        assert_eq!(candidates[2].query, "genre:jazz tag:hipster");
    }

    #[tokio::test]
    async fn test_execute_passes_strategy_limit() {
        let mut catalog = MockCatalogSearch::new();
        catalog
            .expect_search_tracks()
            .withf(|_, query, limit| query == "artist:\"Low\"" && *limit == 15)
            .times(1)
            .returning(|_, _, _| vec![track("x")]);
        catalog
            .expect_search_tracks()
            .withf(|_, query, limit| query == "Low rock" && *limit == 5)
            .times(1)
            .returning(|_, _, _| Vec::new());

        let orchestrator = SearchOrchestrator::new(Arc::new(catalog), Arc::new(NoPacing));
        let descriptors = vec![
            descriptor(StrategyTag::ArtistDirect, "artist:\"Low\"", 0),
            descriptor(StrategyTag::GenreGuess, "Low rock", 0),
        ];

        let candidates = orchestrator.execute(&token(), &descriptors).await;
        assert_eq!(candidates.len(), 1);
    }

    #[tokio::test]
    async fn test_execute_survives_every_query_failing() {
        let mut catalog = MockCatalogSearch::new();
        catalog
            .expect_search_tracks()
            .times(3)
            .returning(|_, _, _| Vec::new());

        let orchestrator = SearchOrchestrator::new(Arc::new(catalog), Arc::new(NoPacing));
        let descriptors = vec![
            descriptor(StrategyTag::GenreBasic, "genre:a", 0),
            descriptor(StrategyTag::GenreBasic, "genre:b", 0),
            descriptor(StrategyTag::Recent, "genre:a tag:new", 0),
        ];

        assert!(orchestrator.execute(&token(), &descriptors).await.is_empty());
    }

    #[tokio::test]
    async fn test_execute_paces_between_calls() {
        let mut catalog = MockCatalogSearch::new();
        catalog
            .expect_search_tracks()
            .returning(|_, _, _| Vec::new());

        let pacer = Arc::new(RecordingPacer::default());
        let orchestrator = SearchOrchestrator::new(Arc::new(catalog), pacer.clone());
        let descriptors = vec![
            descriptor(StrategyTag::ArtistDirect, "q1", 0),
            descriptor(StrategyTag::ArtistBroad, "q2", 0),
            descriptor(StrategyTag::ArtistDirect, "q3", 1),
            descriptor(StrategyTag::ArtistBroad, "q4", 1),
        ];

        orchestrator.execute(&token(), &descriptors).await;

        assert_eq!(
            *pacer.gaps.lock().unwrap(),
            vec![
                PacingGap::SameBatch,
                PacingGap::NextBatch,
                PacingGap::SameBatch
            ]
        );
    }

    #[tokio::test]
    async fn test_execute_with_no_descriptors() {
        let catalog = MockCatalogSearch::new();
        let pacer = Arc::new(RecordingPacer::default());
        let orchestrator = SearchOrchestrator::new(Arc::new(catalog), pacer.clone());

        assert!(orchestrator.execute(&token(), &[]).await.is_empty());
        assert!(pacer.gaps.lock().unwrap().is_empty());
    }
}
