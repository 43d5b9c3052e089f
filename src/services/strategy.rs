//! Query strategy generation
//!
//! Turns a validated request into the ordered list of catalog queries the
//! orchestrator will run. The list order decides call order only; the final
//! playlist order comes from the interleave.

use crate::{
    models::{AccessToken, ContextWeights, GenerationRequest, QueryDescriptor, StrategyTag, MAX_SEED_ARTISTS},
    services::{
        catalog::CatalogSearch,
        pacing::{Pacer, PacingGap},
    },
};

const DECADES: [&str; 4] = ["2020-2025", "2010-2019", "2000-2009", "1990-1999"];
const DECADES_PER_GENRE: usize = 2;
const GENRE_GUESSES: [&str; 4] = ["rock", "folk", "alternative", "indie"];
const GENRE_GUESSES_PER_ARTIST: usize = 2;
const CONTEXT_TERMS_PER_ARTIST: usize = 2;

/// Builds every query for `request`.
///
/// The precise path resolves each seed artist's primary genre with one
/// catalog lookup; everything else is derived from the request alone.
/// Every lookup is followed by a next-batch pause, so lookups are spaced
/// from each other and from the first search.
pub async fn generate_queries(
    request: &GenerationRequest,
    catalog: &dyn CatalogSearch,
    pacer: &dyn Pacer,
    token: &AccessToken,
) -> Vec<QueryDescriptor> {
    let queries = match request {
        GenerationRequest::Quick { genres, context } => genre_queries(genres, context),
        GenerationRequest::Precise {
            seed_artists,
            context,
        } => {
            let mut queries = Vec::new();
            for (batch, artist) in seed_artists.iter().take(MAX_SEED_ARTISTS).enumerate() {
                let looked_up = catalog.lookup_artist(token, artist).await;
                pacer.pause(PacingGap::NextBatch).await;
                let primary_genre = looked_up.as_ref().and_then(|a| a.primary_genre());
                if let Some(genre) = primary_genre {
                    tracing::debug!(artist = %artist, genre = %genre, "Resolved artist genre");
                }
                queries.extend(artist_queries(artist, batch, primary_genre, context));
            }
            queries
        }
    };

    tracing::info!(
        path = %request.path(),
        query_count = queries.len(),
        "Generated search strategies"
    );

    queries
}

/// Quick path: genre-driven queries, all in one batch
pub fn genre_queries(genres: &[String], context: &ContextWeights) -> Vec<QueryDescriptor> {
    const BATCH: usize = 0;
    let mut queries = Vec::new();

    for genre in genres {
        queries.push(QueryDescriptor::new(
            StrategyTag::GenreBasic,
            format!("genre:{}", genre),
            format!("Genre: {}", genre),
            BATCH,
        ));
    }

    for genre in genres {
        queries.push(QueryDescriptor::new(
            StrategyTag::GenreHipster,
            format!("genre:{} tag:hipster", genre),
            format!("Underground {}", genre),
            BATCH,
        ));
    }

    if let Some(first) = genres.first() {
        queries.push(QueryDescriptor::new(
            StrategyTag::Recent,
            format!("genre:{} tag:new", first),
            format!("New releases in {}", first),
            BATCH,
        ));
    }

    for genre in genres {
        for decade in DECADES.iter().take(DECADES_PER_GENRE) {
            queries.push(QueryDescriptor::new(
                StrategyTag::Temporal,
                format!("genre:{} year:{}", genre, decade),
                format!("{} from {}", genre, decade),
                BATCH,
            ));
        }
    }

    let any_genre = genres.join(" OR ");

    if context.instrumentalness_above(0.6) {
        queries.push(QueryDescriptor::new(
            StrategyTag::ContextInstrumental,
            format!("instrumental {}", any_genre),
            "Instrumental focus music",
            BATCH,
        ));
    }

    if context.energy_below(0.5) {
        queries.push(QueryDescriptor::new(
            StrategyTag::ContextChill,
            format!("chill ambient {}", any_genre),
            "Chill and ambient vibes",
            BATCH,
        ));
    } else {
        queries.push(QueryDescriptor::new(
            StrategyTag::ContextEnergetic,
            format!("energetic upbeat {}", any_genre),
            "Energetic upbeat tracks",
            BATCH,
        ));
    }

    for pair in genres.windows(2) {
        queries.push(QueryDescriptor::new(
            StrategyTag::GenreCombination,
            format!("genre:{} genre:{}", pair[0], pair[1]),
            format!("{} + {} fusion", pair[0], pair[1]),
            BATCH,
        ));
    }

    queries
}

/// Precise path: queries seeded by one artist, batched by artist position.
///
/// The genre guesses run whether or not the lookup found a genre.
pub fn artist_queries(
    artist: &str,
    batch: usize,
    primary_genre: Option<&str>,
    context: &ContextWeights,
) -> Vec<QueryDescriptor> {
    let mut queries = vec![
        QueryDescriptor::new(
            StrategyTag::ArtistDirect,
            format!("artist:\"{}\"", artist),
            format!("Tracks by {}", artist),
            batch,
        ),
        QueryDescriptor::new(
            StrategyTag::ArtistBroad,
            format!("artist:{}", artist),
            format!("Broad match for {}", artist),
            batch,
        ),
    ];

    for template in [
        format!("{} similar artists", artist),
        format!("like {} recommendations", artist),
        format!("fans of {}", artist),
    ] {
        queries.push(QueryDescriptor::new(
            StrategyTag::SimilarArtists,
            template,
            format!("Artists similar to {}", artist),
            batch,
        ));
    }

    if let Some(genre) = primary_genre {
        queries.push(QueryDescriptor::new(
            StrategyTag::ArtistGenre,
            format!("genre:\"{}\"", genre),
            format!("{} (genre of {})", genre, artist),
            batch,
        ));
    }

    for guess in GENRE_GUESSES.iter().take(GENRE_GUESSES_PER_ARTIST) {
        queries.push(QueryDescriptor::new(
            StrategyTag::GenreGuess,
            format!("{} {}", artist, guess),
            format!("{} as {}", artist, guess),
            batch,
        ));
    }

    for term in context_terms(context)
        .into_iter()
        .take(CONTEXT_TERMS_PER_ARTIST)
    {
        queries.push(QueryDescriptor::new(
            StrategyTag::ContextEnhanced,
            format!("{} {}", artist, term),
            format!("{} with a {} feel", artist, term),
            batch,
        ));
    }

    queries
}

/// Descriptive search terms implied by the context weights, most specific first
pub fn context_terms(context: &ContextWeights) -> Vec<&'static str> {
    let mut terms = Vec::new();

    if context.instrumentalness_above(0.6) {
        terms.push("instrumental");
    }

    if context.energy_below(0.4) {
        terms.extend(["chill", "relaxing"]);
    } else if context.energy_above(0.7) {
        terms.extend(["energetic", "upbeat"]);
    }

    if context.danceability_above(0.7) {
        terms.extend(["dance", "groove"]);
    }

    terms
}
