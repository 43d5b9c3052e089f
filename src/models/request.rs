use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::{AppError, AppResult};

use super::context::{ContextWeights, Mood, WorkContext};

pub const MAX_GENRES: usize = 5;
pub const MAX_SEED_ARTISTS: usize = 3;

/// Which wizard path produced the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistPath {
    Quick,
    Precise,
}

impl PlaylistPath {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "quick" => Some(PlaylistPath::Quick),
            "precise" => Some(PlaylistPath::Precise),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaylistPath::Quick => "quick",
            PlaylistPath::Precise => "precise",
        }
    }
}

impl Display for PlaylistPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body as sent by the UI, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequestBody {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub seed_artists: Option<Vec<String>>,
    #[serde(default)]
    pub context: Option<ContextWeights>,
}

/// Query-string prefill, e.g. `?context=dancing&genres=electronic,house&mood=uplifting`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateQueryParams {
    pub path: Option<String>,
    pub context: Option<String>,
    pub genres: Option<String>,
    pub mood: Option<String>,
}

impl GenerateQueryParams {
    pub fn is_empty(&self) -> bool {
        self.path.is_none() && self.context.is_none() && self.genres.is_none() && self.mood.is_none()
    }

    /// Expands presets into a request body. Unknown context or mood names are
    /// ignored, and a mood only applies on top of a known context.
    pub fn into_body(self) -> GenerateRequestBody {
        let preset = self.context.as_deref().and_then(WorkContext::parse);
        if let (Some(name), None) = (&self.context, preset) {
            tracing::debug!(context = %name, "Ignoring unknown context preset");
        }

        let context = preset.map(|preset| {
            let weights = preset.weights();
            match self.mood.as_deref().and_then(Mood::parse) {
                Some(mood) => weights.with_mood(mood),
                None => weights,
            }
        });

        let genres = self
            .genres
            .map(|list| list.split(',').map(|g| g.trim().to_string()).collect());

        GenerateRequestBody {
            path: Some(self.path.unwrap_or_else(|| PlaylistPath::Quick.as_str().to_string())),
            genres,
            seed_artists: None,
            context,
        }
    }
}

/// A validated playlist generation request
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    Quick {
        genres: Vec<String>,
        context: ContextWeights,
    },
    Precise {
        seed_artists: Vec<String>,
        context: ContextWeights,
    },
}

impl GenerationRequest {
    pub fn path(&self) -> PlaylistPath {
        match self {
            GenerationRequest::Quick { .. } => PlaylistPath::Quick,
            GenerationRequest::Precise { .. } => PlaylistPath::Precise,
        }
    }

    pub fn context(&self) -> &ContextWeights {
        match self {
            GenerationRequest::Quick { context, .. } | GenerationRequest::Precise { context, .. } => {
                context
            }
        }
    }
}

impl TryFrom<GenerateRequestBody> for GenerationRequest {
    type Error = AppError;

    fn try_from(body: GenerateRequestBody) -> AppResult<Self> {
        let path = body
            .path
            .as_deref()
            .and_then(PlaylistPath::parse)
            .ok_or_else(|| {
                AppError::InvalidInput(
                    "Invalid path: the \"path\" field must be \"quick\" or \"precise\"".to_string(),
                )
            })?;

        let context = body.context.unwrap_or_default();
        if let Some(field) = context.out_of_range() {
            return Err(AppError::InvalidInput(format!(
                "Context weight \"{}\" must be a number between 0 and 1",
                field
            )));
        }

        match path {
            PlaylistPath::Quick => {
                let genres = clean_list(body.genres);
                check_bounds("genres", &genres, MAX_GENRES)?;
                Ok(GenerationRequest::Quick { genres, context })
            }
            PlaylistPath::Precise => {
                let seed_artists = clean_list(body.seed_artists);
                check_bounds("seed_artists", &seed_artists, MAX_SEED_ARTISTS)?;
                Ok(GenerationRequest::Precise {
                    seed_artists,
                    context,
                })
            }
        }
    }
}

fn clean_list(list: Option<Vec<String>>) -> Vec<String> {
    list.unwrap_or_default()
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

fn check_bounds(field: &str, list: &[String], max: usize) -> AppResult<()> {
    if list.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "\"{}\" requires at least one entry",
            field
        )));
    }
    if list.len() > max {
        return Err(AppError::InvalidInput(format!(
            "\"{}\" accepts at most {} entries, got {}",
            field,
            max,
            list.len()
        )));
    }
    Ok(())
}
