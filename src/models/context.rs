use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Desired mood/activity fit, each weight in `[0, 1]`.
///
/// Weights only bias the text of catalog queries. An absent weight never
/// triggers a context rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextWeights {
    #[serde(default)]
    pub target_instrumentalness: Option<f64>,
    #[serde(default)]
    pub max_energy: Option<f64>,
    #[serde(default)]
    pub target_danceability: Option<f64>,
}

impl ContextWeights {
    pub const fn new(instrumentalness: f64, max_energy: f64, danceability: f64) -> Self {
        Self {
            target_instrumentalness: Some(instrumentalness),
            max_energy: Some(max_energy),
            target_danceability: Some(danceability),
        }
    }

    pub fn instrumentalness_above(&self, threshold: f64) -> bool {
        matches!(self.target_instrumentalness, Some(v) if v > threshold)
    }

    pub fn energy_below(&self, threshold: f64) -> bool {
        matches!(self.max_energy, Some(v) if v < threshold)
    }

    pub fn energy_above(&self, threshold: f64) -> bool {
        matches!(self.max_energy, Some(v) if v > threshold)
    }

    pub fn danceability_above(&self, threshold: f64) -> bool {
        matches!(self.target_danceability, Some(v) if v > threshold)
    }

    /// Name of the first weight that is not a finite number in `[0, 1]`
    pub fn out_of_range(&self) -> Option<&'static str> {
        [
            ("target_instrumentalness", self.target_instrumentalness),
            ("max_energy", self.max_energy),
            ("target_danceability", self.target_danceability),
        ]
        .into_iter()
        .find_map(|(name, value)| match value {
            Some(v) if !v.is_finite() || !(0.0..=1.0).contains(&v) => Some(name),
            _ => None,
        })
    }

    /// Overrides the weights a mood cares about, leaving the others untouched
    pub fn with_mood(mut self, mood: Mood) -> Self {
        let adjustment = mood.adjustment();
        if adjustment.target_instrumentalness.is_some() {
            self.target_instrumentalness = adjustment.target_instrumentalness;
        }
        if adjustment.max_energy.is_some() {
            self.max_energy = adjustment.max_energy;
        }
        if adjustment.target_danceability.is_some() {
            self.target_danceability = adjustment.target_danceability;
        }
        self
    }
}

/// Work and activity presets offered by the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkContext {
    Focus,
    Creative,
    Admin,
    Casual,
    Dancing,
    Party,
    Workout,
    Study,
    Sleep,
    Drive,
}

impl WorkContext {
    pub const ALL: [WorkContext; 10] = [
        WorkContext::Focus,
        WorkContext::Creative,
        WorkContext::Admin,
        WorkContext::Casual,
        WorkContext::Dancing,
        WorkContext::Party,
        WorkContext::Workout,
        WorkContext::Study,
        WorkContext::Sleep,
        WorkContext::Drive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkContext::Focus => "focus",
            WorkContext::Creative => "creative",
            WorkContext::Admin => "admin",
            WorkContext::Casual => "casual",
            WorkContext::Dancing => "dancing",
            WorkContext::Party => "party",
            WorkContext::Workout => "workout",
            WorkContext::Study => "study",
            WorkContext::Sleep => "sleep",
            WorkContext::Drive => "drive",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|context| context.as_str().eq_ignore_ascii_case(name))
    }

    pub fn weights(&self) -> ContextWeights {
        match self {
            WorkContext::Focus => ContextWeights::new(0.7, 0.5, 0.4),
            WorkContext::Creative => ContextWeights::new(0.4, 0.7, 0.6),
            WorkContext::Admin => ContextWeights::new(0.3, 0.6, 0.7),
            WorkContext::Casual => ContextWeights::new(0.5, 0.5, 0.5),
            WorkContext::Dancing => ContextWeights::new(0.1, 0.9, 0.9),
            WorkContext::Party => ContextWeights::new(0.2, 0.8, 0.8),
            WorkContext::Workout => ContextWeights::new(0.3, 0.9, 0.7),
            WorkContext::Study => ContextWeights::new(0.8, 0.3, 0.2),
            WorkContext::Sleep => ContextWeights::new(0.9, 0.1, 0.1),
            WorkContext::Drive => ContextWeights::new(0.4, 0.6, 0.6),
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(WorkContext::as_str).collect()
    }
}

impl Display for WorkContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Calm,
    Energetic,
    Ambient,
    Uplifting,
}

impl Mood {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "calm" => Some(Mood::Calm),
            "energetic" => Some(Mood::Energetic),
            "ambient" => Some(Mood::Ambient),
            "uplifting" => Some(Mood::Uplifting),
            _ => None,
        }
    }

    fn adjustment(&self) -> ContextWeights {
        match self {
            Mood::Calm => ContextWeights {
                target_instrumentalness: Some(0.8),
                max_energy: Some(0.3),
                target_danceability: None,
            },
            Mood::Energetic => ContextWeights {
                target_instrumentalness: Some(0.2),
                max_energy: Some(0.8),
                target_danceability: None,
            },
            Mood::Ambient => ContextWeights {
                target_instrumentalness: Some(0.9),
                max_energy: Some(0.2),
                target_danceability: None,
            },
            Mood::Uplifting => ContextWeights {
                target_instrumentalness: None,
                max_energy: Some(0.7),
                target_danceability: Some(0.8),
            },
        }
    }
}
