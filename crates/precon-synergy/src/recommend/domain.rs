use serde::{Deserialize, Serialize};

use crate::cards::CardAttributes;
use crate::synergy::TemplateStatistics;

pub const HIGH_PRIORITY_SCORE: f32 = 80.0;
pub const MEDIUM_PRIORITY_SCORE: f32 = 60.0;

/// Acquisition urgency derived from a recommendation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    High,
    Medium,
    Low,
}

impl PriorityTier {
    /// Thresholds are inclusive: 80 is high, 60 is medium.
    pub fn from_score(score: f32) -> Self {
        if score >= HIGH_PRIORITY_SCORE {
            Self::High
        } else if score >= MEDIUM_PRIORITY_SCORE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityTier::High => "high",
            PriorityTier::Medium => "medium",
            PriorityTier::Low => "low",
        }
    }
}

/// A card suggested for acquisition on behalf of one template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecommendation {
    pub card_name: String,
    pub template_name: String,
    pub priority: PriorityTier,
    pub score: f32,
    pub reasons: Vec<String>,
    pub is_key_piece: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardAttributes>,
}

/// Owned support for one declared theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeCoverage {
    pub theme: String,
    pub supporting_cards: usize,
    pub coverage_percent: f32,
}

/// What a collection lacks to build a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub template_name: String,
    pub missing_key_pieces: Vec<String>,
    pub theme_coverage: Vec<ThemeCoverage>,
    pub recommendations: Vec<CardRecommendation>,
}

impl GapAnalysis {
    pub fn coverage_for(&self, theme: &str) -> Option<&ThemeCoverage> {
        self.theme_coverage
            .iter()
            .find(|coverage| coverage.theme.eq_ignore_ascii_case(theme.trim()))
    }
}

/// Recommendations for one of the templates that best fit a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateRecommendations {
    pub template_name: String,
    pub statistics: TemplateStatistics,
    pub recommendations: Vec<CardRecommendation>,
}
