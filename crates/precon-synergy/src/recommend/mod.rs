//! Acquisition suggestions and gap analysis built on top of synergy scoring.

mod config;
mod domain;
mod engine;
mod relevance;

#[cfg(test)]
mod tests;

pub use config::EngineConfig;
pub use domain::{
    CardRecommendation, GapAnalysis, PriorityTier, TemplateRecommendations, ThemeCoverage,
    HIGH_PRIORITY_SCORE, MEDIUM_PRIORITY_SCORE,
};
pub use engine::{
    coverage_percent, RecommendationEngine, COVERAGE_BASIS, GAP_RECOMMENDATIONS, KEY_PIECE_SCORE,
};
pub use relevance::{theme_relevance, MAX_RELEVANCE};
