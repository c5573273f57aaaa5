//! Card-to-template synergy scoring, aggregation and template ranking.

mod profile;
mod ranker;
mod scorer;
mod stats;
pub mod taxonomy;

#[cfg(test)]
mod tests;

pub use profile::CardSynergyProfile;
pub use ranker::{TemplateRanker, TemplateRanking};
pub use scorer::{
    score_attributes, ScoreComponent, SynergyFactor, SynergyScore, SynergyScorer, CARD_NOT_FOUND,
    MAX_SCORE,
};
pub use stats::{top_scores, TemplateStatistics, TOP_CONTRIBUTORS};
