use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::scorer::SynergyScore;

pub const TOP_CONTRIBUTORS: usize = 5;

/// Summary of the synergy scores collected for one template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateStatistics {
    pub card_count: usize,
    pub mean_score: f32,
    pub max_score: f32,
    pub min_score: f32,
    pub theme_histogram: BTreeMap<String, usize>,
    pub top_cards: Vec<SynergyScore>,
}

impl TemplateStatistics {
    /// Aggregate scores; an empty slice yields the all-zero record.
    pub fn aggregate(scores: &[SynergyScore]) -> Self {
        if scores.is_empty() {
            return Self::default();
        }

        let total: f32 = scores.iter().map(|s| s.score).sum();
        let max_score = scores.iter().map(|s| s.score).fold(f32::MIN, f32::max);
        let min_score = scores.iter().map(|s| s.score).fold(f32::MAX, f32::min);

        let mut theme_histogram = BTreeMap::new();
        for theme in scores.iter().flat_map(|s| &s.matched_themes) {
            *theme_histogram.entry(theme.clone()).or_insert(0) += 1;
        }

        Self {
            card_count: scores.len(),
            mean_score: total / scores.len() as f32,
            max_score,
            min_score,
            theme_histogram,
            top_cards: top_scores(scores, TOP_CONTRIBUTORS),
        }
    }
}

/// Highest scores first; equal scores keep their input order.
pub fn top_scores(scores: &[SynergyScore], limit: usize) -> Vec<SynergyScore> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| descending(a.score, b.score));
    sorted.truncate(limit);
    sorted
}

pub(crate) fn descending(a: f32, b: f32) -> Ordering {
    b.total_cmp(&a)
}
