use serde::{Deserialize, Serialize};

/// Thresholds and list sizes used by ranking and recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub min_score: f32,
    pub top_templates: usize,
    pub recommendations_per_template: usize,
    pub max_recommendations: usize,
    pub theme_candidates: usize,
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_score: 30.0,
            top_templates: 5,
            recommendations_per_template: 10,
            max_recommendations: 20,
            theme_candidates: 5,
            workers: 1,
        }
    }
}
