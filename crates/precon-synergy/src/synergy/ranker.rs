use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use serde::Serialize;
use tracing::{debug, warn};

use super::scorer::{SynergyScore, SynergyScorer};
use super::stats::{descending, TemplateStatistics};
use crate::catalog::DeckTemplate;
use crate::metadata::MetadataProvider;

/// A template that qualified for a collection, with the scores that qualified it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateRanking {
    pub template: DeckTemplate,
    pub statistics: TemplateStatistics,
    pub scores: Vec<SynergyScore>,
}

/// Scores a card list against many templates and orders templates by fit.
pub struct TemplateRanker<P> {
    scorer: SynergyScorer<P>,
    pool: Option<Arc<ThreadPool>>,
}

impl<P> Clone for TemplateRanker<P> {
    fn clone(&self) -> Self {
        Self {
            scorer: self.scorer.clone(),
            pool: self.pool.clone(),
        }
    }
}

impl<P: MetadataProvider> TemplateRanker<P> {
    /// Sequential ranker.
    pub fn new(scorer: SynergyScorer<P>) -> Self {
        Self { scorer, pool: None }
    }

    /// Ranker scoring templates on a dedicated pool of `workers` threads; one worker or
    /// fewer stays sequential.
    pub fn with_workers(
        scorer: SynergyScorer<P>,
        workers: usize,
    ) -> Result<Self, ThreadPoolBuildError> {
        if workers <= 1 {
            return Ok(Self::new(scorer));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("synergy-worker-{index}"))
            .build()?;
        Ok(Self {
            scorer,
            pool: Some(Arc::new(pool)),
        })
    }

    pub fn scorer(&self) -> &SynergyScorer<P> {
        &self.scorer
    }

    pub fn workers(&self) -> usize {
        self.pool
            .as_ref()
            .map_or(1, |pool| pool.current_num_threads())
    }

    /// Rank templates by qualifying card count, then mean qualifying score.
    ///
    /// Templates with no card at or above `min_score` are left out, as are structurally
    /// invalid templates.
    pub fn rank_templates_for_cards(
        &self,
        cards: &[String],
        templates: &[DeckTemplate],
        min_score: f32,
        top_n: usize,
    ) -> Vec<TemplateRanking> {
        let evaluate =
            |template: &DeckTemplate| self.rank_template(cards, template, min_score);

        let mut rankings: Vec<TemplateRanking> = match &self.pool {
            Some(pool) => pool.install(|| templates.par_iter().filter_map(evaluate).collect()),
            None => templates.iter().filter_map(evaluate).collect(),
        };

        rankings.sort_by(|a, b| {
            b.statistics
                .card_count
                .cmp(&a.statistics.card_count)
                .then_with(|| descending(a.statistics.mean_score, b.statistics.mean_score))
        });
        rankings.truncate(top_n);
        rankings
    }

    fn rank_template(
        &self,
        cards: &[String],
        template: &DeckTemplate,
        min_score: f32,
    ) -> Option<TemplateRanking> {
        let scores = cards
            .iter()
            .map(|card| self.scorer.score(card, template))
            .collect::<Result<Vec<_>, _>>();

        let mut qualifying: Vec<SynergyScore> = match scores {
            Ok(scores) => scores.into_iter().filter(|s| s.score >= min_score).collect(),
            Err(err) => {
                warn!(template = %template.name, error = %err, "skipping invalid template");
                return None;
            }
        };

        if qualifying.is_empty() {
            debug!(template = %template.name, "no qualifying cards");
            return None;
        }

        qualifying.sort_by(|a, b| descending(a.score, b.score));
        Some(TemplateRanking {
            template: template.clone(),
            statistics: TemplateStatistics::aggregate(&qualifying),
            scores: qualifying,
        })
    }
}
