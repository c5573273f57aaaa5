use std::collections::HashSet;
use std::sync::Arc;

use rayon::ThreadPoolBuildError;
use tracing::{debug, warn};

use super::config::EngineConfig;
use super::domain::{
    CardRecommendation, GapAnalysis, PriorityTier, TemplateRecommendations, ThemeCoverage,
};
use super::relevance::theme_relevance;
use crate::cards::{card_key, CardAttributes, ColorIdentity};
use crate::catalog::{DeckTemplate, TemplateCatalog, TemplateError};
use crate::metadata::MetadataProvider;
use crate::synergy::taxonomy::search_fragment_for_theme;
use crate::synergy::{CardSynergyProfile, SynergyScorer, TemplateRanker, TemplateRanking};

pub const KEY_PIECE_SCORE: f32 = 95.0;
/// Supporting cards that count as full coverage of a theme.
pub const COVERAGE_BASIS: usize = 10;
pub const GAP_RECOMMENDATIONS: usize = 15;

/// Composes the catalog, scorer and ranker into the recommendation operations.
///
/// Every operation takes its inputs explicitly and keeps no state between calls.
pub struct RecommendationEngine<C, P> {
    catalog: Arc<C>,
    ranker: TemplateRanker<P>,
    config: EngineConfig,
}

impl<C, P> RecommendationEngine<C, P>
where
    C: TemplateCatalog,
    P: MetadataProvider,
{
    pub fn new(
        catalog: Arc<C>,
        provider: Arc<P>,
        config: EngineConfig,
    ) -> Result<Self, ThreadPoolBuildError> {
        let ranker = TemplateRanker::with_workers(SynergyScorer::new(provider), config.workers)?;
        Ok(Self::with_ranker(catalog, ranker, config))
    }

    pub fn with_ranker(catalog: Arc<C>, ranker: TemplateRanker<P>, config: EngineConfig) -> Self {
        Self {
            catalog,
            ranker,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<C> {
        &self.catalog
    }

    pub fn scorer(&self) -> &SynergyScorer<P> {
        self.ranker.scorer()
    }

    fn provider(&self) -> &P {
        self.scorer().provider()
    }

    /// Best-fit catalog templates for the owned cards, using the configured threshold and size.
    pub fn rank_templates(&self, owned: &[String]) -> Vec<TemplateRanking> {
        self.ranker.rank_templates_for_cards(
            owned,
            &self.catalog.get_all(),
            self.config.min_score,
            self.config.top_templates,
        )
    }

    /// Missing key pieces first, then theme candidates from the metadata search, without
    /// repeated card names, highest score first.
    pub fn recommend_for_template(
        &self,
        template: &DeckTemplate,
        owned: &[String],
        max_results: usize,
    ) -> Result<Vec<CardRecommendation>, TemplateError> {
        template.validate()?;
        let owned = owned_keys(owned);
        let mut recommendations = Vec::new();

        for piece in &template.key_pieces {
            if piece.trim().is_empty() || owned.contains(&card_key(piece)) {
                continue;
            }
            recommendations.push(self.key_piece_recommendation(template, piece));
        }

        for theme in template.normalized_themes() {
            for (card, relevance) in
                self.theme_candidates(&theme, template.color_identity, &owned)
            {
                let mut reasons = vec![format!("supports theme {theme} (relevance {relevance})")];
                if !template.archetype.trim().is_empty() {
                    reasons.push(format!("fits the {} archetype", template.archetype));
                }
                recommendations.push(CardRecommendation {
                    card_name: card.name.clone(),
                    template_name: template.name.clone(),
                    priority: PriorityTier::from_score(relevance),
                    score: relevance,
                    reasons,
                    is_key_piece: false,
                    card: Some(card),
                });
            }
        }

        Ok(finalize(recommendations, max_results))
    }

    /// Missing key pieces, per-theme owned coverage and the top acquisition list.
    pub fn gap_analysis(
        &self,
        owned: &[String],
        template: &DeckTemplate,
    ) -> Result<GapAnalysis, TemplateError> {
        template.validate()?;
        let owned_set = owned_keys(owned);

        let missing_key_pieces = template
            .key_pieces
            .iter()
            .filter(|piece| !owned_set.contains(&card_key(piece)))
            .cloned()
            .collect();

        let profiles: Vec<CardSynergyProfile> = distinct(owned)
            .into_iter()
            .filter_map(|name| self.provider().attributes(name))
            .map(|card| CardSynergyProfile::derive(&card))
            .collect();

        let theme_coverage = template
            .normalized_themes()
            .into_iter()
            .map(|theme| {
                let supporting_cards = profiles.iter().filter(|p| p.has_theme(&theme)).count();
                ThemeCoverage {
                    coverage_percent: coverage_percent(supporting_cards),
                    supporting_cards,
                    theme,
                }
            })
            .collect();

        Ok(GapAnalysis {
            template_name: template.name.clone(),
            missing_key_pieces,
            theme_coverage,
            recommendations: self.recommend_for_template(template, owned, GAP_RECOMMENDATIONS)?,
        })
    }

    /// Per-template recommendations for the `top_templates` best-fit templates, in rank order.
    pub fn collection_recommendations(
        &self,
        owned: &[String],
        top_templates: usize,
        per_template: usize,
    ) -> Vec<TemplateRecommendations> {
        let rankings = self.ranker.rank_templates_for_cards(
            owned,
            &self.catalog.get_all(),
            self.config.min_score,
            top_templates,
        );

        rankings
            .into_iter()
            .filter_map(|ranking| {
                match self.recommend_for_template(&ranking.template, owned, per_template) {
                    Ok(recommendations) => Some(TemplateRecommendations {
                        template_name: ranking.template.name,
                        statistics: ranking.statistics,
                        recommendations,
                    }),
                    Err(err) => {
                        warn!(template = %ranking.template.name, error = %err, "skipping template");
                        None
                    }
                }
            })
            .collect()
    }

    /// Collection recommendations over the configured templates, flattened across templates.
    pub fn general_recommendations(
        &self,
        owned: &[String],
        max_results: usize,
    ) -> Vec<CardRecommendation> {
        let flattened = self
            .collection_recommendations(
                owned,
                self.config.top_templates,
                self.config.recommendations_per_template,
            )
            .into_iter()
            .flat_map(|entry| entry.recommendations)
            .collect();
        finalize(flattened, max_results)
    }

    fn key_piece_recommendation(&self, template: &DeckTemplate, piece: &str) -> CardRecommendation {
        let card = self.provider().attributes(piece);
        if card.is_none() {
            debug!(card = piece, template = %template.name, "key piece has no metadata");
        }

        let mut reasons = vec![
            format!("key piece for {}", template.name),
            format!("themes: {}", template.themes.join(", ")),
        ];
        if !template.archetype.trim().is_empty() {
            reasons.push(format!("archetype: {}", template.archetype));
        }

        CardRecommendation {
            card_name: card
                .as_ref()
                .map_or_else(|| piece.trim().to_string(), |c| c.name.clone()),
            template_name: template.name.clone(),
            priority: PriorityTier::from_score(KEY_PIECE_SCORE),
            score: KEY_PIECE_SCORE,
            reasons,
            is_key_piece: true,
            card,
        }
    }

    fn theme_candidates(
        &self,
        theme: &str,
        identity: ColorIdentity,
        owned: &HashSet<String>,
    ) -> Vec<(CardAttributes, f32)> {
        let limit = self.config.theme_candidates;
        let query = format!("{} id:{}", search_fragment_for_theme(theme), identity.symbols());
        let results = self.provider().search(&query);
        if results.is_empty() {
            debug!(theme, %query, "theme search returned no candidates");
        }

        let mut candidates: Vec<(CardAttributes, f32)> = results
            .into_iter()
            .take(limit.saturating_mul(2))
            .filter(|card| !owned.contains(&card.key()))
            .map(|card| {
                let relevance = theme_relevance(&card, theme);
                (card, relevance)
            })
            .collect();

        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
        candidates.truncate(limit);
        candidates
    }
}

pub fn coverage_percent(supporting_cards: usize) -> f32 {
    (supporting_cards as f32 / COVERAGE_BASIS as f32 * 100.0).min(100.0)
}

/// First occurrence per case-insensitive name, stable by descending score, truncated.
fn finalize(recommendations: Vec<CardRecommendation>, max_results: usize) -> Vec<CardRecommendation> {
    let mut seen = HashSet::new();
    let mut unique: Vec<CardRecommendation> = recommendations
        .into_iter()
        .filter(|rec| seen.insert(card_key(&rec.card_name)))
        .collect();
    unique.sort_by(|a, b| b.score.total_cmp(&a.score));
    unique.truncate(max_results);
    unique
}

fn owned_keys(owned: &[String]) -> HashSet<String> {
    owned.iter().map(|name| card_key(name)).collect()
}

fn distinct(owned: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    owned
        .iter()
        .filter(|name| seen.insert(card_key(name)))
        .map(String::as_str)
        .collect()
}
