use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::profile::CardSynergyProfile;
use super::taxonomy::{mechanics_for_theme, ARCHETYPE_GROUPS};
use crate::cards::CardAttributes;
use crate::catalog::{DeckTemplate, TemplateError};
use crate::metadata::MetadataProvider;

pub const MAX_SCORE: f32 = 100.0;
const COLOR_POINTS: f32 = 30.0;
const THEME_POINTS: f32 = 15.0;
const THEME_CAP: f32 = 40.0;
const MECHANIC_POINTS: f32 = 5.0;
const MECHANIC_CAP: f32 = 20.0;
const KEY_PIECE_POINTS: f32 = 10.0;
const ARCHETYPE_POINTS: f32 = 5.0;
const ARCHETYPE_CAP: f32 = 10.0;

pub const CARD_NOT_FOUND: &str = "card not found";

/// Scoring step a component was produced by, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynergyFactor {
    ColorIdentity,
    ThemeOverlap,
    MechanicOverlap,
    KeyPieceEcho,
    ArchetypeBonus,
}

/// Discrete contribution to a synergy score so every point can be traced back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: SynergyFactor,
    pub points: f32,
    pub notes: String,
}

/// Bounded compatibility between one card and one template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynergyScore {
    pub card_name: String,
    pub template_name: String,
    pub score: f32,
    pub reasons: Vec<String>,
    pub color_eligible: bool,
    pub matched_themes: Vec<String>,
    pub matched_mechanics: Vec<String>,
    pub components: Vec<ScoreComponent>,
}

impl SynergyScore {
    fn not_found(card_name: &str, template: &DeckTemplate) -> Self {
        Self {
            card_name: card_name.to_string(),
            template_name: template.name.clone(),
            score: 0.0,
            reasons: vec![CARD_NOT_FOUND.to_string()],
            color_eligible: false,
            matched_themes: Vec::new(),
            matched_mechanics: Vec::new(),
            components: Vec::new(),
        }
    }
}

/// Scores cards against templates, resolving card names through a metadata provider.
pub struct SynergyScorer<P> {
    provider: Arc<P>,
}

impl<P> Clone for SynergyScorer<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P: MetadataProvider> SynergyScorer<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Score a card by name. Unknown cards yield a zero score, never an error; only a
    /// structurally invalid template fails the call.
    pub fn score(
        &self,
        card_name: &str,
        template: &DeckTemplate,
    ) -> Result<SynergyScore, TemplateError> {
        template.validate()?;

        match self.provider.attributes(card_name) {
            Some(card) => Ok(score_attributes(&card, template)),
            None => {
                debug!(card = card_name, "card could not be resolved, scoring as zero");
                Ok(SynergyScore::not_found(card_name, template))
            }
        }
    }
}

/// Pure scoring of resolved attributes against a template.
pub fn score_attributes(card: &CardAttributes, template: &DeckTemplate) -> SynergyScore {
    let mut components = Vec::new();

    if !card.color_identity.is_subset_of(template.color_identity) {
        components.push(ScoreComponent {
            factor: SynergyFactor::ColorIdentity,
            points: 0.0,
            notes: format!(
                "color identity {} is outside template identity {}",
                card.color_identity, template.color_identity
            ),
        });
        return finish(card, template, false, components, Vec::new(), Vec::new());
    }

    components.push(ScoreComponent {
        factor: SynergyFactor::ColorIdentity,
        points: COLOR_POINTS,
        notes: format!(
            "color identity {} fits template identity {} (+{COLOR_POINTS})",
            card.color_identity, template.color_identity
        ),
    });

    let profile = CardSynergyProfile::derive(card);
    let template_themes = template.normalized_themes();

    let matched_themes: Vec<String> = template_themes
        .iter()
        .filter(|theme| profile.has_theme(theme))
        .cloned()
        .collect();
    if !matched_themes.is_empty() {
        let points = (matched_themes.len() as f32 * THEME_POINTS).min(THEME_CAP);
        components.push(ScoreComponent {
            factor: SynergyFactor::ThemeOverlap,
            points,
            notes: format!("shared themes: {} (+{points})", matched_themes.join(", ")),
        });
    }

    let matched_mechanics = matching_mechanics(&profile, &template_themes);
    if !matched_mechanics.is_empty() {
        let points = (matched_mechanics.len() as f32 * MECHANIC_POINTS).min(MECHANIC_CAP);
        components.push(ScoreComponent {
            factor: SynergyFactor::MechanicOverlap,
            points,
            notes: format!(
                "relevant mechanics: {} (+{points})",
                matched_mechanics.join(", ")
            ),
        });
    }

    let rules_text = card.rules_text_lower();
    let echoed = template
        .key_pieces
        .iter()
        .filter(|piece| !piece.trim().is_empty())
        .find(|piece| rules_text.contains(&piece.trim().to_lowercase()));
    if let Some(piece) = echoed {
        components.push(ScoreComponent {
            factor: SynergyFactor::KeyPieceEcho,
            points: KEY_PIECE_POINTS,
            notes: format!("references key piece {piece} (+{KEY_PIECE_POINTS})"),
        });
    }

    let type_line = card.type_line_lower();
    let archetype = template.archetype.to_lowercase();
    let matched_groups: Vec<&str> = ARCHETYPE_GROUPS
        .iter()
        .filter(|(label, _)| archetype.contains(label))
        .filter(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| rules_text.contains(keyword) || type_line.contains(keyword))
        })
        .map(|(label, _)| *label)
        .collect();
    if !matched_groups.is_empty() {
        let points = (matched_groups.len() as f32 * ARCHETYPE_POINTS).min(ARCHETYPE_CAP);
        components.push(ScoreComponent {
            factor: SynergyFactor::ArchetypeBonus,
            points,
            notes: format!(
                "archetype '{}' bonus from {} (+{points})",
                template.archetype,
                matched_groups.join(", ")
            ),
        });
    }

    finish(
        card,
        template,
        true,
        components,
        matched_themes,
        matched_mechanics,
    )
}

/// Each distinct card mechanic is credited once, however many template themes it serves.
fn matching_mechanics(profile: &CardSynergyProfile, template_themes: &[String]) -> Vec<String> {
    let relevant: Vec<&str> = template_themes
        .iter()
        .filter_map(|theme| mechanics_for_theme(theme))
        .flat_map(|substrings| substrings.iter().copied())
        .collect();

    profile
        .mechanics
        .iter()
        .filter(|mechanic| relevant.iter().any(|needle| mechanic.contains(needle)))
        .cloned()
        .collect()
}

fn finish(
    card: &CardAttributes,
    template: &DeckTemplate,
    color_eligible: bool,
    components: Vec<ScoreComponent>,
    matched_themes: Vec<String>,
    matched_mechanics: Vec<String>,
) -> SynergyScore {
    let total: f32 = components.iter().map(|component| component.points).sum();
    let reasons = components
        .iter()
        .map(|component| component.notes.clone())
        .collect();

    SynergyScore {
        card_name: card.name.clone(),
        template_name: template.name.clone(),
        score: total.clamp(0.0, MAX_SCORE),
        reasons,
        color_eligible,
        matched_themes,
        matched_mechanics,
        components,
    }
}
