use std::sync::Arc;

use crate::cards::{CardAttributes, ColorIdentity};
use crate::catalog::DeckTemplate;
use crate::metadata::{LocalMetadataProvider, MetadataProvider};
use crate::synergy::{SynergyScore, SynergyScorer, TemplateRanker};

pub(super) fn identity(symbols: &str) -> ColorIdentity {
    symbols.parse().expect("valid identity")
}

pub(super) fn card(name: &str, colors: &str, type_line: &str, rules_text: &str) -> CardAttributes {
    CardAttributes::new(name, identity(colors))
        .with_type_line(type_line)
        .with_rules_text(rules_text)
}

pub(super) fn template(name: &str, colors: &str, themes: &[&str]) -> DeckTemplate {
    DeckTemplate {
        name: name.to_string(),
        year: 2024,
        set_code: "TST".to_string(),
        commanders: vec![format!("{name} Commander")],
        color_identity: identity(colors),
        themes: themes.iter().map(|t| t.to_string()).collect(),
        archetype: String::new(),
        key_pieces: Vec::new(),
        description: String::new(),
    }
}

pub(super) fn ranking_cards() -> Vec<CardAttributes> {
    vec![
        card("Token Maker", "G", "Creature — Elf", "Create a 1/1 green Saproling token."),
        card("Token Maker Two", "G", "Sorcery", "Create two 1/1 green Saproling tokens."),
        card(
            "Grave Digger",
            "B",
            "Creature — Zombie",
            "When Grave Digger enters, return target creature card from your graveyard to your hand.",
        ),
        card("Lightning Bolt", "R", "Instant", "Lightning Bolt deals 3 damage to any target."),
    ]
}

pub(super) fn ranking_templates() -> Vec<DeckTemplate> {
    let mut graveyard = template("Graveyard Crawl", "B", &["graveyard"]);
    graveyard.archetype = "graveyard value".to_string();
    vec![
        template("Islands Only", "U", &["artifacts"]),
        graveyard,
        template("Saproling Swarm", "G", &["tokens"]),
    ]
}

pub(super) fn provider(cards: Vec<CardAttributes>) -> Arc<LocalMetadataProvider> {
    Arc::new(LocalMetadataProvider::from_cards(cards))
}

pub(super) fn scorer(cards: Vec<CardAttributes>) -> SynergyScorer<LocalMetadataProvider> {
    SynergyScorer::new(provider(cards))
}

pub(super) fn ranker(workers: usize) -> TemplateRanker<LocalMetadataProvider> {
    TemplateRanker::with_workers(scorer(ranking_cards()), workers).expect("worker pool builds")
}

pub(super) fn names(cards: &[&str]) -> Vec<String> {
    cards.iter().map(|c| c.to_string()).collect()
}

pub(super) fn score_entry(card: &str, score: f32, themes: &[&str]) -> SynergyScore {
    SynergyScore {
        card_name: card.to_string(),
        template_name: "Fixture".to_string(),
        score,
        reasons: Vec::new(),
        color_eligible: true,
        matched_themes: themes.iter().map(|t| t.to_string()).collect(),
        matched_mechanics: Vec::new(),
        components: Vec::new(),
    }
}

/// Provider that never resolves anything, standing in for an unavailable lookup service.
pub(super) struct OfflineProvider;

impl MetadataProvider for OfflineProvider {
    fn attributes(&self, _name: &str) -> Option<CardAttributes> {
        None
    }

    fn search(&self, _query: &str) -> Vec<CardAttributes> {
        Vec::new()
    }
}
