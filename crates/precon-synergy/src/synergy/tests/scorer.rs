use std::sync::Arc;

use super::common::*;
use crate::catalog::{seed_templates, TemplateError};
use crate::metadata::{LocalMetadataProvider, MetadataProvider};
use crate::synergy::{score_attributes, SynergyFactor, SynergyScorer, CARD_NOT_FOUND};

#[test]
fn colorless_template_rejects_colored_card() {
    let template = template("Void", "colorless", &["graveyard"]);
    let score = score_attributes(
        &card("Reach Through", "U", "Sorcery", "Return a card from your graveyard."),
        &template,
    );

    assert_eq!(score.score, 0.0);
    assert!(!score.color_eligible);
    assert_eq!(score.reasons.len(), 1);
    assert!(score.matched_themes.is_empty());
}

#[test]
fn ineligible_cards_score_zero_whatever_their_text() {
    let mut template = template("Azorius", "WU", &["tokens", "artifacts", "sacrifice"]);
    template.archetype = "artifact tokens".to_string();
    template.key_pieces = vec!["Ashnod's Altar".to_string()];

    let loaded = card(
        "Everything Engine",
        "R",
        "Artifact Creature — Dragon",
        "Sacrifice an artifact: create a Treasure token. Untap Ashnod's Altar.",
    );
    let score = score_attributes(&loaded, &template);

    assert_eq!(score.score, 0.0);
    assert!(!score.color_eligible);
    assert_eq!(score.components.len(), 1);
    assert_eq!(score.components[0].factor, SynergyFactor::ColorIdentity);
}

#[test]
fn single_theme_match_scores_color_theme_and_mechanic() {
    let template = template("Azorius Recursion", "WU", &["graveyard"]);
    let score = score_attributes(
        &card(
            "Reach Through",
            "U",
            "Sorcery",
            "Return target card from your graveyard to your hand.",
        ),
        &template,
    );

    assert!(score.color_eligible);
    assert_eq!(score.matched_themes, vec!["graveyard"]);
    assert_eq!(score.matched_mechanics, vec!["graveyard"]);
    assert_eq!(score.score, 50.0);
    assert_eq!(score.reasons.len(), 3);
    assert!(score.reasons[1].contains("graveyard"));
}

#[test]
fn shared_mechanic_is_credited_once_across_themes() {
    let template = template("Golgari", "BG", &["sacrifice", "graveyard"]);
    let score = score_attributes(
        &card("Viscera Seer", "B", "Creature — Vampire Wizard", "Sacrifice a creature: Scry 1."),
        &template,
    );

    assert_eq!(score.matched_themes, vec!["sacrifice"]);
    assert_eq!(score.matched_mechanics, vec!["sacrifice"]);
    assert_eq!(score.score, 50.0);
}

#[test]
fn key_piece_echo_is_awarded_once() {
    let mut template = template("Myr Works", "colorless", &["eldrazi"]);
    template.key_pieces = vec!["Myr Battlesphere".to_string(), "Sol Ring".to_string()];

    let score = score_attributes(
        &card(
            "Battlesphere Scout",
            "colorless",
            "Artifact",
            "Search your library for a card named Myr Battlesphere or Sol Ring.",
        ),
        &template,
    );

    let echoes: Vec<_> = score
        .components
        .iter()
        .filter(|c| c.factor == SynergyFactor::KeyPieceEcho)
        .collect();
    assert_eq!(echoes.len(), 1);
    assert!(echoes[0].notes.contains("Myr Battlesphere"));
    assert_eq!(score.score, 40.0);
}

#[test]
fn score_is_capped_at_one_hundred() {
    let mut template = template(
        "Everything",
        "colorless",
        &["tokens", "artifacts", "sacrifice", "counters"],
    );
    template.archetype = "artifact tokens".to_string();
    template.key_pieces = vec!["Ashnod's Altar".to_string()];

    let score = score_attributes(
        &card(
            "Overloaded Engine",
            "colorless",
            "Artifact",
            "Sacrifice an artifact: create a token with a +1/+1 counter on it. Untap Ashnod's Altar.",
        ),
        &template,
    );

    let raw: f32 = score.components.iter().map(|c| c.points).sum();
    assert_eq!(raw, 110.0);
    assert_eq!(score.score, 100.0);
}

#[test]
fn archetype_groups_add_five_each() {
    let mut template = template("Thopters", "U", &["graveyard"]);
    template.archetype = "artifact tokens".to_string();

    let score = score_attributes(
        &card("Thopter Foundry", "U", "Artifact", "Create a 1/1 Thopter token."),
        &template,
    );

    let bonus = score
        .components
        .iter()
        .find(|c| c.factor == SynergyFactor::ArchetypeBonus)
        .expect("archetype bonus present");
    assert_eq!(bonus.points, 10.0);
}

#[test]
fn unknown_card_scores_zero_with_single_reason() {
    let scorer = scorer(Vec::new());
    let score = scorer
        .score("Nonexistent Card", &template("Any", "WUBRG", &["tokens"]))
        .expect("valid template");

    assert_eq!(score.score, 0.0);
    assert_eq!(score.reasons, vec![CARD_NOT_FOUND]);
    assert_eq!(score.card_name, "Nonexistent Card");
}

#[test]
fn offline_provider_degrades_to_zero_scores() {
    let scorer = SynergyScorer::new(Arc::new(OfflineProvider));
    let score = scorer
        .score("Sol Ring", &template("Any", "colorless", &["artifacts"]))
        .expect("valid template");
    assert_eq!(score.score, 0.0);
}

#[test]
fn invalid_template_fails_the_call() {
    let scorer = scorer(ranking_cards());
    let broken = template("Broken", "G", &[]);
    assert_eq!(
        scorer.score("Token Maker", &broken),
        Err(TemplateError::NoThemes("Broken".to_string()))
    );
}

#[test]
fn scores_are_bounded_and_repeatable_across_sample_pool() {
    let provider = Arc::new(LocalMetadataProvider::sample().expect("sample data"));
    let scorer = SynergyScorer::new(Arc::clone(&provider));
    let templates = seed_templates().expect("seed data");
    let names: Vec<String> = provider.search("id:WUBRG").into_iter().map(|c| c.name).collect();
    assert_eq!(names.len(), provider.len());

    for template in &templates {
        for name in &names {
            let first = scorer.score(name, template).expect("seed template valid");
            let second = scorer.score(name, template).expect("seed template valid");
            assert!((0.0..=100.0).contains(&first.score), "{name} vs {}", template.name);
            if !first.color_eligible {
                assert_eq!(first.score, 0.0);
            }
            assert_eq!(first, second);
        }
    }
}
