use std::sync::Arc;

use crate::cards::{CardAttributes, ColorIdentity};
use crate::catalog::{DeckTemplate, InMemoryTemplateCatalog};
use crate::metadata::{LocalMetadataProvider, MetadataProvider};
use crate::recommend::{EngineConfig, RecommendationEngine};

pub(super) fn card(name: &str, colors: &str, type_line: &str, rules_text: &str) -> CardAttributes {
    let identity: ColorIdentity = colors.parse().expect("valid identity");
    CardAttributes::new(name, identity)
        .with_type_line(type_line)
        .with_rules_text(rules_text)
}

pub(super) fn pool() -> Vec<CardAttributes> {
    vec![
        card(
            "Doubling Season",
            "G",
            "Enchantment",
            "If an effect would create one or more tokens under your control, it creates twice that many of those tokens instead.\nIf an effect would put one or more counters on a permanent you control, it puts twice that many of those counters on that permanent instead.",
        ),
        card(
            "Hardened Scales",
            "G",
            "Enchantment",
            "If one or more +1/+1 counters would be put on a creature you control, that many plus one +1/+1 counters are put on it instead.",
        ),
        card(
            "Tendershoot Dryad",
            "G",
            "Creature — Dryad",
            "Ascend\nAt the beginning of each upkeep, create a 1/1 green Saproling creature token.",
        ),
        card(
            "Sprout Swarm",
            "G",
            "Instant",
            "Convoke\nBuyback {3}\nCreate a 1/1 green Saproling creature token.",
        ),
        card(
            "Goblin Instigator",
            "R",
            "Creature — Goblin",
            "When Goblin Instigator enters, create a 1/1 red Goblin creature token.",
        ),
        card(
            "Cathar's Crusade",
            "W",
            "Enchantment",
            "Whenever a creature you control enters, put a +1/+1 counter on each creature you control.",
        ),
        card("Llanowar Elves", "G", "Creature — Elf Druid", "{T}: Add {G}."),
    ]
}

pub(super) fn swarm_template() -> DeckTemplate {
    DeckTemplate {
        name: "Saproling Swarm".to_string(),
        year: 2024,
        set_code: "TST".to_string(),
        commanders: vec!["Slimefoot, the Stowaway".to_string()],
        color_identity: "GW".parse().expect("valid identity"),
        themes: vec!["tokens".to_string(), "counters".to_string()],
        archetype: "token counters".to_string(),
        key_pieces: vec![
            "Doubling Season".to_string(),
            "Hardened Scales".to_string(),
            "Branching Evolution".to_string(),
        ],
        description: String::new(),
    }
}

pub(super) fn goblin_template() -> DeckTemplate {
    DeckTemplate {
        name: "Goblin Horde".to_string(),
        color_identity: "R".parse().expect("valid identity"),
        commanders: vec!["Krenko, Mob Boss".to_string()],
        key_pieces: vec!["Goblin Instigator".to_string(), "Krenko's Command".to_string()],
        ..swarm_template()
    }
}

pub(super) fn owned(cards: &[&str]) -> Vec<String> {
    cards.iter().map(|c| c.to_string()).collect()
}

pub(super) fn engine_with<P: MetadataProvider>(
    provider: P,
    config: EngineConfig,
) -> RecommendationEngine<InMemoryTemplateCatalog, P> {
    let catalog = InMemoryTemplateCatalog::new(vec![goblin_template(), swarm_template()])
        .expect("fixture catalog valid");
    RecommendationEngine::new(Arc::new(catalog), Arc::new(provider), config)
        .expect("engine builds")
}

pub(super) fn engine() -> RecommendationEngine<InMemoryTemplateCatalog, LocalMetadataProvider> {
    engine_with(LocalMetadataProvider::from_cards(pool()), EngineConfig::default())
}

pub(super) struct OfflineProvider;

impl MetadataProvider for OfflineProvider {
    fn attributes(&self, _name: &str) -> Option<CardAttributes> {
        None
    }

    fn search(&self, _query: &str) -> Vec<CardAttributes> {
        Vec::new()
    }
}
