use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::{CardQuery, MetadataError, MetadataProvider};
use crate::cards::{card_key, CardAttributes};

const SAMPLE_CARDS: &str = include_str!("../../data/cards.json");

/// Card attributes held in memory, searched with [`CardQuery`].
#[derive(Debug, Clone, Default)]
pub struct LocalMetadataProvider {
    cards: Vec<CardAttributes>,
    index: HashMap<String, usize>,
}

impl LocalMetadataProvider {
    /// Later records with an already indexed name are ignored.
    pub fn from_cards(cards: impl IntoIterator<Item = CardAttributes>) -> Self {
        let mut provider = Self::default();
        for card in cards {
            let key = card.key();
            if provider.index.contains_key(&key) {
                debug!(card = %card.name, "duplicate card record ignored");
                continue;
            }
            provider.index.insert(key, provider.cards.len());
            provider.cards.push(card);
        }
        provider
    }

    pub fn from_json(raw: &str) -> Result<Self, MetadataError> {
        let cards: Vec<CardAttributes> = serde_json::from_str(raw)?;
        Ok(Self::from_cards(cards))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MetadataError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Small card pool bundled with the crate, covering the default templates' key pieces.
    pub fn sample() -> Result<Self, MetadataError> {
        Self::from_json(SAMPLE_CARDS)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl MetadataProvider for LocalMetadataProvider {
    fn attributes(&self, name: &str) -> Option<CardAttributes> {
        self.index
            .get(&card_key(name))
            .map(|position| self.cards[*position].clone())
    }

    fn search(&self, query: &str) -> Vec<CardAttributes> {
        let parsed = match CardQuery::parse(query) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(query, error = %err, "card search query rejected");
                return Vec::new();
            }
        };
        self.cards
            .iter()
            .filter(|card| parsed.matches(card))
            .cloned()
            .collect()
    }
}
