//! Owned-card collection: the card list the engine scores, plus its import and persistence.

mod import;

use std::fs;
use std::io::{ErrorKind, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cards::card_key;

pub const DEFAULT_COLLECTION_NAME: &str = "My Collection";

#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("collection io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("collection is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid collection csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: quantity for '{name}' must be at least 1")]
    InvalidQuantity { line: usize, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedCard {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Named list of owned cards; names are unique case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    #[serde(default)]
    pub cards: Vec<OwnedCard>,
}

impl Default for Collection {
    fn default() -> Self {
        Self::new(DEFAULT_COLLECTION_NAME)
    }
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
        }
    }

    /// Add copies of a card, merging with an existing entry of the same name.
    pub fn add(&mut self, name: &str, quantity: u32) {
        let name = name.trim();
        if name.is_empty() || quantity == 0 {
            return;
        }
        let key = card_key(name);
        match self.cards.iter_mut().find(|card| card_key(&card.name) == key) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => self.cards.push(OwnedCard {
                name: name.to_string(),
                quantity,
            }),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<OwnedCard> {
        let key = card_key(name);
        let position = self.cards.iter().position(|card| card_key(&card.name) == key)?;
        Some(self.cards.remove(position))
    }

    pub fn contains(&self, name: &str) -> bool {
        let key = card_key(name);
        self.cards.iter().any(|card| card_key(&card.name) == key)
    }

    /// Card names in collection order, one per distinct card.
    pub fn owned_names(&self) -> Vec<String> {
        self.cards.iter().map(|card| card.name.clone()).collect()
    }

    pub fn total_quantity(&self) -> u32 {
        self.cards
            .iter()
            .fold(0u32, |total, card| total.saturating_add(card.quantity))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Parse a deck list such as `2x Sol Ring (CMR) 472`.
    pub fn from_deck_text(name: impl Into<String>, text: &str) -> Result<Self, CollectionError> {
        let mut collection = Self::new(name);
        for entry in import::parse_deck_text(text)? {
            collection.add(&entry.name, entry.quantity);
        }
        Ok(collection)
    }

    /// Parse CSV with a `name` column and an optional `quantity` column.
    pub fn from_csv_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<Self, CollectionError> {
        let mut collection = Self::new(name);
        for entry in import::parse_csv(reader)? {
            collection.add(&entry.name, entry.quantity);
        }
        Ok(collection)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CollectionError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// A missing file is an empty default collection; an unreadable one is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, CollectionError> {
        match Self::load(path) {
            Err(CollectionError::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            other => other,
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CollectionError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
