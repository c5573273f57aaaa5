mod color;

pub use color::{Color, ColorIdentity, ColorParseError};

use serde::{Deserialize, Serialize};

/// Attributes resolved for a single card by a metadata provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardAttributes {
    pub name: String,
    #[serde(default)]
    pub color_identity: ColorIdentity,
    #[serde(default)]
    pub type_line: String,
    #[serde(default, alias = "oracle_text")]
    pub rules_text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
}

impl CardAttributes {
    pub fn new(name: impl Into<String>, color_identity: ColorIdentity) -> Self {
        Self {
            name: name.into(),
            color_identity,
            type_line: String::new(),
            rules_text: String::new(),
            keywords: Vec::new(),
            mana_cost: None,
        }
    }

    pub fn with_type_line(mut self, type_line: impl Into<String>) -> Self {
        self.type_line = type_line.into();
        self
    }

    pub fn with_rules_text(mut self, rules_text: impl Into<String>) -> Self {
        self.rules_text = rules_text.into();
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn key(&self) -> String {
        card_key(&self.name)
    }

    pub fn rules_text_lower(&self) -> String {
        self.rules_text.to_lowercase()
    }

    pub fn type_line_lower(&self) -> String {
        self.type_line.to_lowercase()
    }

    pub fn keywords_lower(&self) -> Vec<String> {
        self.keywords.iter().map(|k| k.to_lowercase()).collect()
    }
}

/// Case- and whitespace-insensitive identity key for card names.
pub fn card_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
