use serde::{Deserialize, Serialize};

use crate::cards::{card_key, ColorIdentity};

/// Declared profile of a pre-built Commander deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckTemplate {
    pub name: String,
    pub year: u16,
    pub set_code: String,
    pub commanders: Vec<String>,
    pub color_identity: ColorIdentity,
    pub themes: Vec<String>,
    #[serde(default)]
    pub archetype: String,
    #[serde(default, alias = "key_cards")]
    pub key_pieces: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// Structural problems that make a template unscorable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template name must not be blank")]
    BlankName,
    #[error("template '{0}' has a blank set code")]
    BlankSetCode(String),
    #[error("template '{0}' lists no commanders")]
    NoCommanders(String),
    #[error("template '{0}' declares no themes")]
    NoThemes(String),
    #[error("template '{0}' contains a blank theme entry")]
    BlankTheme(String),
}

impl DeckTemplate {
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.name.trim().is_empty() {
            return Err(TemplateError::BlankName);
        }
        if self.set_code.trim().is_empty() {
            return Err(TemplateError::BlankSetCode(self.name.clone()));
        }
        if self.commanders.iter().all(|c| c.trim().is_empty()) {
            return Err(TemplateError::NoCommanders(self.name.clone()));
        }
        if self.themes.is_empty() {
            return Err(TemplateError::NoThemes(self.name.clone()));
        }
        if self.themes.iter().any(|t| t.trim().is_empty()) {
            return Err(TemplateError::BlankTheme(self.name.clone()));
        }
        Ok(())
    }

    /// Declared themes lower-cased, in declaration order, without repeats.
    pub fn normalized_themes(&self) -> Vec<String> {
        let mut themes: Vec<String> = Vec::with_capacity(self.themes.len());
        for theme in &self.themes {
            let theme = theme.trim().to_lowercase();
            if !themes.contains(&theme) {
                themes.push(theme);
            }
        }
        themes
    }

    pub fn has_theme(&self, theme: &str) -> bool {
        let theme = theme.trim();
        self.themes.iter().any(|t| t.trim().eq_ignore_ascii_case(theme))
    }

    pub fn is_key_piece(&self, card_name: &str) -> bool {
        let key = card_key(card_name);
        self.key_pieces.iter().any(|piece| card_key(piece) == key)
    }
}
