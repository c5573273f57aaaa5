use serde::Serialize;

use super::taxonomy::{MECHANICS, THEME_KEYWORDS, TRIBES};
use crate::cards::CardAttributes;

/// Tags derived from a card's text by applying the keyword taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardSynergyProfile {
    pub tribes: Vec<String>,
    pub mechanics: Vec<String>,
    pub themes: Vec<String>,
}

impl CardSynergyProfile {
    pub fn derive(card: &CardAttributes) -> Self {
        let rules_text = card.rules_text_lower();
        let type_line = card.type_line_lower();
        let keywords = card.keywords_lower();

        let tribes = TRIBES
            .iter()
            .filter(|tribe| rules_text.contains(**tribe) || type_line.contains(**tribe))
            .map(|tribe| tribe.to_string())
            .collect();

        let mechanics = MECHANICS
            .iter()
            .filter(|mechanic| {
                rules_text.contains(**mechanic) || keywords.iter().any(|k| k == **mechanic)
            })
            .map(|mechanic| mechanic.to_string())
            .collect();

        let themes = THEME_KEYWORDS
            .iter()
            .filter(|(_, triggers)| {
                triggers
                    .iter()
                    .any(|trigger| rules_text.contains(trigger) || type_line.contains(trigger))
            })
            .map(|(theme, _)| theme.to_string())
            .collect();

        Self {
            tribes,
            mechanics,
            themes,
        }
    }

    pub fn has_theme(&self, theme: &str) -> bool {
        let theme = theme.trim().to_lowercase();
        self.themes.iter().any(|own| *own == theme)
    }
}
