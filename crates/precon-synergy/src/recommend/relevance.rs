use crate::cards::CardAttributes;

const BASE_RELEVANCE: f32 = 60.0;
const OCCURRENCE_POINTS: f32 = 10.0;
const TYPE_LINE_POINTS: f32 = 15.0;
const KEYWORD_POINTS: f32 = 20.0;
pub const MAX_RELEVANCE: f32 = 90.0;

/// How strongly a search candidate speaks to a theme word.
pub fn theme_relevance(card: &CardAttributes, theme: &str) -> f32 {
    let theme = theme.trim().to_lowercase();
    if theme.is_empty() {
        return BASE_RELEVANCE;
    }

    let occurrences = card.rules_text_lower().matches(theme.as_str()).count();
    let mut relevance = BASE_RELEVANCE + occurrences as f32 * OCCURRENCE_POINTS;
    if card.type_line_lower().contains(&theme) {
        relevance += TYPE_LINE_POINTS;
    }
    if card.keywords_lower().contains(&theme) {
        relevance += KEYWORD_POINTS;
    }
    relevance.min(MAX_RELEVANCE)
}
