//! Template catalog: the read side the scoring core consumes and the JSON store behind it.

mod store;
mod template;

pub use store::JsonTemplateStore;
pub use template::{DeckTemplate, TemplateError};

use crate::cards::{card_key, ColorIdentity};

const SEED_TEMPLATES: &str = include_str!("../../data/templates.json");

/// Read access to deck templates. The scoring core never mutates a catalog.
pub trait TemplateCatalog: Send + Sync {
    fn get_all(&self) -> Vec<DeckTemplate>;
    fn get_by_theme(&self, theme: &str) -> Vec<DeckTemplate>;
    fn search(&self, query: &str) -> Vec<DeckTemplate>;
    fn get_by_name(&self, name: &str) -> Option<DeckTemplate>;
    fn get_by_year(&self, year: u16) -> Vec<DeckTemplate>;
    fn get_by_colors(&self, identity: ColorIdentity) -> Vec<DeckTemplate>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog is not valid template json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidTemplate(#[from] TemplateError),
    #[error("template '{0}' is defined more than once")]
    Duplicate(String),
}

/// Validated templates held in declaration order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateCatalog {
    templates: Vec<DeckTemplate>,
}

impl InMemoryTemplateCatalog {
    pub fn new(templates: Vec<DeckTemplate>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for template in templates {
            catalog.insert(template)?;
        }
        Ok(catalog)
    }

    /// Catalog built from the bundled default dataset.
    pub fn seeded() -> Result<Self, CatalogError> {
        Self::new(seed_templates()?)
    }

    pub fn insert(&mut self, template: DeckTemplate) -> Result<(), CatalogError> {
        template.validate()?;
        let key = card_key(&template.name);
        if self.templates.iter().any(|t| card_key(&t.name) == key) {
            return Err(CatalogError::Duplicate(template.name));
        }
        self.templates.push(template);
        Ok(())
    }

    pub fn templates(&self) -> &[DeckTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    fn filtered(&self, predicate: impl Fn(&DeckTemplate) -> bool) -> Vec<DeckTemplate> {
        self.templates
            .iter()
            .filter(|template| predicate(template))
            .cloned()
            .collect()
    }
}

impl TemplateCatalog for InMemoryTemplateCatalog {
    fn get_all(&self) -> Vec<DeckTemplate> {
        self.templates.clone()
    }

    fn get_by_theme(&self, theme: &str) -> Vec<DeckTemplate> {
        self.filtered(|template| template.has_theme(theme))
    }

    /// Case-insensitive substring match over name, commanders, themes and archetype.
    fn search(&self, query: &str) -> Vec<DeckTemplate> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.get_all();
        }
        let hit = |field: &str| field.to_lowercase().contains(&query);
        self.filtered(|template| {
            hit(&template.name)
                || template.commanders.iter().any(|c| hit(c))
                || template.themes.iter().any(|t| hit(t))
                || hit(&template.archetype)
        })
    }

    fn get_by_name(&self, name: &str) -> Option<DeckTemplate> {
        let key = card_key(name);
        self.templates
            .iter()
            .find(|template| card_key(&template.name) == key)
            .cloned()
    }

    fn get_by_year(&self, year: u16) -> Vec<DeckTemplate> {
        self.filtered(|template| template.year == year)
    }

    fn get_by_colors(&self, identity: ColorIdentity) -> Vec<DeckTemplate> {
        self.filtered(|template| template.color_identity == identity)
    }
}

/// Default dataset bundled with the crate.
pub fn seed_templates() -> Result<Vec<DeckTemplate>, CatalogError> {
    Ok(serde_json::from_str(SEED_TEMPLATES)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemoryTemplateCatalog {
        InMemoryTemplateCatalog::seeded().expect("seed dataset is valid")
    }

    #[test]
    fn seed_dataset_loads_ten_templates() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 10);
        assert!(catalog.get_all().iter().all(|t| t.year == 2024));
    }

    #[test]
    fn theme_filter_is_case_insensitive_and_exact() {
        let names: Vec<String> = catalog()
            .get_by_theme("ARTIFACTS")
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Mishra's Burnished Banner",
                "Urza's Iron Alliance",
                "Heads I Win, Tails You Lose",
                "Blame Game",
            ]
        );
        assert!(catalog().get_by_theme("artifact").is_empty());
    }

    #[test]
    fn search_matches_commanders_and_archetypes() {
        let catalog = catalog();
        let by_commander = catalog.search("miirym");
        assert_eq!(by_commander.len(), 1);
        assert_eq!(by_commander[0].name, "Draconic Dissent");

        let by_archetype = catalog.search("morph");
        assert_eq!(by_archetype[0].name, "Deadly Disguise");

        assert!(catalog.search("no such deck").is_empty());
    }

    #[test]
    fn color_filter_requires_exact_identity() {
        let catalog = catalog();
        let azorius: ColorIdentity = "WU".parse().expect("valid identity");
        assert_eq!(catalog.get_by_colors(azorius).len(), 3);

        let colorless = catalog.get_by_colors(ColorIdentity::COLORLESS);
        assert_eq!(colorless.len(), 1);
        assert_eq!(colorless[0].name, "Eldrazi Unbound");
    }

    #[test]
    fn lookup_by_name_ignores_case() {
        assert!(catalog().get_by_name("blame game").is_some());
        assert!(catalog().get_by_name("Blame").is_none());
    }

    #[test]
    fn insert_rejects_duplicates_and_invalid_records() {
        let mut catalog = catalog();
        let existing = catalog.templates()[0].clone();
        assert!(matches!(
            catalog.insert(existing.clone()),
            Err(CatalogError::Duplicate(_))
        ));

        let mut invalid = existing;
        invalid.name = "Themeless".to_string();
        invalid.themes.clear();
        assert!(matches!(
            catalog.insert(invalid),
            Err(CatalogError::InvalidTemplate(TemplateError::NoThemes(_)))
        ));
        assert_eq!(catalog.len(), 10);
    }
}
