use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::{seed_templates, CatalogError, DeckTemplate, InMemoryTemplateCatalog};

/// JSON file holding the template catalog as a flat array of records.
#[derive(Debug, Clone)]
pub struct JsonTemplateStore {
    path: PathBuf,
}

impl JsonTemplateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<InMemoryTemplateCatalog, CatalogError> {
        let raw = fs::read_to_string(&self.path)?;
        let templates: Vec<DeckTemplate> = serde_json::from_str(&raw)?;
        InMemoryTemplateCatalog::new(templates)
    }

    pub fn save(&self, catalog: &InMemoryTemplateCatalog) -> Result<(), CatalogError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(catalog.templates())?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load the store, seeding and persisting the bundled dataset when the file is missing.
    /// A file that exists but cannot be parsed is reported, never overwritten.
    pub fn load_or_seed(&self) -> Result<InMemoryTemplateCatalog, CatalogError> {
        match self.load() {
            Ok(catalog) => {
                info!(path = %self.path.display(), templates = catalog.len(), "template catalog loaded");
                Ok(catalog)
            }
            Err(CatalogError::Io(err)) if err.kind() == ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "template catalog missing, seeding defaults");
                let catalog = InMemoryTemplateCatalog::new(seed_templates()?)?;
                self.save(&catalog)?;
                Ok(catalog)
            }
            Err(err) => Err(err),
        }
    }
}
