use metrics_exporter_prometheus::PrometheusHandle;
use precon_synergy::catalog::{InMemoryTemplateCatalog, JsonTemplateStore, TemplateCatalog};
use precon_synergy::config::AppConfig;
use precon_synergy::error::AppError;
use precon_synergy::metadata::{CachePolicy, CachedMetadataProvider, LocalMetadataProvider};
use precon_synergy::recommend::{EngineConfig, RecommendationEngine};
use precon_synergy::{Collection, DeckTemplate};
use std::fs::{self, File};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type Provider = CachedMetadataProvider<LocalMetadataProvider>;
pub(crate) type Engine = RecommendationEngine<InMemoryTemplateCatalog, Provider>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Engine over the configured catalog store and card data.
pub(crate) fn build_engine(config: &AppConfig) -> Result<Engine, AppError> {
    let catalog = JsonTemplateStore::new(&config.data.catalog_path).load_or_seed()?;
    let cards = match &config.data.card_data_path {
        Some(path) => LocalMetadataProvider::from_path(path)?,
        None => LocalMetadataProvider::sample()?,
    };
    assemble(catalog, cards, config.cache, config.engine.clone())
}

/// Engine over the bundled templates and sample card data; touches no files.
pub(crate) fn bundled_engine(config: EngineConfig) -> Result<Engine, AppError> {
    assemble(
        InMemoryTemplateCatalog::seeded()?,
        LocalMetadataProvider::sample()?,
        CachePolicy::default(),
        config,
    )
}

fn assemble(
    catalog: InMemoryTemplateCatalog,
    cards: LocalMetadataProvider,
    cache: CachePolicy,
    config: EngineConfig,
) -> Result<Engine, AppError> {
    let provider = CachedMetadataProvider::new(cards, cache);
    Ok(RecommendationEngine::new(
        Arc::new(catalog),
        Arc::new(provider),
        config,
    )?)
}

pub(crate) fn find_template(engine: &Engine, name: &str) -> Result<DeckTemplate, AppError> {
    engine
        .catalog()
        .get_by_name(name)
        .ok_or_else(|| AppError::UnknownTemplate(name.trim().to_string()))
}

/// Reads a stored `.json` collection, a `.csv` export or a plain deck list.
pub(crate) fn load_collection(path: &Path) -> Result<Collection, AppError> {
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Imported".to_string());
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

    let collection = match extension.as_deref() {
        Some("json") => Collection::load(path)?,
        Some("csv") => Collection::from_csv_reader(name, File::open(path)?)?,
        _ => Collection::from_deck_text(name, &fs::read_to_string(path)?)?,
    };
    Ok(collection)
}
