//! Synergy scoring and recommendation engine for Commander precon templates.
//!
//! The scoring core lives in [`synergy`] and [`recommend`]; [`catalog`], [`metadata`] and
//! [`collection`] provide the collaborators it consumes.

pub mod cards;
pub mod catalog;
pub mod collection;
pub mod config;
pub mod error;
pub mod metadata;
pub mod recommend;
pub mod synergy;
pub mod telemetry;

pub use cards::{CardAttributes, Color, ColorIdentity};
pub use catalog::{DeckTemplate, InMemoryTemplateCatalog, JsonTemplateStore, TemplateCatalog};
pub use collection::{Collection, OwnedCard};
pub use config::AppConfig;
pub use error::AppError;
pub use metadata::{CachedMetadataProvider, LocalMetadataProvider, MetadataProvider};
pub use recommend::{
    CardRecommendation, EngineConfig, GapAnalysis, PriorityTier, RecommendationEngine,
};
pub use synergy::{SynergyScore, SynergyScorer, TemplateRanker, TemplateRanking, TemplateStatistics};
