use crate::infra::{build_engine, bundled_engine, find_template, load_collection, Engine};
use clap::Args;
use precon_synergy::catalog::TemplateCatalog;
use precon_synergy::config::AppConfig;
use precon_synergy::error::AppError;
use precon_synergy::recommend::TemplateRecommendations;
use precon_synergy::{CardRecommendation, Collection, EngineConfig, GapAnalysis, TemplateRanking};
use std::path::PathBuf;

const SAMPLE_DECK_LIST: &str = "\
# sample binder
1 Sol Ring
1 Arcane Signet
1 Doubling Season
1 Hardened Scales
1 Llanowar Elves
1 Beast Within
1 Skullclamp
1 Steel Overseer
1 Ashnod's Altar
1 Myr Battlesphere
1 Pitiless Plunderer
1 Viscera Seer
1 Lightning Bolt
";

#[derive(Args, Debug, Default)]
pub(crate) struct TemplatesArgs {
    /// Only templates declaring this theme
    #[arg(long)]
    pub(crate) theme: Option<String>,
    /// Case-insensitive search over names, commanders, themes and archetypes
    #[arg(long)]
    pub(crate) query: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct CollectionArgs {
    /// Collection file: stored .json, .csv export or a plain deck list
    #[arg(long = "collection")]
    pub(crate) path: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct TemplateArgs {
    /// Template name (case-insensitive)
    #[arg(long)]
    pub(crate) template: String,
    #[command(flatten)]
    pub(crate) collection: CollectionArgs,
    /// Maximum recommendations to print
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

fn configured() -> Result<Engine, AppError> {
    build_engine(&AppConfig::load()?)
}

pub(crate) fn run_templates(args: TemplatesArgs) -> Result<(), AppError> {
    let engine = configured()?;
    let catalog = engine.catalog();
    let mut templates = match args.theme.as_deref() {
        Some(theme) => catalog.get_by_theme(theme),
        None => catalog.get_all(),
    };
    if let Some(query) = args.query.as_deref() {
        let hits: Vec<String> = catalog.search(query).into_iter().map(|t| t.name).collect();
        templates.retain(|template| hits.contains(&template.name));
    }

    if templates.is_empty() {
        println!("No templates match.");
    }
    for template in templates {
        println!(
            "{} ({} {}) [{}] themes: {}",
            template.name,
            template.set_code,
            template.year,
            template.color_identity,
            template.themes.join(", ")
        );
    }
    Ok(())
}

pub(crate) fn run_rank(args: CollectionArgs) -> Result<(), AppError> {
    let engine = configured()?;
    let collection = load_collection(&args.path)?;
    render_rankings(&collection, &engine.rank_templates(&collection.owned_names()));
    Ok(())
}

pub(crate) fn run_recommend(args: TemplateArgs) -> Result<(), AppError> {
    let engine = configured()?;
    let template = find_template(&engine, &args.template)?;
    let collection = load_collection(&args.collection.path)?;
    let limit = args.limit.unwrap_or(engine.config().max_recommendations);

    let recommendations =
        engine.recommend_for_template(&template, &collection.owned_names(), limit)?;
    println!("Recommendations for {} from {}", template.name, collection.name);
    render_recommendations(&recommendations);
    Ok(())
}

pub(crate) fn run_gaps(args: TemplateArgs) -> Result<(), AppError> {
    let engine = configured()?;
    let template = find_template(&engine, &args.template)?;
    let collection = load_collection(&args.collection.path)?;

    let mut analysis = engine.gap_analysis(&collection.owned_names(), &template)?;
    if let Some(limit) = args.limit {
        analysis.recommendations.truncate(limit);
    }
    render_gaps(&analysis);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let engine = bundled_engine(EngineConfig::default())?;
    let collection = Collection::from_deck_text("Sample Binder", SAMPLE_DECK_LIST)?;
    let owned = collection.owned_names();

    println!("Precon synergy demo");
    let rankings = engine.rank_templates(&owned);
    render_rankings(&collection, &rankings);

    if let Some(best) = rankings.first() {
        println!();
        render_gaps(&engine.gap_analysis(&owned, &best.template)?);
    }

    println!("\nPer-template suggestions");
    for entry in engine.collection_recommendations(&owned, 3, 3) {
        render_template_recommendations(&entry);
    }

    println!("\nOverall shopping list");
    render_recommendations(&engine.general_recommendations(&owned, 10));
    Ok(())
}

fn render_rankings(collection: &Collection, rankings: &[TemplateRanking]) {
    println!(
        "Best-fit templates for {} ({} cards)",
        collection.name,
        collection.len()
    );
    if rankings.is_empty() {
        println!("  No template has qualifying cards.");
        return;
    }
    for (position, ranking) in rankings.iter().enumerate() {
        let stats = &ranking.statistics;
        println!(
            "{:>2}. {} [{}] qualifying {} | mean {:.1} | best {:.1}",
            position + 1,
            ranking.template.name,
            ranking.template.color_identity,
            stats.card_count,
            stats.mean_score,
            stats.max_score
        );
        for score in &stats.top_cards {
            println!("      {:>5.1}  {}", score.score, score.card_name);
        }
    }
}

fn render_recommendations(recommendations: &[CardRecommendation]) {
    if recommendations.is_empty() {
        println!("  Nothing to suggest.");
    }
    for rec in recommendations {
        let marker = if rec.is_key_piece { "*" } else { " " };
        println!(
            " {marker}[{:<6}] {:>5.1}  {}  ({})",
            rec.priority.label(),
            rec.score,
            rec.card_name,
            rec.template_name
        );
        if let Some(reason) = rec.reasons.first() {
            println!("              {reason}");
        }
    }
}

fn render_template_recommendations(entry: &TemplateRecommendations) {
    println!(
        "{} (mean {:.1} over {} cards)",
        entry.template_name, entry.statistics.mean_score, entry.statistics.card_count
    );
    render_recommendations(&entry.recommendations);
}

fn render_gaps(analysis: &GapAnalysis) {
    println!("Gap analysis for {}", analysis.template_name);
    if analysis.missing_key_pieces.is_empty() {
        println!("  All key pieces owned.");
    } else {
        println!("  Missing key pieces: {}", analysis.missing_key_pieces.join(", "));
    }
    for coverage in &analysis.theme_coverage {
        println!(
            "  {:<14} {:>3} cards  {:>5.1}%",
            coverage.theme, coverage.supporting_cards, coverage.coverage_percent
        );
    }
    render_recommendations(&analysis.recommendations);
}
