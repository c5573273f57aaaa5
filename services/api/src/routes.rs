use crate::infra::{find_template, AppState, Engine};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use precon_synergy::catalog::TemplateCatalog;
use precon_synergy::error::AppError;
use precon_synergy::recommend::TemplateRecommendations;
use precon_synergy::{CardRecommendation, Collection, DeckTemplate, GapAnalysis, TemplateRanking};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

/// Owned cards sent with every scoring request: explicit names, a pasted deck list, or both.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CollectionRequest {
    #[serde(default)]
    pub(crate) cards: Vec<String>,
    #[serde(default)]
    pub(crate) deck_list: Option<String>,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    #[serde(default)]
    pub(crate) top_templates: Option<usize>,
}

impl CollectionRequest {
    fn owned(&self) -> Result<Vec<String>, AppError> {
        let mut collection = Collection::default();
        for name in &self.cards {
            collection.add(name, 1);
        }
        if let Some(deck_list) = &self.deck_list {
            for card in Collection::from_deck_text("request", deck_list)?.cards {
                collection.add(&card.name, card.quantity);
            }
        }
        Ok(collection.owned_names())
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TemplateFilter {
    pub(crate) theme: Option<String>,
    pub(crate) q: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TemplatesResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) templates: Vec<DeckTemplate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RankResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) rankings: Vec<TemplateRanking>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecommendationsResponse {
    pub(crate) generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) template_name: Option<String>,
    pub(crate) recommendations: Vec<CardRecommendation>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GapsResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) analysis: GapAnalysis,
}

#[derive(Debug, Serialize)]
pub(crate) struct CollectionRecommendationsResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) templates: Vec<TemplateRecommendations>,
}

pub(crate) fn with_engine_routes(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/templates", get(list_templates))
        .route("/api/v1/templates/rank", post(rank_templates))
        .route(
            "/api/v1/templates/:name/recommendations",
            post(template_recommendations),
        )
        .route("/api/v1/templates/:name/gaps", post(template_gaps))
        .route(
            "/api/v1/collection/recommendations",
            post(collection_recommendations),
        )
        .route("/api/v1/collection/general", post(general_recommendations))
        .with_state(engine)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn list_templates(
    State(engine): State<Arc<Engine>>,
    Query(filter): Query<TemplateFilter>,
) -> Json<TemplatesResponse> {
    let catalog = engine.catalog();
    let mut templates = match filter.theme.as_deref() {
        Some(theme) => catalog.get_by_theme(theme),
        None => catalog.get_all(),
    };
    if let Some(query) = filter.q.as_deref().filter(|q| !q.trim().is_empty()) {
        let hits: HashSet<String> = catalog.search(query).into_iter().map(|t| t.name).collect();
        templates.retain(|template| hits.contains(&template.name));
    }

    Json(TemplatesResponse {
        generated_at: Utc::now(),
        templates,
    })
}

pub(crate) async fn rank_templates(
    State(engine): State<Arc<Engine>>,
    Json(request): Json<CollectionRequest>,
) -> Result<Json<RankResponse>, AppError> {
    let owned = request.owned()?;
    Ok(Json(RankResponse {
        generated_at: Utc::now(),
        rankings: engine.rank_templates(&owned),
    }))
}

pub(crate) async fn template_recommendations(
    State(engine): State<Arc<Engine>>,
    Path(name): Path<String>,
    Json(request): Json<CollectionRequest>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let template = find_template(&engine, &name)?;
    let owned = request.owned()?;
    let limit = request
        .limit
        .unwrap_or(engine.config().max_recommendations);
    let recommendations = engine.recommend_for_template(&template, &owned, limit)?;

    Ok(Json(RecommendationsResponse {
        generated_at: Utc::now(),
        template_name: Some(template.name),
        recommendations,
    }))
}

pub(crate) async fn template_gaps(
    State(engine): State<Arc<Engine>>,
    Path(name): Path<String>,
    Json(request): Json<CollectionRequest>,
) -> Result<Json<GapsResponse>, AppError> {
    let template = find_template(&engine, &name)?;
    let analysis = engine.gap_analysis(&request.owned()?, &template)?;
    Ok(Json(GapsResponse {
        generated_at: Utc::now(),
        analysis,
    }))
}

pub(crate) async fn collection_recommendations(
    State(engine): State<Arc<Engine>>,
    Json(request): Json<CollectionRequest>,
) -> Result<Json<CollectionRecommendationsResponse>, AppError> {
    let owned = request.owned()?;
    let config = engine.config();
    let templates = engine.collection_recommendations(
        &owned,
        request.top_templates.unwrap_or(config.top_templates),
        request.limit.unwrap_or(config.recommendations_per_template),
    );
    Ok(Json(CollectionRecommendationsResponse {
        generated_at: Utc::now(),
        templates,
    }))
}

pub(crate) async fn general_recommendations(
    State(engine): State<Arc<Engine>>,
    Json(request): Json<CollectionRequest>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let owned = request.owned()?;
    let limit = request
        .limit
        .unwrap_or(engine.config().max_recommendations);
    Ok(Json(RecommendationsResponse {
        generated_at: Utc::now(),
        template_name: None,
        recommendations: engine.general_recommendations(&owned, limit),
    }))
}
