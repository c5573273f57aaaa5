use crate::catalog::{CatalogError, TemplateError};
use crate::collection::CollectionError;
use crate::config::ConfigError;
use crate::metadata::MetadataError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rayon::ThreadPoolBuildError;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Template(TemplateError),
    Catalog(CatalogError),
    Collection(CollectionError),
    Metadata(MetadataError),
    WorkerPool(ThreadPoolBuildError),
    UnknownTemplate(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Template(err) => write!(f, "invalid template: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Collection(err) => write!(f, "collection error: {}", err),
            AppError::Metadata(err) => write!(f, "card metadata error: {}", err),
            AppError::WorkerPool(err) => write!(f, "scoring pool error: {}", err),
            AppError::UnknownTemplate(name) => write!(f, "unknown template '{}'", name),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Template(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Collection(err) => Some(err),
            AppError::Metadata(err) => Some(err),
            AppError::WorkerPool(err) => Some(err),
            AppError::UnknownTemplate(_) => None,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Template(_) | AppError::Collection(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownTemplate(_) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Catalog(_)
            | AppError::Metadata(_)
            | AppError::WorkerPool(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<TemplateError> for AppError {
    fn from(value: TemplateError) -> Self {
        Self::Template(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<CollectionError> for AppError {
    fn from(value: CollectionError) -> Self {
        Self::Collection(value)
    }
}

impl From<MetadataError> for AppError {
    fn from(value: MetadataError) -> Self {
        Self::Metadata(value)
    }
}

impl From<ThreadPoolBuildError> for AppError {
    fn from(value: ThreadPoolBuildError) -> Self {
        Self::WorkerPool(value)
    }
}
