mod cli;

pub use cli::ServeOptions;

use crate::classify::number_report;
use crate::facts::FactProvider;
use crate::prelude::{eprintln, *};
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use numfacts_core::classify::NumberProperties;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub facts: Arc<FactProvider>,
}

/// Body of every non-2xx response
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
    pub suggestion: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing numeric input
    #[error("Invalid parameter: {0}")]
    Parameter(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidArgument(msg) => ApiError::InvalidArgument(msg),
            Error::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Parameter(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Parameter(detail) => ErrorResponse {
                error: "Invalid parameter".to_string(),
                detail: detail.clone(),
                suggestion: "Provide `num` as a signed 64-bit integer, e.g. /number/42 or /number?num=42"
                    .to_string(),
            },
            ApiError::InvalidArgument(detail) => ErrorResponse {
                error: "Invalid argument".to_string(),
                detail: detail.clone(),
                suggestion: "Use a number the requested property is defined for".to_string(),
            },
            ApiError::Internal(detail) => ErrorResponse {
                error: "Internal server error".to_string(),
                detail: detail.clone(),
                suggestion: "Try again later; if the problem persists, report it".to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            log::error!("request failed: {detail}");
        }

        (self.status(), Json(self.body())).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct NumberQuery {
    num: i64,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/number", get(number_by_query_handler))
        .route("/number/{num}", get(number_by_path_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let provider = options
        .facts
        .build_provider()
        .context("Failed to build the fact provider")?;

    if provider.is_offline() {
        log::info!("remote facts disabled, serving local facts only");
    } else {
        log::info!(
            "remote facts from {} (timeout {}ms)",
            options.facts.fact_host,
            options.facts.fact_timeout_ms
        );
    }

    let addr = format!("{}:{}", options.host, options.port);
    let app_router = router(AppState {
        facts: Arc::new(provider),
    });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("listening on http://{addr}");
    if global.verbose {
        eprintln!("numfacts listening on http://{}", addr);
        eprintln!("Number endpoint: http://{}/number/{{num}}", addr);
        eprintln!("Health endpoint: http://{}/health", addr);
    }

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Hello World from pictunes.me" }))
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

async fn number_by_path_handler(
    State(state): State<AppState>,
    num: Result<Path<i64>, PathRejection>,
) -> Result<Json<NumberProperties>, ApiError> {
    let Path(num) = num.map_err(|e| ApiError::Parameter(e.body_text()))?;
    number_response(&state, num).await
}

async fn number_by_query_handler(
    State(state): State<AppState>,
    query: Result<Query<NumberQuery>, QueryRejection>,
) -> Result<Json<NumberProperties>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::Parameter(e.body_text()))?;
    number_response(&state, query.num).await
}

async fn number_response(state: &AppState, num: i64) -> Result<Json<NumberProperties>, ApiError> {
    log::debug!("GET number {num}");
    let report = number_report(&state.facts, num).await?;
    Ok(Json(report))
}
