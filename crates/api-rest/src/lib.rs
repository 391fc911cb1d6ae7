//! # API REST
//!
//! REST API implementation for the triage service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, attachments)
//!
//! Uses `api-shared` for wire types and `triage-core` for all decision logic.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{wire, HealthService};
use std::sync::Arc;
use triage_core::{
    report, CaseCountStore, CoreConfig, PredictionService, ReferenceTables, TriageError,
    TriageResult,
};

/// Application state shared across REST API handlers.
///
/// Reference tables are immutable and shared through the prediction service; case counts are
/// the only mutable state and go through their own store handle.
#[derive(Clone)]
pub struct AppState {
    pub predictions: PredictionService,
    pub cases: CaseCountStore,
}

impl AppState {
    /// Load reference tables and case counts for the given configuration.
    pub fn load(cfg: &CoreConfig) -> TriageResult<Self> {
        let tables = Arc::new(ReferenceTables::load(cfg)?);
        let cases = CaseCountStore::load(cfg, tables.catalogue())?;

        Ok(Self {
            predictions: PredictionService::new(tables),
            cases,
        })
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_languages,
        list_diseases,
        list_symptoms,
        predict,
        export_report,
        stats_data,
        stats_options,
        update_cases,
    ),
    components(schemas(
        wire::HealthRes,
        wire::PredictReq,
        wire::PredictRes,
        wire::PredictionEntry,
        wire::ReportReq,
        wire::StatsRes,
        wire::StatsOptionsRes,
        wire::UpdateCasesReq,
        wire::UpdateCasesRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/languages", get(list_languages))
        .route("/api/diseases", get(list_diseases))
        .route("/api/symptoms", get(list_symptoms))
        .route("/api/predict", post(predict))
        .route("/api/report", post(export_report))
        .route("/api/stats/data", get(stats_data))
        .route("/api/stats/options", get(stats_options))
        .route("/api/stats/update", post(update_cases))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = wire::HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health() -> Json<wire::HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/languages",
    responses(
        (status = 200, description = "Supported language tags, canonical first", body = [String])
    )
)]
#[axum::debug_handler]
async fn list_languages(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.predictions.languages())
}

#[utoipa::path(
    get,
    path = "/api/diseases",
    responses(
        (status = 200, description = "Candidate diseases in tie-break order", body = [String])
    )
)]
#[axum::debug_handler]
async fn list_diseases(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.predictions.diseases())
}

#[utoipa::path(
    get,
    path = "/api/symptoms",
    params(wire::LanguageQuery),
    responses(
        (status = 200, description = "Symptom labels for the language", body = [String])
    )
)]
/// List the symptom vocabulary for a language.
///
/// Unknown or missing language tags return the canonical vocabulary.
#[axum::debug_handler]
async fn list_symptoms(
    State(state): State<AppState>,
    Query(query): Query<wire::LanguageQuery>,
) -> Json<Vec<String>> {
    Json(state.predictions.symptoms_for(query.lang.as_deref()))
}

#[utoipa::path(
    post,
    path = "/api/predict",
    request_body = wire::PredictReq,
    responses(
        (status = 200, description = "Ranked diseases", body = wire::PredictRes),
        (status = 400, description = "Bad request")
    )
)]
/// Rank candidate diseases for the submitted symptoms
///
/// Blank symptom entries are ignored. The response always lists every disease; when nothing
/// matches, all probabilities are zero.
#[axum::debug_handler]
async fn predict(
    State(state): State<AppState>,
    Json(req): Json<wire::PredictReq>,
) -> Json<wire::PredictRes> {
    Json(state.predictions.predict(&req.symptoms, req.lang.as_deref()))
}

#[utoipa::path(
    post,
    path = "/api/report",
    request_body = wire::ReportReq,
    responses(
        (status = 200, description = "Text report attachment", content_type = "text/plain")
    )
)]
/// Export prediction results as a downloadable text report
#[axum::debug_handler]
async fn export_report(
    State(state): State<AppState>,
    Json(req): Json<wire::ReportReq>,
) -> impl IntoResponse {
    let language = state.predictions.resolve_language(req.lang.as_deref()).to_string();
    let generated_at = chrono::Local::now().naive_local();

    let body = report::render_report(&req.results, &language, generated_at);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        report::report_file_name(&language, generated_at)
    );

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
}

#[utoipa::path(
    get,
    path = "/api/stats/data",
    responses(
        (status = 200, description = "Regional yearly case counts", body = wire::StatsRes)
    )
)]
#[axum::debug_handler]
async fn stats_data(State(state): State<AppState>) -> Json<wire::StatsRes> {
    Json(wire::StatsRes {
        statewise: state.cases.statewise(),
    })
}

#[utoipa::path(
    get,
    path = "/api/stats/options",
    responses(
        (status = 200, description = "Valid update selections", body = wire::StatsOptionsRes)
    )
)]
#[axum::debug_handler]
async fn stats_options(State(state): State<AppState>) -> Json<wire::StatsOptionsRes> {
    Json(state.cases.options(state.predictions.tables().catalogue()))
}

#[utoipa::path(
    post,
    path = "/api/stats/update",
    request_body = wire::UpdateCasesReq,
    responses(
        (status = 200, description = "Case count updated", body = wire::UpdateCasesRes),
        (status = 400, description = "Invalid disease/state/year selection"),
        (status = 500, description = "Internal server error")
    )
)]
/// Replace one regional yearly case count
///
/// # Errors
/// Returns `400 Bad Request` if the disease has no series for the state or the year is unknown.
#[axum::debug_handler]
async fn update_cases(
    State(state): State<AppState>,
    Json(req): Json<wire::UpdateCasesReq>,
) -> Result<Json<wire::UpdateCasesRes>, (StatusCode, &'static str)> {
    match state
        .cases
        .update(&req.disease, &req.state, &req.year, req.cases)
    {
        Ok(message) => Ok(Json(wire::UpdateCasesRes { message })),
        Err(TriageError::InvalidSelection) => {
            tracing::warn!(
                "rejected case update for {}/{}/{}",
                req.disease,
                req.state,
                req.year
            );
            Err((
                StatusCode::BAD_REQUEST,
                "Invalid disease/state/year selection",
            ))
        }
        Err(e) => {
            tracing::error!("Update case counts error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}
