//! HTTP handlers for Tablecheck server.

use actix_web::{HttpResponse, Responder, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tablecheck_core::{InspectionReport, SeverityTable, SharedSeverityTable, inspect_report};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::openapi::ApiDoc;

const DEFAULT_SOURCE: &str = "request";

/// Shared application state for handlers.
pub struct AppState {
    /// Active severity table; replaced wholesale on reload.
    pub table: SharedSeverityTable,
}

impl AppState {
    /// Wrap an initial severity table.
    pub fn new(table: SeverityTable) -> Self {
        Self {
            table: SharedSeverityTable::new(table),
        }
    }
}

/// Report text submitted for parsing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InspectRequest {
    /// Full extracted report text.
    pub text: String,
    /// Caller label echoed back as the report source.
    #[serde(default)]
    pub source: Option<String>,
}

/// Parsed report plus request bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InspectResponse {
    /// Identifier generated for this parse.
    pub report_id: Uuid,
    /// When the text was parsed.
    pub parsed_at: DateTime<Utc>,
    /// Parsed report.
    #[serde(flatten)]
    pub report: InspectionReport,
}

/// Several report texts parsed in one call.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchInspectRequest {
    /// Reports to parse, in order.
    pub reports: Vec<InspectRequest>,
}

/// Results for a batch, in request order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchInspectResponse {
    /// Parsed reports.
    pub reports: Vec<InspectResponse>,
}

/// Severity table snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SeverityTableResponse {
    /// Codes per tier with their rationales.
    pub table: SeverityTable,
    /// Codes listed in more than one tier.
    pub overlaps: Vec<u32>,
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

fn inspect_one(request: InspectRequest, table: &SeverityTable) -> InspectResponse {
    let source = request
        .source
        .filter(|source| !source.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());
    let report = inspect_report(source, &request.text, table);
    log::info!(
        "parsed {}: {} violation(s), {} star(s)",
        report.source,
        report.result.violations.len(),
        report.result.star_rating
    );
    InspectResponse {
        report_id: Uuid::new_v4(),
        parsed_at: Utc::now(),
        report,
    }
}

fn table_response(table: &SeverityTable) -> SeverityTableResponse {
    SeverityTableResponse {
        table: table.clone(),
        overlaps: table.overlaps(),
    }
}

#[utoipa::path(
    post,
    path = "/inspections",
    request_body = InspectRequest,
    responses(
        (status = 200, description = "Parsed inspection report", body = InspectResponse)
    ),
    tag = "inspections"
)]
#[post("/api/inspections")]
/// Parse one report text.
pub async fn inspect(
    state: web::Data<AppState>,
    payload: web::Json<InspectRequest>,
) -> impl Responder {
    let table = state.table.snapshot();
    HttpResponse::Ok().json(inspect_one(payload.into_inner(), &table))
}

#[utoipa::path(
    post,
    path = "/inspections/batch",
    request_body = BatchInspectRequest,
    responses(
        (status = 200, description = "Parsed inspection reports", body = BatchInspectResponse)
    ),
    tag = "inspections"
)]
#[post("/api/inspections/batch")]
/// Parse several report texts against one table snapshot.
pub async fn inspect_batch(
    state: web::Data<AppState>,
    payload: web::Json<BatchInspectRequest>,
) -> impl Responder {
    let table = state.table.snapshot();
    let reports = payload
        .into_inner()
        .reports
        .into_iter()
        .map(|request| inspect_one(request, &table))
        .collect();
    HttpResponse::Ok().json(BatchInspectResponse { reports })
}

#[utoipa::path(
    get,
    path = "/severity-table",
    responses(
        (status = 200, description = "Active severity table", body = SeverityTableResponse)
    ),
    tag = "severity"
)]
#[get("/api/severity-table")]
/// Fetch the active severity table.
pub async fn severity_table(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(table_response(&state.table.snapshot()))
}

#[utoipa::path(
    put,
    path = "/severity-table",
    request_body = SeverityTable,
    responses(
        (status = 200, description = "Table replaced", body = SeverityTableResponse),
        (status = 400, description = "Malformed table", body = ErrorResponse)
    ),
    tag = "severity"
)]
#[put("/api/severity-table")]
/// Replace the active severity table.
pub async fn replace_severity_table(state: web::Data<AppState>, body: String) -> impl Responder {
    match SeverityTable::from_json(&body) {
        Ok(table) => {
            let response = table_response(&table);
            state.table.replace(table);
            log::info!("severity table replaced");
            HttpResponse::Ok().json(response)
        }
        Err(err) => HttpResponse::BadRequest().json(ErrorResponse {
            message: err.to_string(),
        }),
    }
}

#[utoipa::path(
    get,
    path = "/openapi.json",
    responses(
        (status = 200, description = "OpenAPI specification")
    ),
    tag = "system"
)]
#[get("/api/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
