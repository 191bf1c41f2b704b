use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use super::domain::{DealAnalysis, FactField};
use super::engine::analyze_sheet;
use super::facts::FactSheet;
use super::report::RiskNotes;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeDealRequest {
    pub facts: FactSheet,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub include_report: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeDealResponse {
    pub analysis: DealAnalysis,
    pub defaults_applied: Vec<FactField>,
    pub analyzed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
}

/// Router exposing the underwriting engine over HTTP.
pub fn deal_router() -> Router {
    Router::new().route("/api/v1/deals/analyze", post(analyze_handler))
}

pub(crate) async fn analyze_handler(Json(request): Json<AnalyzeDealRequest>) -> Response {
    let AnalyzeDealRequest {
        facts,
        pros,
        cons,
        include_report,
    } = request;

    match analyze_sheet(facts) {
        Ok(deal) => {
            info!(
                grade = %deal.analysis.grade,
                piti_cents = deal.analysis.monthly_piti_cents,
                defaults = deal.facts.defaults_applied.len(),
                "deal analyzed"
            );
            let report = include_report.then(|| {
                let notes = RiskNotes { pros, cons };
                deal.report(&notes).render()
            });
            let body = AnalyzeDealResponse {
                analysis: deal.analysis,
                defaults_applied: deal.facts.defaults_applied,
                analyzed_at: Utc::now(),
                report,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => {
            warn!(%error, "rejected listing facts");
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}
