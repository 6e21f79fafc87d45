//! API Handlers
use crate::metrics;
use crate::AppState;
use abacus_core::{generate_steps, ArithError, Step, StepSequence, ABACUS_VERSION};
use abacus_trace::{summarize, trace_digest, verify, TraceError, TraceSummary, Verification};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct StepsRequest {
    pub expression: String,
    /// Falls back to the configured default base
    pub base: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepsResponse {
    pub trace_id: String,
    pub generated_at: DateTime<Utc>,
    pub digest: String,
    pub result: String,
    pub summary: TraceSummary,
    pub steps: StepSequence,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    pub steps: Vec<Step>,
}

/// Error body: `{ "error": kind, "message": text }`
#[derive(Debug)]
pub enum ApiError {
    Arith(ArithError),
    Trace(TraceError),
}

impl From<ArithError> for ApiError {
    fn from(e: ArithError) -> Self {
        Self::Arith(e)
    }
}

impl From<TraceError> for ApiError {
    fn from(e: TraceError) -> Self {
        match e {
            TraceError::Arith(inner) => Self::Arith(inner),
            other => Self::Trace(other),
        }
    }
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            Self::Arith(e) => e.kind(),
            Self::Trace(TraceError::Serialize(_)) => "SerializeError",
            Self::Trace(_) => "TraceError",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Arith(e) if !e.is_user_error() => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Trace(TraceError::Serialize(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Arith(e) => e.to_string(),
            Self::Trace(e) => e.to_string(),
        };
        let body = Json(json!({ "error": self.kind(), "message": message }));
        (self.status(), body).into_response()
    }
}

pub async fn steps(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<StepsRequest>,
) -> Result<Json<StepsResponse>, ApiError> {
    let base = payload.base.unwrap_or(state.config.default_base);
    let outcome = build_trace(&state, &payload.expression, base);
    if let Err(e) = &outcome {
        metrics::record_error(e.kind());
    }
    outcome.map(Json)
}

fn build_trace(state: &AppState, expression: &str, base: u32) -> Result<StepsResponse, ApiError> {
    if expression.chars().count() > state.config.max_expression_len {
        return Err(ArithError::Format(format!(
            "expression longer than {} characters",
            state.config.max_expression_len
        ))
        .into());
    }

    let seq = generate_steps(expression, base)?;
    let summary = summarize(seq.steps())?;
    let digest = trace_digest(seq.steps())?;
    let trace_id = uuid::Uuid::new_v4().to_string();
    metrics::record_trace(seq.operator().name());
    info!(%trace_id, operator = seq.operator().name(), base, steps = seq.len(), "trace generated");

    Ok(StepsResponse {
        trace_id,
        generated_at: Utc::now(),
        digest,
        result: summary.result.clone(),
        summary,
        steps: seq,
    })
}

pub async fn verify_trace(
    Json(payload): Json<VerifyRequest>,
) -> Result<Json<Verification>, ApiError> {
    Ok(Json(verify(&payload.steps)?))
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": ABACUS_VERSION })),
    )
}

pub async fn metrics_text() -> Response {
    match metrics::encode() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
