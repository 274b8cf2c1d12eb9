use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::drill_engine::{
    catalog::{SkillBucket, SKILL_BUCKETS},
    check_answer, generate_question, EngineConfig, EngineError, GenOptions, Lang,
    QuestionRequest, QuestionResponse,
};

pub type SharedConfig = Arc<EngineConfig>;

type ApiError = (StatusCode, Json<Value>);

// ---------------------------------------------------------------------------
// Query / body types
// ---------------------------------------------------------------------------

/// Query string of `GET /api/v1/question`. Kept flat so axum's query
/// extractor can parse every field from a string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionQuery {
    pub topic: String,
    pub level: u32,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub variation: Option<String>,
    #[serde(default)]
    pub seed: Option<String>,
    #[serde(default)]
    pub hide_concept: bool,
    #[serde(default)]
    pub multiplier: Option<u32>,
}

impl From<QuestionQuery> for QuestionRequest {
    fn from(q: QuestionQuery) -> Self {
        QuestionRequest {
            topic: q.topic,
            level: q.level,
            lang: q.lang.as_deref().map(Lang::parse).unwrap_or_default(),
            variation: q.variation,
            seed: q.seed,
            options: GenOptions {
                hide_concept: q.hide_concept,
                multiplier: q.multiplier.unwrap_or(1),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub token: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub correct: bool,
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

fn api_error(err: EngineError) -> ApiError {
    let status = match err {
        EngineError::UnknownTopic(_)
        | EngineError::InvalidLevel { .. }
        | EngineError::UnknownVariation { .. }
        | EngineError::InvalidMultiplier { .. }
        | EngineError::InvalidToken(_) => StatusCode::BAD_REQUEST,
        EngineError::GenerationExhausted { .. } | EngineError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(target: "question_engine", %err, status = status.as_u16(), "Request failed");
    (status, Json(json!({ "error": err.to_string() })))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// `GET /api/v1/question?topic=...&level=...`
#[instrument(level = "info", skip(config), fields(topic = %q.topic, level = q.level))]
pub async fn get_question(
    State(config): State<SharedConfig>,
    Query(q): Query<QuestionQuery>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let request = QuestionRequest::from(q);
    let response = generate_question(&request, &config).map_err(api_error)?;
    info!(target: "question_engine", question_id = %response.question_id, "HTTP question served");
    Ok(Json(response))
}

/// `POST /api/v1/check`   body: `{ token, answer }`
pub async fn post_check(Json(body): Json<CheckRequest>) -> Result<Json<CheckResponse>, ApiError> {
    let correct = check_answer(&body.token, &body.answer).map_err(api_error)?;
    Ok(Json(CheckResponse { correct }))
}

/// `GET /api/v1/catalog`
pub async fn get_catalog() -> Json<&'static [SkillBucket]> {
    Json(SKILL_BUCKETS)
}
