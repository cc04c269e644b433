use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AnswerRecord, AssessmentKind, Question, QuestionFormat};
use super::error::AssessmentError;
use super::service::{AssessmentService, AssessmentServiceError, SessionId};

/// Header carrying the client's session identifier.
pub const SESSION_HEADER: &str = "x-session-id";

/// Router builder exposing the assessment orchestrator over HTTP.
pub fn assessment_router(service: Arc<AssessmentService>) -> Router {
    Router::new()
        .route("/api/v1/assessments/answers", post(answer_handler))
        .route("/api/v1/assessments/current", get(current_handler))
        .route("/api/v1/assessments/reset", post(reset_handler))
        .route("/api/v1/assessments/profile", get(profile_handler))
        .route("/api/v1/assessments/session", delete(end_session_handler))
        .route("/api/v1/assessments/:kind/start", post(start_handler))
        .route("/api/v1/assessments/:kind/result", get(result_handler))
        .route("/api/analyze-assessment", post(analyze_handler))
        .with_state(service)
}

pub fn session_id_from(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| SessionId(value.to_string()))
}

fn require_session(headers: &HeaderMap) -> Result<SessionId, Response> {
    session_id_from(headers).ok_or_else(|| {
        let payload = json!({ "error": "missing X-Session-ID header" });
        (StatusCode::BAD_REQUEST, Json(payload)).into_response()
    })
}

fn parse_kind(raw: &str) -> Result<AssessmentKind, Response> {
    raw.parse::<AssessmentKind>()
        .map_err(|err| assessment_error_response(AssessmentServiceError::Assessment(err)))
}

pub(crate) fn assessment_error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        AssessmentServiceError::Assessment(inner) => match inner {
            AssessmentError::UnknownAssessmentKind(_) => StatusCode::BAD_REQUEST,
            AssessmentError::EmptyAnswer
            | AssessmentError::MalformedAnswer { .. }
            | AssessmentError::NoAnswersToAnalyze => StatusCode::UNPROCESSABLE_ENTITY,
            AssessmentError::NoActiveAssessment => StatusCode::CONFLICT,
            AssessmentError::InsufficientQuestions { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        },
    };

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerRequest {
    #[serde(default)]
    answer: String,
}

pub(crate) async fn start_handler(
    State(service): State<Arc<AssessmentService>>,
    Path(kind): Path<String>,
    headers: HeaderMap,
) -> Response {
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    match service.start(session_id_from(&headers), kind) {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(error) => assessment_error_response(error),
    }
}

pub(crate) async fn answer_handler(
    State(service): State<Arc<AssessmentService>>,
    headers: HeaderMap,
    Json(request): Json<AnswerRequest>,
) -> Response {
    let session_id = match require_session(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.submit(&session_id, &request.answer) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => assessment_error_response(error),
    }
}

pub(crate) async fn current_handler(
    State(service): State<Arc<AssessmentService>>,
    headers: HeaderMap,
) -> Response {
    let session_id = match require_session(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.current(&session_id) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => assessment_error_response(error),
    }
}

pub(crate) async fn reset_handler(
    State(service): State<Arc<AssessmentService>>,
    headers: HeaderMap,
) -> Response {
    let session_id = match require_session(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.reset(&session_id) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => assessment_error_response(error),
    }
}

pub(crate) async fn end_session_handler(
    State(service): State<Arc<AssessmentService>>,
    headers: HeaderMap,
) -> Response {
    let session_id = match require_session(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.end(&session_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => assessment_error_response(error),
    }
}

pub(crate) async fn result_handler(
    State(service): State<Arc<AssessmentService>>,
    Path(kind): Path<String>,
    headers: HeaderMap,
) -> Response {
    let session_id = match require_session(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    match service.result(&session_id, kind) {
        Ok(Some(result)) => (StatusCode::OK, Json(result)).into_response(),
        Ok(None) => {
            let payload = json!({
                "assessment_kind": kind,
                "status": "not_available",
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(error) => assessment_error_response(error),
    }
}

pub(crate) async fn profile_handler(
    State(service): State<Arc<AssessmentService>>,
    headers: HeaderMap,
) -> Response {
    let session_id = match require_session(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.profile(&session_id) {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(error) => assessment_error_response(error),
    }
}

/// Client-held answer as posted to the stateless analysis endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnswerPayload {
    #[serde(default)]
    question_index: usize,
    question: QuestionPayload,
    #[serde(default)]
    answer: String,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionPayload {
    #[serde(rename = "type", default)]
    format: Option<String>,
    #[serde(alias = "question", default)]
    prompt: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default)]
    min: Option<u8>,
    #[serde(default)]
    max: Option<u8>,
}

impl TryFrom<AnswerPayload> for AnswerRecord {
    type Error = AssessmentError;

    fn try_from(payload: AnswerPayload) -> Result<Self, Self::Error> {
        let index = payload.question_index;
        let format = match payload.question.format.as_deref().map(str::trim) {
            Some("multiple") => QuestionFormat::Multiple,
            Some("text") => QuestionFormat::Text,
            Some("scale") => QuestionFormat::Scale,
            Some(other) => {
                return Err(AssessmentError::malformed(
                    index,
                    format!("unknown question type '{other}'"),
                ))
            }
            None => return Err(AssessmentError::malformed(index, "missing question type")),
        };

        Ok(AnswerRecord {
            question_index: index,
            question: Question {
                format,
                prompt: payload.question.prompt,
                options: payload.question.options,
                placeholder: payload.question.placeholder,
                min: payload.question.min,
                max: payload.question.max,
            },
            answer: payload.answer,
            timestamp: payload.timestamp.unwrap_or_else(Utc::now),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeRequest {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    answers: Vec<AnswerPayload>,
}

pub(crate) async fn analyze_handler(
    State(service): State<Arc<AssessmentService>>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    let kind = match parse_kind(&request.kind) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let answers = match request
        .answers
        .into_iter()
        .map(AnswerRecord::try_from)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(answers) => answers,
        Err(error) => return assessment_error_response(error.into()),
    };

    match service.analyze(kind, &answers) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => assessment_error_response(error.into()),
    }
}
