use crate::infra::AppState;
use axum::extract::Query;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use career_compass::workflows::assessment::router::session_id_from;
use career_compass::workflows::assessment::{assessment_router, AssessmentService};
use career_compass::workflows::colleges::{
    CollegeCategory, CollegeMatch, CollegeQuery, CollegeSort, RecommendationHeadline,
};
use career_compass::workflows::profile::{ProfileCompletion, StudentProfile};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CollegeSearchParams {
    #[serde(default)]
    pub(crate) city: Option<String>,
    #[serde(default)]
    pub(crate) q: Option<String>,
    #[serde(default, rename = "type")]
    pub(crate) category: Option<String>,
    #[serde(default)]
    pub(crate) sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CollegeSearchResponse {
    pub(crate) city: Option<String>,
    pub(crate) sort: CollegeSort,
    pub(crate) recommendation: RecommendationHeadline,
    pub(crate) total: usize,
    pub(crate) colleges: Vec<CollegeMatch>,
}

pub(crate) fn with_guidance_routes(service: Arc<AssessmentService>) -> axum::Router {
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/colleges", axum::routing::get(college_search_endpoint))
        .route(
            "/api/v1/colleges/cities",
            axum::routing::get(college_cities_endpoint),
        )
        .route(
            "/api/v1/profile/completion",
            axum::routing::post(profile_completion_endpoint),
        )
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
        json!({ "status": "ready", "sessions": state.assessments.session_count() })
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

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

pub(crate) async fn college_search_endpoint(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Query(params): Query<CollegeSearchParams>,
) -> Response {
    let sort = match params.sort.as_deref().map(str::parse::<CollegeSort>) {
        None => CollegeSort::default(),
        Some(Ok(sort)) => sort,
        Some(Err(message)) => return bad_request(message),
    };
    let category = match params.category.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => match raw.parse::<CollegeCategory>() {
            Ok(category) => Some(category),
            Err(message) => return bad_request(message),
        },
    };

    // an unknown session simply has no results yet
    let profile = session_id_from(&headers)
        .and_then(|session| state.assessments.profile(&session).ok());
    let recommendation = RecommendationHeadline::from_profile(profile.as_ref());

    let colleges = match params.city.as_deref().map(str::trim) {
        Some(city) if !city.is_empty() => {
            let mut query = CollegeQuery::for_city(city).sorted_by(sort);
            if let Some(text) = params.q.filter(|text| !text.trim().is_empty()) {
                query = query.with_text(text);
            }
            if let Some(category) = category {
                query = query.with_category(category);
            }
            state.catalog.search(&query)
        }
        _ => Vec::new(),
    };

    let body = CollegeSearchResponse {
        city: params.city,
        sort,
        recommendation,
        total: colleges.len(),
        colleges,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn college_cities_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<serde_json::Value> {
    Json(json!({
        "cities": state.catalog.cities(),
        "covered": state.catalog.covered_cities(),
    }))
}

pub(crate) async fn profile_completion_endpoint(
    Json(profile): Json<Option<StudentProfile>>,
) -> Json<ProfileCompletion> {
    Json(ProfileCompletion::for_profile(profile.as_ref()))
}
