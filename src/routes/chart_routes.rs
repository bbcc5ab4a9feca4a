use axum::{
    routing::{get, post},
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
    extract::{Path, State},
};

use tracing::{debug, info};
use serde::Serialize;

use chart_url::{str_to_query_params, LocationPort, QueryParams};
use crate::state::app_state::AppState;

#[derive(Serialize)]
pub struct ChartUrlResponse {
    pub title: Option<String>,
    pub url: Option<String>,
    pub query: String,
}

#[derive(Serialize)]
pub struct LocationResponse {
    pub query: String,
    pub replacements: usize,
}

/// =======================
/// ROUTER
/// =======================

pub fn chart_routes(state: AppState) -> Router {
    Router::new()
        .route("/chart/params", get(chart_params))
        .route("/chart/url", get(chart_url))
        .route("/chart/query", post(apply_query))
        .route("/chart/playback/{action}", post(playback))
        .route("/location", get(location))
        .with_state(state)
}

/// =======================
/// HANDLERS
/// =======================

async fn chart_params(State(state): State<AppState>) -> Json<QueryParams> {
    Json(state.chart.params())
}

async fn chart_url(State(state): State<AppState>) -> Json<ChartUrlResponse> {
    let (title, url, query) = state
        .chart
        .read(|chart| (chart.config.title.clone(), chart.url(), chart.query_str()));
    Json(ChartUrlResponse { title, url, query })
}

// Body is a raw query string, e.g. `time=2000..2005&country=~GBR`
async fn apply_query(State(state): State<AppState>, body: String) -> Json<QueryParams> {
    debug!("Applying query {:?}", body);
    let params = str_to_query_params(body.trim());
    state.chart.update(|chart| chart.populate_from_query_params(params));
    Json(state.chart.params())
}

async fn playback(State(state): State<AppState>, Path(action): Path<String>) -> Response {
    match action.as_str() {
        "start" => state.chart.update(|chart| chart.start_playback()),
        "stop" => state.chart.update(|chart| chart.stop_playback()),
        _ => return StatusCode::NOT_FOUND.into_response(),
    }
    info!("Playback {}", action);
    StatusCode::OK.into_response()
}

async fn location(State(state): State<AppState>) -> Json<LocationResponse> {
    Json(LocationResponse {
        query: state.location.query_str(),
        replacements: state.location.replacements().len(),
    })
}
