use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::policy::RulesetVersion;
use super::service::{ScreeningService, ScreeningServiceError};
use super::wage_table::WageTableError;

#[derive(Debug, Deserialize)]
pub struct ScreeningRunRequest {
    pub csv: String,
    #[serde(default)]
    pub ruleset: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WageEditRequest {
    pub edits: Vec<String>,
}

/// Router exposing screening runs and the persisted wage table.
pub fn screening_router(service: Arc<ScreeningService>) -> Router {
    Router::new()
        .route("/api/v1/screening/run", post(run_handler))
        .route(
            "/api/v1/screening/wages",
            get(wages_handler).put(update_wages_handler),
        )
        .with_state(service)
}

pub(crate) async fn run_handler(
    State(service): State<Arc<ScreeningService>>,
    Json(request): Json<ScreeningRunRequest>,
) -> Response {
    let ruleset = match request.ruleset.as_deref().map(str::parse::<RulesetVersion>) {
        None => None,
        Some(Ok(ruleset)) => Some(ruleset),
        Some(Err(error)) => return unprocessable(error.to_string()),
    };

    let screened = off_executor(service, move |service| {
        service
            .screen_text(&request.csv, ruleset)
            .map(|report| report.summary())
    })
    .await;

    match screened {
        Ok(Ok(summary)) => (StatusCode::OK, Json(summary)).into_response(),
        Ok(Err(ScreeningServiceError::Import(error))) => unprocessable(error.to_string()),
        Ok(Err(other)) => internal_error(other.to_string()),
        Err(response) => response,
    }
}

pub(crate) async fn wages_handler(State(service): State<Arc<ScreeningService>>) -> Response {
    let listed = off_executor(service, |service| {
        json!({
            "path": service.store().path().display().to_string(),
            "wages": service.wage_table().snapshot().wages,
        })
    })
    .await;

    match listed {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn update_wages_handler(
    State(service): State<Arc<ScreeningService>>,
    Json(request): Json<WageEditRequest>,
) -> Response {
    let updated = off_executor(service, move |service| {
        service.update_wages(&request.edits).map(|table| {
            json!({
                "path": service.store().path().display().to_string(),
                "wages": table.snapshot().wages,
            })
        })
    })
    .await;

    match updated {
        Ok(Ok(payload)) => (StatusCode::OK, Json(payload)).into_response(),
        Ok(Err(ScreeningServiceError::WageTable(
            error @ (WageTableError::UnknownRegion(_)
            | WageTableError::InvalidWage { .. }
            | WageTableError::MalformedEdit(_)),
        ))) => unprocessable(error.to_string()),
        Ok(Err(other)) => internal_error(other.to_string()),
        Err(response) => response,
    }
}

/// Runs file-backed wage-table access and row evaluation on the blocking pool.
async fn off_executor<T, F>(service: Arc<ScreeningService>, work: F) -> Result<T, Response>
where
    F: FnOnce(&ScreeningService) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || work(&service))
        .await
        .map_err(|error| internal_error(format!("screening task failed: {error}")))
}

fn unprocessable(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

fn internal_error(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
