use std::sync::Arc;

use axum::{response::IntoResponse, routing::post, Extension, Json, Router};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    dtos::{apiresponse::ApiResponse, playerdtos::RecordGameplayReportDto},
    error::HttpError,
    AppState,
};

pub fn gameplay_handler() -> Router {
    Router::new().route("/", post(record_gameplay_report))
}

pub async fn record_gameplay_report(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<RecordGameplayReportDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let report = app_state.player_service.record_gameplay_report(body).await?;

    Ok(Json(ApiResponse::success("Gameplay report recorded", report)))
}
