use std::sync::Arc;

use axum::{extract::Path, response::IntoResponse, routing::post, Extension, Json, Router};
use axum_extra::extract::WithRejection;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{apiresponse::ApiResponse, referraldtos::*},
    error::HttpError,
    AppState,
};

pub fn referral_handler() -> Router {
    Router::new()
        .route("/", post(record_referral))
        .route("/:referral_id/commission", post(update_referral_commission))
}

pub async fn record_referral(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<RecordReferralDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let referral = app_state
        .referral_service
        .record_referral(body.referrer_id, body.referee_id)
        .await?;

    Ok(Json(ApiResponse::success("Referral recorded successfully", referral)))
}

pub async fn update_referral_commission(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(referral_id), _): WithRejection<Path<Uuid>, HttpError>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateReferralCommissionDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let referral = app_state
        .referral_service
        .update_referral_commission(referral_id, body.deposit_record.into())
        .await?;

    Ok(Json(ApiResponse::success("Referral commission updated", referral)))
}
