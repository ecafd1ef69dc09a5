use std::sync::Arc;

use axum::{
    extract::Path,
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{
    db::repairdb::RepairExt,
    dtos::{apiresponse::ApiResponse, repairdtos::RepairDashboardDto},
    error::HttpError,
    middleware::{load_session, redirect_admins},
    models::repairmodel::RepairStatus,
    service::{
        change_feed::{ChangeEvent, Collection},
        error::ServiceError,
    },
    AppState,
};

pub const DEFAULT_DASHBOARD_PATH: &str = "/dashboard/repairs/new";

pub fn repairs_handler() -> Router {
    Router::new()
        .route("/:status", get(repair_dashboard))
        .route("/:status/:repair_id/advance", post(advance_repair))
        .layer(middleware::from_fn(redirect_admins))
        .layer(middleware::from_fn(load_session))
}

pub async fn repair_dashboard(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(status), _): WithRejection<Path<String>, HttpError>,
) -> Result<Response, HttpError> {
    let status: RepairStatus = match status.parse() {
        Ok(status) => status,
        Err(_) => return Ok(Redirect::to(DEFAULT_DASHBOARD_PATH).into_response()),
    };

    let repairs = app_state
        .db_client
        .get_repairs(status)
        .await
        .map_err(ServiceError::from)?;

    let dashboard = RepairDashboardDto::build(status, &repairs);

    Ok(Json(ApiResponse::success("Repairs retrieved successfully", dashboard)).into_response())
}

pub async fn advance_repair(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path((status, repair_id)), _): WithRejection<Path<(String, Uuid)>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let status: RepairStatus = status.parse().map_err(ServiceError::from)?;

    let current = app_state
        .db_client
        .get_repair(repair_id)
        .await
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::RepairNotFound(repair_id))?;

    if current.status != status {
        return Err(HttpError::bad_request(format!(
            "Repair is in {}, not {}",
            current.status.title(),
            status.title()
        )));
    }

    let next_status = status.next().ok_or_else(|| {
        HttpError::bad_request(format!("Repairs in {} cannot be advanced", status.title()))
    })?;

    let repair = app_state
        .db_client
        .set_repair_status(repair_id, next_status)
        .await
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::RepairNotFound(repair_id))?;

    tracing::info!(repair_id = %repair_id, from = status.as_str(), to = next_status.as_str(), "repair advanced");
    app_state
        .change_feed
        .publish(ChangeEvent::patch(Collection::Repairs, repair.id))
        .await;

    Ok(Json(ApiResponse::success("Repair status updated", repair)))
}
