use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::{apiresponse::ApiResponse, userdtos::StoreUserDto},
    error::HttpError,
    models::usermodel::User,
    service::{
        change_feed::{ChangeEvent, Collection},
        error::ServiceError,
    },
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/", post(store_user))
        .route("/by-token/:token_identifier", get(get_user_by_token))
}

pub async fn store_user(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<StoreUserDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = User::new(body.user_id, body.token_identifier, body.role);

    let user = app_state
        .db_client
        .save_user(user)
        .await
        .map_err(ServiceError::from)?
        .ok_or_else(|| {
            ServiceError::Conflict("A user with this token identifier already exists".to_string())
        })?;

    app_state
        .change_feed
        .publish(ChangeEvent::insert(Collection::Users, user.id))
        .await;

    Ok(Json(ApiResponse::success("User stored successfully", user)))
}

pub async fn get_user_by_token(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(token_identifier), _): WithRejection<Path<String>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user_by_token(&token_identifier)
        .await
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::UserNotFound(token_identifier))?;

    Ok(Json(ApiResponse::success("User retrieved successfully", user)))
}
