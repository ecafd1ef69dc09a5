use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{agentdtos::*, apiresponse::ApiResponse},
    error::HttpError,
    AppState,
};

pub fn agent_handler() -> Router {
    Router::new()
        .route("/", post(create_agent))
        .route("/:agent_id", get(get_agent).patch(update_agent_details))
        .route("/:agent_id/credit", post(adjust_agent_credit))
        .route("/:agent_id/commission-settings", put(set_commission_settings))
        .route("/:agent_id/cms-content", put(update_cms_content))
        .route("/:agent_id/sub-agents", get(list_sub_agents))
        .route("/:agent_id/players", get(list_players))
}

pub async fn create_agent(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<CreateAgentDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let agent = app_state.agent_service.create_agent(body).await?;

    Ok(Json(ApiResponse::success("Agent created successfully", agent)))
}

pub async fn get_agent(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(agent_id), _): WithRejection<Path<Uuid>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let agent = app_state.agent_service.get_agent(agent_id).await?;

    Ok(Json(ApiResponse::success("Agent retrieved successfully", agent)))
}

pub async fn update_agent_details(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(agent_id), _): WithRejection<Path<Uuid>, HttpError>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateAgentDetailsDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let agent = app_state.agent_service.update_agent_details(agent_id, body).await?;

    Ok(Json(ApiResponse::success("Agent updated successfully", agent)))
}

pub async fn adjust_agent_credit(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(agent_id), _): WithRejection<Path<Uuid>, HttpError>,
    WithRejection(Json(body), _): WithRejection<Json<AdjustCreditDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let agent = app_state
        .agent_service
        .adjust_agent_credit(agent_id, body.credit_adjustment)
        .await?;

    Ok(Json(ApiResponse::success("Agent credit adjusted", agent)))
}

pub async fn set_commission_settings(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(agent_id), _): WithRejection<Path<Uuid>, HttpError>,
    WithRejection(Json(body), _): WithRejection<Json<SetCommissionSettingsDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let agent = app_state
        .agent_service
        .set_commission_settings(agent_id, body.commission_settings)
        .await?;

    Ok(Json(ApiResponse::success("Commission settings updated", agent)))
}

pub async fn update_cms_content(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(agent_id), _): WithRejection<Path<Uuid>, HttpError>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateCmsContentDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let agent = app_state
        .agent_service
        .update_cms_content(agent_id, body.cms_content)
        .await?;

    Ok(Json(ApiResponse::success("CMS content updated", agent)))
}

pub async fn list_sub_agents(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(agent_id), _): WithRejection<Path<Uuid>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let agents = app_state.agent_service.list_sub_agents(agent_id).await?;

    Ok(Json(ApiResponse::success("Sub-agents retrieved successfully", agents)))
}

pub async fn list_players(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(agent_id), _): WithRejection<Path<Uuid>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let players = app_state.agent_service.list_players(agent_id).await?;

    Ok(Json(ApiResponse::success("Players retrieved successfully", players)))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::handler::test_support::{send, TestApp};

    #[tokio::test]
    async fn create_then_adjust_credit() {
        let app = TestApp::new();

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/agents",
            Some(json!({
                "name": "Lucky Star",
                "subdomain": "luckystar",
                "username": "lucky",
                "password": "password123"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert!(body["data"].get("passwordHash").is_none());
        assert_eq!(body["data"]["commissionSettings"]["percentage"], 10.0);

        let agent_id = body["data"]["id"].as_str().unwrap().to_string();
        let (status, body) = send(
            &app.router,
            Method::POST,
            &format!("/api/agents/{}/credit", agent_id),
            Some(json!({ "creditAdjustment": -40.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["creditBalance"], -40.0);
    }

    #[tokio::test]
    async fn invalid_subdomain_is_rejected() {
        let app = TestApp::new();

        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/agents",
            Some(json!({
                "name": "Lucky Star",
                "subdomain": "Not A Subdomain",
                "username": "lucky",
                "password": "password123"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
    }

    #[tokio::test]
    async fn missing_agent_is_404() {
        let app = TestApp::new();

        let (status, body) = send(
            &app.router,
            Method::POST,
            &format!("/api/agents/{}/credit", uuid::Uuid::new_v4()),
            Some(json!({ "creditAdjustment": 5.0 })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Agent not found");
    }

    #[tokio::test]
    async fn commission_percentage_out_of_range_is_rejected() {
        let app = TestApp::new();

        let (status, _) = send(
            &app.router,
            Method::PUT,
            &format!("/api/agents/{}/commission-settings", uuid::Uuid::new_v4()),
            Some(json!({
                "commissionSettings": {
                    "type": "percentage",
                    "percentage": 140.0,
                    "commissionRestriction": "uncapped"
                }
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
