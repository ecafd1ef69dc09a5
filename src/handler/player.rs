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
    dtos::{
        agentdtos::AdjustCreditDto, apiresponse::ApiResponse, playerdtos::*,
        referraldtos::CreateReferralLinkDto,
    },
    error::HttpError,
    AppState,
};

pub fn player_handler() -> Router {
    Router::new()
        .route("/", post(register_player))
        .route("/:player_id", get(get_player).patch(update_player_details))
        .route("/:player_id/credit", post(adjust_player_credit))
        .route("/:player_id/commission-wallet", post(update_commission_wallet))
        .route("/:player_id/perks", post(unlock_player_perk))
        .route("/:player_id/free-credit-expiry", put(extend_free_credit_expiry))
        .route("/:player_id/referral-link", put(create_referral_link))
        .route("/:player_id/referrals", get(retrieve_referral_data))
        .route("/:player_id/gameplay-reports", get(retrieve_gameplay_reports))
}

pub async fn register_player(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<RegisterPlayerDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let player = app_state.player_service.register_player(body).await?;

    Ok(Json(ApiResponse::success("Player registered successfully", player)))
}

pub async fn get_player(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(player_id), _): WithRejection<Path<Uuid>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let player = app_state.player_service.get_player(player_id).await?;

    Ok(Json(ApiResponse::success("Player retrieved successfully", player)))
}

pub async fn update_player_details(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(player_id), _): WithRejection<Path<Uuid>, HttpError>,
    WithRejection(Json(body), _): WithRejection<Json<UpdatePlayerDetailsDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let player = app_state
        .player_service
        .update_player_details(player_id, body)
        .await?;

    Ok(Json(ApiResponse::success("Player updated successfully", player)))
}

pub async fn adjust_player_credit(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(player_id), _): WithRejection<Path<Uuid>, HttpError>,
    WithRejection(Json(body), _): WithRejection<Json<AdjustCreditDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let player = app_state
        .player_service
        .adjust_player_credit(player_id, body.credit_adjustment)
        .await?;

    Ok(Json(ApiResponse::success("Player credit adjusted", player)))
}

pub async fn update_commission_wallet(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(player_id), _): WithRejection<Path<Uuid>, HttpError>,
    WithRejection(Json(body), _): WithRejection<Json<CommissionWalletDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let player = app_state
        .player_service
        .update_commission_wallet(player_id, body.commission_amount)
        .await?;

    Ok(Json(ApiResponse::success("Commission wallet updated", player)))
}

pub async fn unlock_player_perk(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(player_id), _): WithRejection<Path<Uuid>, HttpError>,
    WithRejection(Json(body), _): WithRejection<Json<UnlockPerkDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let player = app_state
        .player_service
        .unlock_player_perk(player_id, &body.perk_key)
        .await?;

    Ok(Json(ApiResponse::success("Perk unlocked", player)))
}

pub async fn extend_free_credit_expiry(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(player_id), _): WithRejection<Path<Uuid>, HttpError>,
    WithRejection(Json(body), _): WithRejection<Json<FreeCreditExpiryDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let player = app_state
        .player_service
        .extend_free_credit_expiry(player_id, body.new_expiry_timestamp)
        .await?;

    Ok(Json(ApiResponse::success("Free credit expiry updated", player)))
}

pub async fn create_referral_link(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(player_id), _): WithRejection<Path<Uuid>, HttpError>,
    body: Option<Json<CreateReferralLinkDto>>,
) -> Result<impl IntoResponse, HttpError> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let player = app_state
        .referral_service
        .create_referral_link(player_id, body.referral_link)
        .await?;

    Ok(Json(ApiResponse::success("Referral link updated", player)))
}

pub async fn retrieve_referral_data(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(player_id), _): WithRejection<Path<Uuid>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let referrals = app_state
        .referral_service
        .retrieve_referral_data(player_id)
        .await?;

    Ok(Json(ApiResponse::success("Referrals retrieved successfully", referrals)))
}

pub async fn retrieve_gameplay_reports(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Path(player_id), _): WithRejection<Path<Uuid>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let reports = app_state.player_service.gameplay_reports(player_id).await?;

    Ok(Json(ApiResponse::success("Gameplay reports retrieved successfully", reports)))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};
    use uuid::Uuid;

    use crate::handler::test_support::{send, TestApp};

    async fn register(app: &TestApp) -> String {
        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/players",
            Some(json!({
                "agentId": Uuid::new_v4(),
                "referralLink": "http://play888.test/register?ref=START123"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn register_returns_empty_wallets_and_locked_perks() {
        let app = TestApp::new();
        let player_id = register(&app).await;

        let (status, body) = send(&app.router, Method::GET, &format!("/api/players/{}", player_id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["walletBalance"], 0.0);
        assert_eq!(body["data"]["commissionWalletBalance"], 0.0);
        assert_eq!(
            body["data"]["unlockedPerks"],
            json!({ "referredTwoFriends": false, "watchedWelcomeVideo": false })
        );
    }

    #[tokio::test]
    async fn unknown_perk_is_400() {
        let app = TestApp::new();
        let player_id = register(&app).await;

        let (status, body) = send(
            &app.router,
            Method::POST,
            &format!("/api/players/{}/perks", player_id),
            Some(json!({ "perkKey": "freeSpins" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
    }

    #[tokio::test]
    async fn perk_unlock_keeps_other_flag() {
        let app = TestApp::new();
        let player_id = register(&app).await;

        let (status, body) = send(
            &app.router,
            Method::POST,
            &format!("/api/players/{}/perks", player_id),
            Some(json!({ "perkKey": "watchedWelcomeVideo" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["unlockedPerks"]["watchedWelcomeVideo"], true);
        assert_eq!(body["data"]["unlockedPerks"]["referredTwoFriends"], false);
    }

    #[tokio::test]
    async fn referral_link_is_generated_without_a_body() {
        let app = TestApp::new();
        let player_id = register(&app).await;

        let (status, body) = send(
            &app.router,
            Method::PUT,
            &format!("/api/players/{}/referral-link", player_id),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let link = body["data"]["referralLink"].as_str().unwrap();
        assert!(link.starts_with("http://play888.test/register?ref="));
    }

    #[tokio::test]
    async fn missing_player_credit_is_404() {
        let app = TestApp::new();

        let (status, body) = send(
            &app.router,
            Method::POST,
            &format!("/api/players/{}/credit", Uuid::new_v4()),
            Some(json!({ "creditAdjustment": 1.0 })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Player not found");
    }

    #[tokio::test]
    async fn gameplay_reports_list_for_player() {
        let app = TestApp::new();
        let player_id = register(&app).await;

        for (game, ts) in [("slots", 10), ("poker", 20)] {
            let (status, _) = send(
                &app.router,
                Method::POST,
                "/api/gameplay-reports",
                Some(json!({
                    "playerId": player_id,
                    "gameName": game,
                    "winLossAmount": 3.5,
                    "timestamp": ts
                })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, body) = send(
            &app.router,
            Method::GET,
            &format!("/api/players/{}/gameplay-reports", player_id),
            None,
        )
        .await;
        let games: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|report: &Value| report["gameName"].as_str())
            .collect();
        assert_eq!(games, vec!["poker", "slots"]);
    }

    #[tokio::test]
    async fn free_credit_expiry_is_stored_as_given() {
        let app = TestApp::new();
        let player_id = register(&app).await;

        let (status, body) = send(
            &app.router,
            Method::PUT,
            &format!("/api/players/{}/free-credit-expiry", player_id),
            Some(json!({ "newExpiryTimestamp": -1000 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["freeCreditExpiry"], -1000);
    }
}
