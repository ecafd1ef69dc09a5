// routes.rs
use std::sync::Arc;

use axum::{routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        agent::agent_handler, gameplay::gameplay_handler, player::player_handler,
        referral::referral_handler, repairs::repairs_handler, subscribe::subscribe_handler,
        transaction::transaction_handler, users::users_handler,
    },
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/agents", agent_handler())
        .nest("/players", player_handler())
        .nest("/referrals", referral_handler())
        .nest("/transactions", transaction_handler())
        .nest("/users", users_handler())
        .nest("/gameplay-reports", gameplay_handler())
        .nest("/subscribe", subscribe_handler());

    let dashboard_route = Router::new().nest("/repairs", repairs_handler());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
        .nest("/dashboard", dashboard_route)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}
