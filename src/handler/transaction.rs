use std::sync::Arc;

use axum::{
    extract::Query,
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;

use crate::{
    dtos::{apiresponse::ApiResponse, transactiondtos::*},
    error::HttpError,
    AppState,
};

pub fn transaction_handler() -> Router {
    Router::new().route("/", post(record_transaction).get(retrieve_transactions))
}

pub async fn record_transaction(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Json(body), _): WithRejection<Json<RecordTransactionDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let transaction = app_state.transaction_service.record_transaction(body).await?;

    Ok(Json(ApiResponse::success("Transaction recorded successfully", transaction)))
}

pub async fn retrieve_transactions(
    Extension(app_state): Extension<Arc<AppState>>,
    WithRejection(Query(params), _): WithRejection<Query<RetrieveTransactionsQueryDto>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let transactions = app_state
        .transaction_service
        .retrieve_transactions(params.user_id, params.user_type)
        .await?;

    Ok(Json(ApiResponse::success("Transactions retrieved successfully", transactions)))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use uuid::Uuid;

    use crate::handler::test_support::{send, TestApp};

    #[tokio::test]
    async fn agent_query_matches_sender_and_receiver() {
        let app = TestApp::new();
        let agent = Uuid::new_v4();
        let sub_agent = Uuid::new_v4();

        for (from, to) in [(agent, sub_agent), (sub_agent, agent), (sub_agent, Uuid::new_v4())] {
            let (status, _) = send(
                &app.router,
                Method::POST,
                "/api/transactions",
                Some(json!({
                    "fromAgentId": from,
                    "toAgentId": to,
                    "amount": 50.0,
                    "transactionType": "agentToSubagent"
                })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = send(
            &app.router,
            Method::GET,
            &format!("/api/transactions?userId={}&userType=agent", agent),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_user_type_is_rejected() {
        let app = TestApp::new();

        let (status, body) = send(
            &app.router,
            Method::GET,
            &format!("/api/transactions?userId={}&userType=admin", Uuid::new_v4()),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
    }
}
