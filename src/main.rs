mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod middleware;
mod models;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use axum::http::{header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE}, HeaderValue, Method};
use config::Config;
use db::db::{DBClient, Store};
use dotenv::dotenv;
use routes::create_router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

use service::{
    agent_service::AgentService,
    change_feed::ChangeFeed,
    player_service::PlayerService,
    referral_service::ReferralService,
    transaction_service::TransactionService,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<dyn Store>,
    pub change_feed: ChangeFeed,
    // Services
    pub agent_service: Arc<AgentService>,
    pub player_service: Arc<PlayerService>,
    pub referral_service: Arc<ReferralService>,
    pub transaction_service: Arc<TransactionService>,
}

impl AppState {
    pub fn new(config: Config, db_client: Arc<dyn Store>, change_feed: ChangeFeed) -> Self {
        let agent_service = Arc::new(AgentService::new(db_client.clone(), change_feed.clone()));
        let player_service = Arc::new(PlayerService::new(db_client.clone(), change_feed.clone()));
        let referral_service = Arc::new(ReferralService::new(
            db_client.clone(),
            change_feed.clone(),
            config.app_url.clone(),
        ));
        let transaction_service =
            Arc::new(TransactionService::new(db_client.clone(), change_feed.clone()));

        Self {
            env: config,
            db_client,
            change_feed,
            agent_service,
            player_service,
            referral_service,
            transaction_service,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = match Config::init() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("🔥 Invalid configuration: {}", err);
            std::process::exit(1);
        }
    };

    let max_level = config.log_level.parse::<LevelFilter>().unwrap_or(LevelFilter::DEBUG);
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .init();

    let pool = match PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            tracing::info!("✅ Connection to the database is successful!");
            pool
        }
        Err(err) => {
            tracing::error!("🔥 Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = sqlx::migrate!("./migrations").run(&pool).await {
        tracing::error!("🔥 Failed to run migrations: {}", err);
        std::process::exit(1);
    }

    let change_feed = match config.redis_url.as_deref() {
        Some(redis_url) => ChangeFeed::with_redis(config.change_feed_capacity, redis_url).await,
        None => {
            tracing::info!("ℹ️  Redis not configured - change feed is in-process only (set REDIS_URL to enable)");
            ChangeFeed::new(config.change_feed_capacity)
        }
    };

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::PATCH]);

    let db_client: Arc<dyn Store> = Arc::new(DBClient::new(pool));
    let app_state = Arc::new(AppState::new(config.clone(), db_client, change_feed));

    let app = create_router(app_state.clone()).layer(cors);

    tracing::info!(
        "🚀 Server is running on http://localhost:{} (redis mirror: {})",
        config.port,
        app_state.change_feed.is_redis_available()
    );

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("🔥 Failed to bind port {}: {}", config.port, err);
            std::process::exit(1);
        }
    };

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("🔥 Server error: {}", err);
    }
}
