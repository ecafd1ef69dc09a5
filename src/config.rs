// config.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub redis_url: Option<String>,
    pub allowed_origins: Vec<String>,
    pub log_level: String,
    pub change_feed_capacity: usize,
}

impl Config {
    pub fn init() -> Result<Config, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET_KEY")?;

        let app_url = std::env::var("APP_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        let port = match std::env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            Err(_) => 8000,
        };

        // Redis is optional; change events stay in-process without it
        let redis_url = std::env::var("REDIS_URL").ok().filter(|url| !url.is_empty());

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                    "http://localhost:8000".to_string(),
                ]
            });

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "debug".to_string());

        let change_feed_capacity = match std::env::var("CHANGE_FEED_CAPACITY") {
            Ok(value) => value
                .parse::<usize>()
                .ok()
                .filter(|capacity| *capacity > 0)
                .ok_or(ConfigError::Invalid { name: "CHANGE_FEED_CAPACITY", value })?,
            Err(_) => 256,
        };

        Ok(Config {
            database_url,
            app_url,
            jwt_secret,
            port,
            redis_url,
            allowed_origins,
            log_level,
            change_feed_capacity,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Config {
        Config {
            database_url: "postgres://localhost/play888_test".to_string(),
            app_url: "http://play888.test".to_string(),
            jwt_secret: "test-secret".to_string(),
            port: 8000,
            redis_url: None,
            allowed_origins: vec![],
            log_level: "debug".to_string(),
            change_feed_capacity: 16,
        }
    }
}
