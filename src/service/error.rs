use thiserror::Error;
use uuid::Uuid;

use crate::error::{ErrorMessage, HttpError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Agent not found")]
    AgentNotFound(Uuid),

    #[error("Player not found")]
    PlayerNotFound(Uuid),

    #[error("Referral not found")]
    ReferralNotFound(Uuid),

    #[error("User not found")]
    UserNotFound(String),

    #[error("Repair not found")]
    RepairNotFound(Uuid),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::AgentNotFound(_)
            | ServiceError::PlayerNotFound(_)
            | ServiceError::ReferralNotFound(_)
            | ServiceError::UserNotFound(_)
            | ServiceError::RepairNotFound(_) => HttpError::not_found(error.to_string()),

            ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            ServiceError::Conflict(_) => HttpError::conflict(error.to_string()),

            ServiceError::Database(ref db_error) => {
                tracing::error!("database error: {}", db_error);
                HttpError::server_error(error.to_string())
            }

            ServiceError::Other(_) => HttpError::server_error(error.to_string()),
        }
    }
}

impl From<ErrorMessage> for ServiceError {
    fn from(err: ErrorMessage) -> Self {
        match err {
            ErrorMessage::UnknownPerk(_) | ErrorMessage::UnknownRepairStatus(_) => {
                ServiceError::Validation(err.to_string())
            }
            other => ServiceError::Other(other.to_string()),
        }
    }
}
