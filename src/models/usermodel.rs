use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub user_id: String,
    pub token_identifier: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(user_id: String, token_identifier: Option<String>, role: String) -> Self {
        User {
            id: Uuid::new_v4(),
            user_id,
            token_identifier,
            role,
            created_at: Utc::now(),
        }
    }
}
