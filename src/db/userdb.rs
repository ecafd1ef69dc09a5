// db/userdb.rs
use async_trait::async_trait;
use sqlx::Error;

use super::db::DBClient;
use crate::models::usermodel::User;

#[async_trait]
pub trait UserExt: Send + Sync {
    /// `None` when another user already holds the token identifier.
    async fn save_user(&self, user: User) -> Result<Option<User>, Error>;

    async fn get_user_by_token(&self, token_identifier: &str) -> Result<Option<User>, Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn save_user(&self, user: User) -> Result<Option<User>, Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, user_id, token_identifier, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (token_identifier) WHERE token_identifier IS NOT NULL DO NOTHING
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.user_id)
        .bind(&user.token_identifier)
        .bind(&user.role)
        .bind(user.created_at)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_user_by_token(&self, token_identifier: &str) -> Result<Option<User>, Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE token_identifier = $1")
            .bind(token_identifier)
            .fetch_optional(&self.pool)
            .await
    }
}
