// db/gameplaydb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::playermodel::GameplayReport;

#[async_trait]
pub trait GameplayExt: Send + Sync {
    async fn save_gameplay_report(&self, report: GameplayReport) -> Result<GameplayReport, Error>;

    /// Newest first.
    async fn get_gameplay_reports(&self, player_id: Uuid) -> Result<Vec<GameplayReport>, Error>;
}

#[async_trait]
impl GameplayExt for DBClient {
    async fn save_gameplay_report(&self, report: GameplayReport) -> Result<GameplayReport, Error> {
        let report = sqlx::query_as::<_, GameplayReport>(
            r#"
            INSERT INTO gameplay_reports (id, player_id, game_name, win_loss_amount, timestamp)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(report.id)
        .bind(report.player_id)
        .bind(&report.game_name)
        .bind(report.win_loss_amount)
        .bind(report.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(report)
    }

    async fn get_gameplay_reports(&self, player_id: Uuid) -> Result<Vec<GameplayReport>, Error> {
        sqlx::query_as::<_, GameplayReport>(
            "SELECT * FROM gameplay_reports WHERE player_id = $1 ORDER BY timestamp DESC",
        )
        .bind(player_id)
        .fetch_all(&self.pool)
        .await
    }
}
