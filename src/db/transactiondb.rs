// db/transactiondb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::transactionmodel::Transaction;

#[async_trait]
pub trait TransactionExt: Send + Sync {
    async fn save_transaction(&self, transaction: Transaction) -> Result<Transaction, Error>;

    /// Transactions where the agent is either the sender or the receiver.
    async fn get_agent_transactions(&self, agent_id: Uuid) -> Result<Vec<Transaction>, Error>;

    async fn get_player_transactions(&self, player_id: Uuid) -> Result<Vec<Transaction>, Error>;
}

#[async_trait]
impl TransactionExt for DBClient {
    async fn save_transaction(&self, transaction: Transaction) -> Result<Transaction, Error> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (
                id, from_agent_id, to_agent_id, player_id, amount, transaction_type, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(transaction.id)
        .bind(transaction.from_agent_id)
        .bind(transaction.to_agent_id)
        .bind(transaction.player_id)
        .bind(transaction.amount)
        .bind(transaction.transaction_type)
        .bind(transaction.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(transaction)
    }

    async fn get_agent_transactions(&self, agent_id: Uuid) -> Result<Vec<Transaction>, Error> {
        sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE from_agent_id = $1 OR to_agent_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(agent_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_player_transactions(&self, player_id: Uuid) -> Result<Vec<Transaction>, Error> {
        sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE player_id = $1 ORDER BY created_at",
        )
        .bind(player_id)
        .fetch_all(&self.pool)
        .await
    }
}
