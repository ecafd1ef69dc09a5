// service/transaction_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{db::Store, transactiondb::TransactionExt},
    dtos::transactiondtos::RecordTransactionDto,
    models::transactionmodel::{Transaction, UserType},
    service::{
        change_feed::{ChangeEvent, ChangeFeed, Collection},
        error::ServiceError,
    },
};

#[derive(Debug, Clone)]
pub struct TransactionService {
    db_client: Arc<dyn Store>,
    change_feed: ChangeFeed,
}

impl TransactionService {
    pub fn new(db_client: Arc<dyn Store>, change_feed: ChangeFeed) -> Self {
        Self { db_client, change_feed }
    }

    /// Appends to the ledger. Balances are not touched here; callers adjust
    /// credit separately.
    pub async fn record_transaction(
        &self,
        body: RecordTransactionDto,
    ) -> Result<Transaction, ServiceError> {
        let transaction = Transaction::new(
            body.from_agent_id,
            body.to_agent_id,
            body.player_id,
            body.amount,
            body.transaction_type,
        );
        let transaction = self.db_client.save_transaction(transaction).await?;

        tracing::info!(
            transaction_id = %transaction.id,
            kind = ?transaction.transaction_type,
            amount = transaction.amount,
            "transaction recorded"
        );
        self.change_feed
            .publish(ChangeEvent::insert(Collection::Transactions, transaction.id))
            .await;

        Ok(transaction)
    }

    pub async fn retrieve_transactions(
        &self,
        user_id: Uuid,
        user_type: UserType,
    ) -> Result<Vec<Transaction>, ServiceError> {
        let transactions = match user_type {
            UserType::Agent => self.db_client.get_agent_transactions(user_id).await?,
            UserType::Player => self.db_client.get_player_transactions(user_id).await?,
        };

        Ok(transactions)
    }
}
