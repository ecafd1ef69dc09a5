use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::transactionmodel::{TransactionType, UserType};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordTransactionDto {
    pub from_agent_id: Option<Uuid>,
    pub to_agent_id: Option<Uuid>,
    pub player_id: Option<Uuid>,
    pub amount: f64,
    pub transaction_type: TransactionType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveTransactionsQueryDto {
    pub user_id: Uuid,
    pub user_type: UserType,
}
