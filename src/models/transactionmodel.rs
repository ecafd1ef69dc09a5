// models/transactionmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "transaction_type", rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    AgentToSubagent,
    AgentToPlayer,
    PlayerWithdrawal,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Agent,
    Player,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub from_agent_id: Option<Uuid>,
    pub to_agent_id: Option<Uuid>,
    pub player_id: Option<Uuid>,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        from_agent_id: Option<Uuid>,
        to_agent_id: Option<Uuid>,
        player_id: Option<Uuid>,
        amount: f64,
        transaction_type: TransactionType,
    ) -> Self {
        Transaction {
            id: Uuid::new_v4(),
            from_agent_id,
            to_agent_id,
            player_id,
            amount,
            transaction_type,
            created_at: Utc::now(),
        }
    }
}
