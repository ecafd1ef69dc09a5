// db/db.rs
use sqlx::{Pool, Postgres};

use super::{
    agentdb::AgentExt, gameplaydb::GameplayExt, playerdb::PlayerExt, referraldb::ReferralExt,
    repairdb::RepairExt, transactiondb::TransactionExt, userdb::UserExt,
};

#[derive(Debug, Clone)]
pub struct DBClient {
    pub pool: Pool<Postgres>,
}

impl DBClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        DBClient { pool }
    }
}

/// Every collection the handlers touch. Implemented by `DBClient` and, in
/// tests, by the in-memory store.
pub trait Store:
    AgentExt + PlayerExt + ReferralExt + TransactionExt + UserExt + GameplayExt + RepairExt + std::fmt::Debug
{
}

impl<T> Store for T where
    T: AgentExt
        + PlayerExt
        + ReferralExt
        + TransactionExt
        + UserExt
        + GameplayExt
        + RepairExt
        + std::fmt::Debug
{
}
