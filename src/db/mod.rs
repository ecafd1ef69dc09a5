pub mod agentdb;
pub mod db;
pub mod gameplaydb;
#[cfg(test)]
pub mod memory;
pub mod playerdb;
pub mod referraldb;
pub mod repairdb;
pub mod transactiondb;
pub mod userdb;
