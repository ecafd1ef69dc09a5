pub mod agentmodel;
pub mod playermodel;
pub mod referralmodel;
pub mod repairmodel;
pub mod transactionmodel;
pub mod usermodel;
