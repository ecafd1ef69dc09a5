pub mod agentdtos;
pub mod apiresponse;
pub mod playerdtos;
pub mod referraldtos;
pub mod repairdtos;
pub mod transactiondtos;
pub mod userdtos;
