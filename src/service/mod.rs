pub mod agent_service;
pub mod change_feed;
pub mod error;
pub mod player_service;
pub mod referral;
pub mod referral_service;
pub mod transaction_service;
