pub mod agent;
pub mod gameplay;
pub mod player;
pub mod referral;
pub mod repairs;
pub mod subscribe;
pub mod transaction;
pub mod users;
