use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPlayerDto {
    pub agent_id: Uuid,
    #[validate(length(min = 1, message = "Referral link is required"))]
    pub referral_link: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlayerDetailsDto {
    pub agent_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Referral link cannot be empty"))]
    pub referral_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionWalletDto {
    pub commission_amount: f64,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockPerkDto {
    #[validate(length(min = 1, message = "Perk key is required"))]
    pub perk_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeCreditExpiryDto {
    /// Milliseconds since the Unix epoch, stored as given.
    pub new_expiry_timestamp: i64,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordGameplayReportDto {
    pub player_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "Game name must be between 1-255 characters"))]
    pub game_name: String,
    pub win_loss_amount: f64,
    /// Defaults to now when omitted.
    pub timestamp: Option<i64>,
}
