use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::referralmodel::DepositRecord;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReferralLinkDto {
    /// Generated from `APP_URL` and a random code when omitted.
    #[validate(length(min = 1, message = "Referral link cannot be empty"))]
    pub referral_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordReferralDto {
    pub referrer_id: Uuid,
    pub referee_id: Uuid,
}

#[derive(Validate, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRecordDto {
    #[validate(range(min = 0.0, message = "Deposit amount cannot be negative"))]
    pub deposit_amount: f64,
    #[validate(range(min = 0.0, message = "Commission earned cannot be negative"))]
    pub commission_earned: f64,
}

impl From<DepositRecordDto> for DepositRecord {
    fn from(dto: DepositRecordDto) -> Self {
        DepositRecord {
            deposit_amount: dto.deposit_amount,
            commission_earned: dto.commission_earned,
        }
    }
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReferralCommissionDto {
    #[validate]
    pub deposit_record: DepositRecordDto,
}
