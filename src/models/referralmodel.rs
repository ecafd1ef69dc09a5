use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepositRecord {
    pub deposit_amount: f64,
    pub commission_earned: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    pub id: Uuid,
    pub referrer_id: Uuid,
    pub referee_id: Uuid,
    /// Insertion ordered; never rewritten.
    #[sqlx(json)]
    pub deposits: Vec<DepositRecord>,
    pub total_commission_earned: f64,
    pub created_at: DateTime<Utc>,
}

impl Referral {
    pub fn new(referrer_id: Uuid, referee_id: Uuid) -> Self {
        Referral {
            id: Uuid::new_v4(),
            referrer_id,
            referee_id,
            deposits: Vec::new(),
            total_commission_earned: 0.0,
            created_at: Utc::now(),
        }
    }

    pub fn record_deposit(&mut self, record: DepositRecord) {
        self.deposits.push(record);
        self.total_commission_earned += record.commission_earned;
    }
}
