// service/referral_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{db::Store, playerdb::PlayerExt, referraldb::ReferralExt},
    models::{
        playermodel::Player,
        referralmodel::{DepositRecord, Referral},
    },
    service::{
        change_feed::{ChangeEvent, ChangeFeed, Collection},
        error::ServiceError,
        referral::{generate_referral_code, generate_referral_link},
    },
};

#[derive(Debug, Clone)]
pub struct ReferralService {
    db_client: Arc<dyn Store>,
    change_feed: ChangeFeed,
    app_url: String,
}

impl ReferralService {
    pub fn new(db_client: Arc<dyn Store>, change_feed: ChangeFeed, app_url: String) -> Self {
        Self { db_client, change_feed, app_url }
    }

    /// Sets the player's referral link, generating `{app_url}/register?ref=CODE`
    /// when none is supplied.
    pub async fn create_referral_link(
        &self,
        player_id: Uuid,
        referral_link: Option<String>,
    ) -> Result<Player, ServiceError> {
        let referral_link = referral_link
            .unwrap_or_else(|| generate_referral_link(&self.app_url, &generate_referral_code()));

        let player = self
            .db_client
            .update_player_details(player_id, None, Some(referral_link))
            .await?
            .ok_or(ServiceError::PlayerNotFound(player_id))?;

        tracing::info!(player_id = %player_id, link = %player.referral_link, "referral link set");
        self.change_feed.publish(ChangeEvent::patch(Collection::Players, player.id)).await;

        Ok(player)
    }

    /// Duplicate referrer/referee pairs are accepted.
    pub async fn record_referral(
        &self,
        referrer_id: Uuid,
        referee_id: Uuid,
    ) -> Result<Referral, ServiceError> {
        let referral = self
            .db_client
            .save_referral(Referral::new(referrer_id, referee_id))
            .await?;

        tracing::info!(referral_id = %referral.id, referrer = %referrer_id, referee = %referee_id, "referral recorded");
        self.change_feed.publish(ChangeEvent::insert(Collection::Referrals, referral.id)).await;

        Ok(referral)
    }

    pub async fn update_referral_commission(
        &self,
        referral_id: Uuid,
        record: DepositRecord,
    ) -> Result<Referral, ServiceError> {
        if record.deposit_amount < 0.0 || record.commission_earned < 0.0 {
            return Err(ServiceError::Validation(
                "Deposit amount and commission must be non-negative".to_string(),
            ));
        }

        let referral = self
            .db_client
            .append_referral_deposit(referral_id, record)
            .await?
            .ok_or(ServiceError::ReferralNotFound(referral_id))?;

        self.change_feed.publish(ChangeEvent::patch(Collection::Referrals, referral.id)).await;

        Ok(referral)
    }

    pub async fn retrieve_referral_data(&self, player_id: Uuid) -> Result<Vec<Referral>, ServiceError> {
        Ok(self.db_client.get_referrals_by_referrer(player_id).await?)
    }
}
