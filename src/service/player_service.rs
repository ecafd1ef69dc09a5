// service/player_service.rs
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{db::Store, gameplaydb::GameplayExt, playerdb::PlayerExt},
    dtos::playerdtos::{RecordGameplayReportDto, RegisterPlayerDto, UpdatePlayerDetailsDto},
    models::playermodel::{GameplayReport, PerkKey, Player},
    service::{
        change_feed::{ChangeEvent, ChangeFeed, Collection},
        error::ServiceError,
    },
};

#[derive(Debug, Clone)]
pub struct PlayerService {
    db_client: Arc<dyn Store>,
    change_feed: ChangeFeed,
}

impl PlayerService {
    pub fn new(db_client: Arc<dyn Store>, change_feed: ChangeFeed) -> Self {
        Self { db_client, change_feed }
    }

    pub async fn register_player(&self, body: RegisterPlayerDto) -> Result<Player, ServiceError> {
        let player = self
            .db_client
            .save_player(Player::new(body.agent_id, body.referral_link))
            .await?;

        tracing::info!(player_id = %player.id, agent_id = %player.agent_id, "player registered");
        self.change_feed.publish(ChangeEvent::insert(Collection::Players, player.id)).await;

        Ok(player)
    }

    pub async fn get_player(&self, player_id: Uuid) -> Result<Player, ServiceError> {
        self.db_client
            .get_player(player_id)
            .await?
            .ok_or(ServiceError::PlayerNotFound(player_id))
    }

    pub async fn update_player_details(
        &self,
        player_id: Uuid,
        body: UpdatePlayerDetailsDto,
    ) -> Result<Player, ServiceError> {
        let player = self
            .db_client
            .update_player_details(player_id, body.agent_id, body.referral_link)
            .await?
            .ok_or(ServiceError::PlayerNotFound(player_id))?;

        self.published(player).await
    }

    pub async fn adjust_player_credit(
        &self,
        player_id: Uuid,
        credit_adjustment: f64,
    ) -> Result<Player, ServiceError> {
        let player = self
            .db_client
            .adjust_player_credit(player_id, credit_adjustment)
            .await?
            .ok_or(ServiceError::PlayerNotFound(player_id))?;

        tracing::info!(
            player_id = %player_id,
            adjustment = credit_adjustment,
            balance = player.wallet_balance,
            "player credit adjusted"
        );

        self.published(player).await
    }

    pub async fn update_commission_wallet(
        &self,
        player_id: Uuid,
        commission_amount: f64,
    ) -> Result<Player, ServiceError> {
        let player = self
            .db_client
            .adjust_commission_wallet(player_id, commission_amount)
            .await?
            .ok_or(ServiceError::PlayerNotFound(player_id))?;

        self.published(player).await
    }

    /// Sets a single perk flag. Unknown keys fail validation before the
    /// store is touched.
    pub async fn unlock_player_perk(
        &self,
        player_id: Uuid,
        perk_key: &str,
    ) -> Result<Player, ServiceError> {
        let perk: PerkKey = perk_key.parse()?;

        let player = self
            .db_client
            .unlock_player_perk(player_id, perk)
            .await?
            .ok_or(ServiceError::PlayerNotFound(player_id))?;

        tracing::info!(player_id = %player_id, perk = perk.as_str(), "perk unlocked");

        self.published(player).await
    }

    pub async fn extend_free_credit_expiry(
        &self,
        player_id: Uuid,
        new_expiry_timestamp: i64,
    ) -> Result<Player, ServiceError> {
        let current = self.get_player(player_id).await?;

        if new_expiry_timestamp < current.free_credit_expiry {
            tracing::warn!(
                player_id = %player_id,
                current = current.free_credit_expiry,
                requested = new_expiry_timestamp,
                "free credit expiry moved earlier"
            );
        }

        let player = self
            .db_client
            .set_free_credit_expiry(player_id, new_expiry_timestamp)
            .await?
            .ok_or(ServiceError::PlayerNotFound(player_id))?;

        self.published(player).await
    }

    pub async fn record_gameplay_report(
        &self,
        body: RecordGameplayReportDto,
    ) -> Result<GameplayReport, ServiceError> {
        let report = GameplayReport {
            id: Uuid::new_v4(),
            player_id: body.player_id,
            game_name: body.game_name,
            win_loss_amount: body.win_loss_amount,
            timestamp: body.timestamp.unwrap_or_else(|| Utc::now().timestamp_millis()),
        };
        let report = self.db_client.save_gameplay_report(report).await?;

        self.change_feed
            .publish(ChangeEvent::insert(Collection::GameplayReports, report.id))
            .await;

        Ok(report)
    }

    pub async fn gameplay_reports(&self, player_id: Uuid) -> Result<Vec<GameplayReport>, ServiceError> {
        Ok(self.db_client.get_gameplay_reports(player_id).await?)
    }

    async fn published(&self, player: Player) -> Result<Player, ServiceError> {
        self.change_feed.publish(ChangeEvent::patch(Collection::Players, player.id)).await;
        Ok(player)
    }
}
