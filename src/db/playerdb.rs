// db/playerdb.rs
use async_trait::async_trait;
use sqlx::{types::Json, Error};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::playermodel::{PerkKey, Player, UnlockedPerks};

#[async_trait]
pub trait PlayerExt: Send + Sync {
    async fn save_player(&self, player: Player) -> Result<Player, Error>;

    async fn get_player(&self, player_id: Uuid) -> Result<Option<Player>, Error>;

    async fn get_players_by_agent(&self, agent_id: Uuid) -> Result<Vec<Player>, Error>;

    async fn update_player_details(
        &self,
        player_id: Uuid,
        agent_id: Option<Uuid>,
        referral_link: Option<String>,
    ) -> Result<Option<Player>, Error>;

    async fn adjust_player_credit(
        &self,
        player_id: Uuid,
        credit_adjustment: f64,
    ) -> Result<Option<Player>, Error>;

    async fn adjust_commission_wallet(
        &self,
        player_id: Uuid,
        commission_amount: f64,
    ) -> Result<Option<Player>, Error>;

    async fn unlock_player_perk(
        &self,
        player_id: Uuid,
        perk: PerkKey,
    ) -> Result<Option<Player>, Error>;

    async fn set_free_credit_expiry(
        &self,
        player_id: Uuid,
        expiry_timestamp: i64,
    ) -> Result<Option<Player>, Error>;
}

#[async_trait]
impl PlayerExt for DBClient {
    async fn save_player(&self, player: Player) -> Result<Player, Error> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO players (
                id, agent_id, referral_link, wallet_balance, commission_wallet_balance,
                free_credit_expiry, unlocked_perks, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(player.id)
        .bind(player.agent_id)
        .bind(&player.referral_link)
        .bind(player.wallet_balance)
        .bind(player.commission_wallet_balance)
        .bind(player.free_credit_expiry)
        .bind(Json(player.unlocked_perks))
        .bind(player.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(player)
    }

    async fn get_player(&self, player_id: Uuid) -> Result<Option<Player>, Error> {
        sqlx::query_as::<_, Player>("SELECT * FROM players WHERE id = $1")
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_players_by_agent(&self, agent_id: Uuid) -> Result<Vec<Player>, Error> {
        sqlx::query_as::<_, Player>(
            "SELECT * FROM players WHERE agent_id = $1 ORDER BY created_at",
        )
        .bind(agent_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_player_details(
        &self,
        player_id: Uuid,
        agent_id: Option<Uuid>,
        referral_link: Option<String>,
    ) -> Result<Option<Player>, Error> {
        sqlx::query_as::<_, Player>(
            r#"
            UPDATE players
            SET agent_id = COALESCE($2, agent_id),
                referral_link = COALESCE($3, referral_link)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(player_id)
        .bind(agent_id)
        .bind(referral_link)
        .fetch_optional(&self.pool)
        .await
    }

    async fn adjust_player_credit(
        &self,
        player_id: Uuid,
        credit_adjustment: f64,
    ) -> Result<Option<Player>, Error> {
        sqlx::query_as::<_, Player>(
            r#"
            UPDATE players
            SET wallet_balance = wallet_balance + $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(player_id)
        .bind(credit_adjustment)
        .fetch_optional(&self.pool)
        .await
    }

    async fn adjust_commission_wallet(
        &self,
        player_id: Uuid,
        commission_amount: f64,
    ) -> Result<Option<Player>, Error> {
        sqlx::query_as::<_, Player>(
            r#"
            UPDATE players
            SET commission_wallet_balance = commission_wallet_balance + $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(player_id)
        .bind(commission_amount)
        .fetch_optional(&self.pool)
        .await
    }

    async fn unlock_player_perk(
        &self,
        player_id: Uuid,
        perk: PerkKey,
    ) -> Result<Option<Player>, Error> {
        let mut tx = self.pool.begin().await?;

        let perks = sqlx::query_scalar::<_, Json<UnlockedPerks>>(
            "SELECT unlocked_perks FROM players WHERE id = $1 FOR UPDATE",
        )
        .bind(player_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(Json(mut perks)) = perks else {
            return Ok(None);
        };
        perks.unlock(perk);

        let player = sqlx::query_as::<_, Player>(
            "UPDATE players SET unlocked_perks = $2 WHERE id = $1 RETURNING *",
        )
        .bind(player_id)
        .bind(Json(perks))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(player))
    }

    async fn set_free_credit_expiry(
        &self,
        player_id: Uuid,
        expiry_timestamp: i64,
    ) -> Result<Option<Player>, Error> {
        sqlx::query_as::<_, Player>(
            "UPDATE players SET free_credit_expiry = $2 WHERE id = $1 RETURNING *",
        )
        .bind(player_id)
        .bind(expiry_timestamp)
        .fetch_optional(&self.pool)
        .await
    }
}
