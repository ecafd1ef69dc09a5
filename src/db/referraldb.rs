// db/referraldb.rs
use async_trait::async_trait;
use sqlx::{types::Json, Error};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::referralmodel::{DepositRecord, Referral};

#[async_trait]
pub trait ReferralExt: Send + Sync {
    async fn save_referral(&self, referral: Referral) -> Result<Referral, Error>;

    /// Appends `record` to the referral's deposits and adds its commission to
    /// the running total. `None` when the referral does not exist.
    async fn append_referral_deposit(
        &self,
        referral_id: Uuid,
        record: DepositRecord,
    ) -> Result<Option<Referral>, Error>;

    async fn get_referrals_by_referrer(&self, referrer_id: Uuid) -> Result<Vec<Referral>, Error>;
}

#[async_trait]
impl ReferralExt for DBClient {
    async fn save_referral(&self, referral: Referral) -> Result<Referral, Error> {
        let referral = sqlx::query_as::<_, Referral>(
            r#"
            INSERT INTO referrals (id, referrer_id, referee_id, deposits, total_commission_earned, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(referral.id)
        .bind(referral.referrer_id)
        .bind(referral.referee_id)
        .bind(Json(&referral.deposits))
        .bind(referral.total_commission_earned)
        .bind(referral.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(referral)
    }

    async fn append_referral_deposit(
        &self,
        referral_id: Uuid,
        record: DepositRecord,
    ) -> Result<Option<Referral>, Error> {
        let mut tx = self.pool.begin().await?;

        let referral = sqlx::query_as::<_, Referral>(
            "SELECT * FROM referrals WHERE id = $1 FOR UPDATE",
        )
        .bind(referral_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut referral) = referral else {
            return Ok(None);
        };
        referral.record_deposit(record);

        let referral = sqlx::query_as::<_, Referral>(
            r#"
            UPDATE referrals
            SET deposits = $2, total_commission_earned = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(referral_id)
        .bind(Json(&referral.deposits))
        .bind(referral.total_commission_earned)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(referral))
    }

    async fn get_referrals_by_referrer(&self, referrer_id: Uuid) -> Result<Vec<Referral>, Error> {
        sqlx::query_as::<_, Referral>("SELECT * FROM referrals WHERE referrer_id = $1")
            .bind(referrer_id)
            .fetch_all(&self.pool)
            .await
    }
}
