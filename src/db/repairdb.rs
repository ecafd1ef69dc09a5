// db/repairdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::repairmodel::{Repair, RepairStatus};

/// Read/advance access to repairs owned by the repair subsystem.
#[async_trait]
pub trait RepairExt: Send + Sync {
    async fn get_repair(&self, repair_id: Uuid) -> Result<Option<Repair>, Error>;

    async fn get_repairs(&self, status: RepairStatus) -> Result<Vec<Repair>, Error>;

    async fn set_repair_status(
        &self,
        repair_id: Uuid,
        status: RepairStatus,
    ) -> Result<Option<Repair>, Error>;
}

#[async_trait]
impl RepairExt for DBClient {
    async fn get_repair(&self, repair_id: Uuid) -> Result<Option<Repair>, Error> {
        sqlx::query_as::<_, Repair>("SELECT * FROM repairs WHERE id = $1")
            .bind(repair_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_repairs(&self, status: RepairStatus) -> Result<Vec<Repair>, Error> {
        sqlx::query_as::<_, Repair>(
            "SELECT * FROM repairs WHERE status = $1 ORDER BY created_at",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
    }

    async fn set_repair_status(
        &self,
        repair_id: Uuid,
        status: RepairStatus,
    ) -> Result<Option<Repair>, Error> {
        sqlx::query_as::<_, Repair>("UPDATE repairs SET status = $2 WHERE id = $1 RETURNING *")
            .bind(repair_id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await
    }
}
