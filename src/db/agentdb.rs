// db/agentdb.rs
use async_trait::async_trait;
use sqlx::{types::Json, Error};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::agentmodel::{Agent, CmsContent, CommissionSettings};

#[async_trait]
pub trait AgentExt: Send + Sync {
    async fn save_agent(&self, agent: Agent) -> Result<Agent, Error>;

    async fn get_agent(&self, agent_id: Uuid) -> Result<Option<Agent>, Error>;

    async fn get_sub_agents(&self, parent_agent_id: Uuid) -> Result<Vec<Agent>, Error>;

    /// Patches only the provided fields. `None` when the agent does not exist.
    async fn update_agent_details(
        &self,
        agent_id: Uuid,
        name: Option<String>,
        subdomain: Option<String>,
        parent_agent_id: Option<Uuid>,
    ) -> Result<Option<Agent>, Error>;

    async fn adjust_agent_credit(
        &self,
        agent_id: Uuid,
        credit_adjustment: f64,
    ) -> Result<Option<Agent>, Error>;

    async fn set_commission_settings(
        &self,
        agent_id: Uuid,
        commission_settings: CommissionSettings,
    ) -> Result<Option<Agent>, Error>;

    async fn update_cms_content(
        &self,
        agent_id: Uuid,
        cms_content: CmsContent,
    ) -> Result<Option<Agent>, Error>;
}

#[async_trait]
impl AgentExt for DBClient {
    async fn save_agent(&self, agent: Agent) -> Result<Agent, Error> {
        let agent = sqlx::query_as::<_, Agent>(
            r#"
            INSERT INTO agents (
                id, name, subdomain, username, password_hash, credit_balance,
                commission_settings, cms_content, parent_agent_id, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(agent.id)
        .bind(&agent.name)
        .bind(&agent.subdomain)
        .bind(&agent.username)
        .bind(&agent.password_hash)
        .bind(agent.credit_balance)
        .bind(Json(&agent.commission_settings))
        .bind(Json(&agent.cms_content))
        .bind(agent.parent_agent_id)
        .bind(agent.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(agent)
    }

    async fn get_agent(&self, agent_id: Uuid) -> Result<Option<Agent>, Error> {
        sqlx::query_as::<_, Agent>("SELECT * FROM agents WHERE id = $1")
            .bind(agent_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_sub_agents(&self, parent_agent_id: Uuid) -> Result<Vec<Agent>, Error> {
        sqlx::query_as::<_, Agent>(
            "SELECT * FROM agents WHERE parent_agent_id = $1 ORDER BY created_at",
        )
        .bind(parent_agent_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_agent_details(
        &self,
        agent_id: Uuid,
        name: Option<String>,
        subdomain: Option<String>,
        parent_agent_id: Option<Uuid>,
    ) -> Result<Option<Agent>, Error> {
        sqlx::query_as::<_, Agent>(
            r#"
            UPDATE agents
            SET name = COALESCE($2, name),
                subdomain = COALESCE($3, subdomain),
                parent_agent_id = COALESCE($4, parent_agent_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(agent_id)
        .bind(name)
        .bind(subdomain)
        .bind(parent_agent_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn adjust_agent_credit(
        &self,
        agent_id: Uuid,
        credit_adjustment: f64,
    ) -> Result<Option<Agent>, Error> {
        sqlx::query_as::<_, Agent>(
            r#"
            UPDATE agents
            SET credit_balance = credit_balance + $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(agent_id)
        .bind(credit_adjustment)
        .fetch_optional(&self.pool)
        .await
    }

    async fn set_commission_settings(
        &self,
        agent_id: Uuid,
        commission_settings: CommissionSettings,
    ) -> Result<Option<Agent>, Error> {
        sqlx::query_as::<_, Agent>(
            "UPDATE agents SET commission_settings = $2 WHERE id = $1 RETURNING *",
        )
        .bind(agent_id)
        .bind(Json(commission_settings))
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_cms_content(
        &self,
        agent_id: Uuid,
        cms_content: CmsContent,
    ) -> Result<Option<Agent>, Error> {
        sqlx::query_as::<_, Agent>("UPDATE agents SET cms_content = $2 WHERE id = $1 RETURNING *")
            .bind(agent_id)
            .bind(Json(cms_content))
            .fetch_optional(&self.pool)
            .await
    }
}
