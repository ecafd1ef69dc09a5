// service/agent_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{agentdb::AgentExt, db::Store, playerdb::PlayerExt},
    dtos::agentdtos::{CreateAgentDto, UpdateAgentDetailsDto},
    models::{
        agentmodel::{Agent, CmsContent, CommissionSettings},
        playermodel::Player,
    },
    service::{
        change_feed::{ChangeEvent, ChangeFeed, Collection},
        error::ServiceError,
    },
    utils::password,
};

#[derive(Debug, Clone)]
pub struct AgentService {
    db_client: Arc<dyn Store>,
    change_feed: ChangeFeed,
}

impl AgentService {
    pub fn new(db_client: Arc<dyn Store>, change_feed: ChangeFeed) -> Self {
        Self { db_client, change_feed }
    }

    /// Inserts an agent with zero credit, the default 10% uncapped commission
    /// and empty branding. Subdomain and username are not checked for reuse.
    pub async fn create_agent(&self, body: CreateAgentDto) -> Result<Agent, ServiceError> {
        let password_hash = password::hash(body.password)?;

        let agent = Agent::new(
            body.name,
            body.subdomain,
            body.username,
            password_hash,
            body.parent_agent_id,
        );
        let agent = self.db_client.save_agent(agent).await?;

        tracing::info!(agent_id = %agent.id, subdomain = %agent.subdomain, "agent created");
        self.change_feed.publish(ChangeEvent::insert(Collection::Agents, agent.id)).await;

        Ok(agent)
    }

    pub async fn get_agent(&self, agent_id: Uuid) -> Result<Agent, ServiceError> {
        self.db_client
            .get_agent(agent_id)
            .await?
            .ok_or(ServiceError::AgentNotFound(agent_id))
    }

    pub async fn list_sub_agents(&self, agent_id: Uuid) -> Result<Vec<Agent>, ServiceError> {
        Ok(self.db_client.get_sub_agents(agent_id).await?)
    }

    pub async fn list_players(&self, agent_id: Uuid) -> Result<Vec<Player>, ServiceError> {
        Ok(self.db_client.get_players_by_agent(agent_id).await?)
    }

    pub async fn update_agent_details(
        &self,
        agent_id: Uuid,
        body: UpdateAgentDetailsDto,
    ) -> Result<Agent, ServiceError> {
        let agent = self
            .db_client
            .update_agent_details(agent_id, body.name, body.subdomain, body.parent_agent_id)
            .await?
            .ok_or(ServiceError::AgentNotFound(agent_id))?;

        self.published(agent).await
    }

    /// Adds a signed amount to the credit balance. There is no floor.
    pub async fn adjust_agent_credit(
        &self,
        agent_id: Uuid,
        credit_adjustment: f64,
    ) -> Result<Agent, ServiceError> {
        let agent = self
            .db_client
            .adjust_agent_credit(agent_id, credit_adjustment)
            .await?
            .ok_or(ServiceError::AgentNotFound(agent_id))?;

        tracing::info!(
            agent_id = %agent_id,
            adjustment = credit_adjustment,
            balance = agent.credit_balance,
            "agent credit adjusted"
        );

        self.published(agent).await
    }

    pub async fn set_commission_settings(
        &self,
        agent_id: Uuid,
        commission_settings: CommissionSettings,
    ) -> Result<Agent, ServiceError> {
        let agent = self
            .db_client
            .set_commission_settings(agent_id, commission_settings)
            .await?
            .ok_or(ServiceError::AgentNotFound(agent_id))?;

        self.published(agent).await
    }

    pub async fn update_cms_content(
        &self,
        agent_id: Uuid,
        cms_content: CmsContent,
    ) -> Result<Agent, ServiceError> {
        let agent = self
            .db_client
            .update_cms_content(agent_id, cms_content.sanitized())
            .await?
            .ok_or(ServiceError::AgentNotFound(agent_id))?;

        self.published(agent).await
    }

    async fn published(&self, agent: Agent) -> Result<Agent, ServiceError> {
        self.change_feed.publish(ChangeEvent::patch(Collection::Agents, agent.id)).await;
        Ok(agent)
    }
}
