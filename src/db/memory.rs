// db/memory.rs
//! In-memory store used by unit tests in place of Postgres.
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::{
    agentdb::AgentExt, gameplaydb::GameplayExt, playerdb::PlayerExt, referraldb::ReferralExt,
    repairdb::RepairExt, transactiondb::TransactionExt, userdb::UserExt,
};
use crate::models::{
    agentmodel::{Agent, CmsContent, CommissionSettings},
    playermodel::{GameplayReport, PerkKey, Player},
    referralmodel::{DepositRecord, Referral},
    repairmodel::{Repair, RepairStatus},
    transactionmodel::Transaction,
    usermodel::User,
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    agents: Vec<Agent>,
    players: Vec<Player>,
    transactions: Vec<Transaction>,
    referrals: Vec<Referral>,
    gameplay_reports: Vec<GameplayReport>,
    repairs: Vec<Repair>,
}

#[derive(Debug, Default)]
pub struct MemoryDb {
    tables: Mutex<Tables>,
}

impl MemoryDb {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn insert_repair(&self, repair: Repair) {
        self.tables().repairs.push(repair);
    }

    fn patch_agent(&self, agent_id: Uuid, patch: impl FnOnce(&mut Agent)) -> Option<Agent> {
        let mut tables = self.tables();
        let agent = tables.agents.iter_mut().find(|agent| agent.id == agent_id)?;
        patch(agent);
        Some(agent.clone())
    }

    fn patch_player(&self, player_id: Uuid, patch: impl FnOnce(&mut Player)) -> Option<Player> {
        let mut tables = self.tables();
        let player = tables.players.iter_mut().find(|player| player.id == player_id)?;
        patch(player);
        Some(player.clone())
    }
}

#[async_trait]
impl AgentExt for MemoryDb {
    async fn save_agent(&self, agent: Agent) -> Result<Agent, Error> {
        self.tables().agents.push(agent.clone());
        Ok(agent)
    }

    async fn get_agent(&self, agent_id: Uuid) -> Result<Option<Agent>, Error> {
        Ok(self.tables().agents.iter().find(|agent| agent.id == agent_id).cloned())
    }

    async fn get_sub_agents(&self, parent_agent_id: Uuid) -> Result<Vec<Agent>, Error> {
        Ok(self
            .tables()
            .agents
            .iter()
            .filter(|agent| agent.parent_agent_id == Some(parent_agent_id))
            .cloned()
            .collect())
    }

    async fn update_agent_details(
        &self,
        agent_id: Uuid,
        name: Option<String>,
        subdomain: Option<String>,
        parent_agent_id: Option<Uuid>,
    ) -> Result<Option<Agent>, Error> {
        Ok(self.patch_agent(agent_id, |agent| {
            if let Some(name) = name {
                agent.name = name;
            }
            if let Some(subdomain) = subdomain {
                agent.subdomain = subdomain;
            }
            if parent_agent_id.is_some() {
                agent.parent_agent_id = parent_agent_id;
            }
        }))
    }

    async fn adjust_agent_credit(
        &self,
        agent_id: Uuid,
        credit_adjustment: f64,
    ) -> Result<Option<Agent>, Error> {
        Ok(self.patch_agent(agent_id, |agent| agent.credit_balance += credit_adjustment))
    }

    async fn set_commission_settings(
        &self,
        agent_id: Uuid,
        commission_settings: CommissionSettings,
    ) -> Result<Option<Agent>, Error> {
        Ok(self.patch_agent(agent_id, |agent| agent.commission_settings = commission_settings))
    }

    async fn update_cms_content(
        &self,
        agent_id: Uuid,
        cms_content: CmsContent,
    ) -> Result<Option<Agent>, Error> {
        Ok(self.patch_agent(agent_id, |agent| agent.cms_content = cms_content))
    }
}

#[async_trait]
impl PlayerExt for MemoryDb {
    async fn save_player(&self, player: Player) -> Result<Player, Error> {
        self.tables().players.push(player.clone());
        Ok(player)
    }

    async fn get_player(&self, player_id: Uuid) -> Result<Option<Player>, Error> {
        Ok(self.tables().players.iter().find(|player| player.id == player_id).cloned())
    }

    async fn get_players_by_agent(&self, agent_id: Uuid) -> Result<Vec<Player>, Error> {
        Ok(self
            .tables()
            .players
            .iter()
            .filter(|player| player.agent_id == agent_id)
            .cloned()
            .collect())
    }

    async fn update_player_details(
        &self,
        player_id: Uuid,
        agent_id: Option<Uuid>,
        referral_link: Option<String>,
    ) -> Result<Option<Player>, Error> {
        Ok(self.patch_player(player_id, |player| {
            if let Some(agent_id) = agent_id {
                player.agent_id = agent_id;
            }
            if let Some(referral_link) = referral_link {
                player.referral_link = referral_link;
            }
        }))
    }

    async fn adjust_player_credit(
        &self,
        player_id: Uuid,
        credit_adjustment: f64,
    ) -> Result<Option<Player>, Error> {
        Ok(self.patch_player(player_id, |player| player.wallet_balance += credit_adjustment))
    }

    async fn adjust_commission_wallet(
        &self,
        player_id: Uuid,
        commission_amount: f64,
    ) -> Result<Option<Player>, Error> {
        Ok(self.patch_player(player_id, |player| {
            player.commission_wallet_balance += commission_amount
        }))
    }

    async fn unlock_player_perk(
        &self,
        player_id: Uuid,
        perk: PerkKey,
    ) -> Result<Option<Player>, Error> {
        Ok(self.patch_player(player_id, |player| player.unlocked_perks.unlock(perk)))
    }

    async fn set_free_credit_expiry(
        &self,
        player_id: Uuid,
        expiry_timestamp: i64,
    ) -> Result<Option<Player>, Error> {
        Ok(self.patch_player(player_id, |player| player.free_credit_expiry = expiry_timestamp))
    }
}

#[async_trait]
impl ReferralExt for MemoryDb {
    async fn save_referral(&self, referral: Referral) -> Result<Referral, Error> {
        self.tables().referrals.push(referral.clone());
        Ok(referral)
    }

    async fn append_referral_deposit(
        &self,
        referral_id: Uuid,
        record: DepositRecord,
    ) -> Result<Option<Referral>, Error> {
        let mut tables = self.tables();
        let referral = tables.referrals.iter_mut().find(|referral| referral.id == referral_id);
        Ok(referral.map(|referral| {
            referral.record_deposit(record);
            referral.clone()
        }))
    }

    async fn get_referrals_by_referrer(&self, referrer_id: Uuid) -> Result<Vec<Referral>, Error> {
        Ok(self
            .tables()
            .referrals
            .iter()
            .filter(|referral| referral.referrer_id == referrer_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TransactionExt for MemoryDb {
    async fn save_transaction(&self, transaction: Transaction) -> Result<Transaction, Error> {
        self.tables().transactions.push(transaction.clone());
        Ok(transaction)
    }

    async fn get_agent_transactions(&self, agent_id: Uuid) -> Result<Vec<Transaction>, Error> {
        Ok(self
            .tables()
            .transactions
            .iter()
            .filter(|tx| tx.from_agent_id == Some(agent_id) || tx.to_agent_id == Some(agent_id))
            .cloned()
            .collect())
    }

    async fn get_player_transactions(&self, player_id: Uuid) -> Result<Vec<Transaction>, Error> {
        Ok(self
            .tables()
            .transactions
            .iter()
            .filter(|tx| tx.player_id == Some(player_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserExt for MemoryDb {
    async fn save_user(&self, user: User) -> Result<Option<User>, Error> {
        let mut tables = self.tables();
        let taken = user.token_identifier.is_some()
            && tables
                .users
                .iter()
                .any(|existing| existing.token_identifier == user.token_identifier);
        if taken {
            return Ok(None);
        }

        tables.users.push(user.clone());
        Ok(Some(user))
    }

    async fn get_user_by_token(&self, token_identifier: &str) -> Result<Option<User>, Error> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|user| user.token_identifier.as_deref() == Some(token_identifier))
            .cloned())
    }
}

#[async_trait]
impl GameplayExt for MemoryDb {
    async fn save_gameplay_report(&self, report: GameplayReport) -> Result<GameplayReport, Error> {
        self.tables().gameplay_reports.push(report.clone());
        Ok(report)
    }

    async fn get_gameplay_reports(&self, player_id: Uuid) -> Result<Vec<GameplayReport>, Error> {
        let mut reports: Vec<GameplayReport> = self
            .tables()
            .gameplay_reports
            .iter()
            .filter(|report| report.player_id == player_id)
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(reports)
    }
}

#[async_trait]
impl RepairExt for MemoryDb {
    async fn get_repair(&self, repair_id: Uuid) -> Result<Option<Repair>, Error> {
        Ok(self
            .tables()
            .repairs
            .iter()
            .find(|repair| repair.id == repair_id)
            .cloned())
    }

    async fn get_repairs(&self, status: RepairStatus) -> Result<Vec<Repair>, Error> {
        Ok(self
            .tables()
            .repairs
            .iter()
            .filter(|repair| repair.status == status)
            .cloned()
            .collect())
    }

    async fn set_repair_status(
        &self,
        repair_id: Uuid,
        status: RepairStatus,
    ) -> Result<Option<Repair>, Error> {
        let mut tables = self.tables();
        let repair = tables.repairs.iter_mut().find(|repair| repair.id == repair_id);
        Ok(repair.map(|repair| {
            repair.status = status;
            repair.clone()
        }))
    }
}
