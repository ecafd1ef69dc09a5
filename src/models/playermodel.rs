// models/playermodel.rs
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ErrorMessage;

/// One-time perks a player can unlock.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PerkKey {
    ReferredTwoFriends,
    WatchedWelcomeVideo,
}

impl PerkKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerkKey::ReferredTwoFriends => "referredTwoFriends",
            PerkKey::WatchedWelcomeVideo => "watchedWelcomeVideo",
        }
    }
}

impl FromStr for PerkKey {
    type Err = ErrorMessage;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "referredTwoFriends" => Ok(PerkKey::ReferredTwoFriends),
            "watchedWelcomeVideo" => Ok(PerkKey::WatchedWelcomeVideo),
            other => Err(ErrorMessage::UnknownPerk(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedPerks {
    pub referred_two_friends: bool,
    pub watched_welcome_video: bool,
}

impl UnlockedPerks {
    pub fn unlock(&mut self, perk: PerkKey) {
        match perk {
            PerkKey::ReferredTwoFriends => self.referred_two_friends = true,
            PerkKey::WatchedWelcomeVideo => self.watched_welcome_video = true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: Uuid,
    pub agent_id: Uuid,
    pub referral_link: String,
    pub wallet_balance: f64,
    pub commission_wallet_balance: f64,
    /// Milliseconds since the Unix epoch.
    pub free_credit_expiry: i64,
    #[sqlx(json)]
    pub unlocked_perks: UnlockedPerks,
    pub created_at: DateTime<Utc>,
}

impl Player {
    pub fn new(agent_id: Uuid, referral_link: String) -> Self {
        let now = Utc::now();
        Player {
            id: Uuid::new_v4(),
            agent_id,
            referral_link,
            wallet_balance: 0.0,
            commission_wallet_balance: 0.0,
            free_credit_expiry: now.timestamp_millis(),
            unlocked_perks: UnlockedPerks::default(),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GameplayReport {
    pub id: Uuid,
    pub player_id: Uuid,
    pub game_name: String,
    pub win_loss_amount: f64,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_has_empty_balances_and_locked_perks() {
        let player = Player::new(Uuid::new_v4(), "https://play888.test/register?ref=ABC".to_string());

        assert_eq!(player.wallet_balance, 0.0);
        assert_eq!(player.commission_wallet_balance, 0.0);
        assert!(!player.unlocked_perks.referred_two_friends);
        assert!(!player.unlocked_perks.watched_welcome_video);
        assert!(player.free_credit_expiry <= Utc::now().timestamp_millis());
    }

    #[test]
    fn perk_keys_parse_from_wire_names() {
        assert_eq!("referredTwoFriends".parse::<PerkKey>(), Ok(PerkKey::ReferredTwoFriends));
        assert_eq!("watchedWelcomeVideo".parse::<PerkKey>(), Ok(PerkKey::WatchedWelcomeVideo));
        assert_eq!(
            "freeSpins".parse::<PerkKey>(),
            Err(ErrorMessage::UnknownPerk("freeSpins".to_string()))
        );
    }

    #[test]
    fn unlock_only_touches_the_named_perk() {
        let mut perks = UnlockedPerks::default();
        perks.unlock(PerkKey::ReferredTwoFriends);

        assert!(perks.referred_two_friends);
        assert!(!perks.watched_welcome_video);

        let json = serde_json::to_value(perks).unwrap();
        assert_eq!(json, serde_json::json!({
            "referredTwoFriends": true,
            "watchedWelcomeVideo": false
        }));
    }
}
