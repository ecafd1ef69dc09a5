// models/repairmodel.rs
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ErrorMessage;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "repair_status", rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum RepairStatus {
    New,
    InProgress,
    ReadyForPickup,
    Completed,
}

impl RepairStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepairStatus::New => "new",
            RepairStatus::InProgress => "inProgress",
            RepairStatus::ReadyForPickup => "readyForPickup",
            RepairStatus::Completed => "completed",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RepairStatus::New => "New",
            RepairStatus::InProgress => "In Progress",
            RepairStatus::ReadyForPickup => "Ready for Pickup",
            RepairStatus::Completed => "Completed",
        }
    }

    /// The only transition a dashboard row offers. Completed repairs are final.
    pub fn next(&self) -> Option<RepairStatus> {
        match self {
            RepairStatus::New => Some(RepairStatus::InProgress),
            RepairStatus::InProgress => Some(RepairStatus::ReadyForPickup),
            RepairStatus::ReadyForPickup => Some(RepairStatus::Completed),
            RepairStatus::Completed => None,
        }
    }

    pub fn action_label(&self) -> Option<&'static str> {
        match self {
            RepairStatus::New => Some("Move to In Progress"),
            RepairStatus::InProgress => Some("Set Ready for Pickup"),
            RepairStatus::ReadyForPickup => Some("Mark as Completed"),
            RepairStatus::Completed => None,
        }
    }
}

impl FromStr for RepairStatus {
    type Err = ErrorMessage;

    fn from_str(status: &str) -> Result<Self, Self::Err> {
        match status {
            "new" => Ok(RepairStatus::New),
            "inProgress" => Ok(RepairStatus::InProgress),
            "readyForPickup" => Ok(RepairStatus::ReadyForPickup),
            "completed" => Ok(RepairStatus::Completed),
            other => Err(ErrorMessage::UnknownRepairStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Repair {
    pub id: Uuid,
    pub status: RepairStatus,
    pub customer_name: String,
    pub customer_email: String,
    pub created_at: DateTime<Utc>,
}
