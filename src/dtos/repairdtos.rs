use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::repairmodel::{Repair, RepairStatus};

/// `LLL dd, yyyy hh:mm a`, e.g. "Mar 05, 2024 02:30 PM".
const ROW_DATE_FORMAT: &str = "%b %d, %Y %I:%M %p";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairActionDto {
    pub label: String,
    pub next_status: RepairStatus,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairRowDto {
    pub repair_id: Uuid,
    pub name: String,
    pub email: String,
    pub date: String,
    pub action: Option<RepairActionDto>,
}

impl RepairRowDto {
    pub fn from_repair(repair: &Repair, status: RepairStatus) -> Self {
        let action = match (status.action_label(), status.next()) {
            (Some(label), Some(next_status)) => Some(RepairActionDto {
                label: label.to_string(),
                next_status,
            }),
            _ => None,
        };

        RepairRowDto {
            repair_id: repair.id,
            name: repair.customer_name.to_owned(),
            email: repair.customer_email.to_owned(),
            date: repair.created_at.format(ROW_DATE_FORMAT).to_string(),
            action,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairDashboardDto {
    pub title: String,
    pub status: RepairStatus,
    /// Set when there is nothing to list.
    pub empty_message: Option<String>,
    pub rows: Vec<RepairRowDto>,
}

impl RepairDashboardDto {
    pub fn build(status: RepairStatus, repairs: &[Repair]) -> Self {
        let rows: Vec<RepairRowDto> = repairs
            .iter()
            .map(|repair| RepairRowDto::from_repair(repair, status))
            .collect();

        RepairDashboardDto {
            title: status.title().to_string(),
            status,
            empty_message: rows.is_empty().then(|| "No Repairs".to_string()),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn repair(status: RepairStatus) -> Repair {
        Repair {
            id: Uuid::new_v4(),
            status,
            customer_name: "Ada".to_string(),
            customer_email: "ada@example.com".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap(),
        }
    }

    #[test]
    fn rows_carry_the_forward_action_for_their_status() {
        let repairs = vec![repair(RepairStatus::InProgress)];
        let dashboard = RepairDashboardDto::build(RepairStatus::InProgress, &repairs);

        assert_eq!(dashboard.title, "In Progress");
        assert_eq!(dashboard.empty_message, None);

        let row = &dashboard.rows[0];
        assert_eq!(row.date, "Mar 05, 2024 02:30 PM");
        let action = row.action.as_ref().unwrap();
        assert_eq!(action.label, "Set Ready for Pickup");
        assert_eq!(action.next_status, RepairStatus::ReadyForPickup);
    }

    #[test]
    fn completed_rows_have_no_action() {
        let repairs = vec![repair(RepairStatus::Completed)];
        let dashboard = RepairDashboardDto::build(RepairStatus::Completed, &repairs);
        assert!(dashboard.rows[0].action.is_none());
    }

    #[test]
    fn empty_list_reports_no_repairs() {
        let dashboard = RepairDashboardDto::build(RepairStatus::New, &[]);
        assert_eq!(dashboard.title, "New");
        assert_eq!(dashboard.empty_message.as_deref(), Some("No Repairs"));
    }
}
