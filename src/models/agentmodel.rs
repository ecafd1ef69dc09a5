// models/agentmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CommissionType {
    #[default]
    Percentage,
    TargetBased,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CommissionRestriction {
    FirstDepositOnly,
    MaxPerPlayer,
    #[default]
    Uncapped,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepositTarget {
    pub deposit_amount: f64,
    pub commission_amount: f64,
}

fn validate_deposit_targets(targets: &[DepositTarget]) -> Result<(), ValidationError> {
    let negative = targets
        .iter()
        .any(|target| target.deposit_amount < 0.0 || target.commission_amount < 0.0);

    if negative {
        let mut error = ValidationError::new("negative_deposit_target");
        error.message = Some("Deposit targets cannot contain negative amounts".into());
        return Err(error);
    }
    Ok(())
}

/// Commission rules an agent applies to referral deposits.
///
/// Only `commission_type` and `commission_restriction` are always present; the
/// remaining fields are interpreted according to them and are not cross-checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommissionSettings {
    #[serde(rename = "type")]
    pub commission_type: CommissionType,
    #[validate(range(min = 0.0, max = 100.0, message = "Percentage must be between 0 and 100"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[validate(custom = "validate_deposit_targets")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_targets: Option<Vec<DepositTarget>>,
    pub commission_restriction: CommissionRestriction,
    #[validate(range(min = 0.0, message = "Max commission per player cannot be negative"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_commission_per_player: Option<f64>,
}

impl Default for CommissionSettings {
    fn default() -> Self {
        CommissionSettings {
            commission_type: CommissionType::Percentage,
            percentage: Some(10.0),
            deposit_targets: Some(Vec::new()),
            commission_restriction: CommissionRestriction::Uncapped,
            max_commission_per_player: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementPopup {
    pub enabled: bool,
    #[validate(length(max = 10000, message = "Announcement content is too long"))]
    pub content: String,
    pub multimedia_urls: Vec<String>,
}

/// White-label branding rendered on an agent's subdomain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CmsContent {
    pub include_brand: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[validate]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_popup: Option<AnnouncementPopup>,
}

impl Default for CmsContent {
    fn default() -> Self {
        CmsContent {
            include_brand: false,
            brand_logo: Some(String::new()),
            company_name: Some(String::new()),
            announcement_popup: Some(AnnouncementPopup::default()),
        }
    }
}

impl CmsContent {
    /// Strips scripts and unsafe attributes from the announcement HTML.
    pub fn sanitized(mut self) -> Self {
        if let Some(popup) = self.announcement_popup.as_mut() {
            popup.content = ammonia::clean(&popup.content);
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    pub subdomain: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub credit_balance: f64,
    #[sqlx(json)]
    pub commission_settings: CommissionSettings,
    #[sqlx(json)]
    pub cms_content: CmsContent,
    pub parent_agent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Agent {
    pub fn new(
        name: String,
        subdomain: String,
        username: String,
        password_hash: String,
        parent_agent_id: Option<Uuid>,
    ) -> Self {
        Agent {
            id: Uuid::new_v4(),
            name,
            subdomain,
            username,
            password_hash,
            credit_balance: 0.0,
            commission_settings: CommissionSettings::default(),
            cms_content: CmsContent::default(),
            parent_agent_id,
            created_at: Utc::now(),
        }
    }
}
