use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::agentmodel::{CmsContent, CommissionSettings};

fn subdomain_regex() -> &'static Regex {
    static SUBDOMAIN: OnceLock<Regex> = OnceLock::new();
    SUBDOMAIN.get_or_init(|| {
        Regex::new(r"^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$").expect("subdomain pattern is valid")
    })
}

pub fn validate_subdomain(subdomain: &str) -> Result<(), ValidationError> {
    if !subdomain_regex().is_match(subdomain) {
        let mut error = ValidationError::new("invalid_subdomain");
        error.message = Some(Cow::from(
            "Subdomain may only contain lowercase letters, digits and inner hyphens",
        ));
        return Err(error);
    }
    Ok(())
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, max = 63, message = "Subdomain must be between 1-63 characters"),
        custom = "validate_subdomain"
    )]
    pub subdomain: String,

    pub parent_agent_id: Option<Uuid>,

    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 6, max = 64, message = "Password must be between 6-64 characters"))]
    pub password: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgentDetailsDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    #[validate(
        length(min = 1, max = 63, message = "Subdomain must be between 1-63 characters"),
        custom = "validate_subdomain"
    )]
    pub subdomain: Option<String>,

    pub parent_agent_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustCreditDto {
    /// Signed; negative values deduct and may drive the balance below zero.
    pub credit_adjustment: f64,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCommissionSettingsDto {
    #[validate]
    pub commission_settings: CommissionSettings,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCmsContentDto {
    #[validate]
    pub cms_content: CmsContent,
}
