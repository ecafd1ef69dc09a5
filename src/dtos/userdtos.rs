use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreUserDto {
    #[validate(length(min = 1, message = "User id is required"))]
    pub user_id: String,

    #[validate(length(min = 1, message = "Token identifier cannot be empty"))]
    pub token_identifier: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Role must be between 1-64 characters"))]
    pub role: String,
}
