use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::users::models::User;

/// Response DTO for user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: String,
    pub username: String,
    pub role: String,
    pub projects: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id.to_hex(),
            username: u.username,
            role: u.role,
            projects: u.projects.iter().map(|id| id.to_hex()).collect(),
            company_id: u.company_id.map(|id| id.to_hex()),
        }
    }
}
