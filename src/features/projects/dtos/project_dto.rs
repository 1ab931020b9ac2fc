use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::projects::models::Project;

/// Response DTO for project
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponseDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub status: String,
    pub employees: Vec<String>,
    pub tasks: Vec<String>,
    pub blueprints: Vec<String>,
    /// Ids of the reports filed under this project
    pub reports: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
}

impl From<Project> for ProjectResponseDto {
    fn from(p: Project) -> Self {
        let hex = |ids: Vec<mongodb::bson::oid::ObjectId>| -> Vec<String> {
            ids.iter().map(|id| id.to_hex()).collect()
        };

        Self {
            id: p.id.to_hex(),
            title: p.title,
            description: p.description,
            budget: p.budget,
            status: p.status,
            employees: hex(p.employees),
            tasks: hex(p.tasks),
            blueprints: hex(p.blueprints),
            reports: hex(p.reports),
            company_id: p.company_id.map(|id| id.to_hex()),
        }
    }
}
