use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::features::reports::models::{DeletedReport, Report};

/// Response DTO for report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub file_url: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
    pub project_id: String,
    /// Issue documents recorded against the report, as relaxed extended JSON
    #[schema(value_type = Vec<Object>)]
    pub issues: Vec<Value>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id.to_hex(),
            title: r.title,
            description: r.description,
            file_url: r.file_url,
            tags: r.tags,
            uploaded_by: r.uploaded_by.map(|id| id.to_hex()),
            project_id: r.project_id.to_hex(),
            issues: r
                .issues
                .into_iter()
                .map(|issue| Bson::Document(issue).into_relaxed_extjson())
                .collect(),
        }
    }
}

/// Response DTO for a deleted report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedReportResponseDto {
    #[serde(flatten)]
    pub report: ReportResponseDto,
    pub deleted: bool,
}

impl From<DeletedReport> for DeletedReportResponseDto {
    fn from(d: DeletedReport) -> Self {
        Self {
            report: d.report.into(),
            deleted: d.deleted,
        }
    }
}

/// Request DTO for renaming a tag across all reports
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameTagDto {
    #[schema(value_type = Option<String>, example = "draft")]
    pub old_tag: Option<Value>,
    #[schema(value_type = Option<String>, example = "final")]
    pub new_tag: Option<Value>,
}
