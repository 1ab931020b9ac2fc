use utoipa::{Modify, OpenApi};

use crate::features::projects::{dtos as projects_dtos, handlers as projects_handlers};
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta};
use crate::shared::validation::ReportInput;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::list_reports,
        reports_handlers::get_report,
        reports_handlers::list_reports_by_tag,
        reports_handlers::create_report,
        reports_handlers::replace_report,
        reports_handlers::patch_report,
        reports_handlers::delete_report,
        reports_handlers::rename_tag,
        // Users
        users_handlers::list_users,
        users_handlers::get_user,
        // Projects
        projects_handlers::list_projects,
        projects_handlers::get_project,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Reports
            ReportInput,
            reports_dtos::RenameTagDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::DeletedReportResponseDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::DeletedReportResponseDto>,
            // Users
            users_dtos::UserResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Projects
            projects_dtos::ProjectResponseDto,
            ApiResponse<projects_dtos::ProjectResponseDto>,
            ApiResponse<Vec<projects_dtos::ProjectResponseDto>>,
        )
    ),
    tags(
        (name = "reports", description = "Project reports and tags"),
        (name = "users", description = "Users that upload reports"),
        (name = "projects", description = "Projects and their linked reports"),
    ),
    info(
        title = "Project Tracker API",
        version = "0.1.0",
        description = "API documentation for the project tracker data layer",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
