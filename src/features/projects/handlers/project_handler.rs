use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::features::projects::dtos::ProjectResponseDto;
use crate::features::projects::services::ProjectService;
use crate::shared::types::{ApiResponse, Meta};

/// List all projects
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "List of projects", body = ApiResponse<Vec<ProjectResponseDto>>),
    ),
    tag = "projects"
)]
pub async fn list_projects(
    State(service): State<Arc<ProjectService>>,
) -> Result<Json<ApiResponse<Vec<ProjectResponseDto>>>> {
    let projects: Vec<ProjectResponseDto> = service
        .get_all()
        .await?
        .into_iter()
        .map(ProjectResponseDto::from)
        .collect();
    let meta = Meta {
        total: projects.len() as i64,
    };
    Ok(Json(ApiResponse::success(Some(projects), None, Some(meta))))
}

/// Get project by ID, including its report ids
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(
        ("id" = String, Path, description = "Project ObjectId")
    ),
    responses(
        (status = 200, description = "Project found", body = ApiResponse<ProjectResponseDto>),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Project not found")
    ),
    tag = "projects"
)]
pub async fn get_project(
    State(service): State<Arc<ProjectService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ProjectResponseDto>>> {
    let project = service.get_by_id(&id).await?;
    Ok(Json(ApiResponse::success(Some(project.into()), None, None)))
}
