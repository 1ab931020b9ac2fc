use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::reports::dtos::{DeletedReportResponseDto, RenameTagDto, ReportResponseDto};
use crate::features::reports::models::Report;
use crate::features::reports::services::ReportService;
use crate::shared::types::{ApiResponse, Meta};
use crate::shared::validation::ReportInput;

fn list_response(reports: Vec<Report>) -> ApiResponse<Vec<ReportResponseDto>> {
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(ReportResponseDto::from).collect();
    let meta = Meta {
        total: dtos.len() as i64,
    };
    ApiResponse::success(Some(dtos), None, Some(meta))
}

/// List all reports
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "List of reports", body = ApiResponse<Vec<ReportResponseDto>>),
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = service.get_all().await?;
    Ok(Json(list_response(reports)))
}

/// Get report by ID
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Report ObjectId")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn get_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service.get_by_id(&id).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// List reports carrying a tag
#[utoipa::path(
    get,
    path = "/api/reports/tags/{tag}",
    params(
        ("tag" = String, Path, description = "Tag to match exactly")
    ),
    responses(
        (status = 200, description = "Reports with the tag, possibly none", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 400, description = "Blank tag")
    ),
    tag = "reports"
)]
pub async fn list_reports_by_tag(
    State(service): State<Arc<ReportService>>,
    Path(tag): Path<String>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = service.get_by_tag(&tag).await?;
    Ok(Json(list_response(reports)))
}

/// Create a report and link it to its project
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = ReportInput,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Uploader not found"),
        (status = 500, description = "Report could not be stored or linked")
    ),
    tag = "reports"
)]
pub async fn create_report(
    State(service): State<Arc<ReportService>>,
    AppJson(input): AppJson<ReportInput>,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    let report = service.create(&input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(report.into()),
            Some("Report created".to_string()),
            None,
        )),
    ))
}

/// Replace the editable fields of a report
#[utoipa::path(
    put,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Report ObjectId")
    ),
    request_body = ReportInput,
    responses(
        (status = 200, description = "Report replaced", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Report or uploader not found")
    ),
    tag = "reports"
)]
pub async fn replace_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<String>,
    AppJson(input): AppJson<ReportInput>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service.replace(&id, &input).await?;
    Ok(Json(ApiResponse::success(
        Some(report.into()),
        Some("Report replaced".to_string()),
        None,
    )))
}

/// Update only the supplied fields of a report
#[utoipa::path(
    patch,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Report ObjectId")
    ),
    request_body = ReportInput,
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Report or uploader not found")
    ),
    tag = "reports"
)]
pub async fn patch_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<String>,
    AppJson(input): AppJson<ReportInput>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service.patch(&id, &input).await?;
    Ok(Json(ApiResponse::success(
        Some(report.into()),
        Some("Report updated".to_string()),
        None,
    )))
}

/// Delete a report and unlink it from its project
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Report ObjectId")
    ),
    responses(
        (status = 200, description = "Report deleted", body = ApiResponse<DeletedReportResponseDto>),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Report not found"),
        (status = 500, description = "Project could not be updated")
    ),
    tag = "reports"
)]
pub async fn delete_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedReportResponseDto>>> {
    let deleted = service.remove(&id).await?;
    Ok(Json(ApiResponse::success(Some(deleted.into()), None, None)))
}

/// Rename a tag across all reports
#[utoipa::path(
    patch,
    path = "/api/reports/tags",
    request_body = RenameTagDto,
    responses(
        (status = 200, description = "Reports now carrying the new tag", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 400, description = "Invalid or identical tags"),
        (status = 404, description = "No report carries the old tag"),
        (status = 500, description = "Old tag could not be removed")
    ),
    tag = "reports"
)]
pub async fn rename_tag(
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<RenameTagDto>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = service
        .rename_tag(dto.old_tag.as_ref(), dto.new_tag.as_ref())
        .await?;
    Ok(Json(list_response(reports)))
}
