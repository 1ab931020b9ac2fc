use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature
pub fn routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route("/api/reports/tags", patch(handlers::rename_tag))
        .route("/api/reports/tags/{tag}", get(handlers::list_reports_by_tag))
        .route(
            "/api/reports/{id}",
            get(handlers::get_report)
                .put(handlers::replace_report)
                .patch(handlers::patch_report)
                .delete(handlers::delete_report),
        )
        .with_state(service)
}
