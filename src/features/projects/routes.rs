use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::projects::handlers;
use crate::features::projects::services::ProjectService;

/// Create routes for the projects feature
pub fn routes(service: Arc<ProjectService>) -> Router {
    Router::new()
        .route("/api/projects", get(handlers::list_projects))
        .route("/api/projects/{id}", get(handlers::get_project))
        .with_state(service)
}
