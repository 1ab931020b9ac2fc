use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::projects::models::Project;
use crate::features::projects::repositories::ProjectRepository;
use crate::shared::validation;

/// Service for project lookups
pub struct ProjectService {
    projects: Arc<dyn ProjectRepository>,
}

impl ProjectService {
    pub fn new(projects: Arc<dyn ProjectRepository>) -> Self {
        Self { projects }
    }

    pub async fn get_all(&self) -> Result<Vec<Project>> {
        self.projects.find_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Project> {
        let id = validation::id_param(id, "id")?;
        self.projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }
}
