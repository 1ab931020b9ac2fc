//! In-memory repositories and fixtures for service and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::json;

use crate::core::error::Result;
use crate::features::projects::models::Project;
use crate::features::projects::repositories::ProjectRepository;
use crate::features::reports::models::{CreateReport, Report, ReportChanges};
use crate::features::reports::repositories::ReportRepository;
use crate::features::users::models::User;
use crate::features::users::repositories::UserRepository;
use crate::shared::types::UpdateCounts;
use crate::shared::validation::ReportInput;

// =============================================================================
// FIXTURES
// =============================================================================

pub fn project(title: &str) -> Project {
    Project {
        id: ObjectId::new(),
        title: title.to_string(),
        description: format!("{} description", title),
        budget: 10_000.0,
        status: "Pending".to_string(),
        employees: Vec::new(),
        tasks: Vec::new(),
        blueprints: Vec::new(),
        reports: Vec::new(),
        company_id: None,
    }
}

pub fn user(username: &str) -> User {
    User {
        id: ObjectId::new(),
        username: username.to_string(),
        role: "engineer".to_string(),
        projects: Vec::new(),
        company_id: None,
    }
}

/// A stored report filed under `project_id`
pub fn stored_report(project_id: ObjectId, tags: &[&str]) -> Report {
    Report {
        id: ObjectId::new(),
        title: "Crane inspection".to_string(),
        description: "Load test before lift".to_string(),
        file_url: "cranes/tc-2.pdf".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        uploaded_by: None,
        project_id,
        issues: Vec::new(),
    }
}

/// A complete, valid report body filed under `project_id`
pub fn report_input(project_id: ObjectId, uploaded_by: Option<ObjectId>) -> ReportInput {
    ReportInput {
        title: Some(json!("Site inspection")),
        description: Some(json!("Foundation checks for the east wing")),
        file_url: Some(json!("inspections/east-wing.pdf")),
        tags: Some(json!(["inspection"])),
        uploaded_by: uploaded_by.map(|id| json!(id.to_hex())),
        project_id: Some(json!(project_id.to_hex())),
    }
}

// =============================================================================
// REPOSITORIES
// =============================================================================

#[derive(Default)]
pub struct InMemoryReportRepository {
    reports: Mutex<Vec<Report>>,
    drop_inserted_ids: bool,
    ignore_pulls: bool,
}

impl InMemoryReportRepository {
    pub fn with(reports: Vec<Report>) -> Self {
        Self {
            reports: Mutex::new(reports),
            ..Default::default()
        }
    }

    /// A store whose `$pull` matches reports but never modifies them
    pub fn ignoring_pulls() -> Self {
        Self {
            ignore_pulls: true,
            ..Default::default()
        }
    }

    /// A store that accepts inserts but reports no inserted id
    pub fn dropping_inserted_ids() -> Self {
        Self {
            drop_inserted_ids: true,
            ..Default::default()
        }
    }

    pub fn snapshot(&self) -> Vec<Report> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn find_all(&self) -> Result<Vec<Report>> {
        Ok(self.snapshot())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Report>> {
        Ok(self.snapshot().into_iter().find(|r| r.id == id))
    }

    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Report>> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|r| r.tags.iter().any(|t| t == tag))
            .collect())
    }

    async fn insert(&self, report: &CreateReport) -> Result<Option<ObjectId>> {
        let id = ObjectId::new();
        self.reports.lock().unwrap().push(Report {
            id,
            title: report.title.clone(),
            description: report.description.clone(),
            file_url: report.file_url.clone(),
            tags: report.tags.clone(),
            uploaded_by: report.uploaded_by,
            project_id: report.project_id,
            issues: report.issues.clone(),
        });
        Ok((!self.drop_inserted_ids).then_some(id))
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<Report>> {
        let mut reports = self.reports.lock().unwrap();
        let position = reports.iter().position(|r| r.id == id);
        Ok(position.map(|i| reports.remove(i)))
    }

    async fn update_fields(
        &self,
        id: ObjectId,
        changes: &ReportChanges,
    ) -> Result<Option<Report>> {
        let mut reports = self.reports.lock().unwrap();
        let Some(report) = reports.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        if let Some(title) = &changes.title {
            report.title = title.clone();
        }
        if let Some(description) = &changes.description {
            report.description = description.clone();
        }
        if let Some(file_url) = &changes.file_url {
            report.file_url = file_url.clone();
        }
        if let Some(tags) = &changes.tags {
            report.tags = tags.clone();
        }
        if let Some(uploaded_by) = changes.uploaded_by {
            report.uploaded_by = Some(uploaded_by);
        }
        Ok(Some(report.clone()))
    }

    async fn add_tag(&self, tagged: &str, tag: &str) -> Result<UpdateCounts> {
        let mut counts = UpdateCounts::default();
        for report in self.reports.lock().unwrap().iter_mut() {
            if report.tags.iter().any(|t| t == tagged) {
                counts.matched += 1;
                if !report.tags.iter().any(|t| t == tag) {
                    report.tags.push(tag.to_string());
                    counts.modified += 1;
                }
            }
        }
        Ok(counts)
    }

    async fn remove_tag(&self, tag: &str) -> Result<UpdateCounts> {
        let mut counts = UpdateCounts::default();
        for report in self.reports.lock().unwrap().iter_mut() {
            if report.tags.iter().any(|t| t == tag) {
                counts.matched += 1;
                if !self.ignore_pulls {
                    counts.modified += 1;
                    report.tags.retain(|t| t != tag);
                }
            }
        }
        Ok(counts)
    }
}

#[derive(Default)]
pub struct InMemoryProjectRepository {
    projects: Mutex<Vec<Project>>,
    fail_writes: bool,
}

impl InMemoryProjectRepository {
    pub fn with(projects: Vec<Project>) -> Self {
        Self {
            projects: Mutex::new(projects),
            fail_writes: false,
        }
    }

    /// A store whose `$push`/`$pull` calls fail with a driver error
    pub fn failing_writes(projects: Vec<Project>) -> Self {
        Self {
            fail_writes: true,
            ..Self::with(projects)
        }
    }

    fn update(
        &self,
        id: ObjectId,
        apply: impl FnOnce(&mut Project),
    ) -> Result<Option<Project>> {
        if self.fail_writes {
            let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
            return Err(mongodb::error::Error::from(io).into());
        }

        let mut projects = self.projects.lock().unwrap();
        let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        apply(project);
        Ok(Some(project.clone()))
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn find_all(&self) -> Result<Vec<Project>> {
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Project>> {
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn push_report(
        &self,
        project_id: ObjectId,
        report_id: ObjectId,
    ) -> Result<Option<Project>> {
        self.update(project_id, |p| p.reports.push(report_id))
    }

    async fn pull_report(
        &self,
        project_id: ObjectId,
        report_id: ObjectId,
    ) -> Result<Option<Project>> {
        self.update(project_id, |p| p.reports.retain(|id| *id != report_id))
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Vec<User>,
}

impl InMemoryUserRepository {
    pub fn with(users: Vec<User>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>> {
        Ok(self.users.clone())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }
}
