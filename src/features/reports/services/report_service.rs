use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use serde_json::Value;

use crate::core::error::{AppError, Result};
use crate::features::projects::repositories::ProjectRepository;
use crate::features::reports::models::{CreateReport, DeletedReport, Report, ReportChanges};
use crate::features::reports::repositories::ReportRepository;
use crate::features::users::UserService;
use crate::shared::validation::{self, ReportInput};

/// Service for report operations.
///
/// Keeps each project's `reports` list in step with the reports collection.
/// The two collections are written one after the other without a
/// transaction; see [`ReportService::create`] and [`ReportService::remove`]
/// for what happens when the second write fails.
pub struct ReportService {
    reports: Arc<dyn ReportRepository>,
    projects: Arc<dyn ProjectRepository>,
    users: Arc<UserService>,
}

impl ReportService {
    pub fn new(
        reports: Arc<dyn ReportRepository>,
        projects: Arc<dyn ProjectRepository>,
        users: Arc<UserService>,
    ) -> Self {
        Self {
            reports,
            projects,
            users,
        }
    }

    /// List every report
    pub async fn get_all(&self) -> Result<Vec<Report>> {
        self.reports.find_all().await
    }

    /// Get a report by id
    pub async fn get_by_id(&self, id: &str) -> Result<Report> {
        let id = validation::id_param(id, "id")?;
        self.get_by_object_id(id).await
    }

    async fn get_by_object_id(&self, id: ObjectId) -> Result<Report> {
        self.reports
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// List reports carrying `tag` (possibly none)
    pub async fn get_by_tag(&self, tag: &str) -> Result<Vec<Report>> {
        let tag = validation::string_param(tag, "tag")?;
        self.reports.find_by_tag(&tag).await
    }

    /// Validates `uploadedBy` when supplied and checks the user exists
    async fn resolve_uploader(&self, value: Option<&Value>) -> Result<Option<ObjectId>> {
        if !validation::is_supplied(value) {
            return Ok(None);
        }

        let uploaded_by = validation::valid_id(value, "uploadedBy")?;
        self.users.get_by_object_id(uploaded_by).await?;
        Ok(Some(uploaded_by))
    }

    /// Create a report and link it to its project.
    ///
    /// If the project cannot be updated the freshly inserted report is
    /// deleted again before the error is returned, so no unlinked report
    /// is left behind.
    pub async fn create(&self, input: &ReportInput) -> Result<Report> {
        let project_id = validation::valid_id(input.project_id.as_ref(), "projectId")?;
        let title = validation::valid_string(input.title.as_ref(), "title")?;
        let description = validation::valid_string(input.description.as_ref(), "description")?;
        let file_url = validation::valid_file_url(input.file_url.as_ref(), "fileUrl")?;
        let tags = validation::valid_tags(input.tags.as_ref(), "tags")?;
        let uploaded_by = self.resolve_uploader(input.uploaded_by.as_ref()).await?;

        let new_report = CreateReport {
            title,
            description,
            file_url,
            tags,
            uploaded_by,
            project_id,
            issues: Vec::new(),
        };

        let report_id = self
            .reports
            .insert(&new_report)
            .await?
            .ok_or_else(|| AppError::InsertFailed("Report insert failed".to_string()))?;

        match self.projects.push_report(project_id, report_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                self.discard_unlinked(report_id).await;
                return Err(AppError::ProjectUpdateFailed(format!(
                    "Could not add report {} to project {}",
                    report_id, project_id
                )));
            }
            Err(e) => {
                self.discard_unlinked(report_id).await;
                return Err(e);
            }
        }

        tracing::info!(
            "Created report: {} for project: {}",
            report_id,
            project_id
        );

        self.get_by_object_id(report_id).await
    }

    async fn discard_unlinked(&self, report_id: ObjectId) {
        match self.reports.delete_by_id(report_id).await {
            Ok(_) => tracing::warn!("Discarded report {} after project update failed", report_id),
            Err(e) => tracing::error!(
                "Report {} is stored but not linked to its project: {:?}",
                report_id,
                e
            ),
        }
    }

    /// Delete a report and unlink it from the project it belonged to.
    ///
    /// The deletion is not undone when the project update fails.
    pub async fn remove(&self, id: &str) -> Result<DeletedReport> {
        let id = validation::id_param(id, "id")?;

        let report = self
            .reports
            .delete_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Could not delete report with id {}", id)))?;

        let updated = self.projects.pull_report(report.project_id, report.id).await?;
        if updated.is_none() {
            tracing::warn!(
                "Deleted report {} but project {} was not found",
                report.id,
                report.project_id
            );
            return Err(AppError::ProjectUpdateFailed(format!(
                "Could not remove report {} from project {}",
                report.id, report.project_id
            )));
        }

        tracing::info!("Deleted report: {}", report.id);

        Ok(DeletedReport {
            report,
            deleted: true,
        })
    }

    /// Overwrite title, description, fileUrl, tags and uploadedBy.
    /// `projectId` and `issues` are left as they are.
    pub async fn replace(&self, id: &str, input: &ReportInput) -> Result<Report> {
        let id = validation::id_param(id, "id")?;
        let content = validation::valid_report_content(input)?;
        self.users.get_by_object_id(content.uploaded_by).await?;

        let report = self
            .reports
            .update_fields(id, &ReportChanges::from(content))
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Update failed, could not find a report with id {}",
                    id
                ))
            })?;

        tracing::info!("Replaced report: {}", report.id);
        Ok(report)
    }

    /// Merge only the supplied fields into the stored report
    pub async fn patch(&self, id: &str, input: &ReportInput) -> Result<Report> {
        let id = validation::id_param(id, "id")?;

        let mut changes = ReportChanges::default();
        if validation::is_supplied(input.title.as_ref()) {
            changes.title = Some(validation::valid_string(input.title.as_ref(), "title")?);
        }
        if validation::is_supplied(input.description.as_ref()) {
            changes.description = Some(validation::valid_string(
                input.description.as_ref(),
                "description",
            )?);
        }
        if validation::is_supplied(input.file_url.as_ref()) {
            changes.file_url = Some(validation::valid_file_url(
                input.file_url.as_ref(),
                "fileUrl",
            )?);
        }
        if validation::is_supplied(input.tags.as_ref()) {
            changes.tags = Some(validation::valid_tags(input.tags.as_ref(), "tags")?);
        }
        changes.uploaded_by = self.resolve_uploader(input.uploaded_by.as_ref()).await?;

        if changes.is_empty() {
            return self.get_by_object_id(id).await;
        }

        let report = self
            .reports
            .update_fields(id, &changes)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Update failed, could not find a report with id {}",
                    id
                ))
            })?;

        tracing::info!("Patched report: {}", report.id);
        Ok(report)
    }

    /// Rename a tag across all reports and return the reports now carrying
    /// `new_tag`.
    ///
    /// The new tag is added first and the old one pulled second. If the
    /// second step fails the affected reports keep both tags.
    pub async fn rename_tag(
        &self,
        old_tag: Option<&Value>,
        new_tag: Option<&Value>,
    ) -> Result<Vec<Report>> {
        let old_tag = validation::valid_string(old_tag, "oldTag")?;
        let new_tag = validation::valid_string(new_tag, "newTag")?;
        if old_tag == new_tag {
            return Err(AppError::SameTag(format!(
                "'{}' is both the old and the new tag",
                old_tag
            )));
        }

        let added = self.reports.add_tag(&old_tag, &new_tag).await?;
        if added.matched == 0 {
            return Err(AppError::NotFound(format!(
                "Could not find any reports with tag '{}'",
                old_tag
            )));
        }

        let removed = self.reports.remove_tag(&old_tag).await?;
        if removed.modified == 0 {
            tracing::warn!(
                "Tag '{}' was added to {} reports but '{}' was not removed",
                new_tag,
                added.matched,
                old_tag
            );
            return Err(AppError::UpdateFailed(format!(
                "Could not remove tag '{}'",
                old_tag
            )));
        }

        tracing::info!(
            "Renamed tag '{}' to '{}' on {} reports",
            old_tag,
            new_tag,
            removed.modified
        );

        self.reports.find_by_tag(&new_tag).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::projects::models::Project;
    use crate::features::users::models::User;
    use crate::shared::test_helpers::{
        project, report_input, stored_report, user, InMemoryProjectRepository,
        InMemoryReportRepository, InMemoryUserRepository,
    };
    use crate::shared::validation::ValidationError;
    use serde_json::json;

    struct Fixture {
        service: ReportService,
        reports: Arc<InMemoryReportRepository>,
        projects: Arc<InMemoryProjectRepository>,
        project: Project,
        user: User,
    }

    fn fixture_with(reports: InMemoryReportRepository) -> Fixture {
        let project = project("Harbor pier");
        let user = user("mlee");
        let reports = Arc::new(reports);
        let projects = Arc::new(InMemoryProjectRepository::with(vec![project.clone()]));
        let users = Arc::new(UserService::new(Arc::new(InMemoryUserRepository::with(
            vec![user.clone()],
        ))));

        Fixture {
            service: ReportService::new(reports.clone(), projects.clone(), users),
            reports,
            projects,
            project,
            user,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(InMemoryReportRepository::default())
    }

    async fn linked_reports(f: &Fixture) -> Vec<ObjectId> {
        f.projects
            .find_by_id(f.project.id)
            .await
            .unwrap()
            .unwrap()
            .reports
    }

    async fn create_tagged(f: &Fixture, tags: Value) -> Report {
        let input = ReportInput {
            tags: Some(tags),
            ..report_input(f.project.id, None)
        };
        f.service.create(&input).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_without_uploader() {
        let f = fixture();
        let input = ReportInput {
            title: Some(json!("T")),
            description: Some(json!("D")),
            file_url: Some(json!("f.pdf")),
            tags: Some(json!(["x"])),
            uploaded_by: None,
            project_id: Some(json!(f.project.id.to_hex())),
        };

        let created = f.service.create(&input).await.unwrap();
        assert!(created.issues.is_empty());
        assert_eq!(created.tags, vec!["x".to_string()]);
        assert_eq!(created.uploaded_by, None);
        assert_eq!(created.project_id, f.project.id);

        let fetched = f.service.get_by_id(&created.id.to_hex()).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_links_report_to_project() {
        let f = fixture();
        let created = f
            .service
            .create(&report_input(f.project.id, Some(f.user.id)))
            .await
            .unwrap();

        assert_eq!(created.uploaded_by, Some(f.user.id));
        assert_eq!(linked_reports(&f).await, vec![created.id]);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_uploader() {
        let f = fixture();
        let err = f
            .service
            .create(&report_input(f.project.id, Some(ObjectId::new())))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(f.reports.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_create_validates_fields() {
        let f = fixture();
        let input = ReportInput {
            file_url: Some(json!("notes.txt")),
            ..report_input(f.project.id, None)
        };

        let err = f.service.create(&input).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::InvalidFormat { .. })
        ));

        let input = ReportInput {
            tags: Some(json!(["ok", ""])),
            ..report_input(f.project.id, None)
        };
        let err = f.service.create(&input).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingField(_))
        ));
        assert!(f.reports.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_create_for_unknown_project_leaves_no_report() {
        let f = fixture();
        let err = f
            .service
            .create(&report_input(ObjectId::new(), None))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ProjectUpdateFailed(_)));
        assert!(f.reports.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_create_fails_without_inserted_id() {
        let f = fixture_with(InMemoryReportRepository::dropping_inserted_ids());
        let err = f
            .service
            .create(&report_input(f.project.id, None))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InsertFailed(_)));
        assert!(linked_reports(&f).await.is_empty());
    }

    #[tokio::test]
    async fn test_create_discards_report_when_project_write_errors() {
        let project = project("Tunnel lining");
        let reports = Arc::new(InMemoryReportRepository::default());
        let projects = Arc::new(InMemoryProjectRepository::failing_writes(vec![
            project.clone(),
        ]));
        let users = Arc::new(UserService::new(Arc::new(
            InMemoryUserRepository::default(),
        )));
        let service = ReportService::new(reports.clone(), projects.clone(), users);

        let err = service
            .create(&report_input(project.id, None))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        assert!(reports.snapshot().is_empty());
        let stored = projects.find_by_id(project.id).await.unwrap().unwrap();
        assert!(stored.reports.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_errors() {
        let f = fixture();
        assert!(matches!(
            f.service.get_by_id("12345").await,
            Err(AppError::Validation(ValidationError::InvalidIdFormat(_)))
        ));
        assert!(matches!(
            f.service.get_by_id(&ObjectId::new().to_hex()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_get_all_and_by_tag() {
        let f = fixture();
        create_tagged(&f, json!(["draft", "site"])).await;
        create_tagged(&f, json!(["site"])).await;

        assert_eq!(f.service.get_all().await.unwrap().len(), 2);
        assert_eq!(f.service.get_by_tag(" site ").await.unwrap().len(), 2);
        assert_eq!(f.service.get_by_tag("draft").await.unwrap().len(), 1);
        assert!(f.service.get_by_tag("missing").await.unwrap().is_empty());
        assert!(matches!(
            f.service.get_by_tag("   ").await,
            Err(AppError::Validation(ValidationError::EmptyValue(_)))
        ));
    }

    #[tokio::test]
    async fn test_remove_unlinks_from_project() {
        let f = fixture();
        let keep = create_tagged(&f, json!(["a"])).await;
        let gone = create_tagged(&f, json!(["b"])).await;

        let deleted = f.service.remove(&gone.id.to_hex()).await.unwrap();
        assert!(deleted.deleted);
        assert_eq!(deleted.report, gone);

        assert_eq!(linked_reports(&f).await, vec![keep.id]);
        assert!(matches!(
            f.service.get_by_id(&gone.id.to_hex()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_keeps_deletion_when_project_is_missing() {
        let orphan = stored_report(ObjectId::new(), &["crane"]);
        let f = fixture_with(InMemoryReportRepository::with(vec![orphan.clone()]));

        let err = f.service.remove(&orphan.id.to_hex()).await.unwrap_err();

        assert!(matches!(err, AppError::ProjectUpdateFailed(_)));
        assert!(f.reports.snapshot().is_empty());
        assert!(matches!(
            f.service.get_by_id(&orphan.id.to_hex()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(linked_reports(&f).await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_nonexistent_report() {
        let f = fixture();
        assert!(matches!(
            f.service.remove(&ObjectId::new().to_hex()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_replace_keeps_project_and_issues() {
        let f = fixture();
        let created = create_tagged(&f, json!(["draft"])).await;

        let input = ReportInput {
            title: Some(json!("Final inspection")),
            description: Some(json!("Signed off")),
            file_url: Some(json!("final.png")),
            tags: Some(json!(["final"])),
            uploaded_by: Some(json!(f.user.id.to_hex())),
            project_id: None,
        };
        let replaced = f
            .service
            .replace(&created.id.to_hex(), &input)
            .await
            .unwrap();

        assert_eq!(replaced.title, "Final inspection");
        assert_eq!(replaced.file_url, "final.png");
        assert_eq!(replaced.tags, vec!["final".to_string()]);
        assert_eq!(replaced.uploaded_by, Some(f.user.id));
        assert_eq!(replaced.project_id, created.project_id);
        assert_eq!(replaced.issues, created.issues);
    }

    #[tokio::test]
    async fn test_replace_requires_all_fields() {
        let f = fixture();
        let created = create_tagged(&f, json!(["draft"])).await;

        let input = ReportInput {
            uploaded_by: None,
            ..report_input(f.project.id, None)
        };
        let err = f
            .service
            .replace(&created.id.to_hex(), &input)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingField(ref field)) if field == "uploadedBy"
        ));
    }

    #[tokio::test]
    async fn test_replace_unknown_report() {
        let f = fixture();
        let err = f
            .service
            .replace(
                &ObjectId::new().to_hex(),
                &report_input(f.project.id, Some(f.user.id)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_patch_only_touches_supplied_fields() {
        let f = fixture();
        let created = f
            .service
            .create(&report_input(f.project.id, Some(f.user.id)))
            .await
            .unwrap();

        let input = ReportInput {
            description: Some(json!("x")),
            ..Default::default()
        };
        let patched = f
            .service
            .patch(&created.id.to_hex(), &input)
            .await
            .unwrap();

        assert_eq!(patched.description, "x");
        assert_eq!(patched.title, created.title);
        assert_eq!(patched.file_url, created.file_url);
        assert_eq!(patched.tags, created.tags);
        assert_eq!(patched.uploaded_by, created.uploaded_by);
    }

    #[tokio::test]
    async fn test_patch_validates_supplied_fields() {
        let f = fixture();
        let created = create_tagged(&f, json!(["draft"])).await;

        let input = ReportInput {
            file_url: Some(json!("plan.docx")),
            ..Default::default()
        };
        assert!(matches!(
            f.service.patch(&created.id.to_hex(), &input).await,
            Err(AppError::Validation(ValidationError::InvalidFormat { .. }))
        ));

        let input = ReportInput {
            uploaded_by: Some(json!(ObjectId::new().to_hex())),
            ..Default::default()
        };
        assert!(matches!(
            f.service.patch(&created.id.to_hex(), &input).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_patch_without_changes_returns_report() {
        let f = fixture();
        let created = create_tagged(&f, json!(["draft"])).await;

        let unchanged = f
            .service
            .patch(&created.id.to_hex(), &ReportInput::default())
            .await
            .unwrap();
        assert_eq!(unchanged, created);

        assert!(matches!(
            f.service
                .patch(&ObjectId::new().to_hex(), &ReportInput::default())
                .await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_rename_tag() {
        let f = fixture();
        for _ in 0..3 {
            create_tagged(&f, json!(["draft", "site"])).await;
        }
        let untouched = create_tagged(&f, json!(["site"])).await;

        let renamed = f
            .service
            .rename_tag(Some(&json!("draft")), Some(&json!("final")))
            .await
            .unwrap();

        assert_eq!(renamed.len(), 3);
        assert!(renamed.iter().all(|r| r.tags.contains(&"final".to_string())));
        assert!(f.service.get_by_tag("draft").await.unwrap().is_empty());
        assert_eq!(
            f.service
                .get_by_id(&untouched.id.to_hex())
                .await
                .unwrap()
                .tags,
            vec!["site".to_string()]
        );
    }

    #[tokio::test]
    async fn test_rename_tag_rejects_same_tag_before_writing() {
        let f = fixture();
        let created = create_tagged(&f, json!(["draft"])).await;

        let err = f
            .service
            .rename_tag(Some(&json!("draft")), Some(&json!(" draft ")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SameTag(_)));
        assert_eq!(
            f.service.get_by_id(&created.id.to_hex()).await.unwrap(),
            created
        );
    }

    #[tokio::test]
    async fn test_rename_tag_leaves_both_tags_when_pull_modifies_nothing() {
        let f = fixture_with(InMemoryReportRepository::ignoring_pulls());
        create_tagged(&f, json!(["draft"])).await;
        create_tagged(&f, json!(["draft"])).await;

        let err = f
            .service
            .rename_tag(Some(&json!("draft")), Some(&json!("final")))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UpdateFailed(_)));
        let reports = f.reports.snapshot();
        assert_eq!(reports.len(), 2);
        for report in reports {
            assert_eq!(report.tags, vec!["draft".to_string(), "final".to_string()]);
        }
    }

    #[tokio::test]
    async fn test_rename_unknown_tag() {
        let f = fixture();
        create_tagged(&f, json!(["draft"])).await;

        assert!(matches!(
            f.service
                .rename_tag(Some(&json!("missing")), Some(&json!("final")))
                .await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            f.service.rename_tag(None, Some(&json!("final"))).await,
            Err(AppError::Validation(ValidationError::MissingField(_)))
        ));
    }
}
