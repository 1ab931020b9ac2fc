use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::ReturnDocument,
    Collection, Database,
};

use crate::core::error::{AppError, Result};
use crate::features::projects::models::Project;
use crate::shared::constants::PROJECTS_COLLECTION;

/// Access to the `projects` collection
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Project>>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Project>>;

    /// Appends `report_id` to the project's `reports` list.
    /// Returns the updated project, or `None` when no project matched.
    async fn push_report(&self, project_id: ObjectId, report_id: ObjectId)
        -> Result<Option<Project>>;

    /// Removes `report_id` from the project's `reports` list.
    /// Returns the updated project, or `None` when no project matched.
    async fn pull_report(&self, project_id: ObjectId, report_id: ObjectId)
        -> Result<Option<Project>>;
}

pub struct MongoProjectRepository {
    collection: Collection<Project>,
}

impl MongoProjectRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(PROJECTS_COLLECTION),
        }
    }
}

#[async_trait]
impl ProjectRepository for MongoProjectRepository {
    async fn find_all(&self) -> Result<Vec<Project>> {
        let cursor = self.collection.find(doc! {}).await.map_err(|e| {
            tracing::error!("Failed to list projects: {:?}", e);
            AppError::Database(e)
        })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to read project cursor: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Project>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| {
                tracing::error!("Failed to get project {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn push_report(
        &self,
        project_id: ObjectId,
        report_id: ObjectId,
    ) -> Result<Option<Project>> {
        self.collection
            .find_one_and_update(
                doc! { "_id": project_id },
                doc! { "$push": { "reports": report_id } },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| {
                tracing::error!("Failed to link report to project {}: {:?}", project_id, e);
                AppError::Database(e)
            })
    }

    async fn pull_report(
        &self,
        project_id: ObjectId,
        report_id: ObjectId,
    ) -> Result<Option<Project>> {
        self.collection
            .find_one_and_update(
                doc! { "_id": project_id },
                doc! { "$pull": { "reports": report_id } },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to unlink report from project {}: {:?}",
                    project_id,
                    e
                );
                AppError::Database(e)
            })
    }
}
