use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::ReturnDocument,
    Collection, Database,
};

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{CreateReport, Report, ReportChanges};
use crate::shared::constants::REPORTS_COLLECTION;
use crate::shared::types::UpdateCounts;

/// Access to the `reports` collection
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Report>>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Report>>;

    /// Reports whose `tags` contain `tag`
    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Report>>;

    /// Inserts a report and returns the id the store assigned, if any
    async fn insert(&self, report: &CreateReport) -> Result<Option<ObjectId>>;

    /// Deletes a report and returns it as it was before deletion
    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<Report>>;

    /// Applies `changes` with `$set` and returns the updated report
    async fn update_fields(&self, id: ObjectId, changes: &ReportChanges)
        -> Result<Option<Report>>;

    /// `$addToSet` of `tag` on every report tagged `tagged`
    async fn add_tag(&self, tagged: &str, tag: &str) -> Result<UpdateCounts>;

    /// `$pull` of `tag` from every report carrying it
    async fn remove_tag(&self, tag: &str) -> Result<UpdateCounts>;
}

pub struct MongoReportRepository {
    collection: Collection<Report>,
}

impl MongoReportRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(REPORTS_COLLECTION),
        }
    }

    async fn find_many(&self, filter: Document) -> Result<Vec<Report>> {
        let cursor = self.collection.find(filter).await.map_err(|e| {
            tracing::error!("Failed to query reports: {:?}", e);
            AppError::Database(e)
        })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to read report cursor: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update_many(&self, filter: Document, update: Document) -> Result<UpdateCounts> {
        let result = self
            .collection
            .update_many(filter, update)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update reports: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(UpdateCounts {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }
}

#[async_trait]
impl ReportRepository for MongoReportRepository {
    async fn find_all(&self) -> Result<Vec<Report>> {
        self.find_many(doc! {}).await
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Report>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| {
                tracing::error!("Failed to get report {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn find_by_tag(&self, tag: &str) -> Result<Vec<Report>> {
        self.find_many(doc! { "tags": tag }).await
    }

    async fn insert(&self, report: &CreateReport) -> Result<Option<ObjectId>> {
        let result = self
            .collection
            .clone_with_type::<CreateReport>()
            .insert_one(report)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert report: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.inserted_id.as_object_id())
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<Report>> {
        self.collection
            .find_one_and_delete(doc! { "_id": id })
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete report {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn update_fields(
        &self,
        id: ObjectId,
        changes: &ReportChanges,
    ) -> Result<Option<Report>> {
        self.collection
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": changes.to_set_document() },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update report {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn add_tag(&self, tagged: &str, tag: &str) -> Result<UpdateCounts> {
        self.update_many(
            doc! { "tags": tagged },
            doc! { "$addToSet": { "tags": tag } },
        )
        .await
    }

    async fn remove_tag(&self, tag: &str) -> Result<UpdateCounts> {
        self.update_many(doc! { "tags": tag }, doc! { "$pull": { "tags": tag } })
            .await
    }
}
