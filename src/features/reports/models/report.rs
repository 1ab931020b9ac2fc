use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use crate::shared::validation::ValidReportContent;

/// Stored report document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub file_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<ObjectId>,
    pub project_id: ObjectId,
    #[serde(default)]
    pub issues: Vec<Document>,
}

/// Data for inserting a new report; the store assigns `_id`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReport {
    pub title: String,
    pub description: String,
    pub file_url: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<ObjectId>,
    pub project_id: ObjectId,
    pub issues: Vec<Document>,
}

/// A report removed from the store, flagged as deleted
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedReport {
    pub report: Report,
    pub deleted: bool,
}

/// Fields overwritten by a replace or merged by a patch.
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub uploaded_by: Option<ObjectId>,
}

impl ReportChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.file_url.is_none()
            && self.tags.is_none()
            && self.uploaded_by.is_none()
    }

    /// Body of the `$set` operator for these changes
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(title) = &self.title {
            set.insert("title", title.clone());
        }
        if let Some(description) = &self.description {
            set.insert("description", description.clone());
        }
        if let Some(file_url) = &self.file_url {
            set.insert("fileUrl", file_url.clone());
        }
        if let Some(tags) = &self.tags {
            set.insert("tags", tags.clone());
        }
        if let Some(uploaded_by) = self.uploaded_by {
            set.insert("uploadedBy", uploaded_by);
        }
        set
    }
}

impl From<ValidReportContent> for ReportChanges {
    fn from(content: ValidReportContent) -> Self {
        Self {
            title: Some(content.title),
            description: Some(content.description),
            file_url: Some(content.file_url),
            tags: Some(content.tags),
            uploaded_by: Some(content.uploaded_by),
        }
    }
}
