use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Stored project document
///
/// `reports` is the back-reference list maintained by the report service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub employees: Vec<ObjectId>,
    #[serde(default)]
    pub tasks: Vec<ObjectId>,
    #[serde(default)]
    pub blueprints: Vec<ObjectId>,
    #[serde(default)]
    pub reports: Vec<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<ObjectId>,
}
