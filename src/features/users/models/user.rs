use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Stored user document.
///
/// The password hash is not mapped and never leaves the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub projects: Vec<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<ObjectId>,
}
