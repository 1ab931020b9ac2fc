use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection, Database,
};

use crate::core::error::{AppError, Result};
use crate::features::users::models::User;
use crate::shared::constants::USERS_COLLECTION;

/// Read access to the `users` collection
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(USERS_COLLECTION),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_all(&self) -> Result<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await.map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::Database(e)
        })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to read user cursor: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| {
                tracing::error!("Failed to get user {}: {:?}", id, e);
                AppError::Database(e)
            })
    }
}
