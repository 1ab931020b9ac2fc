use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::core::error::{AppError, Result};
use crate::features::users::models::User;
use crate::features::users::repositories::UserRepository;
use crate::shared::validation;

/// Service for user lookups
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// List every user
    pub async fn get_all(&self) -> Result<Vec<User>> {
        self.users.find_all().await
    }

    /// Get a user by its (unvalidated) id
    pub async fn get_by_id(&self, id: &str) -> Result<User> {
        let id = validation::id_param(id, "id")?;
        self.get_by_object_id(id).await
    }

    /// Get a user by an already validated id; fails with `NotFound` if absent
    pub async fn get_by_object_id(&self, id: ObjectId) -> Result<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}
