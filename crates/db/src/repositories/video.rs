//! Video repository.

use std::collections::HashMap;
use std::sync::Arc;

use super::count_grouped;
use crate::entities::{Video, video};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use vidshare_common::{AppError, AppResult};

/// Video repository for database operations.
#[derive(Clone)]
pub struct VideoRepository {
    db: Arc<DatabaseConnection>,
}

impl VideoRepository {
    /// Create a new video repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a video by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<video::Model>> {
        Video::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new video.
    ///
    /// Fails with a foreign key violation if the owner does not exist.
    pub async fn create(&self, model: video::ActiveModel) -> AppResult<video::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get videos owned by a channel, newest first.
    pub async fn find_by_owner(&self, owner_id: &str, limit: u64) -> AppResult<Vec<video::Model>> {
        Video::find()
            .filter(video::Column::OwnerId.eq(owner_id))
            .order_by_desc(video::Column::UploadedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Number of videos owned by each channel in `owner_ids`.
    pub async fn count_by_owners(&self, owner_ids: &[String]) -> AppResult<HashMap<String, u64>> {
        count_grouped::<Video>(self.db.as_ref(), video::Column::OwnerId, owner_ids).await
    }
}
