//! Comment repository.

use std::collections::HashMap;
use std::sync::Arc;

use super::count_grouped;
use crate::entities::{Comment, comment};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use vidshare_common::{AppError, AppResult};

/// Comment repository for database operations.
#[derive(Clone)]
pub struct CommentRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentRepository {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a comment by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<comment::Model>> {
        Comment::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new comment or reply.
    pub async fn create(&self, model: comment::ActiveModel) -> AppResult<comment::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the top-level comments of a video, oldest first.
    pub async fn find_top_level_by_video(&self, video_id: &str) -> AppResult<Vec<comment::Model>> {
        Comment::find()
            .filter(comment::Column::VideoId.eq(video_id))
            .filter(comment::Column::ParentCommentId.is_null())
            .order_by_asc(comment::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the direct replies to a comment, oldest first.
    pub async fn find_replies(&self, parent_id: &str) -> AppResult<Vec<comment::Model>> {
        Comment::find()
            .filter(comment::Column::ParentCommentId.eq(parent_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get comments written by a channel, newest first.
    pub async fn find_by_owner(
        &self,
        owner_id: &str,
        limit: u64,
    ) -> AppResult<Vec<comment::Model>> {
        Comment::find()
            .filter(comment::Column::OwnerId.eq(owner_id))
            .order_by_desc(comment::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all comments (top-level and replies) on a video.
    pub async fn count_by_video(&self, video_id: &str) -> AppResult<u64> {
        Comment::find()
            .filter(comment::Column::VideoId.eq(video_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Number of direct replies to each comment in `parent_ids`.
    pub async fn count_replies(&self, parent_ids: &[String]) -> AppResult<HashMap<String, u64>> {
        count_grouped::<Comment>(self.db.as_ref(), comment::Column::ParentCommentId, parent_ids)
            .await
    }

    /// Number of comments written by each channel in `owner_ids`.
    pub async fn count_by_owners(&self, owner_ids: &[String]) -> AppResult<HashMap<String, u64>> {
        count_grouped::<Comment>(self.db.as_ref(), comment::Column::OwnerId, owner_ids).await
    }
}
