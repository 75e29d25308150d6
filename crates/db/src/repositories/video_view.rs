//! Video view repository.

use std::collections::HashMap;
use std::sync::Arc;

use super::count_grouped;
use crate::entities::{VideoView, video_view};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use vidshare_common::{AppError, AppResult};

/// Video view repository for database operations.
#[derive(Clone)]
pub struct VideoViewRepository {
    db: Arc<DatabaseConnection>,
}

impl VideoViewRepository {
    /// Create a new video view repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Record a view event.
    pub async fn create(&self, model: video_view::ActiveModel) -> AppResult<video_view::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count views of a video.
    pub async fn count_by_video(&self, video_id: &str) -> AppResult<u64> {
        VideoView::find()
            .filter(video_view::Column::VideoId.eq(video_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Number of views of each video in `video_ids`.
    pub async fn count_by_videos(&self, video_ids: &[String]) -> AppResult<HashMap<String, u64>> {
        count_grouped::<VideoView>(self.db.as_ref(), video_view::Column::VideoId, video_ids).await
    }

    /// Get the view history of a channel, most recent first.
    pub async fn find_by_channel(
        &self,
        channel_id: &str,
        limit: u64,
    ) -> AppResult<Vec<video_view::Model>> {
        VideoView::find()
            .filter(video_view::Column::ChannelId.eq(channel_id))
            .order_by_desc(video_view::Column::ViewedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, Set};

    fn create_test_view(id: &str, video_id: &str, channel_id: &str) -> video_view::Model {
        video_view::Model {
            id: id.to_string(),
            video_id: video_id.to_string(),
            channel_id: channel_id.to_string(),
            viewed_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_create() {
        let view = create_test_view("w1", "v1", "ch1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[view.clone()]])
                .into_connection(),
        );

        let repo = VideoViewRepository::new(db);
        let active = video_view::ActiveModel {
            id: Set("w1".to_string()),
            video_id: Set("v1".to_string()),
            channel_id: Set("ch1".to_string()),
            viewed_at: Set(Utc::now().into()),
        };

        let result = repo.create(active).await.unwrap();
        assert_eq!(result.video_id, "v1");
    }

    #[tokio::test]
    async fn test_count_by_video() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(12))
                }]])
                .into_connection(),
        );

        let repo = VideoViewRepository::new(db);
        assert_eq!(repo.count_by_video("v1").await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_count_by_videos_empty_skips_query() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = VideoViewRepository::new(db);
        assert!(repo.count_by_videos(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_channel() {
        let w1 = create_test_view("w1", "v1", "ch1");
        let w2 = create_test_view("w2", "v1", "ch1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[w1, w2]])
                .into_connection(),
        );

        let repo = VideoViewRepository::new(db);
        let result = repo.find_by_channel("ch1", 10).await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
