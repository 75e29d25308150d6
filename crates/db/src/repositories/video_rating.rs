//! Video rating repository.

use std::sync::Arc;

use crate::entities::{RatingType, VideoRating, video_rating};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
    sea_query::OnConflict,
};
use vidshare_common::{AppError, AppResult};

/// Video rating repository for database operations.
#[derive(Clone)]
pub struct VideoRatingRepository {
    db: Arc<DatabaseConnection>,
}

impl VideoRatingRepository {
    /// Create a new video rating repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert or overwrite the rating of `channel_id` on `video_id`.
    ///
    /// A single `INSERT .. ON CONFLICT DO UPDATE` statement; concurrent
    /// writers on the same pair resolve inside the database.
    pub async fn upsert(
        &self,
        video_id: &str,
        channel_id: &str,
        kind: RatingType,
    ) -> AppResult<video_rating::Model> {
        let model = video_rating::ActiveModel {
            video_id: Set(video_id.to_string()),
            channel_id: Set(channel_id.to_string()),
            kind: Set(kind),
        };

        VideoRating::insert(model)
            .on_conflict(
                OnConflict::columns([
                    video_rating::Column::VideoId,
                    video_rating::Column::ChannelId,
                ])
                .update_column(video_rating::Column::Kind)
                .to_owned(),
            )
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get every rating on a video.
    pub async fn find_by_video(&self, video_id: &str) -> AppResult<Vec<video_rating::Model>> {
        VideoRating::find()
            .filter(video_rating::Column::VideoId.eq(video_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the ratings of one kind on a video.
    pub async fn find_by_video_and_kind(
        &self,
        video_id: &str,
        kind: RatingType,
    ) -> AppResult<Vec<video_rating::Model>> {
        VideoRating::find()
            .filter(video_rating::Column::VideoId.eq(video_id))
            .filter(video_rating::Column::Kind.eq(kind))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count the ratings of one kind on a video.
    pub async fn count_by_video_and_kind(
        &self,
        video_id: &str,
        kind: RatingType,
    ) -> AppResult<u64> {
        VideoRating::find()
            .filter(video_rating::Column::VideoId.eq(video_id))
            .filter(video_rating::Column::Kind.eq(kind))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get every rating on any of `video_ids`.
    pub async fn find_by_videos(
        &self,
        video_ids: &[String],
    ) -> AppResult<Vec<video_rating::Model>> {
        if video_ids.is_empty() {
            return Ok(vec![]);
        }

        VideoRating::find()
            .filter(video_rating::Column::VideoId.is_in(video_ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the ratings cast by a channel.
    pub async fn find_by_channel(
        &self,
        channel_id: &str,
        limit: u64,
    ) -> AppResult<Vec<video_rating::Model>> {
        VideoRating::find()
            .filter(video_rating::Column::ChannelId.eq(channel_id))
            .order_by_asc(video_rating::Column::VideoId)
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
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_rating(
        video_id: &str,
        channel_id: &str,
        kind: RatingType,
    ) -> video_rating::Model {
        video_rating::Model {
            video_id: video_id.to_string(),
            channel_id: channel_id.to_string(),
            kind,
        }
    }

    #[tokio::test]
    async fn test_upsert_returns_rating() {
        let rating = create_test_rating("v1", "ch1", RatingType::Like);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[rating.clone()]])
                .into_connection(),
        );

        let repo = VideoRatingRepository::new(db);
        let result = repo.upsert("v1", "ch1", RatingType::Like).await.unwrap();

        assert_eq!(result, rating);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_on_conflict() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([
                    [create_test_rating("v1", "ch1", RatingType::Like)],
                    [create_test_rating("v1", "ch1", RatingType::Dislike)],
                ])
                .into_connection(),
        );

        let repo = VideoRatingRepository::new(db.clone());
        repo.upsert("v1", "ch1", RatingType::Like).await.unwrap();
        let second = repo.upsert("v1", "ch1", RatingType::Dislike).await.unwrap();
        drop(repo);

        assert_eq!(second.kind, RatingType::Dislike);

        let log = Arc::try_unwrap(db).ok().unwrap().into_transaction_log();
        assert_eq!(log.len(), 2);
        let sql = format!("{log:?}");
        assert!(sql.contains("ON CONFLICT"));
        assert!(sql.contains("DO UPDATE"));
    }

    #[tokio::test]
    async fn test_find_by_video_and_kind() {
        let r1 = create_test_rating("v1", "ch1", RatingType::Like);
        let r2 = create_test_rating("v1", "ch2", RatingType::Like);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[r1, r2]])
                .into_connection(),
        );

        let repo = VideoRatingRepository::new(db);
        let result = repo
            .find_by_video_and_kind("v1", RatingType::Like)
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|r| r.kind == RatingType::Like));
    }

    #[tokio::test]
    async fn test_count_by_video_and_kind() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(7))
                }]])
                .into_connection(),
        );

        let repo = VideoRatingRepository::new(db);
        let count = repo
            .count_by_video_and_kind("v1", RatingType::Like)
            .await
            .unwrap();

        assert_eq!(count, 7);
    }

    #[tokio::test]
    async fn test_find_by_videos_empty_skips_query() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = VideoRatingRepository::new(db);
        assert!(repo.find_by_videos(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_channel_is_ordered_and_capped() {
        let r1 = create_test_rating("v1", "ch1", RatingType::Like);
        let r2 = create_test_rating("v2", "ch1", RatingType::Dislike);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[r1, r2]])
                .into_connection(),
        );

        let repo = VideoRatingRepository::new(Arc::clone(&db));
        let result = repo.find_by_channel("ch1", 2).await.unwrap();
        drop(repo);

        assert_eq!(result.len(), 2);

        let sql = format!("{:?}", Arc::try_unwrap(db).ok().unwrap().into_transaction_log());
        assert!(sql.contains(r#"ORDER BY \"video_rating\".\"video_id\" ASC"#));
        assert!(sql.contains("LIMIT"));
    }
}
