//! Comment rating repository.

use std::sync::Arc;

use crate::entities::{CommentRating, RatingType, comment_rating};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, sea_query::OnConflict,
};
use vidshare_common::{AppError, AppResult};

/// Comment rating repository for database operations.
#[derive(Clone)]
pub struct CommentRatingRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentRatingRepository {
    /// Create a new comment rating repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert or overwrite the rating of `channel_id` on `comment_id`.
    pub async fn upsert(
        &self,
        comment_id: &str,
        channel_id: &str,
        kind: RatingType,
    ) -> AppResult<comment_rating::Model> {
        let model = comment_rating::ActiveModel {
            comment_id: Set(comment_id.to_string()),
            channel_id: Set(channel_id.to_string()),
            kind: Set(kind),
        };

        CommentRating::insert(model)
            .on_conflict(
                OnConflict::columns([
                    comment_rating::Column::CommentId,
                    comment_rating::Column::ChannelId,
                ])
                .update_column(comment_rating::Column::Kind)
                .to_owned(),
            )
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get every rating on any of `comment_ids`.
    pub async fn find_by_comments(
        &self,
        comment_ids: &[String],
    ) -> AppResult<Vec<comment_rating::Model>> {
        if comment_ids.is_empty() {
            return Ok(vec![]);
        }

        CommentRating::find()
            .filter(comment_rating::Column::CommentId.is_in(comment_ids.to_vec()))
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
        comment_id: &str,
        channel_id: &str,
        kind: RatingType,
    ) -> comment_rating::Model {
        comment_rating::Model {
            comment_id: comment_id.to_string(),
            channel_id: channel_id.to_string(),
            kind,
        }
    }

    #[tokio::test]
    async fn test_upsert() {
        let rating = create_test_rating("c1", "ch1", RatingType::Dislike);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[rating.clone()]])
                .into_connection(),
        );

        let repo = CommentRatingRepository::new(db.clone());
        let result = repo.upsert("c1", "ch1", RatingType::Dislike).await.unwrap();
        drop(repo);

        assert_eq!(result.kind, RatingType::Dislike);
        let log = Arc::try_unwrap(db).ok().unwrap().into_transaction_log();
        assert!(format!("{log:?}").contains("ON CONFLICT"));
    }

    #[tokio::test]
    async fn test_find_by_comments() {
        let r1 = create_test_rating("c1", "ch1", RatingType::Like);
        let r2 = create_test_rating("c2", "ch1", RatingType::Dislike);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[r1, r2]])
                .into_connection(),
        );

        let repo = CommentRatingRepository::new(db);
        let result = repo
            .find_by_comments(&["c1".to_string(), "c2".to_string()])
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
    }
}
