//! Comment service.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::Set;
use tracing::{debug, info};
use vidshare_common::{AppResult, IdGenerator};
use vidshare_db::{
    entities::{RatingType, comment, comment_rating},
    repositories::{ChannelRepository, CommentRatingRepository, CommentRepository},
};

use crate::shaping::map_comment;
use crate::views::{ChannelSummary, CommentRecord, CommentView};

/// Comment service for threads, replies and comment ratings.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    rating_repo: CommentRatingRepository,
    channel_repo: ChannelRepository,
    id_gen: IdGenerator,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub fn new(
        comment_repo: CommentRepository,
        rating_repo: CommentRatingRepository,
        channel_repo: ChannelRepository,
    ) -> Self {
        Self {
            comment_repo,
            rating_repo,
            channel_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Post a top-level comment on a video.
    pub async fn create_comment(
        &self,
        content: &str,
        video_id: &str,
        channel_id: &str,
    ) -> AppResult<comment::Model> {
        let comment = self.insert(content, video_id, channel_id, None).await?;
        info!(comment_id = %comment.id, video_id, "Comment created");
        Ok(comment)
    }

    /// Get a comment with its owner and vote counts.
    pub async fn fetch_comment(&self, comment_id: &str) -> AppResult<Option<CommentView>> {
        let Some(comment) = self.comment_repo.find_by_id(comment_id).await? else {
            return Ok(None);
        };

        Ok(self.map_comments(vec![comment]).await?.pop())
    }

    /// Get the direct replies to a comment, oldest first.
    ///
    /// Returns `None` if the parent comment does not exist.
    pub async fn fetch_comment_replies(
        &self,
        comment_id: &str,
    ) -> AppResult<Option<Vec<CommentView>>> {
        if self.comment_repo.find_by_id(comment_id).await?.is_none() {
            debug!(comment_id, "Replies requested for unknown comment");
            return Ok(None);
        }

        let replies = self.comment_repo.find_replies(comment_id).await?;
        self.map_comments(replies).await.map(Some)
    }

    /// Reply to an existing comment.
    ///
    /// The reply is attached to the parent's video. Returns `None` without
    /// writing anything if the parent does not exist.
    pub async fn reply_to_comment(
        &self,
        comment_id: &str,
        content: &str,
        channel_id: &str,
    ) -> AppResult<Option<comment::Model>> {
        let Some(parent) = self.comment_repo.find_by_id(comment_id).await? else {
            debug!(comment_id, "Reply to unknown comment ignored");
            return Ok(None);
        };

        let reply = self
            .insert(content, &parent.video_id, channel_id, Some(parent.id.clone()))
            .await?;
        info!(comment_id = %reply.id, parent_id = %parent.id, "Reply created");

        Ok(Some(reply))
    }

    /// Get the top-level comments of a video, oldest first.
    pub async fn fetch_comments(&self, video_id: &str) -> AppResult<Vec<CommentView>> {
        let comments = self.comment_repo.find_top_level_by_video(video_id).await?;
        self.map_comments(comments).await
    }

    /// Set the vote of `channel_id` on `comment_id` to like.
    pub async fn like_comment(
        &self,
        comment_id: &str,
        channel_id: &str,
    ) -> AppResult<comment_rating::Model> {
        self.rate(comment_id, channel_id, RatingType::Like).await
    }

    /// Set the vote of `channel_id` on `comment_id` to dislike.
    pub async fn dislike_comment(
        &self,
        comment_id: &str,
        channel_id: &str,
    ) -> AppResult<comment_rating::Model> {
        self.rate(comment_id, channel_id, RatingType::Dislike).await
    }

    async fn rate(
        &self,
        comment_id: &str,
        channel_id: &str,
        kind: RatingType,
    ) -> AppResult<comment_rating::Model> {
        let rating = self.rating_repo.upsert(comment_id, channel_id, kind).await?;
        info!(comment_id, channel_id, rating = ?kind, "Comment rated");
        Ok(rating)
    }

    async fn insert(
        &self,
        content: &str,
        video_id: &str,
        channel_id: &str,
        parent_comment_id: Option<String>,
    ) -> AppResult<comment::Model> {
        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            content: Set(content.to_string()),
            video_id: Set(video_id.to_string()),
            owner_id: Set(channel_id.to_string()),
            parent_comment_id: Set(parent_comment_id),
            created_at: Set(Utc::now().into()),
        };

        self.comment_repo.create(model).await
    }

    /// Attach owners, ratings and reply counts, then map each comment.
    ///
    /// Issues one query per concern regardless of how many comments are
    /// passed.
    async fn map_comments(&self, comments: Vec<comment::Model>) -> AppResult<Vec<CommentView>> {
        if comments.is_empty() {
            return Ok(vec![]);
        }

        let comment_ids: Vec<String> = comments.iter().map(|c| c.id.clone()).collect();
        let mut owner_ids: Vec<String> = comments.iter().map(|c| c.owner_id.clone()).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();

        let owners: HashMap<String, ChannelSummary> = self
            .channel_repo
            .find_by_ids(&owner_ids)
            .await?
            .iter()
            .map(|c| (c.id.clone(), ChannelSummary::from(c)))
            .collect();

        let mut ratings: HashMap<String, Vec<comment_rating::Model>> = HashMap::new();
        for rating in self.rating_repo.find_by_comments(&comment_ids).await? {
            ratings
                .entry(rating.comment_id.clone())
                .or_default()
                .push(rating);
        }

        let reply_counts = self.comment_repo.count_replies(&comment_ids).await?;

        Ok(comments
            .into_iter()
            .map(|comment| {
                map_comment(CommentRecord {
                    owner: owners.get(&comment.owner_id).cloned(),
                    ratings: ratings.remove(&comment.id).unwrap_or_default(),
                    reply_count: reply_counts.get(&comment.id).copied().unwrap_or(0),
                    comment,
                })
            })
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, Value};
    use std::sync::Arc;
    use vidshare_db::entities::channel;

    fn create_test_comment(id: &str, parent: Option<&str>) -> comment::Model {
        comment::Model {
            id: id.to_string(),
            content: format!("comment {id}"),
            video_id: "v1".to_string(),
            owner_id: "ch1".to_string(),
            parent_comment_id: parent.map(ToString::to_string),
            created_at: Utc::now().into(),
        }
    }

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

    fn create_test_channel(id: &str) -> channel::Model {
        channel::Model {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            name: "Alice".to_string(),
            password: "secret".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn empty_db() -> Arc<DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    fn service(
        comment_db: Arc<DatabaseConnection>,
        rating_db: Arc<DatabaseConnection>,
        channel_db: Arc<DatabaseConnection>,
    ) -> CommentService {
        CommentService::new(
            CommentRepository::new(comment_db),
            CommentRatingRepository::new(rating_db),
            ChannelRepository::new(channel_db),
        )
    }

    #[tokio::test]
    async fn test_create_comment_is_top_level() {
        let comment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_comment("c1", None)]])
                .into_connection(),
        );

        let service = service(comment_db, empty_db(), empty_db());
        let comment = service.create_comment("comment c1", "v1", "ch1").await.unwrap();

        assert!(comment.parent_comment_id.is_none());
    }

    #[tokio::test]
    async fn test_fetch_comment_maps_votes() {
        let comment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_comment("c1", None)]])
                .append_query_results([[maplit::btreemap! {
                    "key" => Value::from("c1"),
                    "count" => Value::BigInt(Some(3)),
                }]])
                .into_connection(),
        );
        let rating_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    create_test_rating("c1", "ch2", RatingType::Like),
                    create_test_rating("c1", "ch3", RatingType::Like),
                    create_test_rating("c1", "ch4", RatingType::Dislike),
                ]])
                .into_connection(),
        );
        let channel_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_channel("ch1")]])
                .into_connection(),
        );

        let service = service(comment_db, rating_db, channel_db);
        let view = service.fetch_comment("c1").await.unwrap().unwrap();

        assert_eq!(view.likes, 2);
        assert_eq!(view.dislikes, 1);
        assert_eq!(view.replies, 3);
        assert_eq!(view.owner.unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn test_fetch_comment_not_found() {
        let comment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<comment::Model>::new()])
                .into_connection(),
        );

        let service = service(comment_db, empty_db(), empty_db());
        assert!(service.fetch_comment("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reply_to_missing_comment_does_not_insert() {
        let comment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<comment::Model>::new()])
                .into_connection(),
        );

        let service = service(comment_db.clone(), empty_db(), empty_db());
        let result = service.reply_to_comment("missing", "hi", "ch2").await.unwrap();
        drop(service);

        assert!(result.is_none());
        let log = Arc::try_unwrap(comment_db).ok().unwrap().into_transaction_log();
        assert_eq!(log.len(), 1);
        assert!(!format!("{log:?}").contains("INSERT"));
    }

    #[tokio::test]
    async fn test_reply_inherits_parent_video() {
        let mut parent = create_test_comment("c1", None);
        parent.video_id = "v9".to_string();
        let mut reply = create_test_comment("c2", Some("c1"));
        reply.video_id = "v9".to_string();

        let comment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[parent]])
                .append_query_results([[reply]])
                .into_connection(),
        );

        let service = service(comment_db.clone(), empty_db(), empty_db());
        let result = service
            .reply_to_comment("c1", "hi", "ch2")
            .await
            .unwrap()
            .unwrap();
        drop(service);

        assert_eq!(result.parent_comment_id.as_deref(), Some("c1"));
        let log = Arc::try_unwrap(comment_db).ok().unwrap().into_transaction_log();
        let insert = format!("{:?}", log[1]);
        assert!(insert.contains("INSERT"));
        assert!(insert.contains("v9"));
    }

    #[tokio::test]
    async fn test_fetch_replies_of_missing_comment() {
        let comment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<comment::Model>::new()])
                .into_connection(),
        );

        let service = service(comment_db, empty_db(), empty_db());
        assert!(service.fetch_comment_replies("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_replies_without_replies() {
        let comment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_comment("c1", None)]])
                .append_query_results([Vec::<comment::Model>::new()])
                .into_connection(),
        );

        let service = service(comment_db, empty_db(), empty_db());
        let replies = service.fetch_comment_replies("c1").await.unwrap().unwrap();

        assert!(replies.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_comments_without_ratings() {
        let comment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    create_test_comment("c1", None),
                    create_test_comment("c2", None),
                ]])
                .append_query_results([Vec::<std::collections::BTreeMap<&str, Value>>::new()])
                .into_connection(),
        );
        let rating_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<comment_rating::Model>::new()])
                .into_connection(),
        );
        let channel_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_channel("ch1")]])
                .into_connection(),
        );

        let service = service(comment_db, rating_db, channel_db);
        let comments = service.fetch_comments("v1").await.unwrap();

        assert_eq!(comments.len(), 2);
        assert!(
            comments
                .iter()
                .all(|c| c.likes == 0 && c.dislikes == 0 && c.replies == 0)
        );
    }

    #[tokio::test]
    async fn test_dislike_comment() {
        let rating_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_rating("c1", "ch1", RatingType::Dislike)]])
                .into_connection(),
        );

        let service = service(empty_db(), rating_db, empty_db());
        let rating = service.dislike_comment("c1", "ch1").await.unwrap();

        assert_eq!(rating.kind, RatingType::Dislike);
    }
}
