//! The data-access facade and its connection lifecycle.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{info, warn};
use vidshare_common::{AppResult, Config, GraphConfig};
use vidshare_db::repositories::{
    ChannelRepository, CommentRatingRepository, CommentRepository, SubscriptionRepository,
    VideoRatingRepository, VideoRepository, VideoViewRepository,
};

use crate::services::{ChannelService, CommentService, VideoService};

/// Entry point to every data-access operation.
///
/// Owns one shared connection pool. Construct it once with [`connect`] (or
/// [`new`] to inject a connection) and release it with [`close`].
///
/// [`connect`]: DataAccess::connect
/// [`new`]: DataAccess::new
/// [`close`]: DataAccess::close
#[derive(Clone)]
pub struct DataAccess {
    db: Arc<DatabaseConnection>,
    channels: ChannelService,
    videos: VideoService,
    comments: CommentService,
}

impl DataAccess {
    /// Open the connection pool described by `config`.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let db = vidshare_db::init(config).await?;
        Ok(Self::new(Arc::new(db), config.graph))
    }

    /// Wire every service onto an existing connection.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>, graph: GraphConfig) -> Self {
        let channel_repo = ChannelRepository::new(db.clone());
        let subscription_repo = SubscriptionRepository::new(db.clone());
        let video_repo = VideoRepository::new(db.clone());
        let view_repo = VideoViewRepository::new(db.clone());
        let video_rating_repo = VideoRatingRepository::new(db.clone());
        let comment_repo = CommentRepository::new(db.clone());
        let comment_rating_repo = CommentRatingRepository::new(db.clone());

        let videos = VideoService::new(
            video_repo.clone(),
            view_repo.clone(),
            video_rating_repo.clone(),
            channel_repo.clone(),
            comment_repo.clone(),
        );
        let comments = CommentService::new(
            comment_repo.clone(),
            comment_rating_repo,
            channel_repo.clone(),
        );
        let channels = ChannelService::new(
            channel_repo,
            subscription_repo,
            video_repo,
            view_repo,
            video_rating_repo,
            comment_repo,
            videos.clone(),
            graph,
        );

        Self {
            db,
            channels,
            videos,
            comments,
        }
    }

    /// Channel operations.
    #[must_use]
    pub const fn channels(&self) -> &ChannelService {
        &self.channels
    }

    /// Video operations.
    #[must_use]
    pub const fn videos(&self) -> &VideoService {
        &self.videos
    }

    /// Comment operations.
    #[must_use]
    pub const fn comments(&self) -> &CommentService {
        &self.comments
    }

    /// The underlying connection.
    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        self.db.as_ref()
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> AppResult<()> {
        vidshare_db::migrate(self.db.as_ref()).await?;
        info!("Schema is up to date");
        Ok(())
    }

    /// Close the connection pool.
    ///
    /// The pool stays open while clones of this facade are alive; only the
    /// last one closes it.
    pub async fn close(self) -> AppResult<()> {
        let Self {
            db,
            channels,
            videos,
            comments,
        } = self;
        drop((channels, videos, comments));

        match Arc::try_unwrap(db) {
            Ok(conn) => {
                vidshare_db::close(conn).await?;
                info!("Database connection closed");
            }
            Err(_) => warn!("Connection still shared; leaving pool open"),
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::views::ChannelLookup;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use vidshare_db::entities::{RatingType, channel, video_rating};

    #[tokio::test]
    async fn test_facade_shares_one_connection() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[channel::Model {
                    id: "ch1".to_string(),
                    email: "ch1@example.com".to_string(),
                    name: "Alice".to_string(),
                    password: "secret".to_string(),
                    created_at: Utc::now().into(),
                }]])
                .append_query_results([[video_rating::Model {
                    video_id: "v1".to_string(),
                    channel_id: "ch1".to_string(),
                    kind: RatingType::Like,
                }]])
                .into_connection(),
        );

        let access = DataAccess::new(db, GraphConfig::default());

        let channel = access
            .channels()
            .find_channel(ChannelLookup::by_id("ch1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(channel.name, "Alice");

        let rating = access.videos().like_video("v1", "ch1").await.unwrap();
        assert_eq!(rating.kind, RatingType::Like);

        access.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_close_with_live_clone_keeps_pool() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let access = DataAccess::new(db, GraphConfig::default());
        let other = access.clone();

        access.close().await.unwrap();
        assert!(
            other
                .channels()
                .find_channel(ChannelLookup::default())
                .await
                .unwrap()
                .is_none()
        );
        other.close().await.unwrap();
    }
}
