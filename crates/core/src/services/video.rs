//! Video service.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::Set;
use tracing::{debug, info};
use vidshare_common::{AppResult, IdGenerator};
use vidshare_db::{
    entities::{RatingType, video, video_rating, video_view},
    repositories::{
        ChannelRepository, CommentRepository, VideoRatingRepository, VideoRepository,
        VideoViewRepository,
    },
};

use crate::shaping::{join_attributes, summarize_video, tally};
use crate::views::{ChannelSummary, CreateVideoInput, VideoCounts, VideoSummary};

/// Video service for uploads, views, ratings and listings.
#[derive(Clone)]
pub struct VideoService {
    video_repo: VideoRepository,
    view_repo: VideoViewRepository,
    rating_repo: VideoRatingRepository,
    channel_repo: ChannelRepository,
    comment_repo: CommentRepository,
    id_gen: IdGenerator,
}

impl VideoService {
    /// Create a new video service.
    #[must_use]
    pub fn new(
        video_repo: VideoRepository,
        view_repo: VideoViewRepository,
        rating_repo: VideoRatingRepository,
        channel_repo: ChannelRepository,
        comment_repo: CommentRepository,
    ) -> Self {
        Self {
            video_repo,
            view_repo,
            rating_repo,
            channel_repo,
            comment_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Store a new video owned by `input.channel_id`.
    ///
    /// Fails with a database error if the owner does not exist.
    pub async fn create_video(&self, input: CreateVideoInput) -> AppResult<video::Model> {
        let model = video::ActiveModel {
            id: Set(input.id),
            title: Set(input.title),
            kind: Set(input.kind),
            attributes: Set(join_attributes(&input.attributes)),
            description: Set(input.description),
            uploaded_at: Set(Utc::now().into()),
            owner_id: Set(input.channel_id),
        };

        let video = self.video_repo.create(model).await?;
        info!(video_id = %video.id, owner_id = %video.owner_id, "Video created");

        Ok(video)
    }

    /// Record that `channel_id` watched `video_id`.
    ///
    /// Every call adds a row; views are not deduplicated per viewer.
    pub async fn view_video(
        &self,
        video_id: &str,
        channel_id: &str,
    ) -> AppResult<video_view::Model> {
        let model = video_view::ActiveModel {
            id: Set(self.id_gen.generate()),
            video_id: Set(video_id.to_string()),
            channel_id: Set(channel_id.to_string()),
            viewed_at: Set(Utc::now().into()),
        };

        let view = self.view_repo.create(model).await?;
        debug!(video_id, channel_id, "Video view recorded");

        Ok(view)
    }

    /// Get a video by ID.
    pub async fn get_video(&self, id: &str) -> AppResult<Option<video::Model>> {
        self.video_repo.find_by_id(id).await
    }

    /// Set the vote of `channel_id` on `video_id` to like.
    pub async fn like_video(
        &self,
        video_id: &str,
        channel_id: &str,
    ) -> AppResult<video_rating::Model> {
        self.rate(video_id, channel_id, RatingType::Like).await
    }

    /// Set the vote of `channel_id` on `video_id` to dislike.
    pub async fn dislike_video(
        &self,
        video_id: &str,
        channel_id: &str,
    ) -> AppResult<video_rating::Model> {
        self.rate(video_id, channel_id, RatingType::Dislike).await
    }

    async fn rate(
        &self,
        video_id: &str,
        channel_id: &str,
        kind: RatingType,
    ) -> AppResult<video_rating::Model> {
        let rating = self.rating_repo.upsert(video_id, channel_id, kind).await?;
        info!(video_id, channel_id, rating = ?kind, "Video rated");
        Ok(rating)
    }

    /// Get the like votes on a video.
    pub async fn get_likes_for_video(&self, video_id: &str) -> AppResult<Vec<video_rating::Model>> {
        self.rating_repo
            .find_by_video_and_kind(video_id, RatingType::Like)
            .await
    }

    /// Count the like votes on a video.
    pub async fn get_like_count_for_video(&self, video_id: &str) -> AppResult<u64> {
        self.rating_repo
            .count_by_video_and_kind(video_id, RatingType::Like)
            .await
    }

    /// List up to `limit` videos owned by a channel, newest first.
    ///
    /// Each entry carries its split attributes, the owner summary, and its
    /// view, like and dislike counts.
    pub async fn get_videos_for_channel(
        &self,
        channel_id: &str,
        limit: u64,
    ) -> AppResult<Vec<VideoSummary>> {
        let videos = self.video_repo.find_by_owner(channel_id, limit).await?;
        if videos.is_empty() {
            return Ok(vec![]);
        }

        let owner = ChannelSummary::from(&self.channel_repo.get_by_id(channel_id).await?);
        let video_ids: Vec<String> = videos.iter().map(|v| v.id.clone()).collect();

        let views = self.view_repo.count_by_videos(&video_ids).await?;
        let mut ratings: HashMap<String, Vec<video_rating::Model>> = HashMap::new();
        for rating in self.rating_repo.find_by_videos(&video_ids).await? {
            ratings
                .entry(rating.video_id.clone())
                .or_default()
                .push(rating);
        }

        debug!(channel_id, count = videos.len(), "Loaded channel videos");

        Ok(videos
            .into_iter()
            .map(|video| {
                let view_count = views.get(&video.id).copied().unwrap_or(0);
                let video_ratings = ratings.remove(&video.id).unwrap_or_default();
                summarize_video(video, owner.clone(), view_count, &video_ratings)
            })
            .collect())
    }

    /// Get comment, view, like and dislike counts of a video.
    ///
    /// Returns `None` if the video does not exist.
    pub async fn get_counts_for_video(&self, video_id: &str) -> AppResult<Option<VideoCounts>> {
        if self.video_repo.find_by_id(video_id).await?.is_none() {
            debug!(video_id, "Counts requested for unknown video");
            return Ok(None);
        }

        let comments = self.comment_repo.count_by_video(video_id).await?;
        let views = self.view_repo.count_by_video(video_id).await?;
        let ratings = tally(&self.rating_repo.find_by_video(video_id).await?);

        Ok(Some(VideoCounts {
            comments,
            views,
            likes: ratings.likes,
            dislikes: ratings.dislikes,
        }))
    }
}
