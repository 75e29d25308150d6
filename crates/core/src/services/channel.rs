//! Channel service.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::Set;
use tracing::{debug, info};
use vidshare_common::{AppResult, GraphConfig, IdGenerator};
use vidshare_db::{
    entities::channel,
    repositories::{
        ChannelRepository, CommentRepository, SubscriptionRepository, VideoRatingRepository,
        VideoRepository, VideoViewRepository,
    },
};

use crate::services::video::VideoService;
use crate::views::{
    ChannelCounts, ChannelGraph, ChannelLookup, ChannelProfile, CreateChannelInput,
    RelatedChannel,
};

/// Channel service for accounts, subscriptions and the channel graph.
#[derive(Clone)]
pub struct ChannelService {
    channel_repo: ChannelRepository,
    subscription_repo: SubscriptionRepository,
    video_repo: VideoRepository,
    view_repo: VideoViewRepository,
    rating_repo: VideoRatingRepository,
    comment_repo: CommentRepository,
    video_service: VideoService,
    graph: GraphConfig,
    id_gen: IdGenerator,
}

impl ChannelService {
    /// Create a new channel service.
    #[must_use]
    pub fn new(
        channel_repo: ChannelRepository,
        subscription_repo: SubscriptionRepository,
        video_repo: VideoRepository,
        view_repo: VideoViewRepository,
        rating_repo: VideoRatingRepository,
        comment_repo: CommentRepository,
        video_service: VideoService,
        graph: GraphConfig,
    ) -> Self {
        Self {
            channel_repo,
            subscription_repo,
            video_repo,
            view_repo,
            rating_repo,
            comment_repo,
            video_service,
            graph,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new channel.
    ///
    /// The password is stored as given. A duplicate email is rejected by the
    /// table's unique constraint and surfaces as a database error.
    pub async fn create_channel(&self, input: CreateChannelInput) -> AppResult<channel::Model> {
        let model = channel::ActiveModel {
            id: Set(self.id_gen.generate()),
            email: Set(input.email),
            name: Set(input.name),
            password: Set(input.password),
            created_at: Set(Utc::now().into()),
        };

        let channel = self.channel_repo.create(model).await?;
        info!(channel_id = %channel.id, "Channel created");

        Ok(channel)
    }

    /// Find a channel by email or by ID.
    ///
    /// Email takes precedence. An empty string counts as not given. Returns
    /// `None` without querying when neither identifier is given.
    pub async fn find_channel(&self, lookup: ChannelLookup) -> AppResult<Option<channel::Model>> {
        let email = lookup.email.filter(|e| !e.is_empty());
        let id = lookup.id.filter(|i| !i.is_empty());

        match (email, id) {
            (Some(email), _) => self.channel_repo.find_by_email(&email).await,
            (None, Some(id)) => self.channel_repo.find_by_id(&id).await,
            (None, None) => {
                debug!("Channel lookup without email or id");
                Ok(None)
            }
        }
    }

    /// Subscribe `channel_id` to `sub_channel_id`.
    ///
    /// Subscribing twice is a no-op. Returns whether a new subscription was
    /// recorded.
    pub async fn subscribe(&self, channel_id: &str, sub_channel_id: &str) -> AppResult<bool> {
        let created = self
            .subscription_repo
            .subscribe(channel_id, sub_channel_id)
            .await?;

        if created {
            info!(channel_id, sub_channel_id, "Subscription created");
        } else {
            debug!(channel_id, sub_channel_id, "Already subscribed");
        }

        Ok(created)
    }

    /// Load a channel with its videos, view history, ratings, comments and
    /// subscription neighbourhood.
    ///
    /// Every collection holds at most `graph.collection_limit` entries.
    /// Related channels carry counts instead of their own collections.
    pub async fn get_channel_with_joins(
        &self,
        channel_id: &str,
    ) -> AppResult<Option<ChannelGraph>> {
        let Some(channel) = self.channel_repo.find_by_id(channel_id).await? else {
            return Ok(None);
        };
        let limit = self.graph.collection_limit;

        let videos = self
            .video_service
            .get_videos_for_channel(channel_id, limit)
            .await?;
        let history = self.view_repo.find_by_channel(channel_id, limit).await?;
        let ratings = self.rating_repo.find_by_channel(channel_id, limit).await?;
        let comments = self.comment_repo.find_by_owner(channel_id, limit).await?;

        let subscribed_ids = self
            .subscription_repo
            .find_subscribed_ids(channel_id, limit)
            .await?;
        let subscriber_ids = self
            .subscription_repo
            .find_subscriber_ids(channel_id, limit)
            .await?;
        let (subscribed, subscribers) = self
            .related_channels(&subscribed_ids, &subscriber_ids)
            .await?;

        debug!(
            channel_id,
            videos = videos.len(),
            subscribed = subscribed.len(),
            subscribers = subscribers.len(),
            "Loaded channel graph"
        );

        Ok(Some(ChannelGraph {
            channel: ChannelProfile::from(channel),
            videos,
            history,
            ratings,
            comments,
            subscribed,
            subscribers,
        }))
    }

    /// Resolve both ID lists into related channels with their counts.
    ///
    /// Each list keeps its input order. IDs whose channel row is gone are
    /// skipped.
    async fn related_channels(
        &self,
        subscribed_ids: &[String],
        subscriber_ids: &[String],
    ) -> AppResult<(Vec<RelatedChannel>, Vec<RelatedChannel>)> {
        let mut ids: Vec<String> = subscribed_ids
            .iter()
            .chain(subscriber_ids)
            .cloned()
            .collect();
        ids.sort_unstable();
        ids.dedup();

        let channels: HashMap<String, channel::Model> = self
            .channel_repo
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();
        let videos = self.video_repo.count_by_owners(&ids).await?;
        let comments = self.comment_repo.count_by_owners(&ids).await?;
        let subscribed = self.subscription_repo.count_subscribed(&ids).await?;
        let subscribers = self.subscription_repo.count_subscribers(&ids).await?;

        let count = |map: &HashMap<String, u64>, id: &str| map.get(id).copied().unwrap_or(0);
        let resolve = |id: &String| {
            channels.get(id).map(|c| RelatedChannel {
                profile: ChannelProfile::from(c.clone()),
                counts: ChannelCounts {
                    videos: count(&videos, id),
                    comments: count(&comments, id),
                    subscribed: count(&subscribed, id),
                    subscribers: count(&subscribers, id),
                },
            })
        };

        Ok((
            subscribed_ids.iter().filter_map(&resolve).collect(),
            subscriber_ids.iter().filter_map(&resolve).collect(),
        ))
    }
}
