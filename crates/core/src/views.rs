//! Input and output shapes of the data-access operations.

#![allow(missing_docs)]

use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use vidshare_db::entities::{channel, comment, comment_rating, video_rating, video_view};

/// Fields supplied at signup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Which identifier to look a channel up by.
///
/// `email` wins when both are present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelLookup {
    pub email: Option<String>,
    pub id: Option<String>,
}

impl ChannelLookup {
    /// Look up by email.
    #[must_use]
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            id: None,
        }
    }

    /// Look up by ID.
    #[must_use]
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            email: None,
            id: Some(id.into()),
        }
    }
}

/// Fields supplied at upload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoInput {
    /// Chosen by the uploader; at most 32 characters.
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Entries must not contain `,`.
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Owning channel.
    pub channel_id: String,
}

/// Public identity of a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelSummary {
    pub id: String,
    pub name: String,
}

impl From<&channel::Model> for ChannelSummary {
    fn from(channel: &channel::Model) -> Self {
        Self {
            id: channel.id.clone(),
            name: channel.name.clone(),
        }
    }
}

/// A channel without its credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

impl From<channel::Model> for ChannelProfile {
    fn from(channel: channel::Model) -> Self {
        Self {
            id: channel.id,
            email: channel.email,
            name: channel.name,
            created_at: channel.created_at,
        }
    }
}

/// A video as listed on its channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
    pub attributes: Vec<String>,
    pub uploaded_at: DateTimeWithTimeZone,
    pub owner: ChannelSummary,
    pub views: u64,
    pub likes: u64,
    pub dislikes: u64,
}

/// Engagement counters of a single video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VideoCounts {
    pub comments: u64,
    pub views: u64,
    pub likes: u64,
    pub dislikes: u64,
}

/// A comment as fetched, before its ratings are tallied.
#[derive(Debug, Clone)]
pub struct CommentRecord {
    pub comment: comment::Model,
    /// `None` if the owner row is gone.
    pub owner: Option<ChannelSummary>,
    pub ratings: Vec<comment_rating::Model>,
    pub reply_count: u64,
}

/// A comment with its votes and replies reduced to counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub content: String,
    pub video_id: String,
    pub owner_id: String,
    pub parent_comment_id: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub owner: Option<ChannelSummary>,
    pub replies: u64,
    pub likes: u64,
    pub dislikes: u64,
}

/// Activity counters shown next to a related channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelCounts {
    pub videos: u64,
    pub comments: u64,
    pub subscribed: u64,
    pub subscribers: u64,
}

/// A subscribed or subscriber channel inside a [`ChannelGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedChannel {
    #[serde(flatten)]
    pub profile: ChannelProfile,
    pub counts: ChannelCounts,
}

/// A channel together with its content and social neighbourhood.
///
/// Every collection is capped at the configured graph limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelGraph {
    #[serde(flatten)]
    pub channel: ChannelProfile,
    pub videos: Vec<VideoSummary>,
    pub history: Vec<video_view::Model>,
    pub ratings: Vec<video_rating::Model>,
    pub comments: Vec<comment::Model>,
    pub subscribed: Vec<RelatedChannel>,
    pub subscribers: Vec<RelatedChannel>,
}
