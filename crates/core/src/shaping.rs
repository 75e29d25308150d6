//! Pure result-shaping helpers.
//!
//! Nothing here touches the database: these functions turn rows that the
//! services have already fetched into the output views.

use serde::Serialize;
use vidshare_db::entities::{RatingType, comment_rating, video, video_rating};

use crate::views::{ChannelSummary, CommentRecord, CommentView, VideoSummary};

/// Split `items` into those matching `predicate` and the rest.
///
/// Both halves keep the relative order of the input.
pub fn partition<T, I, F>(items: I, predicate: F) -> (Vec<T>, Vec<T>)
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> bool,
{
    items.into_iter().partition(predicate)
}

/// Split a stored comma-delimited attribute string into its entries.
#[must_use]
pub fn split_attributes(attributes: &str) -> Vec<String> {
    if attributes.is_empty() {
        return Vec::new();
    }

    attributes.split(',').map(ToString::to_string).collect()
}

/// Join attribute entries into the stored comma-delimited form.
///
/// Entries must not contain `,`: such an entry would come back from
/// [`split_attributes`] as several entries.
#[must_use]
pub fn join_attributes(attributes: &[String]) -> String {
    debug_assert!(
        attributes.iter().all(|a| !a.contains(',')),
        "attribute entries must not contain ','"
    );
    attributes.join(",")
}

/// A row that carries a like/dislike vote.
pub trait Rated {
    /// The vote this row records.
    fn rating(&self) -> RatingType;
}

impl Rated for video_rating::Model {
    fn rating(&self) -> RatingType {
        self.kind
    }
}

impl Rated for comment_rating::Model {
    fn rating(&self) -> RatingType {
        self.kind
    }
}

/// Like and dislike counts for one target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RatingTally {
    /// Number of `LIKE` votes.
    pub likes: u64,
    /// Number of `DISLIKE` votes.
    pub dislikes: u64,
}

/// Count likes and dislikes in a list of ratings.
pub fn tally<R: Rated>(ratings: &[R]) -> RatingTally {
    let (likes, dislikes) = partition(ratings, |r| r.rating().is_like());

    RatingTally {
        likes: likes.len() as u64,
        dislikes: dislikes.len() as u64,
    }
}

/// Collapse a comment with its ratings and reply count into its output view.
#[must_use]
pub fn map_comment(record: CommentRecord) -> CommentView {
    let RatingTally { likes, dislikes } = tally(&record.ratings);
    let comment = record.comment;

    CommentView {
        id: comment.id,
        content: comment.content,
        video_id: comment.video_id,
        owner_id: comment.owner_id,
        parent_comment_id: comment.parent_comment_id,
        created_at: comment.created_at,
        owner: record.owner,
        replies: record.reply_count,
        likes,
        dislikes,
    }
}

/// Build the listing entry for a video.
#[must_use]
pub fn summarize_video(
    video: video::Model,
    owner: ChannelSummary,
    views: u64,
    ratings: &[video_rating::Model],
) -> VideoSummary {
    let RatingTally { likes, dislikes } = tally(ratings);

    VideoSummary {
        attributes: split_attributes(&video.attributes),
        id: video.id,
        title: video.title,
        kind: video.kind,
        description: video.description,
        uploaded_at: video.uploaded_at,
        owner,
        views,
        likes,
        dislikes,
    }
}
