//! Database entities.

#![allow(missing_docs)]

pub mod channel;
pub mod channel_subscription;
pub mod comment;
pub mod comment_rating;
pub mod rating_type;
pub mod video;
pub mod video_rating;
pub mod video_view;

pub use channel::Entity as Channel;
pub use channel_subscription::Entity as ChannelSubscription;
pub use comment::Entity as Comment;
pub use comment_rating::Entity as CommentRating;
pub use rating_type::RatingType;
pub use video::Entity as Video;
pub use video_rating::Entity as VideoRating;
pub use video_view::Entity as VideoView;
