//! Data-access services, one per aggregate.

pub mod channel;
pub mod comment;
pub mod video;

pub use channel::ChannelService;
pub use comment::CommentService;
pub use video::VideoService;
