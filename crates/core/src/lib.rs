//! Data-access layer for vidshare.
//!
//! [`DataAccess`] bundles the channel, video and comment services over one
//! connection pool. The [`shaping`] helpers reduce fetched rows to the
//! output views in [`views`].

pub mod access;
pub mod services;
pub mod shaping;
pub mod views;

pub use access::DataAccess;
pub use services::*;
pub use shaping::{RatingTally, map_comment, partition, split_attributes, tally};
pub use views::*;
