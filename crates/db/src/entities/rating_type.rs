//! Rating kind shared by video and comment ratings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A like or dislike vote.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum RatingType {
    #[sea_orm(string_value = "LIKE")]
    Like,
    #[sea_orm(string_value = "DISLIKE")]
    Dislike,
}

impl RatingType {
    /// Whether this vote counts as a like.
    #[must_use]
    pub const fn is_like(self) -> bool {
        matches!(self, Self::Like)
    }
}
