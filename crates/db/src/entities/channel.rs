//! Channel entity (a user account that owns videos and comments).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "channel")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub email: String,

    /// Display name
    pub name: String,

    /// Credential as supplied at signup; never leaves the crate in output.
    #[serde(skip_serializing)]
    pub password: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::video::Entity")]
    Video,

    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,

    #[sea_orm(has_many = "super::video_view::Entity")]
    VideoView,

    #[sea_orm(has_many = "super::video_rating::Entity")]
    VideoRating,
}

impl Related<super::video::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Video.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::video_view::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VideoView.def()
    }
}

impl Related<super::video_rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VideoRating.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
