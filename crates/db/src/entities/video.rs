//! Video entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "video")]
pub struct Model {
    /// Chosen by the uploader
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    /// Media type of the upload
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: String,

    /// Comma-delimited attribute list
    #[sea_orm(column_type = "Text")]
    pub attributes: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    pub uploaded_at: DateTimeWithTimeZone,

    #[sea_orm(indexed)]
    pub owner_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::channel::Entity",
        from = "Column::OwnerId",
        to = "super::channel::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,

    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,

    #[sea_orm(has_many = "super::video_view::Entity")]
    VideoView,

    #[sea_orm(has_many = "super::video_rating::Entity")]
    VideoRating,
}

impl Related<super::channel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
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
