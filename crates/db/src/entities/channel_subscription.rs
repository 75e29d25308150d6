//! Channel subscription entity (self-referential many-to-many on channel).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "channel_subscription")]
pub struct Model {
    /// The channel that subscribed
    #[sea_orm(primary_key, auto_increment = false)]
    pub subscriber_id: String,

    /// The channel being subscribed to
    #[sea_orm(primary_key, auto_increment = false)]
    pub subscribed_to_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::channel::Entity",
        from = "Column::SubscriberId",
        to = "super::channel::Column::Id",
        on_delete = "Cascade"
    )]
    Subscriber,

    #[sea_orm(
        belongs_to = "super::channel::Entity",
        from = "Column::SubscribedToId",
        to = "super::channel::Column::Id",
        on_delete = "Cascade"
    )]
    SubscribedTo,
}

impl ActiveModelBehavior for ActiveModel {}
