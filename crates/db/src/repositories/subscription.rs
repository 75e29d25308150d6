//! Channel subscription repository.

use std::collections::HashMap;
use std::sync::Arc;

use super::count_grouped;
use crate::entities::{ChannelSubscription, channel_subscription};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set,
    sea_query::OnConflict,
};
use vidshare_common::{AppError, AppResult};

/// Subscription repository for database operations.
#[derive(Clone)]
pub struct SubscriptionRepository {
    db: Arc<DatabaseConnection>,
}

impl SubscriptionRepository {
    /// Create a new subscription repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Link `subscriber_id` to `subscribed_to_id`.
    ///
    /// An existing link is left untouched. Returns whether a new link was
    /// written.
    pub async fn subscribe(&self, subscriber_id: &str, subscribed_to_id: &str) -> AppResult<bool> {
        let model = channel_subscription::ActiveModel {
            subscriber_id: Set(subscriber_id.to_string()),
            subscribed_to_id: Set(subscribed_to_id.to_string()),
        };

        let inserted = ChannelSubscription::insert(model)
            .on_conflict(
                OnConflict::columns([
                    channel_subscription::Column::SubscriberId,
                    channel_subscription::Column::SubscribedToId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(inserted > 0)
    }

    /// IDs of the channels `channel_id` is subscribed to.
    pub async fn find_subscribed_ids(
        &self,
        channel_id: &str,
        limit: u64,
    ) -> AppResult<Vec<String>> {
        let rows = ChannelSubscription::find()
            .filter(channel_subscription::Column::SubscriberId.eq(channel_id))
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|s| s.subscribed_to_id).collect())
    }

    /// IDs of the channels subscribed to `channel_id`.
    pub async fn find_subscriber_ids(
        &self,
        channel_id: &str,
        limit: u64,
    ) -> AppResult<Vec<String>> {
        let rows = ChannelSubscription::find()
            .filter(channel_subscription::Column::SubscribedToId.eq(channel_id))
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|s| s.subscriber_id).collect())
    }

    /// Number of subscriptions held by each channel in `channel_ids`.
    pub async fn count_subscribed(
        &self,
        channel_ids: &[String],
    ) -> AppResult<HashMap<String, u64>> {
        count_grouped::<ChannelSubscription>(
            self.db.as_ref(),
            channel_subscription::Column::SubscriberId,
            channel_ids,
        )
        .await
    }

    /// Number of subscribers of each channel in `channel_ids`.
    pub async fn count_subscribers(
        &self,
        channel_ids: &[String],
    ) -> AppResult<HashMap<String, u64>> {
        count_grouped::<ChannelSubscription>(
            self.db.as_ref(),
            channel_subscription::Column::SubscribedToId,
            channel_ids,
        )
        .await
    }
}
