//! Repositories: one per table, each wrapping the shared connection.

use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QuerySelect,
    sea_query::Expr,
};
use vidshare_common::{AppError, AppResult};

pub mod channel;
pub mod comment;
pub mod comment_rating;
pub mod subscription;
pub mod video;
pub mod video_rating;
pub mod video_view;

pub use channel::ChannelRepository;
pub use comment::CommentRepository;
pub use comment_rating::CommentRatingRepository;
pub use subscription::SubscriptionRepository;
pub use video::VideoRepository;
pub use video_rating::VideoRatingRepository;
pub use video_view::VideoViewRepository;

/// Row of a `GROUP BY key` count query.
#[derive(Debug, FromQueryResult)]
struct GroupCount {
    key: String,
    count: i64,
}

/// Count rows of `E` grouped by `column`, restricted to `keys`.
///
/// Keys with no rows are absent from the returned map.
async fn count_grouped<E>(
    db: &DatabaseConnection,
    column: E::Column,
    keys: &[String],
) -> AppResult<HashMap<String, u64>>
where
    E: EntityTrait,
{
    if keys.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = E::find()
        .select_only()
        .column_as(column, "key")
        .column_as(Expr::col(column).count(), "count")
        .filter(column.is_in(keys.iter().cloned()))
        .group_by(column)
        .into_model::<GroupCount>()
        .all(db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(rows
        .into_iter()
        .map(|row| (row.key, row.count.max(0) as u64))
        .collect())
}
