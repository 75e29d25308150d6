//! Channel repository.

use std::sync::Arc;

use crate::entities::{Channel, channel};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use vidshare_common::{AppError, AppResult};

/// Channel repository for database operations.
#[derive(Clone)]
pub struct ChannelRepository {
    db: Arc<DatabaseConnection>,
}

impl ChannelRepository {
    /// Create a new channel repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a channel by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<channel::Model>> {
        Channel::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a channel by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<channel::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ChannelNotFound(id.to_string()))
    }

    /// Find a channel by email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<channel::Model>> {
        Channel::find()
            .filter(channel::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find channels by IDs.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<channel::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        Channel::find()
            .filter(channel::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new channel.
    ///
    /// Email uniqueness is enforced by the table constraint.
    pub async fn create(&self, model: channel::ActiveModel) -> AppResult<channel::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, Set};

    fn create_test_channel(id: &str, email: &str, name: &str) -> channel::Model {
        channel::Model {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            password: "hunter2".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let channel = create_test_channel("ch1", "a@example.com", "Alice");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[channel.clone()]])
                .into_connection(),
        );

        let repo = ChannelRepository::new(db);
        let result = repo.find_by_id("ch1").await.unwrap();

        assert_eq!(result.unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<channel::Model>::new()])
                .into_connection(),
        );

        let repo = ChannelRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::ChannelNotFound(id)) if id == "missing"));
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let channel = create_test_channel("ch1", "a@example.com", "Alice");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[channel.clone()]])
                .into_connection(),
        );

        let repo = ChannelRepository::new(db);
        let result = repo.find_by_email("a@example.com").await.unwrap();

        assert_eq!(result.unwrap().id, "ch1");
    }

    #[tokio::test]
    async fn test_find_by_ids_empty_skips_query() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = ChannelRepository::new(db);
        let result = repo.find_by_ids(&[]).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_create() {
        let channel = create_test_channel("ch1", "a@example.com", "Alice");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[channel.clone()]])
                .into_connection(),
        );

        let repo = ChannelRepository::new(db);
        let active = channel::ActiveModel {
            id: Set("ch1".to_string()),
            email: Set("a@example.com".to_string()),
            name: Set("Alice".to_string()),
            password: Set("hunter2".to_string()),
            ..Default::default()
        };

        let result = repo.create(active).await.unwrap();
        assert_eq!(result.email, "a@example.com");
    }
}
