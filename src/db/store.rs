//! Storage boundary for the championship workflows.
//!
//! [`crate::db::championship::PgStore`] is the Postgres implementation used by
//! the service; tests use an in-memory one.

use async_trait::async_trait;
use uuid::Uuid;

use crate::championship::filter::ResultFilter;
use crate::models::championship::*;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A natural-key uniqueness constraint rejected an insert
    #[error("Duplicate natural key")]
    Duplicate,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classify an error raised by an INSERT, separating unique violations.
    pub fn from_insert(error: sqlx::Error) -> Self {
        let unique_violation = error
            .as_database_error()
            .map_or(false, |db_error| db_error.is_unique_violation());

        if unique_violation {
            StoreError::Duplicate
        } else {
            StoreError::Database(error)
        }
    }
}

/// Leagues, groups and teams, addressed by id or natural key.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn find_league(&self, title: &str) -> Result<Option<League>, StoreError>;

    /// Fails with [`StoreError::Duplicate`] if the title is taken.
    async fn insert_league(&self, title: &str) -> Result<League, StoreError>;

    async fn find_group(&self, title: &str, league_id: Uuid) -> Result<Option<Group>, StoreError>;

    /// Fails with [`StoreError::Duplicate`] if the league already has this group.
    async fn insert_group(&self, title: &str, league_id: Uuid) -> Result<Group, StoreError>;

    async fn find_team(&self, name: &str) -> Result<Option<Team>, StoreError>;

    /// Fails with [`StoreError::Duplicate`] if the name is taken.
    async fn insert_team(&self, name: &str) -> Result<Team, StoreError>;

    async fn get_league(&self, id: Uuid) -> Result<Option<League>, StoreError>;

    async fn get_group(&self, id: Uuid) -> Result<Option<Group>, StoreError>;

    /// Teams among `ids` that exist, in no particular order.
    async fn get_teams(&self, ids: &[Uuid]) -> Result<Vec<Team>, StoreError>;

    /// All groups ordered by league title, then group title.
    async fn list_groups(&self) -> Result<Vec<Group>, StoreError>;
}

#[async_trait]
pub trait FixtureStore: Send + Sync {
    async fn get_by_group(&self, group_id: Uuid) -> Result<Vec<FixtureResult>, StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<FixtureResult>, StoreError>;

    async fn insert(&self, fixture: NewFixtureResult) -> Result<FixtureResult, StoreError>;

    /// Overwrite the score only. Returns false if no such fixture exists.
    async fn update_score(&self, id: Uuid, score: &str) -> Result<bool, StoreError>;

    /// Fixture results matching `filter`, ordered by kickoff then id.
    async fn query(&self, filter: &ResultFilter) -> Result<Vec<FixtureResultView>, StoreError>;
}
