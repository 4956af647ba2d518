use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::championship::filter::ResultFilter;
use crate::db::store::{EntityStore, FixtureStore, StoreError};
use crate::models::championship::*;

const FIXTURE_COLUMNS: &str =
    "id, group_id, home_team_id, away_team_id, matchday, kickoff_at, score";

const RESULT_VIEW_SELECT: &str = r#"
    SELECT
        fr.id,
        fr.matchday,
        fr.kickoff_at,
        fr.score,
        g.title AS group_title,
        l.title AS league_title,
        h.team_name AS home_team,
        a.team_name AS away_team
    FROM fixture_results fr
    JOIN league_groups g ON g.id = fr.group_id
    JOIN leagues l ON l.id = g.league_id
    JOIN football_teams h ON h.id = fr.home_team_id
    JOIN football_teams a ON a.id = fr.away_team_id
"#;

/// Postgres-backed championship store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn find_league(&self, title: &str) -> Result<Option<League>, StoreError> {
        let league = sqlx::query_as::<_, League>("SELECT id, title FROM leagues WHERE title = $1")
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;
        Ok(league)
    }

    async fn insert_league(&self, title: &str) -> Result<League, StoreError> {
        sqlx::query_as::<_, League>(
            "INSERT INTO leagues (id, title) VALUES ($1, $2) RETURNING id, title",
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_insert)
    }

    async fn find_group(&self, title: &str, league_id: Uuid) -> Result<Option<Group>, StoreError> {
        let group = sqlx::query_as::<_, Group>(
            "SELECT id, title, league_id FROM league_groups WHERE title = $1 AND league_id = $2",
        )
        .bind(title)
        .bind(league_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(group)
    }

    async fn insert_group(&self, title: &str, league_id: Uuid) -> Result<Group, StoreError> {
        sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO league_groups (id, title, league_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, league_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(league_id)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_insert)
    }

    async fn find_team(&self, name: &str) -> Result<Option<Team>, StoreError> {
        let team = sqlx::query_as::<_, Team>(
            "SELECT id, team_name FROM football_teams WHERE team_name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(team)
    }

    async fn insert_team(&self, name: &str) -> Result<Team, StoreError> {
        sqlx::query_as::<_, Team>(
            "INSERT INTO football_teams (id, team_name) VALUES ($1, $2) RETURNING id, team_name",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_insert)
    }

    async fn get_league(&self, id: Uuid) -> Result<Option<League>, StoreError> {
        let league = sqlx::query_as::<_, League>("SELECT id, title FROM leagues WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(league)
    }

    async fn get_group(&self, id: Uuid) -> Result<Option<Group>, StoreError> {
        let group = sqlx::query_as::<_, Group>(
            "SELECT id, title, league_id FROM league_groups WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(group)
    }

    async fn get_teams(&self, ids: &[Uuid]) -> Result<Vec<Team>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let teams = sqlx::query_as::<_, Team>(
            "SELECT id, team_name FROM football_teams WHERE id = ANY($1)",
        )
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await?;
        Ok(teams)
    }

    async fn list_groups(&self) -> Result<Vec<Group>, StoreError> {
        let groups = sqlx::query_as::<_, Group>(
            r#"
            SELECT g.id, g.title, g.league_id
            FROM league_groups g
            JOIN leagues l ON l.id = g.league_id
            ORDER BY l.title, g.title
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(groups)
    }
}

#[async_trait]
impl FixtureStore for PgStore {
    async fn get_by_group(&self, group_id: Uuid) -> Result<Vec<FixtureResult>, StoreError> {
        let sql = format!(
            "SELECT {} FROM fixture_results WHERE group_id = $1 ORDER BY matchday, kickoff_at, id",
            FIXTURE_COLUMNS
        );
        let fixtures = sqlx::query_as::<_, FixtureResult>(&sql)
            .bind(group_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(fixtures)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<FixtureResult>, StoreError> {
        let sql = format!("SELECT {} FROM fixture_results WHERE id = $1", FIXTURE_COLUMNS);
        let fixture = sqlx::query_as::<_, FixtureResult>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(fixture)
    }

    async fn insert(&self, fixture: NewFixtureResult) -> Result<FixtureResult, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO fixture_results
                (id, group_id, home_team_id, away_team_id, matchday, kickoff_at, score)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            FIXTURE_COLUMNS
        );
        let stored = sqlx::query_as::<_, FixtureResult>(&sql)
            .bind(Uuid::new_v4())
            .bind(fixture.group_id)
            .bind(fixture.home_team_id)
            .bind(fixture.away_team_id)
            .bind(fixture.matchday)
            .bind(fixture.kickoff_at)
            .bind(fixture.score)
            .fetch_one(&self.pool)
            .await?;
        Ok(stored)
    }

    async fn update_score(&self, id: Uuid, score: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE fixture_results SET score = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(score)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn query(&self, filter: &ResultFilter) -> Result<Vec<FixtureResultView>, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(RESULT_VIEW_SELECT);
        filter.push_where(&mut builder);
        builder.push(" ORDER BY fr.kickoff_at, fr.id");

        let results = builder
            .build_query_as::<FixtureResultView>()
            .fetch_all(&self.pool)
            .await?;
        Ok(results)
    }
}
