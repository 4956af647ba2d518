//! In-memory store for unit tests of the championship workflows.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::championship::filter::ResultFilter;
use crate::db::store::{EntityStore, FixtureStore, StoreError};
use crate::models::championship::*;

#[derive(Default)]
struct Tables {
    leagues: Vec<League>,
    groups: Vec<Group>,
    teams: Vec<Team>,
    fixtures: Vec<FixtureResult>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    missed_lookups: AtomicUsize,
    failing_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next natural-key lookup report nothing, as if a concurrent
    /// writer inserted the row right after it.
    pub fn miss_next_lookup(&self) {
        self.missed_lookups.fetch_add(1, Ordering::SeqCst);
    }

    /// Make every subsequent write fail with a database error.
    pub fn fail_writes(&self) {
        self.failing_writes.store(true, Ordering::SeqCst);
    }

    pub fn league_count(&self) -> usize {
        self.tables().leagues.len()
    }

    pub fn group_count(&self) -> usize {
        self.tables().groups.len()
    }

    pub fn team_count(&self) -> usize {
        self.tables().teams.len()
    }

    pub fn fixtures(&self) -> Vec<FixtureResult> {
        self.tables().fixtures.clone()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store lock poisoned")
    }

    fn lookup<T: Clone>(&self, found: Option<&T>) -> Option<T> {
        let missed = self
            .missed_lookups
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if missed {
            None
        } else {
            found.cloned()
        }
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.failing_writes.load(Ordering::SeqCst) {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn find_league(&self, title: &str) -> Result<Option<League>, StoreError> {
        let tables = self.tables();
        Ok(self.lookup(tables.leagues.iter().find(|l| l.title == title)))
    }

    async fn insert_league(&self, title: &str) -> Result<League, StoreError> {
        self.check_write()?;
        let mut tables = self.tables();
        if tables.leagues.iter().any(|l| l.title == title) {
            return Err(StoreError::Duplicate);
        }
        let league = League { id: Uuid::new_v4(), title: title.to_string() };
        tables.leagues.push(league.clone());
        Ok(league)
    }

    async fn find_group(&self, title: &str, league_id: Uuid) -> Result<Option<Group>, StoreError> {
        let tables = self.tables();
        Ok(self.lookup(
            tables
                .groups
                .iter()
                .find(|g| g.title == title && g.league_id == league_id),
        ))
    }

    async fn insert_group(&self, title: &str, league_id: Uuid) -> Result<Group, StoreError> {
        self.check_write()?;
        let mut tables = self.tables();
        if tables.groups.iter().any(|g| g.title == title && g.league_id == league_id) {
            return Err(StoreError::Duplicate);
        }
        let group = Group { id: Uuid::new_v4(), title: title.to_string(), league_id };
        tables.groups.push(group.clone());
        Ok(group)
    }

    async fn find_team(&self, name: &str) -> Result<Option<Team>, StoreError> {
        let tables = self.tables();
        Ok(self.lookup(tables.teams.iter().find(|t| t.name == name)))
    }

    async fn insert_team(&self, name: &str) -> Result<Team, StoreError> {
        self.check_write()?;
        let mut tables = self.tables();
        if tables.teams.iter().any(|t| t.name == name) {
            return Err(StoreError::Duplicate);
        }
        let team = Team { id: Uuid::new_v4(), name: name.to_string() };
        tables.teams.push(team.clone());
        Ok(team)
    }

    async fn get_league(&self, id: Uuid) -> Result<Option<League>, StoreError> {
        Ok(self.tables().leagues.iter().find(|l| l.id == id).cloned())
    }

    async fn get_group(&self, id: Uuid) -> Result<Option<Group>, StoreError> {
        Ok(self.tables().groups.iter().find(|g| g.id == id).cloned())
    }

    async fn get_teams(&self, ids: &[Uuid]) -> Result<Vec<Team>, StoreError> {
        Ok(self
            .tables()
            .teams
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn list_groups(&self) -> Result<Vec<Group>, StoreError> {
        let tables = self.tables();
        let league_title = |league_id: Uuid| {
            tables
                .leagues
                .iter()
                .find(|l| l.id == league_id)
                .map(|l| l.title.clone())
                .unwrap_or_default()
        };
        let mut groups: Vec<(String, Group)> = tables
            .groups
            .iter()
            .map(|g| (league_title(g.league_id), g.clone()))
            .collect();
        groups.sort_by(|(la, ga), (lb, gb)| la.cmp(lb).then_with(|| ga.title.cmp(&gb.title)));
        Ok(groups.into_iter().map(|(_, g)| g).collect())
    }
}

#[async_trait]
impl FixtureStore for MemoryStore {
    async fn get_by_group(&self, group_id: Uuid) -> Result<Vec<FixtureResult>, StoreError> {
        Ok(self
            .tables()
            .fixtures
            .iter()
            .filter(|f| f.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<FixtureResult>, StoreError> {
        Ok(self.tables().fixtures.iter().find(|f| f.id == id).cloned())
    }

    async fn insert(&self, fixture: NewFixtureResult) -> Result<FixtureResult, StoreError> {
        self.check_write()?;
        let stored = FixtureResult {
            id: Uuid::new_v4(),
            group_id: fixture.group_id,
            home_team_id: fixture.home_team_id,
            away_team_id: fixture.away_team_id,
            matchday: fixture.matchday,
            kickoff_at: fixture.kickoff_at,
            score: fixture.score,
        };
        self.tables().fixtures.push(stored.clone());
        Ok(stored)
    }

    async fn update_score(&self, id: Uuid, score: &str) -> Result<bool, StoreError> {
        self.check_write()?;
        let mut tables = self.tables();
        match tables.fixtures.iter_mut().find(|f| f.id == id) {
            Some(fixture) => {
                fixture.score = Some(score.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn query(&self, filter: &ResultFilter) -> Result<Vec<FixtureResultView>, StoreError> {
        let tables = self.tables();
        let team_name = |id: Uuid| {
            tables
                .teams
                .iter()
                .find(|t| t.id == id)
                .map(|t| t.name.clone())
                .unwrap_or_default()
        };

        let mut views = Vec::new();
        for fixture in &tables.fixtures {
            let Some(group) = tables.groups.iter().find(|g| g.id == fixture.group_id) else {
                continue;
            };
            let Some(league) = tables.leagues.iter().find(|l| l.id == group.league_id) else {
                continue;
            };
            let view = FixtureResultView {
                id: fixture.id,
                matchday: fixture.matchday,
                kickoff_at: fixture.kickoff_at,
                score: fixture.score.clone(),
                group_title: group.title.clone(),
                league_title: league.title.clone(),
                home_team: team_name(fixture.home_team_id),
                away_team: team_name(fixture.away_team_id),
            };
            if filter.matches(&view) {
                views.push(view);
            }
        }
        views.sort_by(|a, b| a.kickoff_at.cmp(&b.kickoff_at).then(a.id.cmp(&b.id)));
        Ok(views)
    }
}
