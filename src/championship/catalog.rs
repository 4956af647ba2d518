use std::future::Future;

use uuid::Uuid;

use crate::championship::ChampionshipError;
use crate::db::store::{EntityStore, StoreError};
use crate::models::championship::{Group, League, Team};

/// Look an entity up by natural key, creating it if it does not exist yet.
///
/// When the insert loses a race against a concurrent writer the unique
/// index rejects it; the winner's row is fetched instead.
async fn resolve_or_create<T, Find, FindFut, Insert, InsertFut>(
    entity: &'static str,
    key: &str,
    find: Find,
    insert: Insert,
) -> Result<T, ChampionshipError>
where
    Find: Fn() -> FindFut,
    FindFut: Future<Output = Result<Option<T>, StoreError>>,
    Insert: FnOnce() -> InsertFut,
    InsertFut: Future<Output = Result<T, StoreError>>,
{
    if let Some(existing) = find().await? {
        return Ok(existing);
    }

    match insert().await {
        Ok(created) => {
            tracing::info!("Created {} {:?}", entity, key);
            Ok(created)
        }
        Err(StoreError::Duplicate) => {
            tracing::debug!("{} {:?} was created concurrently, fetching it", entity, key);
            find()
                .await?
                .ok_or_else(|| ChampionshipError::not_found(entity, key))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn resolve_league<S>(store: &S, title: &str) -> Result<League, ChampionshipError>
where
    S: EntityStore + ?Sized,
{
    resolve_or_create(
        "League",
        title,
        || store.find_league(title),
        || store.insert_league(title),
    )
    .await
}

pub async fn resolve_group<S>(store: &S, title: &str, league_id: Uuid) -> Result<Group, ChampionshipError>
where
    S: EntityStore + ?Sized,
{
    resolve_or_create(
        "Group",
        title,
        || store.find_group(title, league_id),
        || store.insert_group(title, league_id),
    )
    .await
}

pub async fn resolve_team<S>(store: &S, name: &str) -> Result<Team, ChampionshipError>
where
    S: EntityStore + ?Sized,
{
    resolve_or_create(
        "Team",
        name,
        || store.find_team(name),
        || store.insert_team(name),
    )
    .await
}

/// Find an existing group by league and group title, without creating either.
pub async fn find_group<S>(store: &S, league_title: &str, group_title: &str) -> Result<Group, ChampionshipError>
where
    S: EntityStore + ?Sized,
{
    let league = store
        .find_league(league_title)
        .await?
        .ok_or_else(|| ChampionshipError::not_found("League", league_title))?;

    store
        .find_group(group_title, league.id)
        .await?
        .ok_or_else(|| ChampionshipError::not_found("Group", format!("{} / {}", league_title, group_title)))
}
