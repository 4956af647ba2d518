use crate::championship::catalog::find_group;
use crate::championship::filter::build_predicate;
use crate::championship::standings::table_for_group;
use crate::championship::ChampionshipError;
use crate::db::store::{EntityStore, FixtureStore};
use crate::models::championship::*;

/// Tables for the requested groups, or for every group when `targets` is
/// `None`. Unknown leagues or groups fail the whole request.
#[tracing::instrument(name = "Get standings tables", skip(store, targets))]
pub async fn get_tables<S>(
    store: &S,
    targets: Option<&[TableTarget]>,
) -> Result<Vec<StandingsTable>, ChampionshipError>
where
    S: EntityStore + FixtureStore,
{
    let groups = match targets {
        Some(targets) => {
            let mut groups = Vec::with_capacity(targets.len());
            for target in targets {
                groups.push(find_group(store, &target.league_name, &target.group).await?);
            }
            groups
        }
        None => store.list_groups().await?,
    };

    let mut tables = Vec::with_capacity(groups.len());
    for group in groups {
        tables.push(table_for_group(store, group.id).await?);
    }
    Ok(tables)
}

#[tracing::instrument(name = "Filter fixture results", skip(store))]
pub async fn filter_results<S>(
    store: &S,
    criteria: &FilterCriteria,
) -> Result<Vec<FixtureResultView>, ChampionshipError>
where
    S: FixtureStore + ?Sized,
{
    let filter = build_predicate(criteria)?;
    let results = store.query(&filter).await?;
    tracing::debug!("{} results matched {:?}", results.len(), filter);
    Ok(results)
}
