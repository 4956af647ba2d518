use std::cmp::Ordering;
use std::collections::HashMap;

use uuid::Uuid;

use crate::championship::score::Score;
use crate::championship::ChampionshipError;
use crate::db::store::{EntityStore, FixtureStore};
use crate::models::championship::*;
use crate::models::common::MatchResult;

/// Compute the standings table of one group from all of its fixture results.
///
/// Every team referenced by a fixture gets a row, including teams whose
/// fixtures are all unscored. Rows are ranked by points, then goal
/// difference, then team name, and numbered 1..n without shared ranks.
///
/// Fails without returning a partial table if any score is malformed or a
/// referenced team is missing from `team_names`.
pub fn compute_table(
    league: &League,
    group: &Group,
    fixtures: &[FixtureResult],
    team_names: &HashMap<Uuid, String>,
) -> Result<StandingsTable, ChampionshipError> {
    let mut rows: HashMap<Uuid, StandingsRow> = HashMap::new();
    for fixture in fixtures {
        for team_id in [fixture.home_team_id, fixture.away_team_id] {
            if rows.contains_key(&team_id) {
                continue;
            }
            let team_name = team_names
                .get(&team_id)
                .ok_or_else(|| ChampionshipError::not_found("Team", team_id))?;
            rows.insert(
                team_id,
                StandingsRow {
                    team_name: team_name.clone(),
                    ..Default::default()
                },
            );
        }
    }

    let mut current_matchday = 0;
    for fixture in fixtures {
        current_matchday = current_matchday.max(fixture.matchday);

        let Some(raw_score) = fixture.score.as_deref() else {
            continue;
        };
        let score: Score = raw_score
            .parse()
            .map_err(|_| ChampionshipError::MalformedScore {
                fixture_id: Some(fixture.id),
                score: raw_score.to_string(),
            })?;

        let home_result = score.home_result();
        if let Some(home) = rows.get_mut(&fixture.home_team_id) {
            record(home, home_result, score.home, score.away);
        }
        if let Some(away) = rows.get_mut(&fixture.away_team_id) {
            record(away, home_result.inverse(), score.away, score.home);
        }
    }

    let mut rows: Vec<StandingsRow> = rows.into_values().collect();
    rows.sort_by(rank_order);
    for (index, row) in rows.iter_mut().enumerate() {
        row.rank = index as u32 + 1;
    }

    Ok(StandingsTable {
        league_title: league.title.clone(),
        group_title: group.title.clone(),
        current_matchday,
        rows,
    })
}

fn record(row: &mut StandingsRow, result: MatchResult, own_goals: u16, opponent_goals: u16) {
    row.played_games += 1;
    row.points += result.points();
    match result {
        MatchResult::Win => row.win += 1,
        MatchResult::Loss => row.lose += 1,
        MatchResult::Draw => row.draw += 1,
    }
    row.goals_for = row.goals_for.saturating_add(u32::from(own_goals));
    row.goals_against = row.goals_against.saturating_add(u32::from(opponent_goals));
    row.goal_difference = row
        .goal_difference
        .saturating_add(i32::from(own_goals) - i32::from(opponent_goals));
}

/// Points desc, goal difference desc, team name asc.
fn rank_order(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| a.team_name.cmp(&b.team_name))
}

/// Load a group's fixture results and compute its table.
#[tracing::instrument(name = "Compute standings table", skip(store))]
pub async fn table_for_group<S>(store: &S, group_id: Uuid) -> Result<StandingsTable, ChampionshipError>
where
    S: EntityStore + FixtureStore,
{
    let group = store
        .get_group(group_id)
        .await?
        .ok_or_else(|| ChampionshipError::not_found("Group", group_id))?;
    let league = store
        .get_league(group.league_id)
        .await?
        .ok_or_else(|| ChampionshipError::not_found("League", group.league_id))?;

    let fixtures = store.get_by_group(group_id).await?;

    let mut team_ids: Vec<Uuid> = fixtures
        .iter()
        .flat_map(|f| [f.home_team_id, f.away_team_id])
        .collect();
    team_ids.sort();
    team_ids.dedup();

    let team_names: HashMap<Uuid, String> = store
        .get_teams(&team_ids)
        .await?
        .into_iter()
        .map(|team| (team.id, team.name))
        .collect();

    let table = compute_table(&league, &group, &fixtures, &team_names)?;
    tracing::debug!(
        "Computed table for {} / {}: {} teams, matchday {}",
        table.league_title, table.group_title, table.rows.len(), table.current_matchday
    );
    Ok(table)
}
