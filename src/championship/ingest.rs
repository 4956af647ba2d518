use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::championship::catalog::{resolve_group, resolve_league, resolve_team};
use crate::championship::filter::parse_timestamp;
use crate::championship::score::Score;
use crate::championship::standings::table_for_group;
use crate::championship::ChampionshipError;
use crate::db::store::{EntityStore, FixtureStore};
use crate::models::championship::*;

/// A submission that passed validation, with its parsed fields.
struct ValidSubmission<'a> {
    raw: &'a FixtureResultSubmission,
    kickoff_at: NaiveDateTime,
    score: Option<Score>,
}

/// Persist a batch of published results and return the fresh table of every
/// group the batch touched, in the order the groups first appear.
///
/// The whole batch is validated before anything is written.
#[tracing::instrument(
    name = "Ingest fixture results",
    skip(store, submissions),
    fields(batch_size = submissions.len())
)]
pub async fn ingest<S>(
    store: &S,
    submissions: &[FixtureResultSubmission],
) -> Result<Vec<StandingsTable>, ChampionshipError>
where
    S: EntityStore + FixtureStore,
{
    let valid = submissions
        .iter()
        .enumerate()
        .map(|(index, submission)| validate(index, submission))
        .collect::<Result<Vec<_>, _>>()?;

    let mut touched_groups: Vec<Uuid> = Vec::new();
    for submission in valid {
        let fixture = persist(store, submission).await?;
        if !touched_groups.contains(&fixture.group_id) {
            touched_groups.push(fixture.group_id);
        }
    }

    let mut tables = Vec::with_capacity(touched_groups.len());
    for group_id in touched_groups {
        tables.push(table_for_group(store, group_id).await?);
    }

    tracing::info!("Ingested {} results into {} groups", submissions.len(), tables.len());
    Ok(tables)
}

fn validate(index: usize, raw: &FixtureResultSubmission) -> Result<ValidSubmission<'_>, ChampionshipError> {
    let names = [
        ("leagueTitle", &raw.league_title),
        ("group", &raw.group_title),
        ("homeTeam", &raw.home_team),
        ("awayTeam", &raw.away_team),
    ];
    for (field, value) in names {
        if value.trim().is_empty() {
            return Err(ChampionshipError::InvalidSubmission(format!(
                "result #{} has an empty {}",
                index, field
            )));
        }
    }
    if raw.home_team == raw.away_team {
        return Err(ChampionshipError::InvalidSubmission(format!(
            "result #{} has {} playing against itself",
            index, raw.home_team
        )));
    }

    let kickoff_at = parse_timestamp(&raw.kickoff_at)?;
    let score = raw
        .score
        .as_deref()
        .map(|s| {
            s.parse::<Score>().map_err(|_| ChampionshipError::MalformedScore {
                fixture_id: None,
                score: s.to_string(),
            })
        })
        .transpose()?;

    Ok(ValidSubmission { raw, kickoff_at, score })
}

async fn persist<S>(store: &S, submission: ValidSubmission<'_>) -> Result<FixtureResult, ChampionshipError>
where
    S: EntityStore + FixtureStore,
{
    let raw = submission.raw;
    let league = resolve_league(store, &raw.league_title).await?;
    let group = resolve_group(store, &raw.group_title, league.id).await?;
    let home_team = resolve_team(store, &raw.home_team).await?;
    let away_team = resolve_team(store, &raw.away_team).await?;

    let fixture = store
        .insert(NewFixtureResult {
            group_id: group.id,
            home_team_id: home_team.id,
            away_team_id: away_team.id,
            matchday: raw.matchday,
            kickoff_at: submission.kickoff_at,
            score: submission.score.map(|s| s.to_string()),
        })
        .await?;

    tracing::debug!("Stored result {} ({} vs {})", fixture.id, raw.home_team, raw.away_team);
    Ok(fixture)
}
