use uuid::Uuid;

use crate::championship::score::Score;
use crate::championship::ChampionshipError;
use crate::db::store::FixtureStore;
use crate::models::championship::{ScoreUpdate, ScoreUpdateOutcome};

/// Overwrite the score of one fixture result. Tables are not recomputed
/// here; they are derived on the next read.
#[tracing::instrument(name = "Update fixture score", skip(store))]
pub async fn update_score<S>(store: &S, result_id: Uuid, new_score: &str) -> Result<(), ChampionshipError>
where
    S: FixtureStore + ?Sized,
{
    if store.get_by_id(result_id).await?.is_none() {
        return Err(ChampionshipError::not_found("Fixture result", result_id));
    }

    let score: Score = new_score.parse().map_err(|_| ChampionshipError::MalformedScore {
        fixture_id: Some(result_id),
        score: new_score.to_string(),
    })?;

    // The row can vanish between the lookup and the write.
    if !store.update_score(result_id, &score.to_string()).await? {
        return Err(ChampionshipError::not_found("Fixture result", result_id));
    }

    tracing::info!("Fixture result {} now {}", result_id, score);
    Ok(())
}

/// Apply each update independently and report the outcome of every item.
#[tracing::instrument(
    name = "Update fixture scores",
    skip(store, updates),
    fields(batch_size = updates.len())
)]
pub async fn update_scores<S>(store: &S, updates: &[ScoreUpdate]) -> Vec<ScoreUpdateOutcome>
where
    S: FixtureStore + ?Sized,
{
    let mut outcomes = Vec::with_capacity(updates.len());
    for update in updates {
        let outcome = match update_score(store, update.id, &update.score).await {
            Ok(()) => ScoreUpdateOutcome {
                id: update.id,
                updated: true,
                error: None,
            },
            Err(e) => {
                tracing::warn!("Failed to update fixture result {}: {}", update.id, e);
                ScoreUpdateOutcome {
                    id: update.id,
                    updated: false,
                    error: Some(e.to_string()),
                }
            }
        };
        outcomes.push(outcome);
    }
    outcomes
}
