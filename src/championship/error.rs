use uuid::Uuid;

use crate::db::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ChampionshipError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error(
        "Malformed score {score:?}{}, expected \"<home>:<away>\"",
        .fixture_id.map(|id| format!(" for fixture {}", id)).unwrap_or_default()
    )]
    MalformedScore { fixture_id: Option<Uuid>, score: String },

    #[error("Malformed timestamp {value:?}, expected YYYY-MM-DDTHH:MM:SS")]
    MalformedTimestamp { value: String },

    #[error("Invalid submission: {0}")]
    InvalidSubmission(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),
}

impl ChampionshipError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        ChampionshipError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}
