// src/models/championship.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Wire and storage format of kickoff timestamps and filter bounds.
pub const KICKOFF_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct League {
    pub id: Uuid,
    pub title: String,
}

/// A division within a league
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub league_id: Uuid,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: Uuid,
    #[sqlx(rename = "team_name")]
    pub name: String,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FixtureResult {
    pub id: Uuid,
    pub group_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub matchday: i32,
    pub kickoff_at: NaiveDateTime,
    pub score: Option<String>, // "<home>:<away>", absent until played
}

/// Fixture result about to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewFixtureResult {
    pub group_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub matchday: i32,
    pub kickoff_at: NaiveDateTime,
    pub score: Option<String>,
}

/// Fixture result joined with the titles and names it references
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FixtureResultView {
    pub id: Uuid,
    pub matchday: i32,
    #[serde(with = "kickoff_format")]
    pub kickoff_at: NaiveDateTime,
    pub score: Option<String>,
    #[serde(rename = "group")]
    pub group_title: String,
    pub league_title: String,
    pub home_team: String,
    pub away_team: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    pub rank: u32,
    #[serde(rename = "team")]
    pub team_name: String,
    pub played_games: u32,
    pub points: u32,
    #[serde(rename = "goals")]
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub win: u32,
    pub lose: u32,
    pub draw: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StandingsTable {
    pub league_title: String,
    #[serde(rename = "group")]
    pub group_title: String,
    #[serde(rename = "matchday")]
    pub current_matchday: i32,
    #[serde(rename = "standing")]
    pub rows: Vec<StandingsRow>,
}

/// One raw result as published by a client
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FixtureResultSubmission {
    pub league_title: String,
    #[serde(rename = "group")]
    pub group_title: String,
    pub home_team: String,
    pub away_team: String,
    pub matchday: i32,
    pub kickoff_at: String,
    #[serde(default)]
    pub score: Option<String>,
}

/// Selects one group's table by league and group title
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TableTarget {
    pub league_name: String,
    pub group: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct FilterCriteria {
    #[serde(rename = "group", default)]
    pub group_title: Option<String>,
    #[serde(rename = "team", default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScoreUpdate {
    pub id: Uuid,
    pub score: String,
}

/// Per-item report of a batch score update
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScoreUpdateOutcome {
    pub id: Uuid,
    pub updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

mod kickoff_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::KICKOFF_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(KICKOFF_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, KICKOFF_FORMAT).map_err(serde::de::Error::custom)
    }
}
