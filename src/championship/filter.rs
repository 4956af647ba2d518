use chrono::NaiveDateTime;
use sqlx::{Postgres, QueryBuilder};

use crate::championship::ChampionshipError;
use crate::models::championship::{FilterCriteria, FixtureResultView, KICKOFF_FORMAT};

/// Validated fixture-result predicate. Absent criteria impose no constraint,
/// present ones are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultFilter {
    pub group_title: Option<String>,
    pub team_name: Option<String>,
    pub kickoff_from: Option<NaiveDateTime>,
    pub kickoff_to: Option<NaiveDateTime>,
}

/// Turn sparse filter criteria into a [`ResultFilter`].
///
/// Empty strings count as absent. Date bounds must use [`KICKOFF_FORMAT`].
pub fn build_predicate(criteria: &FilterCriteria) -> Result<ResultFilter, ChampionshipError> {
    Ok(ResultFilter {
        group_title: present(&criteria.group_title).map(str::to_string),
        team_name: present(&criteria.team_name).map(str::to_string),
        kickoff_from: present(&criteria.date_from).map(parse_timestamp).transpose()?,
        kickoff_to: present(&criteria.date_to).map(parse_timestamp).transpose()?,
    })
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ChampionshipError> {
    NaiveDateTime::parse_from_str(value, KICKOFF_FORMAT).map_err(|_| {
        ChampionshipError::MalformedTimestamp {
            value: value.to_string(),
        }
    })
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ResultFilter {
    pub fn is_unconstrained(&self) -> bool {
        self.group_title.is_none()
            && self.team_name.is_none()
            && self.kickoff_from.is_none()
            && self.kickoff_to.is_none()
    }

    pub fn matches(&self, result: &FixtureResultView) -> bool {
        if let Some(group) = &self.group_title {
            if &result.group_title != group {
                return false;
            }
        }
        if let Some(team) = &self.team_name {
            if &result.home_team != team && &result.away_team != team {
                return false;
            }
        }
        if let Some(from) = self.kickoff_from {
            if result.kickoff_at < from {
                return false;
            }
        }
        if let Some(to) = self.kickoff_to {
            if result.kickoff_at > to {
                return false;
            }
        }
        true
    }

    /// Append the WHERE clause for this filter to a query over
    /// `fixture_results fr` joined with `league_groups g`, `football_teams h`
    /// (home) and `football_teams a` (away). Values are always bound.
    pub fn push_where(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        if self.is_unconstrained() {
            return;
        }

        builder.push(" WHERE ");
        let mut conditions = builder.separated(" AND ");

        if let Some(group) = &self.group_title {
            conditions.push("g.title = ");
            conditions.push_bind_unseparated(group.clone());
        }
        if let Some(team) = &self.team_name {
            conditions.push("(h.team_name = ");
            conditions.push_bind_unseparated(team.clone());
            conditions.push_unseparated(" OR a.team_name = ");
            conditions.push_bind_unseparated(team.clone());
            conditions.push_unseparated(")");
        }
        if let Some(from) = self.kickoff_from {
            conditions.push("fr.kickoff_at >= ");
            conditions.push_bind_unseparated(from);
        }
        if let Some(to) = self.kickoff_to {
            conditions.push("fr.kickoff_at <= ");
            conditions.push_bind_unseparated(to);
        }
    }
}
