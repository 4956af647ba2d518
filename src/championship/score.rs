use std::fmt;
use std::str::FromStr;

use crate::models::common::MatchResult;

/// Final score of a fixture, home side first. Goal counts are capped at
/// `u16::MAX` so table totals stay within their integer types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub home: u16,
    pub away: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{raw:?} is not of the form \"<home>:<away>\"")]
pub struct ScoreParseError {
    pub raw: String,
}

impl Score {
    /// Result from the home side's point of view
    pub fn home_result(&self) -> MatchResult {
        if self.home > self.away {
            MatchResult::Win
        } else if self.home < self.away {
            MatchResult::Loss
        } else {
            MatchResult::Draw
        }
    }
}

impl FromStr for Score {
    type Err = ScoreParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let err = || ScoreParseError { raw: raw.to_string() };

        let (home, away) = raw.split_once(':').ok_or_else(err)?;
        Ok(Score {
            home: parse_goals(home).ok_or_else(err)?,
            away: parse_goals(away).ok_or_else(err)?,
        })
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.home, self.away)
    }
}

// Digits only: `u16::from_str` alone would also accept a leading '+'.
fn parse_goals(part: &str) -> Option<u16> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
