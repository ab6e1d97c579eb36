use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use super::refs::UserRef;
use super::test::Test;
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum AssignmentStatus {
    Pending,
    InProgress,
    Completed,
}

impl AssignmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "PENDING",
            AssignmentStatus::InProgress => "IN_PROGRESS",
            AssignmentStatus::Completed => "COMPLETED",
        }
    }

    /// PENDING → IN_PROGRESS → COMPLETED, plus PENDING → COMPLETED when
    /// scores arrive without the form having been opened.
    pub fn can_transition_to(self, next: AssignmentStatus) -> bool {
        matches!(
            (self, next),
            (AssignmentStatus::Pending, AssignmentStatus::InProgress)
                | (AssignmentStatus::InProgress, AssignmentStatus::Completed)
                | (AssignmentStatus::Pending, AssignmentStatus::Completed)
        )
    }

    pub fn transition(self, next: AssignmentStatus) -> Result<AssignmentStatus, CoreError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(AssignmentStatus::Pending),
            "IN_PROGRESS" => Ok(AssignmentStatus::InProgress),
            "COMPLETED" => Ok(AssignmentStatus::Completed),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}

/// One instantiation of a test against a reviewee.
///
/// `question_record[i]` names the reviewer responsible for the i-th
/// question of the flattened test; `score_set[i]` holds that reviewer's
/// score once submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Assignment {
    #[ts(type = "number")]
    pub id: i64,
    pub test: Test,
    #[serde(default)]
    pub reviewer: Vec<UserRef>,
    pub reviewee: UserRef,
    pub status: AssignmentStatus,
    #[serde(default)]
    pub question_record: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_score_set")]
    #[ts(type = "Array<number | null>")]
    pub score_set: Vec<Option<f64>>,
}

impl Assignment {
    /// Scores that were actually submitted, in slot order.
    pub fn valid_scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.score_set.iter().filter_map(|s| *s)
    }
}

/// The backend stores whatever the form posted, so scores arrive as
/// numbers, numeric strings, or null.
fn deserialize_score_set<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawScore {
        Number(f64),
        Text(String),
    }

    let raw: Option<Vec<Option<RawScore>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|entry| match entry {
            Some(RawScore::Number(n)) => Some(n),
            Some(RawScore::Text(s)) => s.trim().parse::<f64>().ok(),
            None => None,
        })
        .collect())
}
