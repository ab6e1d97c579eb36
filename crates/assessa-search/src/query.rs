//! List queries.
//!
//! Every list endpoint takes a free-text `q` matched case-insensitively as a
//! substring of the entity's searchable fields, ANDed with exact categorical
//! filters. An absent or blank `q` matches everything.

use serde::de::{self, Deserializer};
use serde::Deserialize;

use assessa_core::models::assignment::{Assignment, AssignmentStatus};
use assessa_core::models::club::Club;
use assessa_core::models::mini_club::MiniClub;
use assessa_core::models::mini_test::MiniTest;
use assessa_core::models::position::Position;
use assessa_core::models::question::Question;
use assessa_core::models::refs::{EntityRef, UserRef};
use assessa_core::models::test::Test;
use assessa_core::models::user::{Role, User};
use assessa_instruments::analytics::UserScore;

/// A query over one entity type.
pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Keep the items matching `filter`, preserving backend order.
pub fn apply<T, F: Filter<T>>(items: Vec<T>, filter: &F) -> Vec<T> {
    items.into_iter().filter(|item| filter.matches(item)).collect()
}

fn term_matches<'a>(term: Option<&str>, fields: impl IntoIterator<Item = &'a str>) -> bool {
    let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
        return true;
    };
    let needle = term.to_lowercase();
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn filter_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted.map(str::trim).filter(|w| !w.is_empty()) {
        None => true,
        Some(w) => actual == Some(w),
    }
}

fn names<'a>(refs: &'a [EntityRef]) -> impl Iterator<Item = &'a str> {
    refs.iter().map(|r| r.name.as_str())
}

fn user_names<'a>(refs: &'a [UserRef]) -> impl Iterator<Item = &'a str> {
    refs.iter().map(|r| r.name.as_str())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClubQuery {
    pub q: Option<String>,
}

impl Filter<Club> for ClubQuery {
    fn matches(&self, club: &Club) -> bool {
        let fields = std::iter::once(club.name.as_str())
            .chain(user_names(&club.user))
            .chain(club.mini_club.iter().map(|m| m.name.as_str()))
            .chain(names(&club.position));
        term_matches(self.q.as_deref(), fields)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MiniClubQuery {
    pub q: Option<String>,
    pub club: Option<String>,
}

impl Filter<MiniClub> for MiniClubQuery {
    fn matches(&self, mini_club: &MiniClub) -> bool {
        let club = mini_club.club.as_ref().map(|c| c.name.as_str());
        let fields = std::iter::once(mini_club.name.as_str())
            .chain(club)
            .chain(user_names(&mini_club.user));
        filter_matches(self.club.as_deref(), club) && term_matches(self.q.as_deref(), fields)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PositionQuery {
    pub q: Option<String>,
    pub club: Option<String>,
}

impl Filter<Position> for PositionQuery {
    fn matches(&self, position: &Position) -> bool {
        let in_club = match self.club.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            None => true,
            Some(club) => position.club.iter().any(|c| c.name == club),
        };
        let fields = std::iter::once(position.name.as_str())
            .chain(names(&position.club))
            .chain(user_names(&position.user));
        in_club && term_matches(self.q.as_deref(), fields)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserQuery {
    pub q: Option<String>,
    pub club: Option<String>,
    pub role: Option<Role>,
}

impl Filter<User> for UserQuery {
    fn matches(&self, user: &User) -> bool {
        let club = user.club.as_ref().map(|c| c.name.as_str());
        let fields = [
            Some(user.name.as_str()),
            Some(user.phone.as_str()),
            club,
            user.mini_club.as_ref().map(|m| m.name.as_str()),
            user.position.as_ref().map(|p| p.name.as_str()),
        ];
        self.role.is_none_or(|r| r == user.role)
            && filter_matches(self.club.as_deref(), club)
            && term_matches(self.q.as_deref(), fields.into_iter().flatten())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionQuery {
    pub q: Option<String>,
    pub mini_test: Option<String>,
}

impl Filter<Question> for QuestionQuery {
    fn matches(&self, question: &Question) -> bool {
        let in_mini_test = match self.mini_test.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
            None => true,
            Some(name) => question.mini_test.iter().any(|m| m.name == name),
        };
        let fields = [question.name.as_str(), question.content.as_str()]
            .into_iter()
            .chain(names(&question.mini_test));
        in_mini_test && term_matches(self.q.as_deref(), fields)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MiniTestQuery {
    pub q: Option<String>,
    pub test: Option<String>,
}

impl Filter<MiniTest> for MiniTestQuery {
    fn matches(&self, mini_test: &MiniTest) -> bool {
        let in_test = match self.test.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            None => true,
            Some(name) => mini_test.test.iter().any(|t| t.name == name),
        };
        let fields = std::iter::once(mini_test.name.as_str())
            .chain(mini_test.question.iter().map(|q| q.name.as_str()))
            .chain(names(&mini_test.test));
        in_test && term_matches(self.q.as_deref(), fields)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestQuery {
    pub q: Option<String>,
}

impl Filter<Test> for TestQuery {
    fn matches(&self, test: &Test) -> bool {
        let fields = std::iter::once(test.name.as_str())
            .chain(test.mini_test.iter().map(|m| m.name.as_str()));
        term_matches(self.q.as_deref(), fields)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentQuery {
    pub q: Option<String>,
    /// Accepts any casing, e.g. `in_progress`.
    #[serde(default, deserialize_with = "status_param")]
    pub status: Option<AssignmentStatus>,
    pub test: Option<String>,
}

fn status_param<'de, D>(deserializer: D) -> Result<Option<AssignmentStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw.parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

impl Filter<Assignment> for AssignmentQuery {
    fn matches(&self, assignment: &Assignment) -> bool {
        let fields = [
            assignment.test.name.as_str(),
            assignment.reviewee.name.as_str(),
            assignment.status.as_str(),
        ];
        self.status.is_none_or(|s| s == assignment.status)
            && filter_matches(self.test.as_deref(), Some(assignment.test.name.as_str()))
            && term_matches(self.q.as_deref(), fields)
    }
}

/// Dashboard user rollups are searchable by name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserScoreQuery {
    pub q: Option<String>,
}

impl Filter<UserScore> for UserScoreQuery {
    fn matches(&self, score: &UserScore) -> bool {
        term_matches(self.q.as_deref(), [score.user_name.as_str()])
    }
}
