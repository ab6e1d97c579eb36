//! Derived display facts for list items.

use serde::Serialize;
use ts_rs::TS;

use assessa_core::models::club::Club;
use assessa_core::models::mini_club::MiniClub;
use assessa_core::models::mini_test::MiniTest;
use assessa_core::models::position::Position;
use assessa_core::models::refs::UserRef;
use assessa_core::models::test::Test;
use assessa_core::models::user::Role;

/// Shown where a group has no member in the expected role.
pub const NONE_LABEL: &str = "无";

fn first_with_role(users: &[UserRef], role: Role) -> String {
    users
        .iter()
        .find(|u| u.role == Some(role))
        .map(|u| u.name.clone())
        .unwrap_or_else(|| NONE_LABEL.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClubCard {
    pub club: Club,
    pub manager: String,
    pub member_count: usize,
    pub mini_club_count: usize,
    pub position_count: usize,
}

impl From<Club> for ClubCard {
    fn from(club: Club) -> Self {
        Self {
            manager: first_with_role(&club.user, Role::Manager),
            member_count: club.user.len(),
            mini_club_count: club.mini_club.len(),
            position_count: club.position.len(),
            club,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MiniClubCard {
    pub mini_club: MiniClub,
    pub leader: String,
    pub member_count: usize,
}

impl From<MiniClub> for MiniClubCard {
    fn from(mini_club: MiniClub) -> Self {
        Self {
            leader: first_with_role(&mini_club.user, Role::Leader),
            member_count: mini_club.user.len(),
            mini_club,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PositionCard {
    pub position: Position,
    pub holder_count: usize,
}

impl From<Position> for PositionCard {
    fn from(position: Position) -> Self {
        Self {
            holder_count: position.user.len(),
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MiniTestCard {
    pub mini_test: MiniTest,
    pub question_count: usize,
    pub used_by: usize,
}

impl From<MiniTest> for MiniTestCard {
    fn from(mini_test: MiniTest) -> Self {
        Self {
            question_count: mini_test.question.len(),
            used_by: mini_test.test.len(),
            mini_test,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TestCard {
    pub test: Test,
    pub part_count: usize,
    pub question_count: usize,
}

impl From<Test> for TestCard {
    fn from(test: Test) -> Self {
        Self {
            part_count: test.mini_test.len(),
            question_count: test.question_count(),
            test,
        }
    }
}

/// Convert a filtered list into cards.
pub fn cards<T, C: From<T>>(items: Vec<T>) -> Vec<C> {
    items.into_iter().map(C::from).collect()
}
