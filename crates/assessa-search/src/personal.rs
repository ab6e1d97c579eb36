//! Views of the signed-in user's own data.

use serde::Serialize;
use ts_rs::TS;

use assessa_core::models::assignment::{Assignment, AssignmentStatus};
use assessa_core::models::user::User;

/// One row of "my assessments".
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MyAssessment {
    #[ts(type = "number")]
    pub id: i64,
    pub test_name: String,
    pub reviewee: String,
    pub status: AssignmentStatus,
}

/// Assignments the user takes part in, open ones first. The sort is
/// stable so backend order is kept within each group.
pub fn my_assessments(assignments: &[Assignment]) -> Vec<MyAssessment> {
    let mut rows: Vec<MyAssessment> = assignments
        .iter()
        .map(|a| MyAssessment {
            id: a.id,
            test_name: a.test.name.clone(),
            reviewee: a.reviewee.name.clone(),
            status: a.status,
        })
        .collect();
    rows.sort_by_key(|r| r.status == AssignmentStatus::Completed);
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MyProfile {
    pub user: User,
    pub completed_assessments: usize,
    pub pending_assessments: usize,
}

/// Profile with assignment counts. Anything not completed counts as pending.
pub fn my_profile(user: User, assignments: &[Assignment]) -> MyProfile {
    let completed = assignments
        .iter()
        .filter(|a| a.status == AssignmentStatus::Completed)
        .count();
    MyProfile {
        user,
        completed_assessments: completed,
        pending_assessments: assignments.len() - completed,
    }
}
