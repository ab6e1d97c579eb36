//! Scoring an assignment as the signed-in reviewer.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use assessa_auth::identity::Session;
use assessa_core::models::assignment::AssignmentStatus;
use assessa_instruments::scoring::{
    merge_score_sets, reconstruct_keyed, reconstruct_ordered, reviewer_sheet, PartGroup, ReviewerSheet,
};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringView {
    pub status: AssignmentStatus,
    /// True when nothing in the assignment is assigned to the caller.
    pub no_assigned_questions: bool,
    /// The caller's questions, one section per mini-test.
    pub groups: Vec<PartGroup>,
    pub sheet: ReviewerSheet,
}

/// Open an assignment for scoring. A pending assignment moves to
/// in-progress, but only once the caller is known to have questions in an
/// aligned record.
pub async fn open_assessment(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> Result<Json<ScoringView>, ApiError> {
    let mut assignment = state.backend.find_assignment(id).await?;
    let sheet = reviewer_sheet(&assignment, &session.display_name)?;

    if assignment.status == AssignmentStatus::Pending && !sheet.is_empty() {
        let next = assignment.status.transition(AssignmentStatus::InProgress)?;
        state.backend.update_state(id, next).await?;
        assignment.status = next;
    }

    Ok(Json(ScoringView {
        status: assignment.status,
        no_assigned_questions: sheet.is_empty(),
        groups: sheet.grouped(),
        sheet,
    }))
}

/// Answers keyed by slot, or given in the order the caller's slots appear.
/// Exactly one of the two must be present.
#[derive(Debug, Default, Deserialize)]
pub struct ScoreSubmission {
    #[serde(default)]
    pub answers: Option<BTreeMap<usize, f64>>,
    #[serde(default)]
    pub ordered: Option<Vec<f64>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReceipt {
    #[serde(rename = "id")]
    pub assignment_id: i64,
    pub score_set: Vec<Option<f64>>,
}

pub async fn submit_scores(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Json(submission): Json<ScoreSubmission>,
) -> Result<Json<ScoreReceipt>, ApiError> {
    let assignment = state.backend.find_assignment(id).await?;
    let reviewer = session.display_name.as_str();

    // Refuse to score against a record that no longer matches the test.
    let sheet = reviewer_sheet(&assignment, reviewer)?;
    if sheet.is_empty() {
        return Err(ApiError::Forbidden(format!(
            "no questions of assignment {id} are assigned to {reviewer}"
        )));
    }

    let record = &assignment.question_record;
    let mine = match (&submission.answers, &submission.ordered) {
        (Some(answers), None) => reconstruct_keyed(record, reviewer, answers)?,
        (None, Some(ordered)) => reconstruct_ordered(record, reviewer, ordered)?,
        _ => {
            return Err(ApiError::BadRequest(
                "send either answers keyed by slot or ordered answers".to_string(),
            ));
        }
    };
    let score_set = merge_score_sets(&assignment.score_set, &mine);

    state.backend.update_score(id, &score_set).await?;
    Ok(Json(ScoreReceipt {
        assignment_id: id,
        score_set,
    }))
}
