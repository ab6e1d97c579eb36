//! Per-question reviewer assignment and question-record preview.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::flatten::FlatQuestion;

/// One entry of the `assignments` list sent with a person-type request.
/// An empty `reviewers` list means every chosen reviewer covers the question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuestionAssignment {
    #[ts(type = "number")]
    pub question_id: i64,
    pub reviewers: Vec<String>,
}

/// The reviewers responsible for a question once the all-reviewers
/// fallback has been applied.
pub fn effective_reviewers(explicit: &[String], all_reviewers: &[String]) -> Vec<String> {
    if explicit.is_empty() {
        all_reviewers.to_vec()
    } else {
        all_reviewers
            .iter()
            .filter(|r| explicit.contains(r))
            .cloned()
            .collect()
    }
}

/// Expand a person-type request into the per-slot reviewer lists the
/// backend's question record will hold. Questions missing from
/// `assignments` were deselected and get no reviewer.
pub fn preview_record(
    questions: &[FlatQuestion],
    assignments: &[QuestionAssignment],
    all_reviewers: &[String],
) -> Vec<Vec<String>> {
    questions
        .iter()
        .map(|q| {
            assignments
                .iter()
                .find(|a| a.question_id == q.question_id)
                .map(|a| effective_reviewers(&a.reviewers, all_reviewers))
                .unwrap_or_default()
        })
        .collect()
}
