use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use assessa_core::models::assignment::Assignment;

use crate::error::InstrumentError;
use crate::flatten::{flatten, FlatQuestion};

/// Defines the valid range for a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl ScoreRange {
    pub fn contains(&self, value: f64) -> bool {
        if value < self.min || value > self.max {
            return false;
        }
        if let Some(step) = self.step {
            let offset = value - self.min;
            let remainder = offset % step;
            // Allow floating point tolerance
            remainder < 1e-9 || (step - remainder) < 1e-9
        } else {
            true
        }
    }

    fn check(&self, slot: usize, value: f64) -> Result<(), InstrumentError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(InstrumentError::ScoreOutOfRange {
                slot,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Five-point Likert scale used by every question.
pub const LIKERT: ScoreRange = ScoreRange {
    min: 1.0,
    max: 5.0,
    step: Some(1.0),
};

/// Slots whose question-record entry names `reviewer`, in slot order.
pub fn slots_for(record: &[String], reviewer: &str) -> Vec<usize> {
    record
        .iter()
        .enumerate()
        .filter(|(_, name)| name.as_str() == reviewer)
        .map(|(slot, _)| slot)
        .collect()
}

/// Per-mini-test summary shown beside the scoring form.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PartSummary {
    #[ts(type = "number")]
    pub mini_test_id: i64,
    pub name: String,
    pub part_number: usize,
    pub weight: Option<f64>,
    pub proportion: Vec<f64>,
    pub question_count: usize,
    pub assigned_count: usize,
}

/// The questions of one assignment that a given reviewer must score.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReviewerSheet {
    #[ts(type = "number")]
    pub assignment_id: i64,
    pub test_name: String,
    pub reviewee: String,
    pub reviewer: String,
    pub test_proportion: Vec<f64>,
    pub questions: Vec<FlatQuestion>,
    pub parts: Vec<PartSummary>,
    pub scale: ScoreRange,
}

impl ReviewerSheet {
    /// True when nothing in the assignment is assigned to this reviewer.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions grouped by part, in part order. Parts without assigned
    /// questions are omitted.
    pub fn grouped(&self) -> Vec<PartGroup> {
        self.parts
            .iter()
            .filter(|p| p.assigned_count > 0)
            .map(|p| PartGroup {
                part: p.clone(),
                questions: self
                    .questions
                    .iter()
                    .filter(|q| q.part_number == p.part_number)
                    .cloned()
                    .collect(),
            })
            .collect()
    }
}

/// One mini-test section of the scoring form.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PartGroup {
    pub part: PartSummary,
    pub questions: Vec<FlatQuestion>,
}

fn check_alignment(record: usize, questions: usize) -> Result<(), InstrumentError> {
    if record != questions {
        return Err(InstrumentError::RecordMismatch { record, questions });
    }
    Ok(())
}

/// Build the scoring sheet for `reviewer`.
///
/// Fails when the question record is not aligned with the test, which is
/// what happens if a test is edited after the assignment was created.
pub fn reviewer_sheet(
    assignment: &Assignment,
    reviewer: &str,
) -> Result<ReviewerSheet, InstrumentError> {
    let flat = flatten(&assignment.test);
    check_alignment(assignment.question_record.len(), flat.len())?;

    let mut parts: Vec<PartSummary> = assignment
        .test
        .mini_test
        .iter()
        .enumerate()
        .map(|(i, m)| PartSummary {
            mini_test_id: m.id,
            name: m.name.clone(),
            part_number: i + 1,
            weight: assignment.test.proportion.get(i).copied(),
            proportion: m.proportion.clone(),
            question_count: m.question.len(),
            assigned_count: 0,
        })
        .collect();

    let questions: Vec<FlatQuestion> = flat
        .into_iter()
        .filter(|q| assignment.question_record[q.slot] == reviewer)
        .collect();
    for q in &questions {
        parts[q.part_number - 1].assigned_count += 1;
    }

    Ok(ReviewerSheet {
        assignment_id: assignment.id,
        test_name: assignment.test.name.clone(),
        reviewee: assignment.reviewee.name.clone(),
        reviewer: reviewer.to_string(),
        test_proportion: assignment.test.proportion.clone(),
        questions,
        parts,
        scale: LIKERT,
    })
}

/// Rebuild a full score set from answers given in the order the reviewer's
/// slots appear in the record. Slots owned by others stay `None`.
pub fn reconstruct_ordered(
    record: &[String],
    reviewer: &str,
    answers: &[f64],
) -> Result<Vec<Option<f64>>, InstrumentError> {
    let slots = slots_for(record, reviewer);
    if slots.len() != answers.len() {
        return Err(InstrumentError::AnswerCount {
            expected: slots.len(),
            actual: answers.len(),
        });
    }

    let mut score_set = vec![None; record.len()];
    for (slot, &value) in slots.into_iter().zip(answers) {
        LIKERT.check(slot, value)?;
        score_set[slot] = Some(value);
    }
    Ok(score_set)
}

/// Rebuild a full score set from answers keyed by slot. Every slot of the
/// reviewer must be answered and no other slot may be.
pub fn reconstruct_keyed(
    record: &[String],
    reviewer: &str,
    answers: &BTreeMap<usize, f64>,
) -> Result<Vec<Option<f64>>, InstrumentError> {
    for &slot in answers.keys() {
        if record.get(slot).map(String::as_str) != Some(reviewer) {
            return Err(InstrumentError::ForeignSlot {
                slot,
                reviewer: reviewer.to_string(),
            });
        }
    }

    let mut score_set = vec![None; record.len()];
    for slot in slots_for(record, reviewer) {
        let value = *answers
            .get(&slot)
            .ok_or(InstrumentError::MissingAnswer { slot })?;
        LIKERT.check(slot, value)?;
        score_set[slot] = Some(value);
    }
    Ok(score_set)
}

/// Overlay a reviewer's fresh scores on what other reviewers already
/// submitted. The result has the length of `mine`.
pub fn merge_score_sets(existing: &[Option<f64>], mine: &[Option<f64>]) -> Vec<Option<f64>> {
    mine.iter()
        .enumerate()
        .map(|(i, score)| score.or_else(|| existing.get(i).copied().flatten()))
        .collect()
}
