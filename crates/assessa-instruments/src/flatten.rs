//! Flattening a test into its slot sequence.
//!
//! Slot `i` is the i-th question when mini-tests are walked in declaration
//! order and, within each, questions in declaration order. Question records
//! and score sets are indexed by slot.

use serde::Serialize;
use ts_rs::TS;

use assessa_core::models::test::Test;

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FlatQuestion {
    pub slot: usize,
    #[ts(type = "number")]
    pub question_id: i64,
    pub name: String,
    pub content: String,
    #[ts(type = "number")]
    pub mini_test_id: i64,
    pub mini_test_name: String,
    /// Weight of the owning mini-test within the test.
    pub mini_test_weight: Option<f64>,
    /// Weight of the question within its mini-test.
    pub question_weight: Option<f64>,
    /// 1-based position of the owning mini-test.
    pub part_number: usize,
}

pub fn flatten(test: &Test) -> Vec<FlatQuestion> {
    let mut slot = 0;
    let mut out = Vec::with_capacity(test.question_count());
    for (part, mini_test) in test.mini_test.iter().enumerate() {
        for (q, question) in mini_test.question.iter().enumerate() {
            out.push(FlatQuestion {
                slot,
                question_id: question.id,
                name: question.name.clone(),
                content: question.content.clone(),
                mini_test_id: mini_test.id,
                mini_test_name: mini_test.name.clone(),
                mini_test_weight: test.proportion.get(part).copied(),
                question_weight: mini_test.proportion.get(q).copied(),
                part_number: part + 1,
            });
            slot += 1;
        }
    }
    out
}
