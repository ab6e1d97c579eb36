use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::mini_test::MiniTest;

/// The top-level assessment instrument. `proportion[i]` is the weight of
/// `mini_test[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Test {
    #[serde(default)]
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub mini_test: Vec<MiniTest>,
    #[serde(default)]
    pub proportion: Vec<f64>,
}

impl Test {
    /// Total number of questions across all mini-tests.
    pub fn question_count(&self) -> usize {
        self.mini_test.iter().map(|m| m.question.len()).sum()
    }
}
