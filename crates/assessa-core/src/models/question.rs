use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::refs::EntityRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Question {
    #[serde(default)]
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    /// The text shown to reviewers.
    #[serde(default)]
    pub content: String,
    /// Mini-tests that include this question. Only populated on `findAll`.
    #[serde(default)]
    pub mini_test: Vec<EntityRef>,
}
