use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::refs::{EntityRef, UserRef};

/// A sub-group of a department. Nested inside [`Club`](super::club::Club)
/// the owning club is omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MiniClub {
    #[serde(default)]
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub club: Option<EntityRef>,
    #[serde(default)]
    pub user: Vec<UserRef>,
}
