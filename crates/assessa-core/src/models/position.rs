use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::refs::{EntityRef, UserRef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Position {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub club: Vec<EntityRef>,
    #[serde(default)]
    pub user: Vec<UserRef>,
}
