use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::mini_club::MiniClub;
use super::refs::{EntityRef, UserRef};

/// A department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Club {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub position: Vec<EntityRef>,
    #[serde(default)]
    pub mini_club: Vec<MiniClub>,
    #[serde(default)]
    pub user: Vec<UserRef>,
}
