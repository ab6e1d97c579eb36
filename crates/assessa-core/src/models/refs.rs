use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::user::Role;

/// A nested `{id, name}` reference to another entity.
///
/// The backend embeds these inside parent records; the id may be omitted
/// when the backend only joins names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EntityRef {
    #[serde(default)]
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
}

/// A nested user reference. Carries the role so list views can pick out
/// managers and leaders without a second fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserRef {
    #[serde(default)]
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub role: Option<Role>,
}

/// A single `{name}` row of a dynamic form collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NameRow {
    pub name: String,
}

impl NameRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
