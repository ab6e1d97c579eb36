use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::refs::EntityRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Role {
    Admin,
    Manager,
    Leader,
    Worker,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Leader => "LEADER",
            Role::Worker => "WORKER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub club: Option<EntityRef>,
    #[serde(default)]
    pub mini_club: Option<EntityRef>,
    #[serde(default)]
    pub position: Option<EntityRef>,
}
