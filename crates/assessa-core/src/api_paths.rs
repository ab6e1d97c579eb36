//! Backend endpoint conventions.
//!
//! Pure path functions with no HTTP dependency. These define the canonical
//! layout of the backend REST API. Paths are kept as segment lists so the
//! HTTP layer can percent-encode entity names (which are frequently CJK).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every resource collection exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    Clubs,
    Users,
    Positions,
    MiniClubs,
    MiniTests,
    Tests,
    Questions,
    Assignments,
}

impl Resource {
    pub fn as_path(self) -> &'static str {
        match self {
            Resource::Clubs => "clubs",
            Resource::Users => "users",
            Resource::Positions => "positions",
            Resource::MiniClubs => "miniClubs",
            Resource::MiniTests => "miniTests",
            Resource::Tests => "tests",
            Resource::Questions => "questions",
            Resource::Assignments => "assignments",
        }
    }

    /// Resources looked up with `POST R/findOne {name}` and updated with
    /// `POST R/update` carrying the id in the body. The rest are addressed
    /// by name in the path.
    pub fn keyed_by_body(self) -> bool {
        matches!(
            self,
            Resource::Clubs | Resource::Users | Resource::Positions | Resource::MiniClubs
        )
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// A backend path, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
}

impl Endpoint {
    fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

pub fn find_all(resource: Resource) -> Endpoint {
    Endpoint::new([resource.as_path(), "findAll"])
}

/// `POST R/findOne` with a `{name}` body.
pub fn find_one(resource: Resource) -> Endpoint {
    Endpoint::new([resource.as_path(), "findOne"])
}

/// `GET R/findOne/{key}`. The key is a name for most resources and an id
/// for assignments.
pub fn find_one_by(resource: Resource, key: &str) -> Endpoint {
    Endpoint::new([resource.as_path(), "findOne", key])
}

pub fn create(resource: Resource) -> Endpoint {
    Endpoint::new([resource.as_path(), "create"])
}

/// `PUT R/update/{name}`.
pub fn update(resource: Resource, name: &str) -> Endpoint {
    Endpoint::new([resource.as_path(), "update", name])
}

/// `POST R/update` with the full object (including id) as body.
pub fn update_in_body(resource: Resource) -> Endpoint {
    Endpoint::new([resource.as_path(), "update"])
}

pub fn delete_by_name(resource: Resource, name: &str) -> Endpoint {
    Endpoint::new([resource.as_path(), "delete", "name", name])
}

pub fn delete_by_id(resource: Resource, id: i64) -> Endpoint {
    Endpoint::new([resource.as_path().to_string(), "delete".into(), id.to_string()])
}

pub fn assignment_state() -> Endpoint {
    Endpoint::new(["assignments", "update", "state"])
}

pub fn assignment_score() -> Endpoint {
    Endpoint::new(["assignments", "update", "score"])
}

/// Assignments in which the named user takes part.
pub fn test_data(user_name: &str) -> Endpoint {
    Endpoint::new(["users", "getTestData", user_name])
}
