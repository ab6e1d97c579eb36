//! Create/update form inputs and their field-level checks.
//!
//! Inputs are what an admin submits. Where the backend accepts the form
//! data as-is, the input serializes directly as the request body.
//! Cross-field weight rules live in `assessa-instruments::composition`.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::refs::NameRow;
use crate::models::user::{Gender, Role};

pub const MIN_PHONE_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All field errors of one submission, reported together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(field, message);
    }
}

fn require_rows(errors: &mut FieldErrors, field: &str, rows: &[NameRow]) {
    for (i, row) in rows.iter().enumerate() {
        require(errors, &format!("{field}[{i}].name"), &row.name, "name must not be empty");
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClubInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<NameRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mini_clubs: Option<Vec<NameRow>>,
}

impl ClubInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::default();
        require(&mut errors, "name", &self.name, "club name must not be empty");
        if let Some(positions) = &self.positions {
            if positions.is_empty() {
                errors.push("positions", "at least one position is required");
            }
            require_rows(&mut errors, "positions", positions);
        }
        if let Some(mini_clubs) = &self.mini_clubs {
            require_rows(&mut errors, "miniClubs", mini_clubs);
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MiniClubInput {
    pub name: String,
    pub club_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_name: Option<String>,
    #[serde(default)]
    pub members: Vec<NameRow>,
}

impl MiniClubInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::default();
        require(&mut errors, "name", &self.name, "mini-club name must not be empty");
        require(&mut errors, "clubName", &self.club_name, "owning club must be chosen");
        require_rows(&mut errors, "members", &self.members);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PositionInput {
    pub name: String,
    #[serde(default)]
    pub clubs: Vec<NameRow>,
}

impl PositionInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::default();
        require(&mut errors, "name", &self.name, "position name must not be empty");
        require_rows(&mut errors, "clubs", &self.clubs);
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserInput {
    pub name: String,
    pub role: Role,
    pub gender: Gender,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mini_club_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_name: Option<String>,
}

impl UserInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::default();
        require(&mut errors, "name", &self.name, "user name must not be empty");
        if self.phone.trim().chars().count() < MIN_PHONE_LEN {
            errors.push(
                "phone",
                format!("phone number must be at least {MIN_PHONE_LEN} characters"),
            );
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuestionInput {
    pub name: String,
    pub content: String,
}

impl QuestionInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::default();
        require(&mut errors, "name", &self.name, "question name must not be empty");
        require(&mut errors, "content", &self.content, "question content must not be empty");
        errors.into_result()
    }
}

/// A `{name, proportion}` row of a mini-test or test form. The proportion
/// stays textual until validated, as typed by the admin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeightedRow {
    pub name: String,
    pub proportion: String,
}

impl WeightedRow {
    pub fn new(name: impl Into<String>, proportion: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            proportion: proportion.into(),
        }
    }

    /// The proportion as a number in `[0, 1]`, if it is one.
    pub fn weight(&self) -> Option<f64> {
        self.proportion
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite() && (0.0..=1.0).contains(w))
    }
}

fn validate_weighted_rows(errors: &mut FieldErrors, field: &str, rows: &[WeightedRow], noun: &str) {
    if rows.is_empty() {
        errors.push(field, format!("at least one {noun} is required"));
    }
    for (i, row) in rows.iter().enumerate() {
        require(errors, &format!("{field}[{i}].name"), &row.name, &format!("{noun} name must not be empty"));
        if row.weight().is_none() {
            errors.push(
                format!("{field}[{i}].proportion"),
                "proportion must be a number between 0 and 1",
            );
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MiniTestInput {
    pub name: String,
    pub question: Vec<WeightedRow>,
}

impl MiniTestInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::default();
        require(&mut errors, "name", &self.name, "mini-test name must not be empty");
        validate_weighted_rows(&mut errors, "question", &self.question, "question");
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TestInput {
    pub name: String,
    pub mini_test: Vec<WeightedRow>,
}

impl TestInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = FieldErrors::default();
        require(&mut errors, "name", &self.name, "test name must not be empty");
        validate_weighted_rows(&mut errors, "miniTest", &self.mini_test, "mini-test");
        errors.into_result()
    }
}

/// Body of `miniTests/create` and `miniTests/update/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MiniTestPayload {
    pub name: String,
    pub question: Vec<NameRow>,
    pub proportion: Vec<f64>,
}

/// Body of `tests/create` and `tests/update/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TestPayload {
    pub name: String,
    pub mini_test: Vec<NameRow>,
    pub proportion: Vec<f64>,
}
