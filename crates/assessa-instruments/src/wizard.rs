//! The four-step assignment wizard.
//!
//! 1. choose a test and an assignment kind
//! 2. choose participants
//! 3. (person kind only) choose which reviewers score which questions
//! 4. review and submit
//!
//! Steps advance strictly one at a time; step 3 is skipped in both
//! directions for mini-club and position assignments. Every piece of state
//! survives navigation, so going back never loses selections.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use assessa_core::models::refs::EntityRef;
use assessa_core::models::test::Test;

use crate::error::InstrumentError;
use crate::flatten::{flatten, FlatQuestion};
use crate::record::{effective_reviewers, QuestionAssignment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    ChooseTest,
    Participants,
    Questions,
    Summary,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        match self {
            WizardStep::ChooseTest => 1,
            WizardStep::Participants => 2,
            WizardStep::Questions => 3,
            WizardStep::Summary => 4,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl Serialize for WizardStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentKind {
    Person,
    Miniclub,
    Position,
}

/// Selection state of one flattened question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSelection {
    pub question: FlatQuestion,
    pub selected: bool,
    /// Explicitly toggled reviewers. Empty means "all chosen reviewers".
    pub reviewers: BTreeSet<String>,
}

/// Body of `assignments/create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AssignmentRequest {
    Person {
        test: String,
        reviewer: Vec<String>,
        reviewee: Vec<String>,
        assignments: Vec<QuestionAssignment>,
    },
    Miniclub {
        test: String,
        #[serde(rename = "targetId")]
        target_id: i64,
    },
    Position {
        test: String,
        #[serde(rename = "targetId")]
        target_id: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryLine {
    pub slot: usize,
    pub name: String,
    pub mini_test_name: String,
    pub reviewers: Vec<String>,
}

/// Read-only view rendered on the last step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSummary {
    pub test: String,
    pub kind: AssignmentKind,
    pub reviewers: Vec<String>,
    pub reviewees: Vec<String>,
    pub target: Option<EntityRef>,
    pub questions: Vec<SummaryLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentWizard {
    current_step: WizardStep,
    test: Option<String>,
    kind: Option<AssignmentKind>,
    reviewers: Vec<String>,
    reviewees: Vec<String>,
    target: Option<EntityRef>,
    questions: Vec<QuestionSelection>,
    /// Name of the test `questions` were loaded from.
    loaded_test: Option<String>,
}

impl Default for AssignmentWizard {
    fn default() -> Self {
        Self::new()
    }
}

fn dedup_names(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim().to_string();
        if !name.is_empty() && !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

impl AssignmentWizard {
    pub fn new() -> Self {
        Self {
            current_step: WizardStep::ChooseTest,
            test: None,
            kind: None,
            reviewers: Vec::new(),
            reviewees: Vec::new(),
            target: None,
            questions: Vec::new(),
            loaded_test: None,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn test(&self) -> Option<&str> {
        self.test.as_deref()
    }

    pub fn kind(&self) -> Option<AssignmentKind> {
        self.kind
    }

    pub fn reviewers(&self) -> &[String] {
        &self.reviewers
    }

    pub fn questions(&self) -> &[QuestionSelection] {
        &self.questions
    }

    fn expect_step(&self, step: WizardStep) -> Result<(), InstrumentError> {
        if self.current_step != step {
            return Err(InstrumentError::wizard(
                self.current_step,
                format!("this action belongs to step {step}"),
            ));
        }
        Ok(())
    }

    /// Step 1. Choosing another test drops questions loaded for the old one.
    pub fn choose_test(
        &mut self,
        test: impl Into<String>,
        kind: AssignmentKind,
    ) -> Result<(), InstrumentError> {
        self.expect_step(WizardStep::ChooseTest)?;
        let test = test.into().trim().to_string();
        if self.loaded_test.as_deref() != Some(test.as_str()) {
            self.questions.clear();
            self.loaded_test = None;
        }
        self.test = Some(test);
        self.kind = Some(kind);
        Ok(())
    }

    /// Step 2, person kind.
    pub fn choose_people(
        &mut self,
        reviewers: Vec<String>,
        reviewees: Vec<String>,
    ) -> Result<(), InstrumentError> {
        self.expect_step(WizardStep::Participants)?;
        if self.kind != Some(AssignmentKind::Person) {
            return Err(InstrumentError::wizard(
                self.current_step,
                "reviewers and reviewees are only chosen for person assignments",
            ));
        }
        self.reviewers = dedup_names(reviewers);
        self.reviewees = dedup_names(reviewees);
        // Toggles for reviewers that are no longer chosen are dropped.
        for selection in &mut self.questions {
            selection.reviewers.retain(|r| self.reviewers.contains(r));
        }
        Ok(())
    }

    /// Step 2, mini-club and position kinds.
    pub fn choose_target(&mut self, target: EntityRef) -> Result<(), InstrumentError> {
        self.expect_step(WizardStep::Participants)?;
        if !matches!(
            self.kind,
            Some(AssignmentKind::Miniclub | AssignmentKind::Position)
        ) {
            return Err(InstrumentError::wizard(
                self.current_step,
                "a single target is only chosen for mini-club or position assignments",
            ));
        }
        self.target = Some(target);
        Ok(())
    }

    /// True when step 3 needs the test structure fetched.
    pub fn needs_questions(&self) -> bool {
        self.kind == Some(AssignmentKind::Person) && self.loaded_test.is_none()
    }

    /// Load the chosen test's structure. Every question starts selected
    /// with no explicit reviewer.
    pub fn load_questions(&mut self, test: &Test) -> Result<(), InstrumentError> {
        if self.test.as_deref() != Some(test.name.as_str()) {
            return Err(InstrumentError::wizard(
                self.current_step,
                format!("test '{}' is not the chosen test", test.name),
            ));
        }
        self.questions = flatten(test)
            .into_iter()
            .map(|question| QuestionSelection {
                question,
                selected: true,
                reviewers: BTreeSet::new(),
            })
            .collect();
        self.loaded_test = Some(test.name.clone());
        Ok(())
    }

    fn selection_mut(&mut self, slot: usize) -> Result<&mut QuestionSelection, InstrumentError> {
        let step = self.current_step;
        self.questions
            .get_mut(slot)
            .ok_or_else(|| InstrumentError::wizard(step, format!("no question at slot {slot}")))
    }

    pub fn toggle_question(&mut self, slot: usize) -> Result<bool, InstrumentError> {
        self.expect_step(WizardStep::Questions)?;
        let selection = self.selection_mut(slot)?;
        selection.selected = !selection.selected;
        Ok(selection.selected)
    }

    /// Global select-all / deselect-all.
    pub fn select_all_questions(&mut self, selected: bool) -> Result<(), InstrumentError> {
        self.expect_step(WizardStep::Questions)?;
        for selection in &mut self.questions {
            selection.selected = selected;
        }
        Ok(())
    }

    /// Toggle one reviewer on one question. Returns whether the reviewer
    /// is now explicitly assigned.
    pub fn toggle_reviewer(&mut self, slot: usize, reviewer: &str) -> Result<bool, InstrumentError> {
        self.expect_step(WizardStep::Questions)?;
        if !self.reviewers.iter().any(|r| r == reviewer) {
            return Err(InstrumentError::wizard(
                self.current_step,
                format!("'{reviewer}' is not a chosen reviewer"),
            ));
        }
        let selection = self.selection_mut(slot)?;
        if selection.reviewers.remove(reviewer) {
            Ok(false)
        } else {
            selection.reviewers.insert(reviewer.to_string());
            Ok(true)
        }
    }

    /// Per-question select-all: assign every chosen reviewer explicitly,
    /// or clear explicit toggles.
    pub fn set_all_reviewers(&mut self, slot: usize, all: bool) -> Result<(), InstrumentError> {
        self.expect_step(WizardStep::Questions)?;
        let reviewers = self.reviewers.clone();
        let selection = self.selection_mut(slot)?;
        selection.reviewers.clear();
        if all {
            selection.reviewers.extend(reviewers);
        }
        Ok(())
    }

    fn validate_current(&self) -> Result<(), InstrumentError> {
        let step = self.current_step;
        match step {
            WizardStep::ChooseTest => {
                if self.test.as_deref().is_none_or(str::is_empty) {
                    return Err(InstrumentError::wizard(step, "a test must be chosen"));
                }
                if self.kind.is_none() {
                    return Err(InstrumentError::wizard(step, "an assignment type must be chosen"));
                }
            }
            WizardStep::Participants => match self.kind {
                Some(AssignmentKind::Person) => {
                    if self.reviewers.is_empty() {
                        return Err(InstrumentError::wizard(step, "at least one reviewer is required"));
                    }
                    if self.reviewees.is_empty() {
                        return Err(InstrumentError::wizard(step, "at least one reviewee is required"));
                    }
                }
                _ => {
                    if self.target.is_none() {
                        return Err(InstrumentError::wizard(step, "a target must be chosen"));
                    }
                }
            },
            WizardStep::Questions => {
                if self.loaded_test.is_none() {
                    return Err(InstrumentError::wizard(step, "questions have not been loaded"));
                }
                if !self.questions.iter().any(|q| q.selected) {
                    return Err(InstrumentError::wizard(step, "at least one question must be selected"));
                }
            }
            WizardStep::Summary => {
                return Err(InstrumentError::wizard(step, "already on the last step"));
            }
        }
        Ok(())
    }

    /// Validate the current step and move forward.
    pub fn next(&mut self) -> Result<WizardStep, InstrumentError> {
        self.validate_current()?;
        self.current_step = match (self.current_step, self.kind) {
            (WizardStep::ChooseTest, _) => WizardStep::Participants,
            (WizardStep::Participants, Some(AssignmentKind::Person)) => WizardStep::Questions,
            (WizardStep::Participants, _) => WizardStep::Summary,
            (WizardStep::Questions, _) => WizardStep::Summary,
            (WizardStep::Summary, _) => WizardStep::Summary,
        };
        Ok(self.current_step)
    }

    pub fn back(&mut self) -> Result<WizardStep, InstrumentError> {
        self.current_step = match (self.current_step, self.kind) {
            (WizardStep::ChooseTest, _) => {
                return Err(InstrumentError::wizard(self.current_step, "already on the first step"));
            }
            (WizardStep::Participants, _) => WizardStep::ChooseTest,
            (WizardStep::Questions, _) => WizardStep::Participants,
            (WizardStep::Summary, Some(AssignmentKind::Person)) => WizardStep::Questions,
            (WizardStep::Summary, _) => WizardStep::Participants,
        };
        Ok(self.current_step)
    }

    fn selected_lines(&self) -> Vec<SummaryLine> {
        self.questions
            .iter()
            .filter(|s| s.selected)
            .map(|s| {
                let explicit: Vec<String> = s.reviewers.iter().cloned().collect();
                SummaryLine {
                    slot: s.question.slot,
                    name: s.question.name.clone(),
                    mini_test_name: s.question.mini_test_name.clone(),
                    reviewers: effective_reviewers(&explicit, &self.reviewers),
                }
            })
            .collect()
    }

    pub fn summary(&self) -> Result<WizardSummary, InstrumentError> {
        self.expect_step(WizardStep::Summary)?;
        let (test, kind) = match (&self.test, self.kind) {
            (Some(test), Some(kind)) => (test.clone(), kind),
            _ => return Err(InstrumentError::wizard(self.current_step, "wizard is incomplete")),
        };
        let person = kind == AssignmentKind::Person;
        Ok(WizardSummary {
            test,
            kind,
            reviewers: if person { self.reviewers.clone() } else { Vec::new() },
            reviewees: if person { self.reviewees.clone() } else { Vec::new() },
            target: if person { None } else { self.target.clone() },
            questions: if person { self.selected_lines() } else { Vec::new() },
        })
    }

    /// Build the `assignments/create` body. The all-reviewers fallback is
    /// applied here, not stored.
    pub fn build_request(&self) -> Result<AssignmentRequest, InstrumentError> {
        let summary = self.summary()?;
        let request = match summary.kind {
            AssignmentKind::Person => AssignmentRequest::Person {
                assignments: self
                    .questions
                    .iter()
                    .filter(|s| s.selected)
                    .map(|s| QuestionAssignment {
                        question_id: s.question.question_id,
                        reviewers: effective_reviewers(
                            &s.reviewers.iter().cloned().collect::<Vec<_>>(),
                            &self.reviewers,
                        ),
                    })
                    .collect(),
                test: summary.test,
                reviewer: summary.reviewers,
                reviewee: summary.reviewees,
            },
            AssignmentKind::Miniclub | AssignmentKind::Position => {
                let target_id = summary
                    .target
                    .as_ref()
                    .map(|t| t.id)
                    .ok_or_else(|| InstrumentError::wizard(self.current_step, "a target must be chosen"))?;
                if summary.kind == AssignmentKind::Miniclub {
                    AssignmentRequest::Miniclub {
                        test: summary.test,
                        target_id,
                    }
                } else {
                    AssignmentRequest::Position {
                        test: summary.test,
                        target_id,
                    }
                }
            }
        };
        Ok(request)
    }
}
