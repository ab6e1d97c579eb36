use thiserror::Error;

use assessa_core::error::CoreError;

use crate::wizard::WizardStep;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{siblings} {noun} but {proportions} proportions")]
    ProportionCount {
        noun: &'static str,
        siblings: usize,
        proportions: usize,
    },

    #[error("proportions must sum to 1 (got {sum:.3})")]
    ProportionSum { sum: f64 },

    #[error("question record has {record} entries but the test has {questions} questions")]
    RecordMismatch { record: usize, questions: usize },

    #[error("score {value} at slot {slot} is outside range [{min}, {max}]")]
    ScoreOutOfRange {
        slot: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("expected {expected} answers, got {actual}")]
    AnswerCount { expected: usize, actual: usize },

    #[error("slot {slot} is not assigned to {reviewer}")]
    ForeignSlot { slot: usize, reviewer: String },

    #[error("slot {slot} has no answer")]
    MissingAnswer { slot: usize },

    #[error("step {step}: {message}")]
    Wizard { step: WizardStep, message: String },
}

impl InstrumentError {
    pub(crate) fn wizard(step: WizardStep, message: impl Into<String>) -> Self {
        InstrumentError::Wizard {
            step,
            message: message.into(),
        }
    }
}
