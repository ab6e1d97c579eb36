use thiserror::Error;

use crate::inputs::FieldErrors;
use crate::models::assignment::AssignmentStatus;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: AssignmentStatus,
        to: AssignmentStatus,
    },

    #[error("unknown status: {0}")]
    UnknownStatus(String),

    #[error("validation failed: {0}")]
    Validation(FieldErrors),
}
