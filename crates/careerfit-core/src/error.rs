//! Assessment error types.
//!
//! These represent precondition violations by the driver of an
//! [`AssessmentEngine`](crate::engine::AssessmentEngine). A rejected call
//! never modifies the engine's state.

use thiserror::Error;

use crate::model::{Phase, Section};

/// Errors raised when an engine operation is called out of order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// The operation has no meaning in the current phase.
    #[error("cannot {operation} during the {phase} phase")]
    InvalidPhase {
        operation: &'static str,
        phase: Phase,
    },

    /// Every question of the current section has already been visited.
    #[error("the {section} section has no questions left ({total} total)")]
    SectionExhausted { section: Section, total: usize },

    /// The current question must be answered before moving past it.
    #[error("question {question_id} has not been answered")]
    Unanswered { question_id: String },
}

impl AssessmentError {
    /// The phase the engine was in when the call was rejected, if known.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            AssessmentError::InvalidPhase { phase, .. } => Some(*phase),
            AssessmentError::SectionExhausted { section, .. } => Some(Phase::from(*section)),
            AssessmentError::Unanswered { .. } => None,
        }
    }
}
