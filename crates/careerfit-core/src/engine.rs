//! Assessment state machine.
//!
//! The engine owns the only mutable state of an assessment and is driven
//! by a presentation layer (a UI, the CLI prompt loop, or a test) through
//! message-style calls. Phases advance strictly forward:
//!
//! ```text
//! intro -> psychometric -> technical -> wiscar -> results
//! ```
//!
//! `results` is terminal; only [`AssessmentEngine::restart`] returns to
//! `intro`, and it discards every answer.

use chrono::Utc;

use crate::catalog::Catalog;
use crate::error::AssessmentError;
use crate::model::{
    Answer, AnswerSet, AnswerValue, AssessmentState, Phase, Progress, Question, Section,
};
use crate::results::AssessmentResults;
use crate::scoring;

/// A single-user assessment session over one catalog.
#[derive(Debug, Clone)]
pub struct AssessmentEngine {
    catalog: Catalog,
    state: AssessmentState,
}

impl AssessmentEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            state: AssessmentState::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &AssessmentState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.state.answers
    }

    /// Leave `intro` and begin the psychometric section.
    pub fn start(&mut self) -> Result<&AssessmentState, AssessmentError> {
        if self.state.phase != Phase::Intro {
            return Err(AssessmentError::InvalidPhase {
                operation: "start the assessment",
                phase: self.state.phase,
            });
        }

        let now = Utc::now();
        self.state.phase = Phase::Psychometric;
        self.state.current_question_index = 0;
        self.state.start_time = Some(now);
        self.state.section_start_time = Some(now);
        tracing::debug!(phase = %self.state.phase, "assessment started");
        Ok(&self.state)
    }

    /// Insert or overwrite the answer for `question_id`.
    ///
    /// The value is not checked against the question's domain; keeping
    /// malformed input out is the driver's job.
    pub fn record_answer(
        &mut self,
        question_id: &str,
        value: impl Into<AnswerValue>,
    ) -> &AssessmentState {
        if self.catalog.get(question_id).is_none() {
            tracing::warn!("recording answer for unknown question {question_id}");
        }
        let replaced = self.state.answers.record(Answer::new(question_id, value));
        tracing::debug!(question_id, overwrite = replaced.is_some(), "answer recorded");
        &self.state
    }

    /// Move to the next question of the current section.
    ///
    /// Requires a question-bearing phase, a current question, and an
    /// answer to it. Moving past the last question leaves the index equal
    /// to the section length; the driver then calls
    /// [`advance_section`](Self::advance_section).
    pub fn advance_question(&mut self) -> Result<&AssessmentState, AssessmentError> {
        let Some(section) = self.state.phase.section() else {
            return Err(AssessmentError::InvalidPhase {
                operation: "advance question",
                phase: self.state.phase,
            });
        };

        let question_id = match self.current_question() {
            Some(q) => q.id.clone(),
            None => {
                return Err(AssessmentError::SectionExhausted {
                    section,
                    total: self.catalog.questions_for(section).len(),
                })
            }
        };
        if !self.state.answers.contains(&question_id) {
            return Err(AssessmentError::Unanswered { question_id });
        }

        self.state.current_question_index += 1;
        Ok(&self.state)
    }

    /// Move to the next phase, resetting the question index. Clamps at
    /// `results`.
    pub fn advance_section(&mut self) -> &AssessmentState {
        let now = Utc::now();
        let from = self.state.phase;
        self.state.phase = from.next();
        self.state.current_question_index = 0;
        self.state.section_start_time = Some(now);
        if self.state.start_time.is_none() {
            self.state.start_time = Some(now);
        }
        tracing::debug!(from = %from, to = %self.state.phase, "section advanced");
        &self.state
    }

    /// Discard all answers and return to `intro`.
    pub fn restart(&mut self) -> &AssessmentState {
        self.state = AssessmentState::new();
        tracing::debug!("assessment restarted");
        &self.state
    }

    /// Catalog questions of `section`, in catalog order.
    pub fn questions_for(&self, section: Section) -> Vec<&Question> {
        self.catalog.questions_for(section)
    }

    /// Questions of the current phase; empty for `intro` and `results`.
    pub fn current_section_questions(&self) -> Vec<&Question> {
        self.state
            .phase
            .section()
            .map(|s| self.questions_for(s))
            .unwrap_or_default()
    }

    /// The question to show next, or `None` once the section is exhausted.
    pub fn current_question(&self) -> Option<&Question> {
        self.current_section_questions()
            .get(self.state.current_question_index)
            .copied()
    }

    /// One-based position in the current section. `None` outside the
    /// question-bearing phases.
    pub fn progress(&self) -> Option<Progress> {
        let total = self.current_section_questions().len();
        if total == 0 {
            return None;
        }
        Some(Progress {
            current: self.state.current_question_index + 1,
            total,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.state.phase == Phase::Results
    }

    /// Score the answers recorded so far.
    pub fn score(&self) -> AssessmentResults {
        scoring::score(&self.state.answers, &self.catalog)
    }
}

impl Default for AssessmentEngine {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}
