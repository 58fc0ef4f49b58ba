//! Error types for the quiz engine.

use thiserror::Error;

/// Errors returned by assembly, scoring and session transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuizError {
    /// Nothing to quiz on: no topics, unknown topic, zero count, or an empty
    /// assembled sequence.
    #[error("invalid quiz configuration: {0}")]
    InvalidConfiguration(String),
    /// A question or answer index the presentation layer should never offer.
    #[error("{what} index {index} out of range (len {len})")]
    OutOfRangeIndex {
        what: &'static str,
        index: usize,
        len: usize,
    },
    /// The operation is not valid in the current step or mode.
    #[error("cannot {action} while {step}")]
    InvalidTransition {
        action: &'static str,
        step: String,
    },
    #[error("{answers} answers recorded for {questions} questions")]
    LengthMismatch { questions: usize, answers: usize },
}

impl QuizError {
    pub(crate) fn transition(action: &'static str, step: impl Into<String>) -> Self {
        QuizError::InvalidTransition { action, step: step.into() }
    }
}

/// Errors found while loading or validating a question bank catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("duplicate topic id '{0}'")]
    DuplicateTopic(String),
    #[error("topic '{0}' has no questions")]
    EmptyTopic(String),
    #[error("question {index} of topic '{topic}' has fewer than two options")]
    TooFewOptions { topic: String, index: usize },
    #[error("question {index} of topic '{topic}' marks option {correct} correct but has {options} options")]
    CorrectOutOfRange {
        topic: String,
        index: usize,
        correct: usize,
        options: usize,
    },
}

/// A telemetry sink failed to record an event. Never leaves the emitter.
#[derive(Debug, Error)]
#[error("telemetry sink failed: {0}")]
pub struct TelemetryError(pub String);
