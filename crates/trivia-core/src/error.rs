//! Error types for loading questions and driving a quiz session.
//!
//! `LoadError` lives here rather than in `trivia-bank` so the quiz driver can
//! render load failures without depending on any concrete question source.

use thiserror::Error;

use crate::session::Phase;

/// Errors that can occur while fetching questions from a question bank.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The transport call failed or the bank answered with a non-success status.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The payload could not be parsed into the expected question shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The bank understood the request but refused to serve it.
    #[error("question bank rejected the request (code {code}): {reason}")]
    Rejected { code: u32, reason: String },
}

impl LoadError {
    /// Message suitable for showing to a player.
    pub fn user_message(&self) -> String {
        match self {
            LoadError::NetworkFailure(_) => {
                "Failed to load questions. Please try again later.".to_string()
            }
            LoadError::MalformedResponse(_) => {
                "The question bank sent something we could not read.".to_string()
            }
            LoadError::Rejected { reason, .. } => format!("The question bank said: {reason}"),
        }
    }
}

/// Contract violations on the quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The operation is not allowed in the session's current phase.
    #[error("cannot {operation} while {phase}")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },

    /// A summary was requested before the quiz finished.
    #[error("quiz is not finished yet")]
    NotFinished,

    /// The selected option does not exist on the current question.
    #[error("option {index} is out of range (question has {len} options)")]
    OutOfRange { index: usize, len: usize },

    /// A question handed to the session breaks the options invariant.
    #[error("question {index} is invalid: {reason}")]
    InvalidQuestion { index: usize, reason: String },
}
