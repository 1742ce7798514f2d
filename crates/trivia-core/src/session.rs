//! The quiz session state machine.
//!
//! ```text
//! Loading -> AwaitingSelection -> Answered -> AwaitingSelection -> ... -> Finished
//! ```
//!
//! The session owns its questions, its score, and the one countdown for the
//! current question. Every transition that leaves `AwaitingSelection` stops or
//! resets the countdown inside the same call, so a timer expiry can never be
//! processed between a check and the move to the next question.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::model::Question;
use crate::report::{Summary, SummaryItem};
use crate::timer::{Countdown, Tick, DEFAULT_SECONDS_PER_QUESTION};

/// Discrete state of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Loading,
    AwaitingSelection,
    Answered,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Loading => write!(f, "loading"),
            Phase::AwaitingSelection => write!(f, "awaiting selection"),
            Phase::Answered => write!(f, "answered"),
            Phase::Finished => write!(f, "finished"),
        }
    }
}

/// How a single question ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
    /// The countdown ran out before an answer was checked.
    TimedOut,
    /// The quiz ended before the question was reached or answered.
    Unanswered,
}

/// Result of checking an answer, for highlighting the options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub correct_index: usize,
    pub selected_index: usize,
    pub correct: bool,
}

/// What a timer tick did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No countdown was running.
    Idle,
    /// One second elapsed.
    Ticked { remaining_seconds: u32 },
    /// Time ran out and the session moved on.
    Expired,
}

/// A single quiz run.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    answer_key: Vec<usize>,
    outcomes: Vec<Option<Outcome>>,
    current_index: usize,
    score: u32,
    selected_option: Option<usize>,
    phase: Phase,
    timer: Countdown,
    seconds_per_question: u32,
}

impl QuizSession {
    /// A session waiting for its questions.
    pub fn new(seconds_per_question: u32) -> Self {
        Self {
            questions: Vec::new(),
            answer_key: Vec::new(),
            outcomes: Vec::new(),
            current_index: 0,
            score: 0,
            selected_option: None,
            phase: Phase::Loading,
            timer: Countdown::new(seconds_per_question),
            seconds_per_question,
        }
    }

    /// Populate the session. Only allowed once, while `Loading`.
    ///
    /// An empty list finishes the quiz immediately with a score of zero.
    /// Every question must contain its correct answer exactly once.
    pub fn initialize(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        self.require(Phase::Loading, "initialize")?;

        let mut answer_key = Vec::with_capacity(questions.len());
        for (index, question) in questions.iter().enumerate() {
            let hits = question
                .options
                .iter()
                .filter(|o| **o == question.correct_answer)
                .count();
            match (hits, question.correct_index()) {
                (1, Some(correct)) => answer_key.push(correct),
                _ => {
                    return Err(SessionError::InvalidQuestion {
                        index,
                        reason: format!(
                            "correct answer appears {hits} times among {} options",
                            question.options.len()
                        ),
                    })
                }
            }
        }

        self.outcomes = vec![None; questions.len()];
        self.questions = questions;
        self.answer_key = answer_key;
        self.current_index = 0;
        self.score = 0;
        self.selected_option = None;

        if self.questions.is_empty() {
            self.phase = Phase::Finished;
            self.timer.stop();
        } else {
            self.phase = Phase::AwaitingSelection;
            self.timer.reset(self.seconds_per_question);
        }
        tracing::debug!(questions = self.questions.len(), "session initialized");
        Ok(())
    }

    /// Record the player's choice on the current question.
    pub fn select_option(&mut self, index: usize) -> Result<(), SessionError> {
        self.require(Phase::AwaitingSelection, "select an option")?;
        let len = self.questions[self.current_index].options.len();
        if index >= len {
            return Err(SessionError::OutOfRange { index, len });
        }
        self.selected_option = Some(index);
        Ok(())
    }

    /// Score the selected option and stop the countdown.
    ///
    /// Rejected once the question is already answered, so a question can
    /// never be scored twice.
    pub fn check_answer(&mut self) -> Result<Feedback, SessionError> {
        self.require(Phase::AwaitingSelection, "check an answer")?;
        let Some(selected_index) = self.selected_option else {
            return Err(SessionError::InvalidState {
                operation: "check an answer without a selection",
                phase: self.phase,
            });
        };

        self.timer.stop();
        let correct_index = self.answer_key[self.current_index];
        let correct = selected_index == correct_index;
        if correct {
            self.score += 1;
        }
        self.outcomes[self.current_index] = Some(if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        });
        self.phase = Phase::Answered;

        Ok(Feedback {
            correct_index,
            selected_index,
            correct,
        })
    }

    /// Move on after the player has seen the feedback.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        self.require(Phase::Answered, "advance")?;
        self.move_to_next();
        Ok(())
    }

    /// Move on because time ran out.
    ///
    /// An unanswered question scores nothing and is recorded as timed out.
    pub fn force_advance(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::AwaitingSelection => {
                self.outcomes[self.current_index] = Some(Outcome::TimedOut);
            }
            Phase::Answered => {}
            phase => {
                return Err(SessionError::InvalidState {
                    operation: "force advance",
                    phase,
                })
            }
        }
        self.move_to_next();
        Ok(())
    }

    /// End the quiz now; questions not yet answered count as unanswered.
    pub fn finish_early(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::AwaitingSelection | Phase::Answered => {
                self.timer.stop();
                self.selected_option = None;
                self.current_index = self.questions.len();
                self.phase = Phase::Finished;
                Ok(())
            }
            phase => Err(SessionError::InvalidState {
                operation: "finish early",
                phase,
            }),
        }
    }

    /// Advance the countdown by one second, forcing an advance on expiry.
    pub fn tick(&mut self) -> TickOutcome {
        match self.timer.tick() {
            Tick::Idle => TickOutcome::Idle,
            Tick::Remaining(remaining_seconds) => TickOutcome::Ticked { remaining_seconds },
            Tick::Expired => {
                if let Err(e) = self.force_advance() {
                    tracing::warn!(error = %e, "timer expired outside a question");
                }
                TickOutcome::Expired
            }
        }
    }

    /// Final score and answer key. Only available once finished.
    pub fn summary(&self) -> Result<Summary, SessionError> {
        if self.phase != Phase::Finished {
            return Err(SessionError::NotFinished);
        }
        let per_question = self
            .questions
            .iter()
            .zip(&self.outcomes)
            .map(|(q, outcome)| SummaryItem {
                prompt: q.prompt.clone(),
                correct_answer: q.correct_answer.clone(),
                outcome: outcome.unwrap_or(Outcome::Unanswered),
            })
            .collect();
        Ok(Summary {
            score: self.score,
            total: self.questions.len(),
            per_question,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// The question being asked, if the quiz is in progress.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::AwaitingSelection | Phase::Answered => self.questions.get(self.current_index),
            Phase::Loading | Phase::Finished => None,
        }
    }

    pub fn timer(&self) -> &Countdown {
        &self.timer
    }

    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }

    fn move_to_next(&mut self) {
        self.current_index += 1;
        self.selected_option = None;
        if self.current_index >= self.questions.len() {
            self.timer.stop();
            self.phase = Phase::Finished;
            tracing::debug!(score = self.score, "session finished");
        } else {
            self.phase = Phase::AwaitingSelection;
            self.timer.reset(self.seconds_per_question);
        }
    }

    fn require(&self, expected: Phase, operation: &'static str) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                operation,
                phase: self.phase,
            })
        }
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(DEFAULT_SECONDS_PER_QUESTION)
    }
}
