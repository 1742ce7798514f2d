//! Boundary traits: where questions come from and where the quiz is shown.
//!
//! `QuestionSource` is implemented by the `trivia-bank` crate. `Presenter`
//! is implemented by whatever UI drives the quiz (the terminal in
//! `trivia-cli`, a recorder in tests).

use async_trait::async_trait;

use crate::error::LoadError;
use crate::model::{BankQuery, RawQuestion};
use crate::report::Summary;

// ---------------------------------------------------------------------------
// Question source
// ---------------------------------------------------------------------------

/// A bank of raw, still-encoded questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "opentdb").
    fn name(&self) -> &str;

    /// Fetch questions matching `query`. Either all of them or an error.
    async fn fetch(&self, query: &BankQuery) -> Result<Vec<RawQuestion>, LoadError>;
}

// ---------------------------------------------------------------------------
// Presenter
// ---------------------------------------------------------------------------

/// Everything a presenter needs to draw one question.
#[derive(Debug, Clone, Copy)]
pub struct QuestionView<'a> {
    /// Zero-based position of the question.
    pub number: usize,
    pub total: usize,
    pub prompt: &'a str,
    pub options: &'a [String],
    pub category: Option<&'a str>,
    pub difficulty: Option<&'a str>,
    pub score: u32,
    /// Remaining time as `MM:SS`.
    pub time_remaining: &'a str,
}

/// A UI surface for the quiz.
///
/// Presenters only draw. User input flows back to the session as
/// [`crate::driver::UserAction`]s.
pub trait Presenter: Send {
    /// Questions are being fetched; input is not accepted.
    fn render_loading(&mut self);

    fn render_question(&mut self, view: QuestionView<'_>);

    /// The player picked an option but has not checked it yet.
    fn render_selection(&mut self, selected_index: usize);

    /// The countdown changed.
    fn render_tick(&mut self, time_remaining: &str);

    /// Highlight the correct option and, if different, the selected one.
    fn render_feedback(&mut self, correct_index: usize, selected_index: usize, score: u32);

    fn render_summary(&mut self, summary: &Summary);

    /// Show a user-visible error message.
    fn render_error(&mut self, message: &str);
}
