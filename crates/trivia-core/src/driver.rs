//! Quiz driver: wires a session, a presenter, user input, and the clock.
//!
//! User actions and timer ticks are consumed by one `tokio::select!` loop on a
//! single task, so they are applied to the session strictly one at a time.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::error::{LoadError, SessionError};
use crate::model::Question;
use crate::report::Summary;
use crate::session::{Phase, QuizSession, TickOutcome};
use crate::timer::format_clock;
use crate::traits::{Presenter, QuestionView};

/// Input a presenter forwards to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// An option was clicked (zero-based).
    SelectOption(usize),
    /// "Check" was clicked.
    Check,
    /// "Next" was clicked.
    Next,
    /// The player gave up.
    Quit,
}

/// Runs one quiz from loading to summary.
pub struct QuizDriver<P: Presenter> {
    session: QuizSession,
    presenter: P,
    tick_period: Duration,
}

impl<P: Presenter> QuizDriver<P> {
    pub fn new(session: QuizSession, presenter: P) -> Self {
        Self {
            session,
            presenter,
            tick_period: Duration::from_secs(1),
        }
    }

    /// Override the length of one countdown second.
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Show the loading state, await `load`, and initialize the session.
    ///
    /// A load failure is rendered to the presenter and returned.
    pub async fn load<F>(&mut self, load: F) -> Result<()>
    where
        F: Future<Output = Result<Vec<Question>, LoadError>>,
    {
        self.presenter.render_loading();

        let questions = match load.await {
            Ok(questions) => questions,
            Err(e) => {
                tracing::error!(error = %e, "failed to load questions");
                self.presenter.render_error(&e.user_message());
                return Err(e.into());
            }
        };

        if let Err(e) = self.session.initialize(questions) {
            self.presenter.render_error(&e.to_string());
            return Err(e.into());
        }
        tracing::info!(questions = self.session.total(), "quiz started");
        Ok(())
    }

    /// Load, then play the quiz.
    ///
    /// Actions queued while loading are discarded; nothing is played if
    /// loading fails.
    pub async fn load_and_run<F>(
        &mut self,
        load: F,
        mut actions: mpsc::Receiver<UserAction>,
    ) -> Result<Summary>
    where
        F: Future<Output = Result<Vec<Question>, LoadError>>,
    {
        self.load(load).await?;

        let mut dropped = 0usize;
        while actions.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            tracing::debug!(dropped, "discarded input received while loading");
        }

        Ok(self.run(actions).await?)
    }

    /// Play an already initialized session until it finishes.
    pub async fn run(
        &mut self,
        mut actions: mpsc::Receiver<UserAction>,
    ) -> Result<Summary, SessionError> {
        if self.session.phase() == Phase::Loading {
            return Err(SessionError::InvalidState {
                operation: "run",
                phase: Phase::Loading,
            });
        }

        let mut ticker = interval_at(Instant::now() + self.tick_period, self.tick_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        if self.session.phase() != Phase::Finished {
            self.render_current();
        }

        while self.session.phase() != Phase::Finished {
            tokio::select! {
                action = actions.recv() => match action {
                    Some(action) => self.handle_action(action, &mut ticker),
                    None => {
                        tracing::info!("input closed, ending quiz");
                        self.handle_action(UserAction::Quit, &mut ticker);
                    }
                },
                _ = ticker.tick() => self.handle_tick(&mut ticker),
            }
        }

        let summary = self.session.summary()?;
        tracing::info!(
            score = summary.score,
            total = summary.total,
            "quiz finished"
        );
        self.presenter.render_summary(&summary);
        Ok(summary)
    }

    fn handle_action(&mut self, action: UserAction, ticker: &mut Interval) {
        let index_before = self.session.current_index();
        let result = match action {
            UserAction::SelectOption(index) => self
                .session
                .select_option(index)
                .map(|()| self.presenter.render_selection(index)),
            UserAction::Check => self.session.check_answer().map(|feedback| {
                self.presenter.render_feedback(
                    feedback.correct_index,
                    feedback.selected_index,
                    self.session.score(),
                )
            }),
            UserAction::Next => self.session.advance(),
            UserAction::Quit => self.session.finish_early(),
        };

        match result {
            Ok(()) => {
                if self.session.current_index() != index_before
                    && self.session.phase() == Phase::AwaitingSelection
                {
                    ticker.reset();
                    self.render_current();
                }
            }
            Err(e) => {
                tracing::debug!(?action, error = %e, "rejected user action");
                self.presenter.render_error(&e.to_string());
            }
        }
    }

    fn handle_tick(&mut self, ticker: &mut Interval) {
        match self.session.tick() {
            TickOutcome::Idle => {}
            TickOutcome::Ticked { remaining_seconds } => {
                self.presenter.render_tick(&format_clock(remaining_seconds));
            }
            TickOutcome::Expired => {
                tracing::debug!(
                    question = self.session.current_index(),
                    "time ran out, moving on"
                );
                self.presenter.render_tick(&format_clock(0));
                if self.session.phase() == Phase::AwaitingSelection {
                    ticker.reset();
                    self.render_current();
                }
            }
        }
    }

    fn render_current(&mut self) {
        let Some(question) = self.session.current_question() else {
            return;
        };
        let time_remaining = self.session.timer().formatted();
        let view = QuestionView {
            number: self.session.current_index(),
            total: self.session.total(),
            prompt: &question.prompt,
            options: &question.options,
            category: question.category.as_deref(),
            difficulty: question.difficulty.as_deref(),
            score: self.session.score(),
            time_remaining: &time_remaining,
        };
        self.presenter.render_question(view);
    }
}
