//! In-memory question source for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use trivia_core::model::{BankQuery, RawQuestion};
use trivia_core::traits::QuestionSource;
use trivia_core::LoadError;

/// A question source that serves a fixed list, or always fails.
pub struct StaticSource {
    questions: Vec<RawQuestion>,
    failure: Option<fn() -> LoadError>,
    /// Number of fetches made.
    call_count: AtomicU32,
    /// Last query received.
    last_query: Mutex<Option<BankQuery>>,
}

impl StaticSource {
    /// Serve `questions`, truncated to the requested amount.
    pub fn new(questions: Vec<RawQuestion>) -> Self {
        Self {
            questions,
            failure: None,
            call_count: AtomicU32::new(0),
            last_query: Mutex::new(None),
        }
    }

    /// Fail every fetch with the error built by `make_error`.
    pub fn failing(make_error: fn() -> LoadError) -> Self {
        Self {
            questions: Vec::new(),
            failure: Some(make_error),
            call_count: AtomicU32::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_query(&self) -> Option<BankQuery> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, query: &BankQuery) -> Result<Vec<RawQuestion>, LoadError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_query.lock().unwrap() = Some(query.clone());

        if let Some(make_error) = self.failure {
            return Err(make_error());
        }
        Ok(self
            .questions
            .iter()
            .take(query.amount as usize)
            .cloned()
            .collect())
    }
}
