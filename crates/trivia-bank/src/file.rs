//! Question source backed by a local JSON file.
//!
//! Accepts either a saved Open Trivia DB response (`{"response_code": 0,
//! "results": [...]}`) or a bare array of questions.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;

use trivia_core::model::{BankQuery, RawQuestion};
use trivia_core::traits::QuestionSource;
use trivia_core::LoadError;

pub struct FileSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FileContents {
    Envelope { results: Vec<RawQuestion> },
    Bare(Vec<RawQuestion>),
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self, query: &BankQuery) -> Result<Vec<RawQuestion>, LoadError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            LoadError::NetworkFailure(format!("failed to read {}: {e}", self.path.display()))
        })?;

        let questions = match serde_json::from_str::<FileContents>(&content) {
            Ok(FileContents::Envelope { results }) => results,
            Ok(FileContents::Bare(results)) => results,
            Err(e) => {
                return Err(LoadError::MalformedResponse(format!(
                    "{} is not a question list: {e}",
                    self.path.display()
                )))
            }
        };

        tracing::debug!(
            path = %self.path.display(),
            available = questions.len(),
            "read questions from file"
        );
        Ok(questions.into_iter().take(query.amount as usize).collect())
    }
}
