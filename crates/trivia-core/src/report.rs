//! End-of-quiz summary with optional JSON export.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Outcome;

/// Final score plus the answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub score: u32,
    pub total: usize,
    pub per_question: Vec<SummaryItem>,
}

/// One line of the answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub prompt: String,
    pub correct_answer: String,
    pub outcome: Outcome,
}

impl Summary {
    /// Fraction of questions answered correctly, 0.0 for an empty quiz.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.score as f64 / self.total as f64
        }
    }

    /// Number of questions with the given outcome.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.per_question
            .iter()
            .filter(|item| item.outcome == outcome)
            .count()
    }
}

/// A summary stamped with when the quiz ended, as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub finished_at: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: Summary,
}

impl SummaryReport {
    pub fn new(summary: Summary) -> Self {
        Self {
            finished_at: Utc::now(),
            summary,
        }
    }

    /// Save the report as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize summary")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        Ok(())
    }
}
