//! Core data model types for trivia.
//!
//! These are the types shared by the question bank, the session state
//! machine, and every presenter: raw wire questions, playable questions,
//! and the query that selects them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A question exactly as the bank returns it: HTML-encoded, answers unshuffled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawQuestion {
    /// Question text (HTML-entity encoded).
    pub question: String,
    /// The one correct answer.
    pub correct_answer: String,
    /// The wrong answers.
    pub incorrect_answers: Vec<String>,
    /// Category name, if the bank supplies one.
    #[serde(default)]
    pub category: Option<String>,
    /// Difficulty label, if the bank supplies one.
    #[serde(default)]
    pub difficulty: Option<String>,
    /// "multiple" or "boolean".
    #[serde(default, rename = "type")]
    pub question_type: Option<String>,
}

/// A playable question with decoded text and a fixed option order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Text shown to the player.
    pub prompt: String,
    /// The correct option's text.
    pub correct_answer: String,
    /// All options, shuffled once at load time.
    pub options: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl Question {
    /// Build a question whose options are already in their final order.
    pub fn new(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            correct_answer: correct_answer.into(),
            options,
            category: None,
            difficulty: None,
        }
    }

    /// Position of the correct answer within `options`.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.correct_answer)
    }
}

/// Question difficulty as understood by the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Answer layout of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Four options, one correct.
    Multiple,
    /// True / False.
    Boolean,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Multiple => write!(f, "multiple"),
            QuestionType::Boolean => write!(f, "boolean"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "multiple" | "multiple-choice" => Ok(QuestionType::Multiple),
            "boolean" | "bool" | "true-false" => Ok(QuestionType::Boolean),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Which questions to ask the bank for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankQuery {
    /// Number of questions.
    #[serde(default = "default_amount")]
    pub amount: u32,
    /// Numeric category code (18 = Science: Computers).
    #[serde(default)]
    pub category: Option<u32>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default, rename = "type")]
    pub question_type: Option<QuestionType>,
}

/// Default number of questions per quiz.
pub const DEFAULT_AMOUNT: u32 = 50;

/// Default category: Science: Computers.
pub const DEFAULT_CATEGORY: u32 = 18;

fn default_amount() -> u32 {
    DEFAULT_AMOUNT
}

impl Default for BankQuery {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT,
            category: Some(DEFAULT_CATEGORY),
            difficulty: Some(Difficulty::Medium),
            question_type: Some(QuestionType::Multiple),
        }
    }
}

/// A category offered by the bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}
