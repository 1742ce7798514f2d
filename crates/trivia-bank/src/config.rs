//! Quiz configuration and source factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use trivia_core::model::{BankQuery, Difficulty, QuestionType, DEFAULT_AMOUNT, DEFAULT_CATEGORY};
use trivia_core::timer::DEFAULT_SECONDS_PER_QUESTION;
use trivia_core::traits::QuestionSource;

use crate::file::FileSource;
use crate::opentdb::{OpenTdbSource, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Where the question bank lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// What to ask and how long to allow per question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSettings {
    #[serde(default = "default_amount")]
    pub amount: u32,
    #[serde(default = "default_category")]
    pub category: Option<u32>,
    #[serde(default = "default_difficulty")]
    pub difficulty: Option<Difficulty>,
    #[serde(default = "default_question_type", rename = "type")]
    pub question_type: Option<QuestionType>,
    #[serde(default = "default_seconds")]
    pub seconds_per_question: u32,
}

fn default_amount() -> u32 {
    DEFAULT_AMOUNT
}
fn default_category() -> Option<u32> {
    Some(DEFAULT_CATEGORY)
}
fn default_difficulty() -> Option<Difficulty> {
    Some(Difficulty::Medium)
}
fn default_question_type() -> Option<QuestionType> {
    Some(QuestionType::Multiple)
}
fn default_seconds() -> u32 {
    DEFAULT_SECONDS_PER_QUESTION
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            amount: default_amount(),
            category: default_category(),
            difficulty: default_difficulty(),
            question_type: default_question_type(),
            seconds_per_question: default_seconds(),
        }
    }
}

impl QuizSettings {
    /// The bank query for these settings. Category `0` means any category.
    pub fn query(&self) -> BankQuery {
        BankQuery {
            amount: self.amount,
            category: self.category.filter(|c| *c != 0),
            difficulty: self.difficulty,
            question_type: self.question_type,
        }
    }
}

/// Top-level trivia configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriviaConfig {
    #[serde(default)]
    pub bank: BankConfig,
    #[serde(default)]
    pub quiz: QuizSettings,
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `trivia.toml` in the current directory
/// 2. `~/.config/trivia/config.toml`
///
/// Environment variable overrides: `TRIVIA_BASE_URL`, `TRIVIA_SECONDS`.
pub fn load_config_from(path: Option<&Path>) -> Result<TriviaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("trivia.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<TriviaConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => TriviaConfig::default(),
    };

    if let Ok(url) = std::env::var("TRIVIA_BASE_URL") {
        config.bank.base_url = url;
    }
    if let Ok(seconds) = std::env::var("TRIVIA_SECONDS") {
        config.quiz.seconds_per_question = seconds
            .trim()
            .parse()
            .with_context(|| format!("TRIVIA_SECONDS is not a number: {seconds:?}"))?;
    }

    config.bank.base_url = resolve_env_vars(&config.bank.base_url);
    validate(&config)?;
    Ok(config)
}

/// Reject settings the quiz cannot run with.
pub fn validate(config: &TriviaConfig) -> Result<()> {
    anyhow::ensure!(
        config.quiz.seconds_per_question >= 1,
        "seconds_per_question must be at least 1"
    );
    anyhow::ensure!(
        (1..=crate::opentdb::MAX_AMOUNT).contains(&config.quiz.amount),
        "amount must be between 1 and {}",
        crate::opentdb::MAX_AMOUNT
    );
    anyhow::ensure!(config.bank.timeout_secs >= 1, "timeout_secs must be at least 1");
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("trivia"))
}

/// Create the question source: a local file if given, otherwise the remote bank.
pub fn create_source(
    config: &BankConfig,
    questions_file: Option<&Path>,
) -> Result<Box<dyn QuestionSource>> {
    match questions_file {
        Some(path) => Ok(Box::new(FileSource::new(path))),
        None => Ok(Box::new(OpenTdbSource::new(
            &config.base_url,
            config.timeout_secs,
        )?)),
    }
}
