pub mod categories;
pub mod fetch;
pub mod init;
pub mod play;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use trivia_bank::config::{load_config_from, validate};
use trivia_bank::TriviaConfig;
use trivia_core::model::{Difficulty, QuestionType};

/// Options shared by commands that load questions.
#[derive(Args, Debug)]
pub struct QuizArgs {
    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of questions (1-50)
    #[arg(long)]
    pub amount: Option<u32>,

    /// Category code (see `trivia categories`; 0 for any)
    #[arg(long)]
    pub category: Option<u32>,

    /// Difficulty: easy, medium, hard
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Question type: multiple, boolean
    #[arg(long = "type")]
    pub question_type: Option<QuestionType>,

    /// Read questions from a local JSON file instead of the remote bank
    #[arg(long)]
    pub questions_file: Option<PathBuf>,

    /// Seed for option shuffling, for reproducible quizzes
    #[arg(long)]
    pub seed: Option<u64>,
}

impl QuizArgs {
    /// Load the config file and apply command-line overrides.
    pub fn resolve(&self) -> Result<TriviaConfig> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(amount) = self.amount {
            config.quiz.amount = amount;
        }
        if let Some(category) = self.category {
            config.quiz.category = Some(category);
        }
        if let Some(difficulty) = self.difficulty {
            config.quiz.difficulty = Some(difficulty);
        }
        if let Some(question_type) = self.question_type {
            config.quiz.question_type = Some(question_type);
        }
        validate(&config)?;
        Ok(config)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
