//! The `trivia fetch` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use trivia_bank::{create_source, load};

use super::QuizArgs;

pub async fn execute(args: QuizArgs, output: Option<PathBuf>) -> Result<()> {
    let config = args.resolve()?;
    let source = create_source(&config.bank, args.questions_file.as_deref())?;
    let mut rng = args.rng();

    let questions = load(source.as_ref(), &config.quiz.query(), &mut rng).await?;
    let json = serde_json::to_string_pretty(&questions).context("failed to serialize questions")?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Saved {} questions to {}", questions.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
