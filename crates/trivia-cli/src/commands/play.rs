//! The `trivia play` command.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::mpsc;

use trivia_bank::{create_source, load};
use trivia_core::driver::QuizDriver;
use trivia_core::report::SummaryReport;
use trivia_core::QuizSession;

use super::QuizArgs;
use crate::terminal::{spawn_stdin_reader, TerminalPresenter};

pub async fn execute(args: QuizArgs, seconds: Option<u32>, export: Option<PathBuf>) -> Result<()> {
    let mut config = args.resolve()?;
    if let Some(seconds) = seconds {
        anyhow::ensure!(seconds >= 1, "seconds must be at least 1");
        config.quiz.seconds_per_question = seconds;
    }

    let source = create_source(&config.bank, args.questions_file.as_deref())?;
    let query = config.quiz.query();
    let mut rng = args.rng();
    tracing::debug!(source = source.name(), ?query, "starting quiz");

    let session = QuizSession::new(config.quiz.seconds_per_question);
    let mut driver = QuizDriver::new(session, TerminalPresenter::new());
    let loading = load(source.as_ref(), &query, &mut rng);

    let (tx, rx) = mpsc::channel(64);
    let summary = if std::io::stdin().is_terminal() {
        // Lines typed at the keyboard while loading are read and discarded.
        spawn_stdin_reader(tx);
        driver.load_and_run(loading, rx).await?
    } else {
        // Piped input is scripted for the questions, so it is only read once
        // they are on screen.
        driver.load(loading).await?;
        spawn_stdin_reader(tx);
        driver.run(rx).await?
    };

    if let Some(path) = export {
        SummaryReport::new(summary).save_json(&path)?;
        eprintln!("Summary saved to: {}", path.display());
    }

    Ok(())
}
