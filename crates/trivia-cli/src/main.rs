//! trivia CLI — play Open Trivia DB quizzes in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod terminal;

use commands::QuizArgs;

#[derive(Parser)]
#[command(name = "trivia", version, about = "Timed multiple-choice trivia in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz
    Play {
        #[command(flatten)]
        quiz: QuizArgs,

        /// Seconds allowed per question
        #[arg(long)]
        seconds: Option<u32>,

        /// Write the final summary as JSON to this file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Download questions and print them decoded, with shuffled options, as JSON
    Fetch {
        #[command(flatten)]
        quiz: QuizArgs,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List the question bank's categories
    Categories {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter trivia.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trivia=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            quiz,
            seconds,
            export,
        } => commands::play::execute(quiz, seconds, export).await,
        Commands::Fetch { quiz, output } => commands::fetch::execute(quiz, output).await,
        Commands::Categories { config } => commands::categories::execute(config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
