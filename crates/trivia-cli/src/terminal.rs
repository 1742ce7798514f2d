//! Terminal presenter and stdin input.

use std::io::{BufRead, Write};
use std::thread;

use comfy_table::{Cell, Table};
use tokio::sync::mpsc;

use trivia_core::driver::UserAction;
use trivia_core::report::Summary;
use trivia_core::session::Outcome;
use trivia_core::traits::{Presenter, QuestionView};

/// Draws the quiz as plain lines on stdout.
#[derive(Default)]
pub struct TerminalPresenter {
    options: Vec<String>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn option_label(&self, index: usize) -> String {
        match self.options.get(index) {
            Some(text) => format!("{}) {}", index + 1, text),
            None => format!("{})", index + 1),
        }
    }
}

impl Presenter for TerminalPresenter {
    fn render_loading(&mut self) {
        println!("Loading questions...");
    }

    fn render_question(&mut self, view: QuestionView<'_>) {
        self.options = view.options.to_vec();

        println!();
        let mut header = format!("Question {}/{}", view.number + 1, view.total);
        if let Some(category) = view.category {
            header.push_str(&format!(" · {category}"));
        }
        if let Some(difficulty) = view.difficulty {
            header.push_str(&format!(" · {difficulty}"));
        }
        println!("{header}    Score: {}    Time: {}", view.score, view.time_remaining);
        println!("{}", view.prompt);
        for index in 0..self.options.len() {
            println!("  {}", self.option_label(index));
        }
        println!("Pick 1-{}, then `c` to check (`q` quits).", self.options.len());
    }

    fn render_selection(&mut self, selected_index: usize) {
        println!("Selected {}", self.option_label(selected_index));
    }

    fn render_tick(&mut self, time_remaining: &str) {
        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "\rTime: {time_remaining} ");
        let _ = stdout.flush();
        if time_remaining == "00:00" {
            println!();
            println!("Time's up!");
        }
    }

    fn render_feedback(&mut self, correct_index: usize, selected_index: usize, score: u32) {
        if correct_index == selected_index {
            println!("Correct! {}", self.option_label(correct_index));
        } else {
            println!("Wrong: {}", self.option_label(selected_index));
            println!("Answer: {}", self.option_label(correct_index));
        }
        println!("Score: {score}. Press `n` for the next question.");
    }

    fn render_summary(&mut self, summary: &Summary) {
        println!();
        println!("Quiz Completed!");
        println!(
            "Score: {}/{} ({:.0}%)",
            summary.score,
            summary.total,
            summary.accuracy() * 100.0
        );

        if summary.per_question.is_empty() {
            println!("No questions were available for this quiz.");
            return;
        }

        let mut table = Table::new();
        table.set_header(vec!["#", "Question", "Correct Answer", "Result"]);
        for (index, item) in summary.per_question.iter().enumerate() {
            table.add_row(vec![
                Cell::new(index + 1),
                Cell::new(&item.prompt),
                Cell::new(&item.correct_answer),
                Cell::new(outcome_label(item.outcome)),
            ]);
        }
        println!("{table}");
    }

    fn render_error(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Correct => "correct",
        Outcome::Incorrect => "wrong",
        Outcome::TimedOut => "time up",
        Outcome::Unanswered => "skipped",
    }
}

/// Parse one line of player input.
pub fn parse_action(line: &str) -> Option<UserAction> {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "c" | "check" => Some(UserAction::Check),
        "n" | "next" => Some(UserAction::Next),
        "q" | "quit" | "exit" => Some(UserAction::Quit),
        other => other
            .parse::<usize>()
            .ok()
            .filter(|n| *n >= 1)
            .map(|n| UserAction::SelectOption(n - 1)),
    }
}

/// Forward stdin lines as actions from a dedicated thread.
///
/// The thread stops at end of input or once the receiver is gone. Dropping
/// the sender at EOF tells the driver that input is closed.
pub fn spawn_stdin_reader(tx: mpsc::Sender<UserAction>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_action(&line) {
                Some(action) => {
                    if tx.blocking_send(action).is_err() {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => eprintln!("Unknown input {:?}: type a number, c, n or q", line.trim()),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_as_one_based_options() {
        assert_eq!(parse_action("1"), Some(UserAction::SelectOption(0)));
        assert_eq!(parse_action(" 4 \n"), Some(UserAction::SelectOption(3)));
        assert_eq!(parse_action("0"), None);
        assert_eq!(parse_action("-2"), None);
    }

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!(parse_action("C"), Some(UserAction::Check));
        assert_eq!(parse_action("next"), Some(UserAction::Next));
        assert_eq!(parse_action("Quit"), Some(UserAction::Quit));
        assert_eq!(parse_action("maybe"), None);
    }

    #[test]
    fn option_labels_are_one_based() {
        let mut presenter = TerminalPresenter::new();
        presenter.options = vec!["Paris".into(), "Rome".into()];
        assert_eq!(presenter.option_label(1), "2) Rome");
        assert_eq!(presenter.option_label(5), "6)");
    }
}
