//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BANK: &str = r#"{
    "response_code": 0,
    "results": [
        {
            "type": "multiple",
            "difficulty": "medium",
            "category": "Science: Computers",
            "question": "What does &quot;CPU&quot; stand for?",
            "correct_answer": "Central Processing Unit",
            "incorrect_answers": ["Central Process Unit", "Computer Personal Unit", "Central Processor Unit"]
        },
        {
            "type": "multiple",
            "difficulty": "medium",
            "category": "Science: Computers",
            "question": "Which language&#039;s mascot is Ferris?",
            "correct_answer": "Rust",
            "incorrect_answers": ["Go", "C&amp;C++", "Zig"]
        }
    ]
}"#;

fn trivia(home: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("trivia").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env_remove("TRIVIA_BASE_URL")
        .env_remove("TRIVIA_SECONDS");
    cmd
}

fn write_bank(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("bank.json");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn play_through_whole_quiz() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, BANK);

    trivia(dir.path())
        .arg("play")
        .arg("--questions-file")
        .arg(&bank)
        .arg("--seed")
        .arg("7")
        .write_stdin("1\nc\nn\n2\nc\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1/2"))
        .stdout(predicate::str::contains("What does \"CPU\" stand for?"))
        .stdout(predicate::str::contains("Which language's mascot is Ferris?"))
        .stdout(predicate::str::contains("Quiz Completed!"))
        .stdout(predicate::str::contains("/2"))
        .stdout(predicate::str::contains("Central Processing Unit"));
}

#[test]
fn end_of_input_ends_quiz_early() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, BANK);

    trivia(dir.path())
        .arg("play")
        .arg("--questions-file")
        .arg(&bank)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz Completed!"))
        .stdout(predicate::str::contains("Score: 0/2"))
        .stdout(predicate::str::contains("skipped"));
}

#[test]
fn empty_bank_finishes_immediately() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, "[]");

    trivia(dir.path())
        .arg("play")
        .arg("--questions-file")
        .arg(&bank)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0/0"))
        .stdout(predicate::str::contains("No questions were available"));
}

#[test]
fn play_exports_summary() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, BANK);
    let export = dir.path().join("out").join("summary.json");

    trivia(dir.path())
        .arg("play")
        .arg("--questions-file")
        .arg(&bank)
        .arg("--export")
        .arg(&export)
        .write_stdin("q\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Summary saved to"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export).unwrap()).unwrap();
    assert_eq!(json["total"], 2);
    assert_eq!(json["score"], 0);
    assert_eq!(json["per_question"][1]["correct_answer"], "Rust");
    assert_eq!(json["per_question"][0]["outcome"], "unanswered");
}

#[test]
fn missing_questions_file_reports_load_failure() {
    let dir = TempDir::new().unwrap();

    trivia(dir.path())
        .arg("play")
        .arg("--questions-file")
        .arg("nonexistent.json")
        .write_stdin("")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Loading questions"))
        .stderr(predicate::str::contains(
            "Failed to load questions. Please try again later.",
        ))
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn malformed_questions_file_fails() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, r#"{"response_code": 0, "results": [{"question": 1}]}"#);

    trivia(dir.path())
        .arg("play")
        .arg("--questions-file")
        .arg(&bank)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed response"));
}

#[test]
fn fetch_prints_decoded_questions() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, BANK);

    let output = trivia(dir.path())
        .arg("fetch")
        .arg("--questions-file")
        .arg(&bank)
        .arg("--seed")
        .arg("1")
        .output()
        .unwrap();
    assert!(output.status.success());

    let questions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let questions = questions.as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0]["prompt"], "What does \"CPU\" stand for?");

    let options: Vec<&str> = questions[1]["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o.as_str().unwrap())
        .collect();
    assert_eq!(options.len(), 4);
    assert_eq!(options.iter().filter(|o| **o == "Rust").count(), 1);
    assert!(options.contains(&"C&C++"));
}

#[test]
fn fetch_same_seed_same_order() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, BANK);

    let run = || {
        trivia(dir.path())
            .arg("fetch")
            .arg("--questions-file")
            .arg(&bank)
            .arg("--seed")
            .arg("99")
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn fetch_respects_amount_and_output() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, BANK);
    let out = dir.path().join("questions.json");

    trivia(dir.path())
        .arg("fetch")
        .arg("--questions-file")
        .arg(&bank)
        .arg("--amount")
        .arg("1")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved 1 questions"));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(saved.as_array().unwrap().len(), 1);
}

#[test]
fn rejects_out_of_range_amount() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, BANK);

    trivia(dir.path())
        .arg("fetch")
        .arg("--questions-file")
        .arg(&bank)
        .arg("--amount")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("amount must be between 1 and 50"));
}

#[test]
fn rejects_unknown_difficulty() {
    let dir = TempDir::new().unwrap();

    trivia(dir.path())
        .arg("play")
        .arg("--difficulty")
        .arg("impossible")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown difficulty"));
}

#[test]
fn categories_unreachable_bank_fails() {
    let dir = TempDir::new().unwrap();

    trivia(dir.path())
        .env("TRIVIA_BASE_URL", "http://127.0.0.1:9")
        .arg("categories")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn config_file_sets_seconds() {
    let dir = TempDir::new().unwrap();
    let bank = write_bank(&dir, BANK);
    std::fs::write(
        dir.path().join("trivia.toml"),
        "[quiz]\nseconds_per_question = 75\n",
    )
    .unwrap();

    trivia(dir.path())
        .arg("play")
        .arg("--questions-file")
        .arg(&bank)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Time: 01:15"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    trivia(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created trivia.toml"));

    assert!(dir.path().join("trivia.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    trivia(dir.path()).arg("init").assert().success();

    trivia(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    trivia(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Timed multiple-choice trivia"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    trivia(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("trivia"));
}
