//! The `trivia init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("trivia.toml").exists() {
        println!("trivia.toml already exists, skipping.");
    } else {
        std::fs::write("trivia.toml", SAMPLE_CONFIG)?;
        println!("Created trivia.toml");
    }

    println!("\nNext steps:");
    println!("  1. Pick a category: trivia categories");
    println!("  2. Edit trivia.toml");
    println!("  3. Run: trivia play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# trivia configuration

[bank]
base_url = "https://opentdb.com"
timeout_secs = 15

[quiz]
# 1-50 questions per quiz
amount = 50
# 18 = Science: Computers, 0 = any category
category = 18
# easy, medium, hard
difficulty = "medium"
# multiple, boolean
type = "multiple"
seconds_per_question = 30
"#;
