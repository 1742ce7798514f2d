//! The `trivia categories` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use trivia_bank::config::load_config_from;
use trivia_bank::OpenTdbSource;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let source = OpenTdbSource::new(&config.bank.base_url, config.bank.timeout_secs)?;
    let categories = source.categories().await?;

    if categories.is_empty() {
        println!("The question bank did not list any categories.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Category"]);
    for category in &categories {
        table.add_row(vec![Cell::new(category.id), Cell::new(&category.name)]);
    }
    println!("{table}");
    println!("Use an ID with `trivia play --category <ID>`.");
    Ok(())
}
