//! trivia-bank — Question sources and the question loader.
//!
//! Implements `QuestionSource` for Open Trivia DB and local JSON files, and
//! turns raw bank questions into playable, shuffled ones.

mod error;

pub mod config;
pub mod file;
pub mod loader;
pub mod mock;
pub mod opentdb;

pub use config::{create_source, load_config_from, TriviaConfig};
pub use loader::load;
pub use opentdb::OpenTdbSource;
