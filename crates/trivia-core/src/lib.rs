//! trivia-core — Quiz session state machine, countdown, and UI boundary.
//!
//! This crate defines the data model, the session transitions, and the
//! traits that question banks and presenters implement.

pub mod driver;
pub mod error;
pub mod model;
pub mod report;
pub mod session;
pub mod shuffle;
pub mod timer;
pub mod traits;

pub use error::{LoadError, SessionError};
pub use session::{Phase, QuizSession};
