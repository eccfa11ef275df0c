//! WordStore Library
//!
//! SQLite persistence for a word-guessing game: a pool of secret words and
//! a dictionary of accepted guesses.

pub mod build_info;
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod store;

pub use logging::{LogConfig, Logger};
pub use models::WordTable;
pub use store::{LoadReport, Outcome, WordStore};
