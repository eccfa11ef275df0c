//! Data models
//!
//! Rust structs representing database entities.

mod word;

pub use word::{is_acceptable_word, WordRow, WordTable};
