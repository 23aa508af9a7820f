//! Word lists
//!
//! Reading vocabulary and stem files into entries the engine can import.

pub mod loader;

pub use loader::{WordEntry, entries, load_from_file, parse_line};
