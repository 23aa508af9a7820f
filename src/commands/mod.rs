//! Command implementations

pub mod check;
pub mod define;
pub mod info;
pub mod search;

pub use check::{CheckResult, all_valid, check_words};
pub use define::{DefineResult, define_word};
pub use info::{WordInfo, word_info};
pub use search::{SearchOptions, SearchResult, build_spec, load_spec, run_search, save_spec};
