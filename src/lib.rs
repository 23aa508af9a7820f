//! Lexicon Search
//!
//! A word search engine for word-game study. Words are stored in a letter
//! trie in both spelling orders; searches are flat AND/OR lists of conditions
//! that are optimized, walked over the trie and filtered word by word.
//!
//! # Quick Start
//!
//! ```rust
//! use lexicon_search::core::EngineConfig;
//! use lexicon_search::engine::WordEngine;
//! use lexicon_search::search::{SearchCondition, SearchSpec};
//!
//! let mut engine = WordEngine::new(EngineConfig::default()).unwrap();
//! engine.import_text("cat\nbat\ncats\n", false);
//!
//! let spec = SearchSpec::all_of(vec![SearchCondition::pattern("?AT")]);
//! assert_eq!(engine.search(&spec), vec!["BAT", "CAT"]);
//! ```

// Letters, tile bag and configuration
pub mod core;

// Forward/reverse trie and its traversals
pub mod graph;

// Search conditions, specs and saved-search files
pub mod search;

// Engine facade, filters and definitions
pub mod engine;

// Word list parsing
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
