//! Word engine
//!
//! The facade callers use: import a lexicon, look words up, run searches.

pub mod definitions;
pub mod filter;
pub mod probability;
mod word_engine;

pub use definitions::{Definitions, MAX_LINK_DEPTH, part_of_speech};
pub use filter::Evaluator;
pub use probability::{ProbabilityRanks, limit_by_probability_order};
pub use word_engine::{ImportError, WordEngine};
