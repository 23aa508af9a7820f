//! Core letter and tile types
//!
//! Word-level helpers, the tile bag used for probability conditions, and the
//! engine configuration. Nothing here touches the trie.

mod config;
mod letter_bag;
mod letters;

pub use config::{DEFAULT_LEXICON, EngineConfig};
pub use letter_bag::{BLANK_CHAR, DEFAULT_DISTRIBUTION, DistributionError, LetterBag};
pub use letters::{
    MAX_WORD_LEN, alphagram, canonical_search_string, is_vowel, num_unique_letters, num_vowels,
    reverse_pattern, slot_count,
};
