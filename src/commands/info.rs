//! Word info command
//!
//! Gathers everything the engine knows about one word.

use crate::core::{alphagram, num_unique_letters, num_vowels};
use crate::engine::{ProbabilityRanks, WordEngine};
use crate::search::SearchSet;

/// Blanks assumed when reporting probability
pub const INFO_BLANKS: i32 = 2;

/// Facts about one word
#[derive(Debug, Clone, PartialEq)]
pub struct WordInfo {
    pub word: String,
    pub valid: bool,
    pub front_hooks: String,
    pub back_hooks: String,
    pub alphagram: String,
    pub anagrams: usize,
    pub vowels: usize,
    pub unique_letters: usize,
    pub point_value: u32,
    /// Draw probability scaled by 1e9
    pub probability: f64,
    /// Rank among words of the same length, most probable first
    pub probability_order: Option<usize>,
    /// Named sets the word belongs to
    pub groups: Vec<&'static str>,
}

/// Describe a word
#[must_use]
pub fn word_info(engine: &WordEngine, word: &str) -> WordInfo {
    let word = word.to_ascii_uppercase();
    let valid = engine.contains_word(&word);
    let bag = engine.letter_bag();

    let (probability_order, groups) = if valid {
        let ranks = ProbabilityRanks::new(
            engine.words_of_length(word.len()),
            bag,
            INFO_BLANKS,
            false,
        );
        let groups = SearchSet::all()
            .filter(|&set| engine.is_set_member(&word, set))
            .map(SearchSet::name)
            .collect();
        (ranks.rank(&word), groups)
    } else {
        (None, Vec::new())
    };

    WordInfo {
        front_hooks: engine.front_hooks(&word),
        back_hooks: engine.back_hooks(&word),
        alphagram: alphagram(&word),
        anagrams: engine.num_anagrams(&word),
        vowels: num_vowels(&word),
        unique_letters: num_unique_letters(&word),
        point_value: bag.point_value(&word),
        probability: bag.probability(&word, INFO_BLANKS),
        probability_order,
        groups,
        valid,
        word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineConfig;

    fn engine() -> WordEngine {
        let mut engine = WordEngine::new(EngineConfig::default()).unwrap();
        engine.import_text("at\ncat\nact\ncats\nscat\nbat\n", false);
        engine
    }

    #[test]
    fn info_for_valid_word() {
        let info = word_info(&engine(), "cat");
        assert!(info.valid);
        assert_eq!(info.word, "CAT");
        assert_eq!(info.front_hooks, "s");
        assert_eq!(info.back_hooks, "s");
        assert_eq!(info.alphagram, "ACT");
        assert_eq!(info.anagrams, 2);
        assert_eq!(info.vowels, 1);
        assert_eq!(info.unique_letters, 3);
        assert_eq!(info.point_value, 5);
        assert!(info.probability > 0.0);
        assert!(info.probability_order.is_some());
        assert!(info.groups.contains(&"Front Hooks"));
        assert!(info.groups.contains(&"Hook Words"));
        assert!(!info.groups.contains(&"Back Hooks"));
    }

    #[test]
    fn info_for_unknown_word() {
        let info = word_info(&engine(), "tac");
        assert!(!info.valid);
        assert_eq!(info.anagrams, 2);
        assert!(info.probability_order.is_none());
        assert!(info.groups.is_empty());
    }
}
