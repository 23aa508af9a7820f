//! Word check command
//!
//! Judges a batch of words against the lexicon.

use crate::engine::WordEngine;
use rayon::prelude::*;

/// Verdict for one word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Upper-case spelling
    pub word: String,
    pub valid: bool,
}

/// Check every word, in input order
///
/// The engine is read-only here, so words are checked in parallel.
#[must_use]
pub fn check_words<S: AsRef<str> + Sync>(engine: &WordEngine, words: &[S]) -> Vec<CheckResult> {
    words
        .par_iter()
        .map(|word| {
            let word = word.as_ref().to_ascii_uppercase();
            let valid = engine.contains_word(&word);
            CheckResult { word, valid }
        })
        .collect()
}

/// Whether every word in the batch is valid
#[must_use]
pub fn all_valid(results: &[CheckResult]) -> bool {
    results.iter().all(|r| r.valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineConfig;

    fn engine() -> WordEngine {
        let mut engine = WordEngine::new(EngineConfig::default()).unwrap();
        engine.import_text("cat\ndog\n", false);
        engine
    }

    #[test]
    fn check_keeps_input_order() {
        let results = check_words(&engine(), &["dog", "CAT", "emu"]);
        let words: Vec<&str> = results.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["DOG", "CAT", "EMU"]);
        assert!(results[0].valid);
        assert!(results[1].valid);
        assert!(!results[2].valid);
        assert!(!all_valid(&results));
    }

    #[test]
    fn check_empty_batch() {
        let results = check_words::<&str>(&engine(), &[]);
        assert!(results.is_empty());
        assert!(all_valid(&results));
    }
}
