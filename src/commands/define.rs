//! Define command

use crate::engine::WordEngine;

/// Definition lookup for one word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefineResult {
    pub word: String,
    pub valid: bool,
    /// One line per entry, links expanded
    pub definition: Option<String>,
}

/// Look up a word's definition
#[must_use]
pub fn define_word(engine: &WordEngine, word: &str) -> DefineResult {
    let word = word.to_ascii_uppercase();
    DefineResult {
        valid: engine.contains_word(&word),
        definition: engine.definition(&word),
        word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineConfig;

    #[test]
    fn define_known_and_unknown_words() {
        let mut engine = WordEngine::new(EngineConfig::default()).unwrap();
        engine.import_text("cat a feline [n -S]\ndog\n", true);

        let cat = define_word(&engine, "cat");
        assert_eq!(cat.word, "CAT");
        assert!(cat.valid);
        assert_eq!(cat.definition.as_deref(), Some("a feline [n -S]"));

        let dog = define_word(&engine, "DOG");
        assert!(dog.valid);
        assert!(dog.definition.is_none());

        assert!(!define_word(&engine, "EMU").valid);
    }
}
