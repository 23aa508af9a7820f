//! Engine configuration
//!
//! Passed explicitly to `WordEngine::new`; nothing in the engine reads global
//! settings.

use super::letter_bag::{DEFAULT_DISTRIBUTION, DistributionError, LetterBag};

/// Lexicon name used when none is given
pub const DEFAULT_LEXICON: &str = "Custom";

/// Settings that shape how an engine evaluates conditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Name of the lexicon the engine holds, matched by In Lexicon conditions
    pub lexicon: String,
    /// Tile distribution used by probability conditions
    pub letter_distribution: String,
}

impl EngineConfig {
    /// Create a configuration for a named lexicon with the standard tiles
    #[must_use]
    pub fn new(lexicon: impl Into<String>) -> Self {
        Self {
            lexicon: lexicon.into(),
            ..Self::default()
        }
    }

    /// Replace the tile distribution
    #[must_use]
    pub fn with_distribution(mut self, distribution: impl Into<String>) -> Self {
        self.letter_distribution = distribution.into();
        self
    }

    /// Build the letter bag described by this configuration
    ///
    /// # Errors
    /// Returns `DistributionError` if the distribution string is malformed.
    pub fn letter_bag(&self) -> Result<LetterBag, DistributionError> {
        LetterBag::from_distribution(&self.letter_distribution)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lexicon: DEFAULT_LEXICON.to_string(),
            letter_distribution: DEFAULT_DISTRIBUTION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_standard_bag() {
        let config = EngineConfig::default();
        assert_eq!(config.lexicon, DEFAULT_LEXICON);
        assert_eq!(config.letter_bag().unwrap().total(), 100);
    }

    #[test]
    fn custom_distribution() {
        let config = EngineConfig::new("TWL").with_distribution("A:2 B:1");
        assert_eq!(config.lexicon, "TWL");
        assert_eq!(config.letter_bag().unwrap().total(), 3);
    }

    #[test]
    fn bad_distribution_is_reported() {
        let config = EngineConfig::default().with_distribution("A=2");
        assert!(config.letter_bag().is_err());
    }
}
