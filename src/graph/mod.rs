//! Word graph
//!
//! Stores every word twice: once as spelled and once reversed, so that
//! patterns anchored at the end of a word can be walked from their fixed
//! end.

mod pattern;
mod traversal;
mod trie;

pub use pattern::{LetterClass, Pattern, Rack, Token};
pub use traversal::{MatchSet, TraversalLimits, anagram_search, pattern_search, pattern_walk};
pub use trie::{Node, NodeIndex, Trie};

use crate::core::reverse_pattern;

/// Forward and reverse tries over one vocabulary
#[derive(Debug, Clone, Default)]
pub struct WordGraph {
    forward: Trie,
    reverse: Trie,
}

impl WordGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an upper-case word into both tries
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        self.forward.insert(word);
        self.reverse.insert(&reverse_pattern(word));
    }

    /// Determine whether a word is in the vocabulary
    #[inline]
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.forward.contains(word)
    }

    /// Determine whether a reversed spelling is in the reverse trie
    #[inline]
    #[must_use]
    pub fn reverse_contains(&self, reversed: &str) -> bool {
        self.reverse.contains(reversed)
    }

    /// Words matching a positional pattern
    #[must_use]
    pub fn pattern_matches(&self, pattern: &Pattern, limits: &TraversalLimits) -> MatchSet {
        pattern_search(&self.forward, &self.reverse, pattern, limits)
    }

    /// Words spelled from a rack
    #[must_use]
    pub fn anagram_matches(
        &self,
        rack: &Rack,
        subanagram: bool,
        limits: &TraversalLimits,
    ) -> MatchSet {
        anagram_search(&self.forward, rack, subanagram, limits)
    }

    /// Number of distinct words stored
    #[inline]
    #[must_use]
    pub const fn num_words(&self) -> usize {
        self.forward.num_words()
    }

    /// Nodes in the forward and reverse tries
    #[must_use]
    pub fn num_nodes(&self) -> (usize, usize) {
        (self.forward.num_nodes(), self.reverse.num_nodes())
    }
}
