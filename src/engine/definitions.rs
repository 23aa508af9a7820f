//! Word definitions
//!
//! A definition line holds one or more entries separated by `" / "`. Each
//! entry is filed under the part of speech named by its first `[pos` marker.
//! Entries may link to other words: `{WORD=pos}` renders as the word followed
//! by its definition for that part of speech, `<WORD=pos>` renders as the
//! linked definition alone.

use regex::{Captures, Regex};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// How many links deep a definition is expanded
pub const MAX_LINK_DEPTH: usize = 3;

static POS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\w+)").expect("part of speech pattern is valid"));
static LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(\w+)=(\w+)\}|<(\w+)=(\w+)>").expect("link pattern is valid")
});

/// Definitions keyed by word, then by part of speech
#[derive(Debug, Clone, Default)]
pub struct Definitions {
    entries: FxHashMap<String, BTreeMap<String, Vec<String>>>,
}

impl Definitions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the definition line of a word, replacing any earlier one
    pub fn insert(&mut self, word: &str, definition: &str) {
        let definition = definition.trim();
        if word.is_empty() || definition.is_empty() {
            return;
        }
        let mut by_pos: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for entry in definition.split(" / ") {
            by_pos
                .entry(part_of_speech(entry))
                .or_default()
                .push(entry.to_string());
        }
        self.entries.insert(word.to_string(), by_pos);
    }

    /// Whether a word has any definition
    #[inline]
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Number of defined words
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw entries of a word, without link expansion
    pub fn entries(&self, word: &str) -> impl Iterator<Item = &str> {
        self.entries
            .get(word)
            .into_iter()
            .flat_map(|by_pos| by_pos.values().flatten().map(String::as_str))
    }

    /// Whether a word has an entry for a part of speech
    #[must_use]
    pub fn has_part_of_speech(&self, word: &str, pos: &str) -> bool {
        self.entries
            .get(word)
            .is_some_and(|by_pos| by_pos.contains_key(pos))
    }

    /// Full definition of a word with links expanded, one entry per line
    ///
    /// Returns an empty string for words without a definition.
    #[must_use]
    pub fn definition(&self, word: &str) -> String {
        self.entries(word)
            .map(|entry| self.expand_links(entry, MAX_LINK_DEPTH))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Entries of `word` for one part of speech, joined and expanded
    fn sub_definition(&self, word: &str, pos: &str, depth: usize) -> Option<String> {
        let entries = self.entries.get(word)?.get(pos)?;
        Some(
            entries
                .iter()
                .map(|entry| self.expand_links(entry, depth))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    fn expand_links(&self, text: &str, depth: usize) -> String {
        LINK_REGEX
            .replace_all(text, |caps: &Captures<'_>| {
                let (word, pos, with_word) = match (caps.get(1), caps.get(2)) {
                    (Some(word), Some(pos)) => (word.as_str(), pos.as_str(), true),
                    _ => (
                        caps.get(3).map_or("", |m| m.as_str()),
                        caps.get(4).map_or("", |m| m.as_str()),
                        false,
                    ),
                };
                let upper = word.to_uppercase();
                if depth == 0 {
                    return upper;
                }
                match self.sub_definition(&upper, pos, depth - 1) {
                    Some(sub) if with_word => format!("{upper}, {sub}"),
                    Some(sub) => sub,
                    None => upper,
                }
            })
            .into_owned()
    }
}

/// Part of speech named by the first `[pos` marker, or empty
#[must_use]
pub fn part_of_speech(entry: &str) -> String {
    POS_REGEX
        .captures(entry)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
