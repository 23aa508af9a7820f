//! Word engine
//!
//! Owns one lexicon: the word graph, definitions, stem lists and the tile bag.
//! Everything is loaded up front; afterwards the engine is only read, so a
//! shared reference can be used from several threads at once.

use super::definitions::Definitions;
use super::filter::Evaluator;
use super::probability::limit_by_probability_order;
use crate::core::{DistributionError, EngineConfig, LetterBag, MAX_WORD_LEN, alphagram};
use crate::graph::{MatchSet, Pattern, Rack, TraversalLimits, WordGraph};
use crate::search::{ConditionKind, SearchCondition, SearchSet, SearchSpec, SpecState};
use crate::wordlists::{WordEntry, entries, load_from_file};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Letters a Type II word's alphagram must be drawn from
const TYPE_TWO_LETTERS: &str = "AAADEEEEGIIILNNOORRSSTTU";

/// Least likely seven and eight still counted as Type III
const TYPE_THREE_SEVEN: &str = "HUNTERS";
const TYPE_THREE_EIGHT: &str = "NOTIFIED";

/// Stem length tested by Type I Sevens and Type I Eights
const SHORT_STEM_LEN: usize = 6;
/// Stem length tested by Eights From Seven-Letter Stems
const LONG_STEM_LEN: usize = 7;

/// Error reading a word list or stem file
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("can't open file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A loaded lexicon and the searches it answers
#[derive(Debug, Clone)]
pub struct WordEngine {
    graph: WordGraph,
    definitions: Definitions,
    stems: BTreeMap<usize, Vec<String>>,
    stem_alphagrams: FxHashMap<usize, FxHashSet<String>>,
    bag: LetterBag,
    lexicon: String,
}

impl WordEngine {
    /// Create an empty engine
    ///
    /// # Errors
    /// Returns `DistributionError` if the configured letter distribution
    /// cannot be parsed.
    pub fn new(config: EngineConfig) -> Result<Self, DistributionError> {
        let bag = config.letter_bag()?;
        Ok(Self {
            graph: WordGraph::new(),
            definitions: Definitions::new(),
            stems: BTreeMap::new(),
            stem_alphagrams: FxHashMap::default(),
            bag,
            lexicon: config.lexicon,
        })
    }

    /// Name of the loaded lexicon
    #[inline]
    #[must_use]
    pub fn lexicon(&self) -> &str {
        &self.lexicon
    }

    #[inline]
    #[must_use]
    pub const fn letter_bag(&self) -> &LetterBag {
        &self.bag
    }

    #[inline]
    #[must_use]
    pub const fn definitions(&self) -> &Definitions {
        &self.definitions
    }

    #[inline]
    #[must_use]
    pub const fn graph(&self) -> &WordGraph {
        &self.graph
    }

    /// Number of distinct words loaded
    #[inline]
    #[must_use]
    pub const fn num_words(&self) -> usize {
        self.graph.num_words()
    }

    /// Add one word, with an optional definition
    ///
    /// Returns `false` if the word was rejected: it must be 1 to
    /// `MAX_WORD_LEN` letters `A`-`Z` in either case.
    pub fn import_word(&mut self, word: &str, definition: Option<&str>) -> bool {
        let word = word.to_ascii_uppercase();
        if word.is_empty()
            || word.len() > MAX_WORD_LEN
            || !word.chars().all(|c| c.is_ascii_uppercase())
        {
            warn!(word = %word, max_len = MAX_WORD_LEN, "skipping invalid word");
            return false;
        }
        self.graph.insert(&word);
        if let Some(definition) = definition {
            self.definitions.insert(&word, definition);
        }
        true
    }

    /// Import a word list from text
    ///
    /// Returns the number of words imported.
    pub fn import_text(&mut self, text: &str, load_definitions: bool) -> usize {
        self.import_entries(entries(text), load_definitions)
    }

    fn import_entries<I>(&mut self, entries: I, load_definitions: bool) -> usize
    where
        I: IntoIterator<Item = WordEntry>,
    {
        let mut imported = 0;
        for entry in entries {
            let definition = load_definitions.then_some(entry.definition.as_str());
            if self.import_word(&entry.word, definition) {
                imported += 1;
            }
        }
        info!(
            imported,
            total = self.num_words(),
            lexicon = %self.lexicon,
            "imported word list"
        );
        imported
    }

    /// Import a word list file
    ///
    /// # Errors
    /// Returns `ImportError::Io` if the file cannot be read; nothing is
    /// imported in that case.
    pub fn import_text_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        load_definitions: bool,
    ) -> Result<usize, ImportError> {
        let entries = read_entries(path.as_ref())?;
        Ok(self.import_entries(entries, load_definitions))
    }

    /// Import a stem list from text
    ///
    /// Stems must all have the length of the first stem; others are skipped.
    /// Returns the number of stems imported.
    pub fn import_stems(&mut self, text: &str) -> usize {
        self.import_stem_entries(entries(text))
    }

    fn import_stem_entries<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = WordEntry>,
    {
        let mut length = 0;
        let mut stems = Vec::new();
        for entry in entries {
            let len = entry.word.len();
            if length == 0 {
                length = len;
            }
            if len != length {
                warn!(stem = %entry.word, expected = length, "skipping stem of different length");
                continue;
            }
            stems.push(entry.word);
        }
        if stems.is_empty() {
            return 0;
        }

        let imported = stems.len();
        self.stem_alphagrams
            .entry(length)
            .or_default()
            .extend(stems.iter().map(|stem| alphagram(stem)));
        self.stems.entry(length).or_default().extend(stems);
        info!(imported, length, "imported stems");
        imported
    }

    /// Import a stem list file
    ///
    /// # Errors
    /// Returns `ImportError::Io` if the file cannot be read.
    pub fn import_stems_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, ImportError> {
        let entries = read_entries(path.as_ref())?;
        Ok(self.import_stem_entries(entries))
    }

    /// Stems of one length, in import order
    #[must_use]
    pub fn stems(&self, length: usize) -> &[String] {
        self.stems.get(&length).map(Vec::as_slice).unwrap_or_default()
    }

    /// Determine whether a word is in the lexicon, ignoring case
    #[must_use]
    pub fn contains_word(&self, word: &str) -> bool {
        self.graph.contains(&word.to_ascii_uppercase())
    }

    /// Definition of a word with links expanded, if it has one
    #[must_use]
    pub fn definition(&self, word: &str) -> Option<String> {
        let word = word.to_ascii_uppercase();
        self.definitions
            .contains(&word)
            .then(|| self.definitions.definition(&word))
    }

    /// Letters that can be placed in front of the word, lower-case and sorted
    #[must_use]
    pub fn front_hooks(&self, word: &str) -> String {
        let word = word.to_ascii_uppercase();
        ('A'..='Z')
            .filter(|c| self.graph.contains(&format!("{c}{word}")))
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }

    /// Letters that can be placed after the word, lower-case and sorted
    #[must_use]
    pub fn back_hooks(&self, word: &str) -> String {
        let word = word.to_ascii_uppercase();
        ('A'..='Z')
            .filter(|c| self.graph.contains(&format!("{word}{c}")))
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }

    /// Distinct alphagrams of some words, sorted
    #[must_use]
    pub fn alphagrams<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        let mut alphagrams: Vec<String> = words
            .iter()
            .map(|word| alphagram(&word.as_ref().to_ascii_uppercase()))
            .collect();
        alphagrams.sort_unstable();
        alphagrams.dedup();
        alphagrams
    }

    /// Number of words spelled with exactly the letters of `word`
    #[must_use]
    pub fn num_anagrams(&self, word: &str) -> usize {
        Rack::parse(&alphagram(&word.to_ascii_uppercase())).map_or(0, |rack| {
            self.graph
                .anagram_matches(&rack, false, &TraversalLimits::default())
                .len()
        })
    }

    /// Every word of one length, upper-case, in no particular order
    #[must_use]
    pub fn words_of_length(&self, length: usize) -> Vec<String> {
        if length == 0 || length > MAX_WORD_LEN {
            return Vec::new();
        }
        Pattern::parse(&"?".repeat(length)).map_or_else(Vec::new, |pattern| {
            self.graph
                .pattern_matches(&pattern, &TraversalLimits::default())
                .words()
                .map(str::to_string)
                .collect()
        })
    }

    /// Determine whether a word belongs to a named set
    ///
    /// The word is assumed to be in the lexicon.
    #[must_use]
    pub fn is_set_member(&self, word: &str, set: SearchSet) -> bool {
        let word = word.to_ascii_uppercase();
        if word.is_empty() || !word.is_ascii() {
            return false;
        }
        let len = word.len();
        let without_first = &word[1..];
        let without_last = &word[..len - 1];

        match set {
            SearchSet::HookWords => {
                self.graph.contains(without_last) || self.graph.contains(without_first)
            }
            SearchSet::FrontHooks => self.graph.contains(without_first),
            SearchSet::BackHooks => self.graph.contains(without_last),
            SearchSet::HighFives => len == 5 && self.is_high_five(&word),
            SearchSet::TypeOneSevens => len == 7 && self.deletion_hits_stem(&word, SHORT_STEM_LEN),
            SearchSet::TypeOneEights => len == 8 && self.near_short_stem(&word),
            SearchSet::EightsFromSevenLetterStems => {
                len == 8 && self.deletion_hits_stem(&word, LONG_STEM_LEN)
            }
            SearchSet::TypeTwoSevens => {
                len == 7
                    && drawn_from_type_two_letters(&word)
                    && !self.is_set_member(&word, SearchSet::TypeOneSevens)
            }
            SearchSet::TypeTwoEights => {
                len == 8
                    && drawn_from_type_two_letters(&word)
                    && !self.is_set_member(&word, SearchSet::TypeOneEights)
            }
            SearchSet::TypeThreeSevens => {
                len == 7
                    && self.as_likely_as(&word, TYPE_THREE_SEVEN)
                    && !self.is_set_member(&word, SearchSet::TypeOneSevens)
                    && !self.is_set_member(&word, SearchSet::TypeTwoSevens)
            }
            SearchSet::TypeThreeEights => {
                len == 8
                    && self.as_likely_as(&word, TYPE_THREE_EIGHT)
                    && !self.is_set_member(&word, SearchSet::TypeOneEights)
                    && !self.is_set_member(&word, SearchSet::TypeTwoEights)
            }
        }
    }

    /// No tile worth more than five, and a four or five at either end
    fn is_high_five(&self, word: &str) -> bool {
        let values: Vec<u32> = word.chars().map(|c| self.bag.letter_value(c)).collect();
        if values.iter().any(|&v| v > 5) {
            return false;
        }
        [values.first(), values.last()]
            .into_iter()
            .flatten()
            .any(|&v| v == 4 || v == 5)
    }

    /// Some single-letter deletion of the alphagram is a stem alphagram
    fn deletion_hits_stem(&self, word: &str, stem_len: usize) -> bool {
        let Some(stems) = self.stem_alphagrams.get(&stem_len) else {
            return false;
        };
        let agram = alphagram(word);
        (0..agram.len()).any(|i| {
            let mut shorter = agram.clone();
            shorter.remove(i);
            stems.contains(&shorter)
        })
    }

    /// The alphagram covers a six-letter stem alphagram with at most two
    /// letters left over
    fn near_short_stem(&self, word: &str) -> bool {
        let Some(stems) = self.stem_alphagrams.get(&SHORT_STEM_LEN) else {
            return false;
        };
        let agram: Vec<char> = alphagram(word).chars().collect();
        stems.iter().any(|stem| {
            let stem: Vec<char> = stem.chars().collect();
            let mut matched = 0;
            let mut missing = 0;
            for &c in &agram {
                if matched == stem.len() || missing > 2 {
                    break;
                }
                if c == stem[matched] {
                    matched += 1;
                } else {
                    missing += 1;
                }
            }
            missing <= 2
        })
    }

    /// At least as many two-blank draws as the reference word
    fn as_likely_as(&self, word: &str, reference: &str) -> bool {
        self.bag.num_combinations(word, 2) >= self.bag.num_combinations(reference, 2)
    }

    /// Words matching a spec, upper-case and sorted
    #[must_use]
    pub fn search(&self, spec: &SearchSpec) -> Vec<String> {
        let mut words: Vec<String> = self
            .run_search(spec)
            .words()
            .map(str::to_string)
            .collect();
        words.sort_unstable();
        words
    }

    /// Words matching a spec with wildcard-filled letters lower-case, sorted
    /// by their upper-case spelling
    #[must_use]
    pub fn search_marked(&self, spec: &SearchSpec) -> Vec<String> {
        let found = self.run_search(spec);
        let mut entries: Vec<(&str, &str)> = found.entries().collect();
        entries.sort_unstable_by_key(|&(upper, _)| upper);
        entries
            .into_iter()
            .map(|(_, marked)| marked.to_string())
            .collect()
    }

    fn run_search(&self, spec: &SearchSpec) -> MatchSet {
        let mut spec = spec.clone();
        let state = spec.optimize();
        if state != SpecState::Normal {
            debug!(?state, "search spec matches nothing");
            return MatchSet::new();
        }
        if let Some(found) = self.word_list_search(&spec) {
            debug!(found = found.len(), "answered from word lists");
            return found;
        }

        let (matchers, rest): (Vec<SearchCondition>, Vec<SearchCondition>) = spec
            .conditions
            .iter()
            .cloned()
            .partition(SearchCondition::is_match);
        let (rank_limits, filters): (Vec<SearchCondition>, Vec<SearchCondition>) = rest
            .into_iter()
            .partition(|c| c.kind == ConditionKind::LimitByProbabilityOrder);

        let mut evaluator = Evaluator::new(self);
        let mut found = if spec.conjunction {
            let limits = traversal_limits(&spec.conditions);
            let mut found = self.match_all(&matchers, &limits);
            found.retain(|word| evaluator.matches_all(word, &filters));
            found
        } else {
            let limits = TraversalLimits::default();
            let mut found = MatchSet::new();
            for condition in &matchers {
                found.union(self.traverse(condition, &limits));
            }
            if !filters.is_empty() {
                let mut extra = self.all_words(&limits);
                extra.retain(|word| evaluator.matches_any(word, &filters));
                found.union(extra);
            } else if matchers.is_empty() {
                found = self.all_words(&limits);
            }
            found
        };

        limit_by_probability_order(&mut found, &rank_limits, &self.bag);
        debug!(
            found = found.len(),
            matchers = matchers.len(),
            filters = filters.len(),
            "search complete"
        );
        found
    }

    /// Intersection of every match condition's traversal
    fn match_all(&self, matchers: &[SearchCondition], limits: &TraversalLimits) -> MatchSet {
        if matchers.is_empty() {
            return self.all_words(limits);
        }
        let mut found: Option<MatchSet> = None;
        for condition in matchers {
            let matched = self.traverse(condition, limits);
            let next = match found {
                Some(mut previous) => {
                    previous.intersect(&matched);
                    previous
                }
                None => matched,
            };
            if next.is_empty() {
                return next;
            }
            found = Some(next);
        }
        found.unwrap_or_default()
    }

    fn traverse(&self, condition: &SearchCondition, limits: &TraversalLimits) -> MatchSet {
        match condition.kind {
            ConditionKind::PatternMatch => Pattern::parse(&condition.string)
                .map_or_else(MatchSet::new, |pattern| {
                    self.graph.pattern_matches(&pattern, limits)
                }),
            ConditionKind::AnagramMatch | ConditionKind::SubanagramMatch => {
                let subanagram = condition.kind == ConditionKind::SubanagramMatch;
                Rack::parse(&condition.string).map_or_else(MatchSet::new, |rack| {
                    self.graph.anagram_matches(&rack, subanagram, limits)
                })
            }
            _ => MatchSet::new(),
        }
    }

    /// Every word within the limits, spelled exactly
    fn all_words(&self, limits: &TraversalLimits) -> MatchSet {
        let mut exact = MatchSet::new();
        if let Some(pattern) = Pattern::parse("*") {
            for word in self.graph.pattern_matches(&pattern, limits).words() {
                exact.insert(word.to_string());
            }
        }
        exact
    }

    /// Answer a spec made only of In Word List conditions without walking
    /// the graph
    fn word_list_search(&self, spec: &SearchSpec) -> Option<MatchSet> {
        let only_lists = spec
            .conditions
            .iter()
            .all(|c| c.kind == ConditionKind::InWordList && !c.negated);
        if !only_lists {
            return None;
        }

        let mut lists = spec.conditions.iter().map(|condition| {
            condition
                .string
                .split_whitespace()
                .map(str::to_ascii_uppercase)
                .filter(|word| self.graph.contains(word))
                .collect::<FxHashSet<String>>()
        });
        let first = lists.next()?;
        let words = lists.fold(first, |acc, list| {
            if spec.conjunction {
                acc.intersection(&list).cloned().collect()
            } else {
                acc.union(&list).cloned().collect()
            }
        });

        let mut found = MatchSet::new();
        for word in words {
            found.insert(word);
        }
        Some(found)
    }
}

/// Length bounds and excluded letters an AND spec imposes on every walk
fn traversal_limits(conditions: &[SearchCondition]) -> TraversalLimits {
    let mut limits = TraversalLimits::default();
    for condition in conditions {
        match condition.kind {
            ConditionKind::Length => {
                let min = condition.min.clamp(1, MAX_WORD_LEN as i32) as usize;
                let max = condition.max.clamp(0, MAX_WORD_LEN as i32) as usize;
                limits.min_len = limits.min_len.max(min);
                limits.max_len = limits.max_len.min(max);
            }
            ConditionKind::IncludeLetters if condition.negated => {
                limits.exclude.extend(
                    condition
                        .string
                        .chars()
                        .filter(char::is_ascii_alphabetic)
                        .map(|c| c.to_ascii_uppercase()),
                );
            }
            _ => {}
        }
    }
    limits
}

/// The alphagram can be drawn in order from the Type II letters
fn drawn_from_type_two_letters(word: &str) -> bool {
    let agram = alphagram(word);
    let mut wanted = agram.chars().peekable();
    for c in TYPE_TWO_LETTERS.chars() {
        if wanted.peek() == Some(&c) {
            wanted.next();
        }
    }
    wanted.peek().is_none()
}

fn read_entries(path: &Path) -> Result<Vec<WordEntry>, ImportError> {
    load_from_file(path).map_err(|source| {
        warn!(path = %path.display(), error = %source, "import failed");
        ImportError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    fn engine_of(words: &[&str]) -> WordEngine {
        let mut engine = WordEngine::new(EngineConfig::default()).unwrap();
        for word in words {
            engine.import_word(word, None);
        }
        engine
    }

    fn search(engine: &WordEngine, conditions: Vec<SearchCondition>) -> Vec<String> {
        engine.search(&SearchSpec::all_of(conditions))
    }

    #[test]
    fn contains_inserted_words_only() {
        let engine = engine_of(&["CAT", "CATS", "DOG"]);
        assert!(engine.contains_word("CAT"));
        assert!(engine.contains_word("cats"));
        assert!(!engine.contains_word("CA"));
        assert!(!engine.contains_word(""));
        assert_eq!(engine.num_words(), 3);
    }

    #[test]
    fn import_rejects_non_letters() {
        let mut engine = engine_of(&[]);
        assert!(engine.import_word("cat", None));
        assert!(!engine.import_word("CAT'S", None));
        assert!(!engine.import_word("ABCDEFGHIJKLMNOP", None));
        assert_eq!(engine.num_words(), 1);
    }

    #[test]
    fn pattern_search_requires_full_consumption() {
        let engine = engine_of(&["CAT", "BAT", "RAT", "CATS"]);
        let found = search(&engine, vec![SearchCondition::pattern("?AT")]);
        assert_eq!(found, vec!["BAT", "CAT", "RAT"]);
    }

    #[test]
    fn anagram_and_subanagram_search() {
        let engine = engine_of(&["PRAISE", "PARIES", "RISE", "PAIR", "PAIRS", "DOG"]);
        let anagrams = search(&engine, vec![SearchCondition::anagram("AEIPRS")]);
        assert_eq!(anagrams, vec!["PARIES", "PRAISE"]);

        let subanagrams = search(&engine, vec![SearchCondition::subanagram("AEIPRS")]);
        assert_eq!(subanagrams, vec!["PAIR", "PAIRS", "PARIES", "PRAISE", "RISE"]);
    }

    #[test]
    fn disjoint_lengths_match_nothing() {
        let engine = engine_of(&["CAT", "HOUSE"]);
        let found = search(
            &engine,
            vec![SearchCondition::length(3, 3), SearchCondition::length(5, 5)],
        );
        assert!(found.is_empty());
    }

    #[test]
    fn contradictory_letters_match_nothing() {
        let engine = engine_of(&["QUA", "CAT"]);
        let found = search(
            &engine,
            vec![
                SearchCondition::include_letters("Q"),
                SearchCondition::include_letters("Q").negate(),
            ],
        );
        assert!(found.is_empty());
    }

    #[test]
    fn word_lists_union_and_intersect() {
        let engine = engine_of(&["CAT", "DOG", "EMU"]);
        let lists = vec![
            SearchCondition::in_word_list("cat dog xyzzy"),
            SearchCondition::in_word_list("DOG EMU"),
        ];
        assert_eq!(
            engine.search(&SearchSpec::any_of(lists.clone())),
            vec!["CAT", "DOG", "EMU"]
        );
        assert_eq!(engine.search(&SearchSpec::all_of(lists)), vec!["DOG"]);
    }

    #[test]
    fn word_lists_agree_with_general_path() {
        let engine = engine_of(&["CAT", "DOG", "EMU"]);
        let lists = vec![
            SearchCondition::in_word_list("CAT DOG"),
            SearchCondition::in_word_list("DOG EMU"),
        ];
        // A Length condition forces the traversal path
        let mut general = lists.clone();
        general.push(SearchCondition::length(1, 15));
        assert_eq!(
            engine.search(&SearchSpec::all_of(lists)),
            engine.search(&SearchSpec::all_of(general))
        );
    }

    #[test]
    fn empty_spec_matches_nothing() {
        let engine = engine_of(&["CAT"]);
        assert!(engine.search(&SearchSpec::default()).is_empty());
        assert!(engine.search(&SearchSpec::any_of(Vec::new())).is_empty());
    }

    #[test]
    fn or_spec_unions_conditions() {
        let engine = engine_of(&["CAT", "CATS", "DOG", "DOGS", "EMU"]);
        let spec = SearchSpec::any_of(vec![
            SearchCondition::pattern("C*"),
            SearchCondition::suffix("S"),
        ]);
        assert_eq!(engine.search(&spec), vec!["CAT", "CATS", "DOG"]);
    }

    #[test]
    fn filter_only_spec_walks_everything() {
        let engine = engine_of(&["CAT", "CATS", "DOG", "DOGS"]);
        let found = search(&engine, vec![SearchCondition::include_letters("S")]);
        assert_eq!(found, vec!["CATS", "DOGS"]);
        let found = search(&engine, vec![SearchCondition::length(4, 4)]);
        assert_eq!(found, vec!["CATS", "DOGS"]);
    }

    #[test]
    fn excluded_letters_prune_traversal() {
        let engine = engine_of(&["CAT", "CATS", "DOG", "DOGS"]);
        let found = search(
            &engine,
            vec![
                SearchCondition::pattern("*"),
                SearchCondition::exclude_letters("S"),
            ],
        );
        assert_eq!(found, vec!["CAT", "DOG"]);
    }

    #[test]
    fn marked_results_show_wildcards() {
        let engine = engine_of(&["CAT", "BAT", "CATS"]);
        let spec = SearchSpec::all_of(vec![SearchCondition::pattern("?AT")]);
        assert_eq!(engine.search_marked(&spec), vec!["bAT", "cAT"]);
        assert_eq!(engine.search(&spec), vec!["BAT", "CAT"]);

        let filtered = SearchSpec::all_of(vec![SearchCondition::length(3, 3)]);
        assert_eq!(engine.search_marked(&filtered), vec!["BAT", "CAT"]);
    }

    #[test]
    fn negated_pattern_filters() {
        let engine = engine_of(&["CAT", "CATS", "DOG"]);
        let found = search(
            &engine,
            vec![
                SearchCondition::length(3, 4),
                SearchCondition::pattern("C*").negate(),
            ],
        );
        assert_eq!(found, vec!["DOG"]);
    }

    #[test]
    fn negated_malformed_pattern_matches_nothing() {
        let engine = engine_of(&["CAT", "DOG"]);
        let found = search(
            &engine,
            vec![
                SearchCondition::length(3, 3),
                SearchCondition::pattern("[C").negate(),
            ],
        );
        assert!(found.is_empty());
    }

    #[test]
    fn limit_by_probability_order_applies_last() {
        let engine = engine_of(&["EAT", "TEA", "ZAX", "QUA", "EATS"]);
        let found = search(
            &engine,
            vec![
                SearchCondition::length(3, 3),
                SearchCondition::limit_by_probability_order(3, 4, 0, false),
            ],
        );
        assert_eq!(found, vec!["QUA", "ZAX"]);
    }

    #[test]
    fn hooks_are_lower_case_and_sorted() {
        let engine = engine_of(&["AT", "BAT", "CAT", "ATE", "ATS"]);
        assert_eq!(engine.front_hooks("at"), "bc");
        assert_eq!(engine.back_hooks("AT"), "es");
        assert_eq!(engine.front_hooks("CAT"), "");
    }

    #[test]
    fn anagram_counts_and_alphagrams() {
        let engine = engine_of(&["EAT", "TEA", "ATE", "CAT"]);
        assert_eq!(engine.num_anagrams("eat"), 3);
        assert_eq!(engine.num_anagrams("TAC"), 1);
        assert_eq!(engine.num_anagrams("DOG"), 0);
        assert_eq!(engine.alphagrams(&["TEA", "eat", "CAT"]), vec!["ACT", "AET"]);
        let mut threes = engine.words_of_length(3);
        threes.sort_unstable();
        assert_eq!(threes, vec!["ATE", "CAT", "EAT", "TEA"]);
    }

    #[test]
    fn definitions_resolve() {
        let mut engine = engine_of(&[]);
        engine.import_text("cat a feline [n -S]\ncats {cat=n} [n]\ndog\n", true);
        assert_eq!(engine.definition("cats").as_deref(), Some("CAT, a feline [n -S] [n]"));
        assert_eq!(engine.definition("DOG"), None);
        assert_eq!(engine.definition("EMU"), None);
    }

    #[test]
    fn import_text_without_definitions() {
        let mut engine = engine_of(&[]);
        let imported = engine.import_text("# list\ncat a feline\n\ndog\n", false);
        assert_eq!(imported, 2);
        assert!(engine.contains_word("DOG"));
        assert_eq!(engine.definition("CAT"), None);
    }

    #[test]
    fn import_text_file_counts_words() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# sample").unwrap();
        writeln!(file, "cat a feline [n -S]").unwrap();
        writeln!(file, "dog").unwrap();

        let mut engine = engine_of(&[]);
        assert_eq!(engine.import_text_file(file.path(), true).unwrap(), 2);
        assert!(engine.definition("CAT").is_some());
    }

    #[test]
    fn import_missing_file_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = engine_of(&[]);
        let err = engine
            .import_text_file(dir.path().join("missing.txt"), false)
            .unwrap_err();
        assert!(err.to_string().starts_with("can't open file"));
        assert_eq!(engine.num_words(), 0);
    }

    #[test]
    fn import_stems_file_reads_stems() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "SATIRE").unwrap();
        writeln!(file, "RETAIN").unwrap();

        let mut engine = engine_of(&[]);
        assert_eq!(engine.import_stems_file(file.path()).unwrap(), 2);
        assert_eq!(engine.stems(6), ["SATIRE", "RETAIN"]);
    }

    #[test]
    fn oversized_racks_do_not_overflow() {
        let engine = engine_of(&["CAT", "AA"]);
        let spec = SearchSpec::any_of(vec![SearchCondition::subanagram(
            "A".repeat(256) + "*",
        )]);
        assert_eq!(engine.search(&spec), vec!["AA", "CAT"]);

        let spec = SearchSpec::any_of(vec![SearchCondition::anagram("A".repeat(300))]);
        assert!(engine.search(&spec).is_empty());

        let found = search(
            &engine,
            vec![
                SearchCondition::length(2, 3),
                SearchCondition::subanagram("?".repeat(300) + "*").negate(),
            ],
        );
        assert!(found.is_empty());
    }

    #[test]
    fn stems_keep_first_length() {
        let mut engine = engine_of(&[]);
        assert_eq!(engine.import_stems("SATIRE\nretain\nSTARE\n"), 2);
        assert_eq!(engine.stems(6), ["SATIRE", "RETAIN"]);
        assert!(engine.stems(5).is_empty());
    }

    #[test]
    fn hook_sets() {
        let engine = engine_of(&["AT", "CAT", "CATS", "SCAT", "DOG"]);
        assert!(engine.is_set_member("CAT", SearchSet::FrontHooks));
        assert!(engine.is_set_member("CATS", SearchSet::BackHooks));
        assert!(!engine.is_set_member("CAT", SearchSet::BackHooks));
        assert!(engine.is_set_member("SCAT", SearchSet::HookWords));
        assert!(!engine.is_set_member("DOG", SearchSet::HookWords));
    }

    #[test]
    fn high_fives() {
        let engine = engine_of(&["FARMS", "HOUSE", "QUEEN", "BOATS"]);
        // F = 4 at the front, nothing above 5
        assert!(engine.is_set_member("FARMS", SearchSet::HighFives));
        // H = 4 at the front
        assert!(engine.is_set_member("HOUSE", SearchSet::HighFives));
        // Q is worth 10
        assert!(!engine.is_set_member("QUEEN", SearchSet::HighFives));
        // no 4 or 5 at either end
        assert!(!engine.is_set_member("BOATS", SearchSet::HighFives));
        assert!(!engine.is_set_member("FARM", SearchSet::HighFives));
    }

    #[test]
    fn type_one_sets_use_stems() {
        let mut engine = engine_of(&["SATIRES", "TRAINEES", "STEARINE"]);
        engine.import_stems("SATIRE\nRETINA\n");
        assert!(engine.is_set_member("SATIRES", SearchSet::TypeOneSevens));
        assert!(engine.is_set_member("TRAINEES", SearchSet::TypeOneEights));
        assert!(!engine.is_set_member("TRAINEES", SearchSet::EightsFromSevenLetterStems));

        engine.import_stems("NASTIER\n");
        assert!(engine.is_set_member("STEARINE", SearchSet::EightsFromSevenLetterStems));
    }

    #[test]
    fn type_two_and_three_exclude_type_one() {
        let mut engine = engine_of(&["ENTRAIL", "ROADIES", "HUNTERS"]);
        // ENTRAIL draws from the Type II letters
        assert!(engine.is_set_member("ENTRAIL", SearchSet::TypeTwoSevens));
        assert!(engine.is_set_member("HUNTERS", SearchSet::TypeThreeSevens));
        assert!(!engine.is_set_member("HUNTERS", SearchSet::TypeTwoSevens));

        engine.import_stems("RETINA\n");
        assert!(engine.is_set_member("ENTRAIL", SearchSet::TypeOneSevens));
        assert!(!engine.is_set_member("ENTRAIL", SearchSet::TypeTwoSevens));
        assert!(!engine.is_set_member("ENTRAIL", SearchSet::TypeThreeSevens));
    }

    #[test]
    fn group_search_uses_membership() {
        let mut engine = engine_of(&["SATIRES", "ENTRAIL", "CAT"]);
        engine.import_stems("SATIRE\n");
        let found = search(
            &engine,
            vec![SearchCondition::belong_to_group("Type I Sevens")],
        );
        assert_eq!(found, vec!["SATIRES"]);
    }

    #[test]
    fn in_lexicon_uses_engine_name() {
        let mut engine = WordEngine::new(EngineConfig::new("TWL")).unwrap();
        engine.import_word("CAT", None);
        assert_eq!(
            search(&engine, vec![SearchCondition::in_lexicon("TWL")]),
            vec!["CAT"]
        );
        assert!(search(&engine, vec![SearchCondition::in_lexicon("OWL")]).is_empty());
    }

    #[test]
    fn bad_distribution_is_rejected() {
        let config = EngineConfig::default().with_distribution("A9");
        assert!(WordEngine::new(config).is_err());
    }

    const VOCABULARY: &[&str] = &[
        "AT", "AS", "TA", "ACT", "CAT", "CATS", "SCAT", "CAST", "BAT", "BATS", "TAB", "STAB",
        "DOG", "DOGS", "GOD", "EAT", "TEA", "ATE", "EATS", "SEAT", "EAST",
    ];

    fn pool() -> Vec<SearchCondition> {
        vec![
            SearchCondition::pattern("C?T"),
            SearchCondition::pattern("*AT"),
            SearchCondition::pattern("[CB]*"),
            SearchCondition::pattern("D*").negate(),
            SearchCondition::anagram("TAC"),
            SearchCondition::subanagram("STAC"),
            SearchCondition::subanagram("AE?").negate(),
            SearchCondition::length(3, 3),
            SearchCondition::length(4, 15),
            SearchCondition::include_letters("S"),
            SearchCondition::exclude_letters("S"),
            SearchCondition::prefix("S"),
            SearchCondition::suffix("S"),
            SearchCondition::belong_to_group("Hook Words"),
            SearchCondition::num_anagrams(2, 5),
            SearchCondition::num_vowels(1, 1),
            SearchCondition::in_word_list("CAT ACT DOG"),
            SearchCondition::point_value(5, 6),
            SearchCondition::consist_of("AEIOU", 0, 30),
            SearchCondition::probability_order(1, 2, 0, false),
            SearchCondition::definition("feline"),
            SearchCondition::part_of_speech("n"),
            SearchCondition::in_lexicon("Custom").negate(),
        ]
    }

    fn vocabulary_engine() -> WordEngine {
        let mut engine = engine_of(VOCABULARY);
        engine.import_word("CAT", Some("a feline [n -S]"));
        engine.import_word("DOG", Some("a canine [n -S] / to follow [v]"));
        engine
    }

    proptest! {
        #[test]
        fn search_agrees_with_unoptimized_spec(
            picks in prop::collection::vec(0usize..23, 1..4),
            conjunction in any::<bool>(),
        ) {
            let pool = pool();
            let conditions: Vec<SearchCondition> =
                picks.iter().map(|&i| pool[i].clone()).collect();
            let spec = SearchSpec {
                conditions,
                conjunction,
                ..SearchSpec::default()
            };

            let engine = vocabulary_engine();
            let mut evaluator = Evaluator::new(&engine);
            let mut expected: Vec<String> = VOCABULARY
                .iter()
                .filter(|word| evaluator.matches_spec(word, &spec))
                .map(|word| (*word).to_string())
                .collect();
            expected.sort_unstable();

            prop_assert_eq!(engine.search(&spec), expected);
        }
    }
}
