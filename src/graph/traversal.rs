//! Trie traversal for pattern, anagram and subanagram matches
//!
//! Both walks keep an explicit stack of pending states instead of recursing,
//! so long wildcard runs cannot exhaust the call stack. Letters filled by a
//! wildcard, class, blank or star are recorded lower-case.

use super::pattern::{LetterClass, Pattern, Rack, Token};
use super::trie::{NodeIndex, Trie};
use crate::core::MAX_WORD_LEN;
use rustc_hash::FxHashMap;

/// Bounds that prune a traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalLimits {
    /// Shortest word accepted
    pub min_len: usize,
    /// Longest word visited
    pub max_len: usize,
    /// Letters never descended into
    pub exclude: Vec<char>,
}

impl TraversalLimits {
    #[inline]
    fn allows(&self, letter: char) -> bool {
        !self.exclude.contains(&letter)
    }
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            min_len: 1,
            max_len: MAX_WORD_LEN,
            exclude: Vec::new(),
        }
    }
}

/// Words found by a traversal, keyed by their upper-case spelling
///
/// Each entry keeps one marked spelling: an exact (all upper-case) spelling
/// replaces a wildcard-marked one, otherwise the first spelling found stays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    words: FxHashMap<String, String>,
}

impl MatchSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marked spelling
    pub fn insert(&mut self, marked: String) {
        let key = marked.to_ascii_uppercase();
        match self.words.get_mut(&key) {
            Some(existing) => {
                if marked == key && *existing != key {
                    *existing = marked;
                }
            }
            None => {
                self.words.insert(key, marked);
            }
        }
    }

    /// Whether the set holds a word, by upper-case spelling
    #[inline]
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Keep only words also present in `other`, preferring exact spellings
    pub fn intersect(&mut self, other: &Self) {
        self.words.retain(|key, _| other.words.contains_key(key));
        for (key, marked) in &other.words {
            if marked == key {
                if let Some(existing) = self.words.get_mut(key) {
                    existing.clone_from(marked);
                }
            }
        }
    }

    /// Add every word of `other`
    pub fn union(&mut self, other: Self) {
        for marked in other.words.into_values() {
            self.insert(marked);
        }
    }

    /// Keep only words whose upper-case spelling satisfies `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.words.retain(|key, _| keep(key));
    }

    /// Upper-case spellings in arbitrary order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.keys().map(String::as_str)
    }

    /// `(upper-case, marked)` pairs in arbitrary order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.words.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

struct PatternState {
    chain: Option<NodeIndex>,
    word: String,
    len: usize,
    pos: usize,
}

/// Walk `trie` with a pattern, collecting every complete match
///
/// The pattern is matched against the trie as given; callers pick the
/// orientation.
pub fn pattern_walk(trie: &Trie, pattern: &Pattern, limits: &TraversalLimits, out: &mut MatchSet) {
    let tokens = pattern.tokens();
    if tokens.is_empty() {
        return;
    }

    let mut stack = vec![PatternState {
        chain: trie.root(),
        word: String::new(),
        len: 0,
        pos: 0,
    }];

    while let Some(state) = stack.pop() {
        let Some(&token) = tokens.get(state.pos) else {
            continue;
        };

        // A star may also match nothing
        let next_pos = if token == Token::Star {
            if state.pos + 1 < tokens.len() {
                stack.push(PatternState {
                    chain: state.chain,
                    word: state.word.clone(),
                    len: state.len,
                    pos: state.pos + 1,
                });
            }
            state.pos
        } else {
            state.pos + 1
        };

        for (_, node) in trie.siblings(state.chain) {
            if !token.accepts(node.letter) || !limits.allows(node.letter) {
                continue;
            }
            let len = state.len + 1;
            if len > limits.max_len {
                continue;
            }

            let mut word = String::with_capacity(state.word.len() + 1);
            word.push_str(&state.word);
            word.push(match token {
                Token::Letter(c) => c,
                _ => node.letter.to_ascii_lowercase(),
            });

            if node.is_end_of_word && len >= limits.min_len && pattern.exhausted_at(next_pos) {
                out.insert(word.clone());
            }
            if node.child.is_some() && len < limits.max_len && next_pos < tokens.len() {
                stack.push(PatternState {
                    chain: node.child,
                    word,
                    len,
                    pos: next_pos,
                });
            }
        }
    }
}

/// Walk both tries with a pattern, using the reverse trie for patterns
/// anchored only at their end
pub fn pattern_search(
    forward: &Trie,
    reverse: &Trie,
    pattern: &Pattern,
    limits: &TraversalLimits,
) -> MatchSet {
    let mut out = MatchSet::new();
    if pattern.is_suffix_anchored() {
        let mut reversed = MatchSet::new();
        pattern_walk(reverse, &pattern.reversed(), limits, &mut reversed);
        for (_, marked) in reversed.entries() {
            out.insert(marked.chars().rev().collect());
        }
    } else {
        pattern_walk(forward, pattern, limits, &mut out);
    }
    out
}

#[derive(Clone)]
struct RackState {
    chain: Option<NodeIndex>,
    word: String,
    len: usize,
    letters: [u8; 26],
    blanks: u8,
    used: u32,
}

impl RackState {
    fn slots_left(&self, rack: &Rack) -> usize {
        let classes_left = rack.classes.len() - self.used.count_ones() as usize;
        self.letters.iter().map(|&n| usize::from(n)).sum::<usize>()
            + usize::from(self.blanks)
            + classes_left
    }
}

enum Consume {
    Literal(usize),
    Class(usize),
    Blank,
    Free,
}

/// Ways the rack in `state` can supply `letter`
fn consumptions(rack: &Rack, state: &RackState, letter: char) -> Vec<Consume> {
    let index = (letter as u8 - b'A') as usize;
    if state.letters[index] > 0 {
        return vec![Consume::Literal(index)];
    }

    let mut options = Vec::new();
    let mut seen: Vec<LetterClass> = Vec::new();
    for (i, class) in rack.classes.iter().enumerate() {
        if state.used & (1 << i) == 0 && class.accepts(letter) && !seen.contains(class) {
            seen.push(*class);
            options.push(Consume::Class(i));
        }
    }
    if state.blanks > 0 {
        options.push(Consume::Blank);
    }
    if options.is_empty() && rack.star {
        options.push(Consume::Free);
    }
    options
}

/// Walk `trie` for words spelled from a rack
///
/// Literal letters are consumed before class slots and blanks; the star is
/// used only when nothing else fits. An anagram must consume every slot, a
/// subanagram may stop at any word.
pub fn anagram_search(
    trie: &Trie,
    rack: &Rack,
    subanagram: bool,
    limits: &TraversalLimits,
) -> MatchSet {
    let mut out = MatchSet::new();
    if rack.num_slots() == 0 && !rack.star {
        return out;
    }
    if rack.classes.len() > 32 {
        return out;
    }

    let mut stack = vec![RackState {
        chain: trie.root(),
        word: String::new(),
        len: 0,
        letters: rack.letters,
        blanks: rack.blanks,
        used: 0,
    }];

    while let Some(state) = stack.pop() {
        for (_, node) in trie.siblings(state.chain) {
            let letter = node.letter;
            if !letter.is_ascii_uppercase() || !limits.allows(letter) {
                continue;
            }
            let len = state.len + 1;
            if len > limits.max_len {
                continue;
            }

            for consume in consumptions(rack, &state, letter) {
                let mut next = RackState {
                    chain: node.child,
                    word: state.word.clone(),
                    len,
                    ..state.clone()
                };
                match consume {
                    Consume::Literal(index) => {
                        next.letters[index] -= 1;
                        next.word.push(letter);
                    }
                    Consume::Class(i) => {
                        next.used |= 1 << i;
                        next.word.push(letter.to_ascii_lowercase());
                    }
                    Consume::Blank => {
                        next.blanks -= 1;
                        next.word.push(letter.to_ascii_lowercase());
                    }
                    Consume::Free => next.word.push(letter.to_ascii_lowercase()),
                }

                let left = next.slots_left(rack);
                let complete = subanagram || left == 0;
                if node.is_end_of_word && complete && len >= limits.min_len {
                    out.insert(next.word.clone());
                }
                if next.chain.is_some() && len < limits.max_len && (left > 0 || rack.star) {
                    stack.push(next);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reverse_pattern;

    fn tries(words: &[&str]) -> (Trie, Trie) {
        let mut forward = Trie::new();
        let mut reverse = Trie::new();
        for word in words {
            forward.insert(word);
            reverse.insert(&reverse_pattern(word));
        }
        (forward, reverse)
    }

    fn sorted(set: &MatchSet) -> Vec<String> {
        let mut words: Vec<String> = set.words().map(str::to_string).collect();
        words.sort();
        words
    }

    fn patterns(words: &[&str], pattern: &str) -> Vec<String> {
        let (forward, reverse) = tries(words);
        let pattern = Pattern::parse(pattern).unwrap();
        sorted(&pattern_search(
            &forward,
            &reverse,
            &pattern,
            &TraversalLimits::default(),
        ))
    }

    fn anagrams(words: &[&str], rack: &str, subanagram: bool) -> Vec<String> {
        let (forward, _) = tries(words);
        let rack = Rack::parse(rack).unwrap();
        sorted(&anagram_search(
            &forward,
            &rack,
            subanagram,
            &TraversalLimits::default(),
        ))
    }

    #[test]
    fn single_wildcard_pattern() {
        let found = patterns(&["CAT", "BAT", "RAT", "CATS"], "?AT");
        assert_eq!(found, vec!["BAT", "CAT", "RAT"]);
    }

    #[test]
    fn trailing_star_pattern() {
        let found = patterns(&["CAT", "CATS", "CATTLE", "DOG"], "CAT*");
        assert_eq!(found, vec!["CAT", "CATS", "CATTLE"]);
    }

    #[test]
    fn leading_star_uses_reverse_trie() {
        let found = patterns(&["RING", "SINGING", "INGOT", "SING"], "*ING");
        assert_eq!(found, vec!["RING", "SING", "SINGING"]);
    }

    #[test]
    fn inner_star_pattern() {
        let found = patterns(&["CS", "CATS", "CAT", "CUPS"], "C*S");
        assert_eq!(found, vec!["CATS", "CS", "CUPS"]);
    }

    #[test]
    fn class_pattern() {
        let found = patterns(&["BAT", "CAT", "HAT"], "[BC]AT");
        assert_eq!(found, vec!["BAT", "CAT"]);
        let found = patterns(&["BAT", "CAT", "HAT"], "[^BC]AT");
        assert_eq!(found, vec!["HAT"]);
    }

    #[test]
    fn wildcard_letters_are_marked() {
        let (forward, reverse) = tries(&["CAT"]);
        let pattern = Pattern::parse("C?T").unwrap();
        let found = pattern_search(&forward, &reverse, &pattern, &TraversalLimits::default());
        let marked: Vec<&str> = found.entries().map(|(_, m)| m).collect();
        assert_eq!(marked, vec!["CaT"]);
    }

    #[test]
    fn limits_prune_traversal() {
        let (forward, reverse) = tries(&["CAT", "CATS", "CATTLE", "COT"]);
        let pattern = Pattern::parse("C*").unwrap();
        let limits = TraversalLimits {
            min_len: 4,
            max_len: 4,
            exclude: vec!['O'],
        };
        let found = pattern_search(&forward, &reverse, &pattern, &limits);
        assert_eq!(sorted(&found), vec!["CATS"]);
    }

    #[test]
    fn anagram_traversal() {
        let words = ["PRAISE", "PARIES", "RISE", "PAIR", "SPEAR", "QUIZ"];
        assert_eq!(anagrams(&words, "AEIPRS", false), vec!["PARIES", "PRAISE"]);
        assert_eq!(
            anagrams(&words, "AEIPRS", true),
            vec!["PAIR", "PARIES", "PRAISE", "RISE", "SPEAR"]
        );
    }

    #[test]
    fn anagram_with_blank_and_class() {
        let words = ["CAT", "ACT", "TACK", "BAT"];
        assert_eq!(anagrams(&words, "AT?", false), vec!["ACT", "BAT", "CAT"]);
        assert_eq!(anagrams(&words, "AT[BK]", false), vec!["BAT"]);
    }

    #[test]
    fn anagram_with_star() {
        let words = ["QUIZ", "QUA", "SQUAT", "TAX"];
        assert_eq!(anagrams(&words, "QU*", false), vec!["QUA", "QUIZ", "SQUAT"]);
    }

    #[test]
    fn exact_spelling_wins() {
        let mut set = MatchSet::new();
        set.insert("CaT".to_string());
        set.insert("CAT".to_string());
        set.insert("CAt".to_string());
        assert_eq!(set.entries().collect::<Vec<_>>(), vec![("CAT", "CAT")]);

        let mut set = MatchSet::new();
        set.insert("cAT".to_string());
        set.insert("CaT".to_string());
        assert_eq!(set.entries().collect::<Vec<_>>(), vec![("CAT", "cAT")]);
    }

    #[test]
    fn intersect_and_union() {
        let mut a = MatchSet::new();
        a.insert("CaT".to_string());
        a.insert("DOG".to_string());
        let mut b = MatchSet::new();
        b.insert("CAT".to_string());
        a.intersect(&b);
        assert_eq!(a.entries().collect::<Vec<_>>(), vec![("CAT", "CAT")]);

        let mut c = MatchSet::new();
        c.insert("EMU".to_string());
        a.union(c);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn malformed_limits_find_nothing() {
        let (forward, reverse) = tries(&["CAT"]);
        let pattern = Pattern::parse("???").unwrap();
        let limits = TraversalLimits {
            min_len: 4,
            max_len: 2,
            exclude: Vec::new(),
        };
        assert!(pattern_search(&forward, &reverse, &pattern, &limits).is_empty());
    }
}
