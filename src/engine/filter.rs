//! Post-condition evaluation
//!
//! Conditions that cannot prune a trie walk are checked here, one complete
//! word at a time. Words are upper-case. Expensive lookups (anagram counts,
//! probability order ranks, parsed patterns) are memoized for the lifetime of
//! one evaluator, which is one search.

use super::probability::ProbabilityRanks;
use super::word_engine::WordEngine;
use crate::core::{alphagram, num_unique_letters, num_vowels};
use crate::graph::{Pattern, Rack};
use crate::search::{ConditionKind, SearchCondition, SearchSet, SearchSpec};
use rustc_hash::FxHashMap;

/// Checks words against conditions using one engine's vocabulary
pub struct Evaluator<'a> {
    engine: &'a WordEngine,
    anagram_counts: FxHashMap<String, usize>,
    order_ranks: FxHashMap<(usize, i32), ProbabilityRanks>,
    patterns: FxHashMap<String, Option<Pattern>>,
    racks: FxHashMap<String, Option<Rack>>,
}

impl<'a> Evaluator<'a> {
    #[must_use]
    pub fn new(engine: &'a WordEngine) -> Self {
        Self {
            engine,
            anagram_counts: FxHashMap::default(),
            order_ranks: FxHashMap::default(),
            patterns: FxHashMap::default(),
            racks: FxHashMap::default(),
        }
    }

    /// Whether `word` satisfies one condition
    ///
    /// Range conditions ignore the negation flag. Limit by Probability Order
    /// always holds here; it is applied to a whole result instead.
    pub fn matches(&mut self, word: &str, condition: &SearchCondition) -> bool {
        let len = word.chars().count();
        let in_range = |value: usize| {
            let value = value as i64;
            value >= i64::from(condition.min) && value <= i64::from(condition.max)
        };

        match condition.kind {
            ConditionKind::PatternMatch => {
                // Malformed patterns match nothing, negated or not
                self.patterns
                    .entry(condition.string.clone())
                    .or_insert_with(|| Pattern::parse(&condition.string))
                    .as_ref()
                    .is_some_and(|pattern| pattern.matches(word) != condition.negated)
            }
            ConditionKind::AnagramMatch | ConditionKind::SubanagramMatch => {
                let subanagram = condition.kind == ConditionKind::SubanagramMatch;
                self.racks
                    .entry(condition.string.clone())
                    .or_insert_with(|| Rack::parse(&condition.string))
                    .as_ref()
                    .is_some_and(|rack| rack.matches(word, subanagram) != condition.negated)
            }
            ConditionKind::Length => in_range(len),
            ConditionKind::Prefix => {
                let hooked = format!("{}{word}", condition.string.to_ascii_uppercase());
                self.engine.contains_word(&hooked) != condition.negated
            }
            ConditionKind::Suffix => {
                let hooked = format!("{word}{}", condition.string.to_ascii_uppercase());
                self.engine.contains_word(&hooked) != condition.negated
            }
            ConditionKind::IncludeLetters => {
                includes_letters(word, &condition.string, condition.negated)
            }
            ConditionKind::ConsistOf => consists_of(word, condition),
            ConditionKind::BelongToGroup => match SearchSet::from_name(&condition.string) {
                Some(set) => self.engine.is_set_member(word, set) != condition.negated,
                None => true,
            },
            ConditionKind::InLexicon => {
                (condition.string == self.engine.lexicon()) != condition.negated
            }
            ConditionKind::InWordList => {
                let listed = condition
                    .string
                    .split_whitespace()
                    .any(|listed| listed.eq_ignore_ascii_case(word));
                listed != condition.negated
            }
            ConditionKind::NumAnagrams => {
                let count = self.num_anagrams(word);
                in_range(count)
            }
            ConditionKind::NumVowels => in_range(num_vowels(word)),
            ConditionKind::NumUniqueLetters => in_range(num_unique_letters(word)),
            ConditionKind::PointValue => {
                in_range(self.engine.letter_bag().point_value(word) as usize)
            }
            ConditionKind::Probability => {
                let combinations = self
                    .engine
                    .letter_bag()
                    .num_combinations(word, condition.blanks)
                    .round();
                combinations >= f64::from(condition.min) && combinations <= f64::from(condition.max)
            }
            ConditionKind::ProbabilityOrder => {
                let engine = self.engine;
                self.order_ranks
                    .entry((len, condition.blanks))
                    .or_insert_with(|| {
                        ProbabilityRanks::new(
                            engine.words_of_length(len),
                            engine.letter_bag(),
                            condition.blanks,
                            false,
                        )
                    })
                    .in_range(word, condition.min, condition.max, condition.lax)
            }
            ConditionKind::LimitByProbabilityOrder => true,
            ConditionKind::PartOfSpeech => {
                self.engine
                    .definitions()
                    .has_part_of_speech(word, &condition.string)
                    != condition.negated
            }
            ConditionKind::Definition => {
                let needle = condition.string.to_lowercase();
                let found = self
                    .engine
                    .definitions()
                    .entries(word)
                    .any(|entry| entry.to_lowercase().contains(&needle));
                found != condition.negated
            }
        }
    }

    /// Whether `word` satisfies every condition
    pub fn matches_all(&mut self, word: &str, conditions: &[SearchCondition]) -> bool {
        conditions.iter().all(|condition| self.matches(word, condition))
    }

    /// Whether `word` satisfies at least one condition
    pub fn matches_any(&mut self, word: &str, conditions: &[SearchCondition]) -> bool {
        conditions.iter().any(|condition| self.matches(word, condition))
    }

    /// Whether `word` satisfies a spec as written, without optimizing it
    ///
    /// An empty spec matches nothing.
    pub fn matches_spec(&mut self, word: &str, spec: &SearchSpec) -> bool {
        if spec.conditions.is_empty() {
            return false;
        }
        if spec.conjunction {
            self.matches_all(word, &spec.conditions)
        } else {
            self.matches_any(word, &spec.conditions)
        }
    }

    fn num_anagrams(&mut self, word: &str) -> usize {
        let key = alphagram(word);
        if let Some(&count) = self.anagram_counts.get(&key) {
            return count;
        }
        let count = self.engine.num_anagrams(word);
        self.anagram_counts.insert(key, count);
        count
    }
}

/// Letters counted with multiplicity; negated means none of the letters
fn includes_letters(word: &str, letters: &str, negated: bool) -> bool {
    let mut wanted = letters
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase());
    if negated {
        return !wanted.any(|c| word.contains(c));
    }

    let mut available: Vec<char> = word.chars().collect();
    for c in wanted {
        match available.iter().position(|&a| a == c) {
            Some(i) => {
                available.swap_remove(i);
            }
            None => return false,
        }
    }
    true
}

/// Share of the word's letters drawn from the condition's letters, in percent
fn consists_of(word: &str, condition: &SearchCondition) -> bool {
    let len = word.chars().count() as i64;
    if len == 0 {
        return false;
    }
    let set = condition.string.to_ascii_uppercase();
    let count = word.chars().filter(|&c| set.contains(c)).count() as i64;
    let matched = count * 100 >= i64::from(condition.min) * len
        && count * 100 <= i64::from(condition.max) * len;
    matched != condition.negated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineConfig;

    fn engine_of(words: &[&str]) -> WordEngine {
        let mut engine = WordEngine::new(EngineConfig::default()).unwrap();
        for word in words {
            engine.import_word(word, None);
        }
        engine
    }

    #[test]
    fn include_letters_with_multiplicity() {
        assert!(includes_letters("LETTER", "TTE", false));
        assert!(!includes_letters("LATER", "TT", false));
        assert!(includes_letters("LATER", "", false));
    }

    #[test]
    fn excluded_letters_must_be_absent() {
        assert!(includes_letters("CAT", "QZ", true));
        assert!(!includes_letters("QUA", "QZ", true));
    }

    #[test]
    fn consist_of_percentages() {
        let vowels = SearchCondition::consist_of("AEIOU", 50, 100);
        assert!(consists_of("AREA", &vowels));
        assert!(!consists_of("STRENGTH", &vowels));
        assert!(consists_of("STRENGTH", &vowels.clone().negate()));
    }

    #[test]
    fn prefix_and_suffix_hooks() {
        let engine = engine_of(&["CAT", "CATS", "SCAT"]);
        let mut eval = Evaluator::new(&engine);
        assert!(eval.matches("CAT", &SearchCondition::prefix("S")));
        assert!(eval.matches("CAT", &SearchCondition::suffix("s")));
        assert!(!eval.matches("CATS", &SearchCondition::suffix("S")));
        assert!(eval.matches("CATS", &SearchCondition::suffix("S").negate()));
    }

    #[test]
    fn ranges_ignore_negation() {
        let engine = engine_of(&["CAT"]);
        let mut eval = Evaluator::new(&engine);
        assert!(eval.matches("CAT", &SearchCondition::length(3, 3)));
        assert!(eval.matches("CAT", &SearchCondition::length(3, 3).negate()));
        assert!(eval.matches("CAT", &SearchCondition::num_vowels(1, 1)));
        assert!(eval.matches("CAT", &SearchCondition::point_value(5, 5)));
        assert!(!eval.matches("CAT", &SearchCondition::num_unique_letters(4, 9)));
    }

    #[test]
    fn anagram_counts() {
        let engine = engine_of(&["EAT", "TEA", "ATE", "CAT"]);
        let mut eval = Evaluator::new(&engine);
        assert!(eval.matches("TEA", &SearchCondition::num_anagrams(3, 3)));
        assert!(eval.matches("CAT", &SearchCondition::num_anagrams(1, 1)));
        assert!(!eval.matches("CAT", &SearchCondition::num_anagrams(2, 5)));
    }

    #[test]
    fn word_lists_and_lexicons() {
        let engine = engine_of(&["CAT"]);
        let mut eval = Evaluator::new(&engine);
        assert!(eval.matches("CAT", &SearchCondition::in_word_list("dog cat")));
        assert!(!eval.matches("CAT", &SearchCondition::in_word_list("CATS")));
        assert!(eval.matches("CAT", &SearchCondition::in_lexicon("Custom")));
        assert!(!eval.matches("CAT", &SearchCondition::in_lexicon("OWL")));
        assert!(eval.matches("CAT", &SearchCondition::in_lexicon("OWL").negate()));
    }

    #[test]
    fn unknown_group_passes() {
        let engine = engine_of(&["CAT"]);
        let mut eval = Evaluator::new(&engine);
        assert!(eval.matches("CAT", &SearchCondition::belong_to_group("Nonsense")));
        assert!(!eval.matches("CAT", &SearchCondition::belong_to_group("High Fives")));
    }

    #[test]
    fn probability_and_order() {
        let engine = engine_of(&["EAT", "TEA", "ZAX", "QUA"]);
        let mut eval = Evaluator::new(&engine);
        // 12 E x 9 A x 6 T
        assert!(eval.matches("EAT", &SearchCondition::probability(648, 648, 0)));
        assert!(!eval.matches("ZAX", &SearchCondition::probability(10, 1000, 0)));
        assert!(eval.matches("EAT", &SearchCondition::probability_order(1, 1, 0, false)));
        assert!(!eval.matches("TEA", &SearchCondition::probability_order(1, 1, 0, false)));
        assert!(eval.matches("TEA", &SearchCondition::probability_order(1, 1, 0, true)));
        assert!(eval.matches("ZAX", &SearchCondition::probability_order(4, 4, 0, false)));
    }

    #[test]
    fn definitions_and_parts_of_speech() {
        let mut engine = engine_of(&[]);
        engine.import_word("CAT", Some("a small Feline [n -S]"));
        let mut eval = Evaluator::new(&engine);
        assert!(eval.matches("CAT", &SearchCondition::definition("feline")));
        assert!(!eval.matches("CAT", &SearchCondition::definition("canine")));
        assert!(eval.matches("CAT", &SearchCondition::part_of_speech("n")));
        assert!(eval.matches("CAT", &SearchCondition::part_of_speech("v").negate()));
    }

    #[test]
    fn negated_match_conditions() {
        let engine = engine_of(&["CAT"]);
        let mut eval = Evaluator::new(&engine);
        assert!(eval.matches("CAT", &SearchCondition::pattern("C*")));
        assert!(!eval.matches("CAT", &SearchCondition::pattern("C*").negate()));
        assert!(eval.matches("CAT", &SearchCondition::anagram("TAC")));
        assert!(eval.matches("CAT", &SearchCondition::subanagram("TACS")));
        assert!(!eval.matches("CAT", &SearchCondition::pattern("[AB")));
    }

    #[test]
    fn malformed_match_strings_never_match() {
        let engine = engine_of(&["CAT"]);
        let mut eval = Evaluator::new(&engine);
        assert!(!eval.matches("CAT", &SearchCondition::pattern("[AB").negate()));
        assert!(!eval.matches("CAT", &SearchCondition::anagram("[]").negate()));
        assert!(!eval.matches("CAT", &SearchCondition::subanagram("C[").negate()));
    }

    #[test]
    fn spec_conjunctions() {
        let engine = engine_of(&["CAT"]);
        let mut eval = Evaluator::new(&engine);
        let and = SearchSpec::all_of(vec![
            SearchCondition::length(3, 3),
            SearchCondition::include_letters("Q"),
        ]);
        let or = SearchSpec::any_of(and.conditions.clone());
        assert!(!eval.matches_spec("CAT", &and));
        assert!(eval.matches_spec("CAT", &or));
        assert!(!eval.matches_spec("CAT", &SearchSpec::default()));
    }
}
