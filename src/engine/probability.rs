//! Probability order
//!
//! Words are ranked by how many ways they can be drawn from the bag, most
//! likely first. Ties are broken by alphagram and then spelling, so anagrams
//! stay together. Searches saved before probability order limits existed
//! break ties by spelling alone.

use crate::core::{LetterBag, alphagram};
use crate::graph::MatchSet;
use crate::search::{ConditionKind, SearchCondition};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Upper bound of an unlimited rank range
const LIMIT_RANGE_MAX: i64 = i32::MAX as i64;

#[derive(Debug, Clone)]
struct Ranked {
    combinations: u64,
    alphagram: String,
    word: String,
}

/// A list of words sorted into probability order
#[derive(Debug, Clone, Default)]
pub struct ProbabilityRanks {
    ranked: Vec<Ranked>,
    index: FxHashMap<String, usize>,
}

impl ProbabilityRanks {
    /// Rank upper-case words drawn with `blanks` blanks
    ///
    /// With `alphabetical_ties`, equally likely words are ordered by spelling
    /// only instead of by alphagram first.
    #[must_use]
    pub fn new<I, S>(words: I, bag: &LetterBag, blanks: i32, alphabetical_ties: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ranked: Vec<Ranked> = words
            .into_iter()
            .map(|word| {
                let word = word.into();
                Ranked {
                    combinations: bag.num_combinations(&word, blanks) as u64,
                    alphagram: if alphabetical_ties {
                        String::new()
                    } else {
                        alphagram(&word)
                    },
                    word,
                }
            })
            .collect();
        ranked.sort_by(compare);
        ranked.dedup_by(|a, b| a.word == b.word);

        let index = ranked
            .iter()
            .enumerate()
            .map(|(i, r)| (r.word.clone(), i))
            .collect();
        Self { ranked, index }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Words from most to least likely
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.ranked.iter().map(|r| r.word.as_str())
    }

    /// 1-based rank of a word
    #[must_use]
    pub fn rank(&self, word: &str) -> Option<usize> {
        self.index.get(word).map(|&i| i + 1)
    }

    /// 1-based inclusive ranks shared by every word as likely as `word`
    #[must_use]
    pub fn tie_range(&self, word: &str) -> Option<(usize, usize)> {
        let &i = self.index.get(word)?;
        let combinations = self.ranked[i].combinations;
        let first = self.ranked[..i]
            .iter()
            .rposition(|r| r.combinations != combinations)
            .map_or(0, |p| p + 1);
        let last = self.ranked[i..]
            .iter()
            .position(|r| r.combinations != combinations)
            .map_or(self.ranked.len() - 1, |p| i + p - 1);
        Some((first + 1, last + 1))
    }

    /// Whether a word's rank falls in `min..=max`
    ///
    /// A lax check accepts the word when any rank it ties for falls in range.
    #[must_use]
    pub fn in_range(&self, word: &str, min: i32, max: i32, lax: bool) -> bool {
        let (min, max) = (i64::from(min), i64::from(max));
        let range = if lax {
            self.tie_range(word)
        } else {
            self.rank(word).map(|rank| (rank, rank))
        };
        range.is_some_and(|(first, last)| last as i64 >= min && first as i64 <= max)
    }
}

fn compare(a: &Ranked, b: &Ranked) -> Ordering {
    b.combinations
        .cmp(&a.combinations)
        .then_with(|| a.alphagram.cmp(&b.alphagram))
        .then_with(|| a.word.cmp(&b.word))
}

#[derive(Debug, Clone, Copy)]
struct RankLimits {
    min: i64,
    max: i64,
    lax_min: i64,
    lax_max: i64,
}

impl Default for RankLimits {
    fn default() -> Self {
        Self {
            min: 0,
            max: LIMIT_RANGE_MAX,
            lax_min: 0,
            lax_max: LIMIT_RANGE_MAX,
        }
    }
}

impl RankLimits {
    fn tighten(&mut self, condition: &SearchCondition) {
        let (min, max) = (i64::from(condition.min), i64::from(condition.max));
        if condition.lax {
            self.lax_min = self.lax_min.max(min);
            self.lax_max = self.lax_max.min(max);
        } else {
            self.min = self.min.max(min);
            self.max = self.max.min(max);
        }
    }

    /// 0-based inclusive slice of `ranks` kept by these limits
    fn kept_slice(self, ranks: &ProbabilityRanks) -> Option<(usize, usize)> {
        let n = ranks.len() as i64;
        if n == 0 || self.min > self.max || self.min > n || self.lax_min > n {
            return None;
        }

        let hard_min = (self.min - 1).max(0);
        let hard_max = (self.max - 1).min(n - 1);
        let lax_min = (self.lax_min - 1).max(0);
        let lax_max = (self.lax_max - 1).min(n - 1);
        let mut min = hard_min.max(lax_min);
        let mut max = hard_max.min(lax_max);
        if min > max {
            return None;
        }

        let combinations = |i: i64| ranks.ranked[i as usize].combinations;
        // Lax bounds may widen to cover ties, but never past a strict bound
        let low = combinations(min);
        while min > hard_min && combinations(min - 1) == low {
            min -= 1;
        }
        let high = combinations(max);
        while max < hard_max && combinations(max + 1) == high {
            max += 1;
        }
        Some((min as usize, max as usize))
    }
}

/// Keep only the words whose probability order rank satisfies every
/// Limit by Probability Order condition
///
/// Ranks are taken within `words` itself. Conditions assuming the same number
/// of blanks are merged; conditions assuming different numbers of blanks must
/// all hold.
pub fn limit_by_probability_order(
    words: &mut MatchSet,
    conditions: &[SearchCondition],
    bag: &LetterBag,
) {
    let mut limits: BTreeMap<i32, RankLimits> = BTreeMap::new();
    let mut legacy = false;
    for condition in conditions
        .iter()
        .filter(|c| c.kind == ConditionKind::LimitByProbabilityOrder)
    {
        legacy |= condition.legacy;
        limits.entry(condition.blanks).or_default().tighten(condition);
    }
    if limits.is_empty() || words.is_empty() {
        return;
    }

    let candidates: Vec<String> = words.words().map(str::to_string).collect();
    let mut keep: Option<FxHashSet<String>> = None;
    for (blanks, limit) in limits {
        let ranks = ProbabilityRanks::new(candidates.iter().cloned(), bag, blanks, legacy);
        let kept: FxHashSet<String> = match limit.kept_slice(&ranks) {
            Some((min, max)) => ranks
                .words()
                .skip(min)
                .take(max - min + 1)
                .map(str::to_string)
                .collect(),
            None => FxHashSet::default(),
        };
        keep = Some(match keep {
            Some(previous) => previous.intersection(&kept).cloned().collect(),
            None => kept,
        });
    }

    let keep = keep.unwrap_or_default();
    words.retain(|word| keep.contains(word));
}
