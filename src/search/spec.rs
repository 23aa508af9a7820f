//! Search specifications and the condition optimizer
//!
//! A spec is a flat list of conditions joined by one conjunction flag. The
//! optimizer merges bound conditions of an AND spec into windows, detects
//! contradictions, and moves the tightest bounds to the front.

use super::condition::{ConditionKind, SearchCondition};
use super::migration::{CURRENT_VERSION, MIGRATIONS};
use super::set::SearchSet;
use crate::core::{MAX_WORD_LEN, canonical_search_string, slot_count};
use rustc_hash::FxHashMap;
use std::fmt;
use tracing::debug;

const MAX_ANAGRAMS: i32 = 65535;
const UNBOUNDED_LEN: i32 = MAX_WORD_LEN as i32 + 1;
const UNBOUNDED_POINTS: i32 = 10 * MAX_WORD_LEN as i32 + 1;

/// Outcome of optimizing a spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecState {
    /// The spec had no conditions
    Unconstrained,
    /// The conditions cannot all hold; the list has been cleared
    Contradictory,
    /// The spec may match words
    Normal,
}

/// Conditions joined by AND (`conjunction == true`) or OR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    pub conditions: Vec<SearchCondition>,
    pub conjunction: bool,
    /// Format version the conditions are expressed in
    pub version: u32,
}

impl Default for SearchSpec {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
            conjunction: true,
            version: CURRENT_VERSION,
        }
    }
}

impl SearchSpec {
    /// An AND spec over the given conditions
    #[must_use]
    pub fn all_of(conditions: Vec<SearchCondition>) -> Self {
        Self {
            conditions,
            ..Self::default()
        }
    }

    /// An OR spec over the given conditions
    #[must_use]
    pub fn any_of(conditions: Vec<SearchCondition>) -> Self {
        Self {
            conditions,
            conjunction: false,
            ..Self::default()
        }
    }

    /// Bring conditions saved by an older version up to date
    ///
    /// Each applicable migration runs once, in version order.
    pub fn update(&mut self) {
        while self.version < CURRENT_VERSION {
            for migration in MIGRATIONS
                .iter()
                .filter(|m| m.from_version == self.version)
            {
                for condition in self
                    .conditions
                    .iter_mut()
                    .filter(|c| c.kind == migration.kind)
                {
                    (migration.apply)(condition);
                }
            }
            self.version += 1;
        }
    }

    /// Rewrite the conditions into their tightest equivalent form
    ///
    /// For an AND spec, bound conditions are merged into windows and emitted
    /// at the front (Length, Number of Vowels, Number of Unique Letters,
    /// Point Value, Number of Anagrams), followed by the other conditions in
    /// their original order. If the conditions contradict each other the
    /// list is cleared. An OR spec only has its search strings normalized.
    ///
    /// Optimizing an optimized spec changes nothing.
    pub fn optimize(&mut self) -> SpecState {
        if self.conditions.is_empty() {
            return SpecState::Unconstrained;
        }

        if !self.conjunction {
            for condition in &mut self.conditions {
                canonicalize(condition);
            }
            return SpecState::Normal;
        }

        let mut optimizer = Optimizer::default();
        let state = match optimizer.run(&self.conditions) {
            Some(conditions) => {
                self.conditions = conditions;
                SpecState::Normal
            }
            None => {
                self.conditions.clear();
                SpecState::Contradictory
            }
        };
        debug!(?state, conditions = self.conditions.len(), "optimized search spec");
        state
    }
}

fn canonicalize(condition: &mut SearchCondition) {
    if condition.kind.is_match_kind() || condition.kind == ConditionKind::IncludeLetters {
        condition.string = canonical_search_string(&condition.string);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    min: i32,
    max: i32,
}

impl Window {
    const fn new(max: i32) -> Self {
        Self { min: 0, max }
    }

    fn tighten(&mut self, min: i32, max: i32) {
        self.min = self.min.max(min);
        self.max = self.max.min(max);
    }

    const fn narrower_than(self, unbounded: i32) -> bool {
        self.min > 0 || self.max < unbounded
    }
}

struct Optimizer {
    length: Window,
    vowels: Window,
    unique: Window,
    points: Window,
    anagrams: Window,
    include: String,
    exclude: String,
    lexicons: FxHashMap<String, bool>,
    parts_of_speech: FxHashMap<String, bool>,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self {
            length: Window::new(UNBOUNDED_LEN),
            vowels: Window::new(UNBOUNDED_LEN),
            unique: Window::new(UNBOUNDED_LEN),
            points: Window::new(UNBOUNDED_POINTS),
            anagrams: Window::new(MAX_ANAGRAMS),
            include: String::new(),
            exclude: String::new(),
            lexicons: FxHashMap::default(),
            parts_of_speech: FxHashMap::default(),
        }
    }
}

impl Optimizer {
    /// Merge every condition; `None` means the conditions contradict
    fn run(&mut self, conditions: &[SearchCondition]) -> Option<Vec<SearchCondition>> {
        let mut rest = Vec::with_capacity(conditions.len());
        for condition in conditions {
            let mut condition = condition.clone();
            canonicalize(&mut condition);
            if self.merge(&condition)? {
                rest.push(condition);
            }
        }
        self.check_windows()?;

        let mut optimized = Vec::with_capacity(rest.len() + 5);
        let windows = [
            (ConditionKind::Length, self.length, UNBOUNDED_LEN),
            (ConditionKind::NumVowels, self.vowels, UNBOUNDED_LEN),
            (ConditionKind::NumUniqueLetters, self.unique, UNBOUNDED_LEN),
            (ConditionKind::PointValue, self.points, UNBOUNDED_POINTS),
            (ConditionKind::NumAnagrams, self.anagrams, MAX_ANAGRAMS),
        ];
        for (kind, window, unbounded) in windows {
            if window.narrower_than(unbounded) {
                let mut bound = SearchCondition::new(kind);
                bound.min = window.min;
                bound.max = window.max;
                optimized.push(bound);
            }
        }
        optimized.extend(rest);

        // Every bound was wide open: keep one so the list never reads as cleared
        if optimized.is_empty() {
            optimized.push(SearchCondition::length(self.length.min, self.length.max));
        }
        Some(optimized)
    }

    /// Fold one condition into the running state
    ///
    /// Returns whether the condition must be kept in the list, or `None` on a
    /// contradiction.
    fn merge(&mut self, condition: &SearchCondition) -> Option<bool> {
        let (min, max) = (condition.min, condition.max);
        match condition.kind {
            ConditionKind::PatternMatch
            | ConditionKind::AnagramMatch
            | ConditionKind::SubanagramMatch => {
                if !condition.negated && !condition.string.contains('*') {
                    let slots = slot_count(&condition.string) as i32;
                    if condition.kind == ConditionKind::SubanagramMatch {
                        self.length.tighten(0, slots);
                    } else {
                        self.length.tighten(slots, slots);
                    }
                    self.check_length()?;
                }
                Some(true)
            }
            ConditionKind::Length => {
                self.length.tighten(min, max);
                self.check_length()?;
                Some(false)
            }
            ConditionKind::IncludeLetters => {
                let letters = condition.string.chars().filter(char::is_ascii_uppercase);
                let (mine, theirs) = if condition.negated {
                    (&mut self.exclude, &self.include)
                } else {
                    (&mut self.include, &self.exclude)
                };
                for c in letters {
                    if theirs.contains(c) {
                        return None;
                    }
                    mine.push(c);
                }
                Some(true)
            }
            ConditionKind::BelongToGroup => {
                let implied = SearchSet::from_name(&condition.string)
                    .and_then(SearchSet::implied_length)
                    .filter(|_| !condition.negated);
                if let Some(len) = implied {
                    self.length.tighten(len as i32, len as i32);
                    self.check_length()?;
                }
                Some(true)
            }
            ConditionKind::InLexicon => {
                flag_conflict(&mut self.lexicons, condition)?;
                Some(true)
            }
            ConditionKind::PartOfSpeech => {
                flag_conflict(&mut self.parts_of_speech, condition)?;
                Some(true)
            }
            ConditionKind::NumAnagrams => {
                self.anagrams.tighten(min, max);
                let w = self.anagrams;
                (w.min <= MAX_ANAGRAMS && w.max > 0 && w.min <= w.max).then_some(false)
            }
            ConditionKind::NumVowels => {
                self.vowels.tighten(min, max);
                let w = self.vowels;
                (w.min <= MAX_WORD_LEN as i32 && w.max >= 0 && w.min <= w.max).then_some(false)
            }
            ConditionKind::NumUniqueLetters => {
                self.unique.tighten(min, max);
                let w = self.unique;
                (w.min <= MAX_WORD_LEN as i32 && w.max > 0 && w.min <= w.max).then_some(false)
            }
            ConditionKind::PointValue => {
                self.points.tighten(min, max);
                let w = self.points;
                (w.min < UNBOUNDED_POINTS && w.max > 0 && w.min <= w.max).then_some(false)
            }
            _ => Some(true),
        }
    }

    fn check_length(&self) -> Option<()> {
        let w = self.length;
        (w.min <= MAX_WORD_LEN as i32 && w.max > 0 && w.min <= w.max).then_some(())
    }

    /// Cross-window checks that only make sense once every bound is known
    fn check_windows(&self) -> Option<()> {
        let impossible = self.vowels.min > self.length.max
            || self.unique.min > self.length.max
            || self.points.min > 10 * self.length.max
            || self.points.max < self.length.min;
        (!impossible).then_some(())
    }
}

/// A name asserted both with and without negation is a contradiction
fn flag_conflict(seen: &mut FxHashMap<String, bool>, condition: &SearchCondition) -> Option<()> {
    match seen.get(&condition.string) {
        Some(&negated) if negated != condition.negated => None,
        _ => {
            seen.insert(condition.string.clone(), condition.negated);
            Some(())
        }
    }
}

impl fmt::Display for SearchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joiner = if self.conjunction { " AND " } else { " OR " };
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(joiner)?;
            }
            write!(f, "{condition}")?;
        }
        Ok(())
    }
}
