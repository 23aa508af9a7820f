//! Search conditions
//!
//! A condition is a kind plus the payload fields that kind reads. Fields a
//! kind does not use are left at their defaults and ignored.

use std::fmt;

/// Every kind of search condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    PatternMatch,
    AnagramMatch,
    SubanagramMatch,
    Length,
    Prefix,
    Suffix,
    IncludeLetters,
    ConsistOf,
    BelongToGroup,
    InLexicon,
    InWordList,
    NumAnagrams,
    NumVowels,
    NumUniqueLetters,
    PointValue,
    Probability,
    ProbabilityOrder,
    LimitByProbabilityOrder,
    PartOfSpeech,
    Definition,
}

/// Which payload fields a kind carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// `string` and `negated`
    Text,
    /// `min` and `max`
    Range,
    /// `min`, `max` and `blanks`
    Probability,
    /// `min`, `max`, `blanks` and `lax`
    Order,
    /// `string`, `min` and `max`
    Percentage,
}

const KIND_NAMES: [(ConditionKind, &str); 20] = [
    (ConditionKind::PatternMatch, "Pattern Match"),
    (ConditionKind::AnagramMatch, "Anagram Match"),
    (ConditionKind::SubanagramMatch, "Subanagram Match"),
    (ConditionKind::Length, "Length"),
    (ConditionKind::Prefix, "Takes Prefix"),
    (ConditionKind::Suffix, "Takes Suffix"),
    (ConditionKind::IncludeLetters, "Includes Letters"),
    (ConditionKind::ConsistOf, "Consists of"),
    (ConditionKind::BelongToGroup, "Belongs to Group"),
    (ConditionKind::InLexicon, "In Lexicon"),
    (ConditionKind::InWordList, "In Word List"),
    (ConditionKind::NumAnagrams, "Number of Anagrams"),
    (ConditionKind::NumVowels, "Number of Vowels"),
    (ConditionKind::NumUniqueLetters, "Number of Unique Letters"),
    (ConditionKind::PointValue, "Point Value"),
    (ConditionKind::Probability, "Probability"),
    (ConditionKind::ProbabilityOrder, "Probability Order"),
    (ConditionKind::LimitByProbabilityOrder, "Limit by Probability Order"),
    (ConditionKind::PartOfSpeech, "Part of Speech"),
    (ConditionKind::Definition, "Definition"),
];

impl ConditionKind {
    /// Name used in saved search files and when displaying a condition
    #[must_use]
    pub fn name(self) -> &'static str {
        KIND_NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or("", |(_, name)| name)
    }

    /// Look up a kind by its current name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        KIND_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(kind, _)| *kind)
    }

    /// All kinds in display order
    pub fn all() -> impl Iterator<Item = Self> {
        KIND_NAMES.iter().map(|(kind, _)| *kind)
    }

    /// Payload fields read by this kind
    #[must_use]
    pub const fn payload(self) -> Payload {
        match self {
            Self::Length
            | Self::NumAnagrams
            | Self::NumVowels
            | Self::NumUniqueLetters
            | Self::PointValue => Payload::Range,
            Self::Probability => Payload::Probability,
            Self::ProbabilityOrder | Self::LimitByProbabilityOrder => Payload::Order,
            Self::ConsistOf => Payload::Percentage,
            _ => Payload::Text,
        }
    }

    /// Whether this kind drives trie traversal
    #[must_use]
    pub const fn is_match_kind(self) -> bool {
        matches!(
            self,
            Self::PatternMatch | Self::AnagramMatch | Self::SubanagramMatch
        )
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single search condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCondition {
    pub kind: ConditionKind,
    /// Pattern, letters, set name, lexicon, word list or text
    pub string: String,
    pub min: i32,
    pub max: i32,
    /// Number of blanks assumed by probability conditions
    pub blanks: i32,
    pub negated: bool,
    /// Lax boundaries for probability order conditions
    pub lax: bool,
    /// Set when a saved search was upgraded from an older meaning
    pub legacy: bool,
}

impl SearchCondition {
    /// An empty condition of the given kind
    #[must_use]
    pub fn new(kind: ConditionKind) -> Self {
        Self {
            kind,
            string: String::new(),
            min: 0,
            max: 0,
            blanks: 0,
            negated: false,
            lax: false,
            legacy: false,
        }
    }

    fn text(kind: ConditionKind, s: impl Into<String>) -> Self {
        Self {
            string: s.into(),
            ..Self::new(kind)
        }
    }

    fn range(kind: ConditionKind, min: i32, max: i32) -> Self {
        Self {
            min,
            max,
            ..Self::new(kind)
        }
    }

    #[must_use]
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::text(ConditionKind::PatternMatch, pattern)
    }

    #[must_use]
    pub fn anagram(letters: impl Into<String>) -> Self {
        Self::text(ConditionKind::AnagramMatch, letters)
    }

    #[must_use]
    pub fn subanagram(letters: impl Into<String>) -> Self {
        Self::text(ConditionKind::SubanagramMatch, letters)
    }

    #[must_use]
    pub fn length(min: i32, max: i32) -> Self {
        Self::range(ConditionKind::Length, min, max)
    }

    /// Word takes the given letters as a prefix
    #[must_use]
    pub fn prefix(letters: impl Into<String>) -> Self {
        Self::text(ConditionKind::Prefix, letters)
    }

    /// Word takes the given letters as a suffix
    #[must_use]
    pub fn suffix(letters: impl Into<String>) -> Self {
        Self::text(ConditionKind::Suffix, letters)
    }

    #[must_use]
    pub fn include_letters(letters: impl Into<String>) -> Self {
        Self::text(ConditionKind::IncludeLetters, letters)
    }

    /// Word contains none of the given letters
    #[must_use]
    pub fn exclude_letters(letters: impl Into<String>) -> Self {
        Self::include_letters(letters).negate()
    }

    /// Between `min` and `max` percent of the word's letters are in `letters`
    #[must_use]
    pub fn consist_of(letters: impl Into<String>, min: i32, max: i32) -> Self {
        Self {
            min,
            max,
            ..Self::text(ConditionKind::ConsistOf, letters)
        }
    }

    #[must_use]
    pub fn belong_to_group(set_name: impl Into<String>) -> Self {
        Self::text(ConditionKind::BelongToGroup, set_name)
    }

    #[must_use]
    pub fn in_lexicon(lexicon: impl Into<String>) -> Self {
        Self::text(ConditionKind::InLexicon, lexicon)
    }

    /// Word appears in a whitespace-separated list
    #[must_use]
    pub fn in_word_list(words: impl Into<String>) -> Self {
        Self::text(ConditionKind::InWordList, words)
    }

    #[must_use]
    pub fn num_anagrams(min: i32, max: i32) -> Self {
        Self::range(ConditionKind::NumAnagrams, min, max)
    }

    #[must_use]
    pub fn num_vowels(min: i32, max: i32) -> Self {
        Self::range(ConditionKind::NumVowels, min, max)
    }

    #[must_use]
    pub fn num_unique_letters(min: i32, max: i32) -> Self {
        Self::range(ConditionKind::NumUniqueLetters, min, max)
    }

    #[must_use]
    pub fn point_value(min: i32, max: i32) -> Self {
        Self::range(ConditionKind::PointValue, min, max)
    }

    /// Number of ways to draw the word, with `blanks` blanks in the bag
    #[must_use]
    pub fn probability(min: i32, max: i32, blanks: i32) -> Self {
        Self {
            blanks,
            ..Self::range(ConditionKind::Probability, min, max)
        }
    }

    /// Rank among words of the same length, most probable first
    #[must_use]
    pub fn probability_order(min: i32, max: i32, blanks: i32, lax: bool) -> Self {
        Self {
            blanks,
            lax,
            ..Self::range(ConditionKind::ProbabilityOrder, min, max)
        }
    }

    /// Keep only ranks `min..=max` of the final result, most probable first
    #[must_use]
    pub fn limit_by_probability_order(min: i32, max: i32, blanks: i32, lax: bool) -> Self {
        Self {
            blanks,
            lax,
            ..Self::range(ConditionKind::LimitByProbabilityOrder, min, max)
        }
    }

    #[must_use]
    pub fn part_of_speech(pos: impl Into<String>) -> Self {
        Self::text(ConditionKind::PartOfSpeech, pos)
    }

    /// Word has a definition containing the given text
    #[must_use]
    pub fn definition(text: impl Into<String>) -> Self {
        Self::text(ConditionKind::Definition, text)
    }

    /// Flip the negation flag
    #[must_use]
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Whether this condition drives trie traversal
    ///
    /// Negated match conditions are checked word by word instead.
    #[inline]
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.kind.is_match_kind() && !self.negated
    }
}

fn blank_suffix(blanks: i32) -> &'static str {
    if blanks == 1 { "" } else { "s" }
}

impl fmt::Display for SearchCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "NOT ")?;
        }
        write!(f, "{}: ", self.kind)?;

        match self.kind.payload() {
            Payload::Text if self.kind == ConditionKind::InWordList => write!(f, "..."),
            Payload::Text => write!(f, "{}", self.string),
            Payload::Range => write!(f, "Min {}, Max {}", self.min, self.max),
            Payload::Probability => write!(
                f,
                "Min {}, Max {} ({} blank{})",
                self.min,
                self.max,
                self.blanks,
                blank_suffix(self.blanks)
            ),
            Payload::Order => {
                write!(
                    f,
                    "Min {}, Max {} ({} blank{})",
                    self.min,
                    self.max,
                    self.blanks,
                    blank_suffix(self.blanks)
                )?;
                if self.lax {
                    write!(f, " (Lax)")?;
                }
                Ok(())
            }
            Payload::Percentage => {
                write!(f, "Min {}%, Max {}% {}", self.min, self.max, self.string)
            }
        }
    }
}
