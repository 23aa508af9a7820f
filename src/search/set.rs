//! Named word sets used by Belongs to Group conditions

use std::fmt;

/// A named set of words whose membership is computed, not stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchSet {
    HookWords,
    FrontHooks,
    BackHooks,
    HighFives,
    TypeOneSevens,
    TypeTwoSevens,
    TypeThreeSevens,
    TypeOneEights,
    TypeTwoEights,
    TypeThreeEights,
    EightsFromSevenLetterStems,
}

const SET_NAMES: [(SearchSet, &str); 11] = [
    (SearchSet::HookWords, "Hook Words"),
    (SearchSet::FrontHooks, "Front Hooks"),
    (SearchSet::BackHooks, "Back Hooks"),
    (SearchSet::HighFives, "High Fives"),
    (SearchSet::TypeOneSevens, "Type I Sevens"),
    (SearchSet::TypeTwoSevens, "Type II Sevens"),
    (SearchSet::TypeThreeSevens, "Type III Sevens"),
    (SearchSet::TypeOneEights, "Type I Eights"),
    (SearchSet::TypeTwoEights, "Type II Eights"),
    (SearchSet::TypeThreeEights, "Type III Eights"),
    (
        SearchSet::EightsFromSevenLetterStems,
        "Eights From Seven-Letter Stems",
    ),
];

/// Retired set names rewritten to In Lexicon conditions on load
pub(crate) const OLD_NEW_IN_OWL2: &str = "New in OWL2";
pub(crate) const OLD_NEW_IN_CSW: &str = "New in CSW";

impl SearchSet {
    /// Display name of the set
    #[must_use]
    pub fn name(self) -> &'static str {
        SET_NAMES
            .iter()
            .find(|(set, _)| *set == self)
            .map_or("", |(_, name)| name)
    }

    /// Look up a set by name; unknown names give `None`
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        SET_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(set, _)| *set)
    }

    /// All sets in display order
    pub fn all() -> impl Iterator<Item = Self> {
        SET_NAMES.iter().map(|(set, _)| *set)
    }

    /// Word length every member of the set has, if fixed
    #[must_use]
    pub const fn implied_length(self) -> Option<usize> {
        match self {
            Self::HighFives => Some(5),
            Self::TypeOneSevens | Self::TypeTwoSevens | Self::TypeThreeSevens => Some(7),
            Self::TypeOneEights
            | Self::TypeTwoEights
            | Self::TypeThreeEights
            | Self::EightsFromSevenLetterStems => Some(8),
            Self::HookWords | Self::FrontHooks | Self::BackHooks => None,
        }
    }
}

impl fmt::Display for SearchSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
