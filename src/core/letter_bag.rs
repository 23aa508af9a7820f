//! Letter bag probability model
//!
//! Counts the ways a word can be drawn from a full bag of tiles, optionally
//! letting blanks stand in for missing letters. Used by the probability,
//! point value and set membership conditions.

use super::letters::MAX_WORD_LEN;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Character used for blank tiles in a distribution string
pub const BLANK_CHAR: char = '_';

/// Standard English tile distribution
pub const DEFAULT_DISTRIBUTION: &str = "A:9 B:2 C:2 D:4 E:12 F:2 G:3 H:2 I:9 J:1 K:1 L:4 M:2 \
     N:6 O:8 P:2 Q:1 R:6 S:4 T:6 U:4 V:2 W:2 X:1 Y:2 Z:1 _:2";

const LETTER_VALUES: [u32; 26] = [
    1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, 1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10,
];

/// Error parsing a letter distribution string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    #[error("malformed distribution entry \"{0}\", expected LETTER:COUNT")]
    MalformedEntry(String),
    #[error("invalid tile '{0}' in distribution")]
    InvalidTile(char),
    #[error("invalid count in distribution entry \"{0}\"")]
    InvalidCount(String),
}

/// A full bag of tiles with precomputed combination tables
#[derive(Debug, Clone)]
pub struct LetterBag {
    frequencies: FxHashMap<char, usize>,
    total: usize,
    /// `full_choose[n]` = C(total, n)
    full_choose: Vec<f64>,
    /// `sub_choose[m][n]` = C(m, n)
    sub_choose: Vec<Vec<f64>>,
}

impl LetterBag {
    /// Build a bag from a distribution string such as `"A:9 B:2 _:2"`
    ///
    /// # Errors
    /// Returns `DistributionError` if an entry is not `LETTER:COUNT`, the
    /// letter is not `A`-`Z` or `_`, or the count is not a number.
    pub fn from_distribution(distribution: &str) -> Result<Self, DistributionError> {
        let mut frequencies = FxHashMap::default();
        for entry in distribution.split_whitespace() {
            let (letter, count) = entry
                .split_once(':')
                .ok_or_else(|| DistributionError::MalformedEntry(entry.to_string()))?;
            let mut letters = letter.chars();
            let tile = match (letters.next(), letters.next()) {
                (Some(c), None) => c.to_ascii_uppercase(),
                _ => return Err(DistributionError::MalformedEntry(entry.to_string())),
            };
            if tile != BLANK_CHAR && !tile.is_ascii_uppercase() {
                return Err(DistributionError::InvalidTile(tile));
            }
            let count: usize = count
                .parse()
                .map_err(|_| DistributionError::InvalidCount(entry.to_string()))?;
            frequencies.insert(tile, count);
        }

        let total = frequencies.values().sum();
        let max_frequency = frequencies.values().copied().max().unwrap_or(0);
        let sub_choose = (0..=max_frequency)
            .map(|m| (0..=m).map(|n| choose(m, n)).collect())
            .collect();
        let full_choose = (0..=MAX_WORD_LEN).map(|n| choose(total, n)).collect();

        Ok(Self {
            frequencies,
            total,
            full_choose,
            sub_choose,
        })
    }

    /// Total number of tiles in the bag
    #[inline]
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Number of tiles of a letter (`_` for blanks)
    #[inline]
    #[must_use]
    pub fn frequency(&self, letter: char) -> usize {
        self.frequencies
            .get(&letter.to_ascii_uppercase())
            .copied()
            .unwrap_or(0)
    }

    /// Point value of a single tile; blanks and non-letters score zero
    #[must_use]
    pub fn letter_value(&self, letter: char) -> u32 {
        let upper = letter.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            LETTER_VALUES[(upper as u8 - b'A') as usize]
        } else {
            0
        }
    }

    /// Sum of the tile values of a word
    #[must_use]
    pub fn point_value(&self, word: &str) -> u32 {
        word.chars().map(|c| self.letter_value(c)).sum()
    }

    /// Distinct ways of drawing `word` from a full bag
    ///
    /// `blanks` is clamped to `0..=2`; with blanks, a blank tile may stand in
    /// for one (or two) of the word's letters.
    #[must_use]
    pub fn num_combinations(&self, word: &str, blanks: i32) -> f64 {
        let blanks = blanks.clamp(0, 2);

        let mut letters: Vec<char> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        for c in word.chars().map(|c| c.to_ascii_uppercase()) {
            if let Some(index) = letters.iter().position(|&l| l == c) {
                counts[index] += 1;
            } else {
                letters.push(c);
                counts.push(1);
            }
        }
        let frequencies: Vec<usize> = letters.iter().map(|&c| self.frequency(c)).collect();
        let product = |counts: &[usize]| -> f64 {
            counts
                .iter()
                .zip(&frequencies)
                .map(|(&count, &freq)| self.sub(freq, count))
                .product()
        };

        let mut total = product(&counts);
        if blanks == 0 {
            return total;
        }

        let blank_freq = self.frequency(BLANK_CHAR);
        for i in 0..letters.len() {
            counts[i] -= 1;
            total += self.sub(blank_freq, 1) * product(&counts);
            counts[i] += 1;
        }
        if blanks == 1 {
            return total;
        }

        for i in 0..letters.len() {
            counts[i] -= 1;
            for j in i..letters.len() {
                if counts[j] == 0 {
                    continue;
                }
                counts[j] -= 1;
                total += self.sub(blank_freq, 2) * product(&counts);
                counts[j] += 1;
            }
            counts[i] += 1;
        }
        total
    }

    /// Probability of drawing `word` in as many tiles as it has letters,
    /// scaled by 1e9
    #[must_use]
    pub fn probability(&self, word: &str, blanks: i32) -> f64 {
        let draws = word.chars().count();
        match self.full_choose.get(draws) {
            Some(&full) if full > 0.0 => 1e9 * self.num_combinations(word, blanks) / full,
            _ => 0.0,
        }
    }

    fn sub(&self, m: usize, n: usize) -> f64 {
        self.sub_choose
            .get(m)
            .and_then(|row| row.get(n))
            .copied()
            .unwrap_or(0.0)
    }
}

impl Default for LetterBag {
    fn default() -> Self {
        Self::from_distribution(DEFAULT_DISTRIBUTION).unwrap_or_else(|_| Self {
            frequencies: FxHashMap::default(),
            total: 0,
            full_choose: vec![0.0; MAX_WORD_LEN + 1],
            sub_choose: Vec::new(),
        })
    }
}

fn choose(m: usize, n: usize) -> f64 {
    if n > m {
        return 0.0;
    }
    let n = n.min(m - n);
    (0..n).fold(1.0, |acc, i| acc * (m - i) as f64 / (i + 1) as f64)
}
