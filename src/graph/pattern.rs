//! Pattern and rack token model
//!
//! A pattern is read left to right: letters match themselves, `?` matches
//! any letter, `[ABC]` / `[^ABC]` match a letter in / not in the set, and `*`
//! matches any run of letters including none. A rack is the same alphabet
//! read as a multiset for anagram searches.
//!
//! Malformed strings (unterminated or empty classes, stray characters) do not
//! parse; callers treat them as matching nothing.

use std::fmt;

/// Set of letters matched by a bracketed class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LetterClass {
    mask: u32,
}

impl LetterClass {
    fn from_letters(letters: &[char], negated: bool) -> Option<Self> {
        let mut mask = 0u32;
        for &c in letters {
            mask |= letter_bit(c)?;
        }
        if mask == 0 {
            return None;
        }
        if negated {
            mask = !mask & ALL_LETTERS;
        }
        Some(Self { mask })
    }

    /// Determine whether a letter belongs to the class
    #[inline]
    #[must_use]
    pub fn accepts(self, c: char) -> bool {
        letter_bit(c).is_some_and(|bit| self.mask & bit != 0)
    }
}

const ALL_LETTERS: u32 = (1 << 26) - 1;

#[inline]
fn letter_bit(c: char) -> Option<u32> {
    let upper = c.to_ascii_uppercase();
    upper
        .is_ascii_uppercase()
        .then(|| 1 << (upper as u8 - b'A'))
}

/// One element of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Letter(char),
    Any,
    Class(LetterClass),
    Star,
}

impl Token {
    /// Determine whether a single-letter token accepts a letter
    ///
    /// `Star` accepts every letter.
    #[inline]
    #[must_use]
    pub fn accepts(self, c: char) -> bool {
        match self {
            Self::Letter(l) => l == c.to_ascii_uppercase(),
            Self::Any | Self::Star => c.is_ascii_alphabetic(),
            Self::Class(class) => class.accepts(c),
        }
    }
}

fn tokenize(s: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        let token = match c {
            '?' | '.' => Token::Any,
            '*' => {
                if tokens.last() == Some(&Token::Star) {
                    continue;
                }
                Token::Star
            }
            '[' => {
                let mut members = Vec::new();
                let mut closed = false;
                for m in chars.by_ref() {
                    if m == ']' {
                        closed = true;
                        break;
                    }
                    if !m.is_whitespace() {
                        members.push(m);
                    }
                }
                if !closed {
                    return None;
                }
                let negated = members.first() == Some(&'^');
                let letters = if negated { &members[1..] } else { &members[..] };
                Token::Class(LetterClass::from_letters(letters, negated)?)
            }
            c if c.is_ascii_alphabetic() => Token::Letter(c.to_ascii_uppercase()),
            c if c.is_whitespace() => continue,
            _ => return None,
        };
        tokens.push(token);
    }
    Some(tokens)
}

/// A parsed positional pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    tokens: Vec<Token>,
}

impl Pattern {
    /// Parse a pattern string
    ///
    /// Returns `None` for malformed input.
    ///
    /// # Examples
    /// ```
    /// use lexicon_search::graph::Pattern;
    ///
    /// let pattern = Pattern::parse("?AT").unwrap();
    /// assert!(pattern.matches("CAT"));
    /// assert!(!pattern.matches("CATS"));
    /// assert!(Pattern::parse("[AB").is_none());
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        tokenize(s).map(|tokens| Self { tokens })
    }

    /// Tokens in pattern order
    #[inline]
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The pattern read right to left
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            tokens: self.tokens.iter().rev().copied().collect(),
        }
    }

    /// Whether the pattern is anchored only at its end (`*ING`)
    ///
    /// Such patterns are cheaper to walk over the reverse trie.
    #[must_use]
    pub fn is_suffix_anchored(&self) -> bool {
        self.tokens.first() == Some(&Token::Star) && self.tokens.last() != Some(&Token::Star)
    }

    /// Whether every token from `pos` on is a star
    #[inline]
    #[must_use]
    pub fn exhausted_at(&self, pos: usize) -> bool {
        self.tokens
            .get(pos..)
            .is_none_or(|rest| rest.iter().all(|&t| t == Token::Star))
    }

    /// Match a whole word against the pattern
    #[must_use]
    pub fn matches(&self, word: &str) -> bool {
        let letters: Vec<char> = word.chars().collect();
        let tokens = &self.tokens;
        let (mut t, mut w) = (0, 0);
        let mut backtrack: Option<(usize, usize)> = None;

        while w < letters.len() {
            match tokens.get(t) {
                Some(Token::Star) => {
                    backtrack = Some((t, w));
                    t += 1;
                }
                Some(&token) if token.accepts(letters[w]) => {
                    t += 1;
                    w += 1;
                }
                _ => match backtrack {
                    Some((star, consumed)) => {
                        t = star + 1;
                        w = consumed + 1;
                        backtrack = Some((star, consumed + 1));
                    }
                    None => return false,
                },
            }
        }
        self.exhausted_at(t)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            match token {
                Token::Letter(c) => write!(f, "{c}")?,
                Token::Any => write!(f, "?")?,
                Token::Star => write!(f, "*")?,
                Token::Class(class) => {
                    write!(f, "[")?;
                    for c in 'A'..='Z' {
                        if class.accepts(c) {
                            write!(f, "{c}")?;
                        }
                    }
                    write!(f, "]")?;
                }
            }
        }
        Ok(())
    }
}

/// A multiset of letters, blanks and class slots for anagram searches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rack {
    pub(crate) letters: [u8; 26],
    pub(crate) blanks: u8,
    pub(crate) classes: Vec<LetterClass>,
    pub(crate) star: bool,
}

impl Rack {
    /// Parse an anagram string
    ///
    /// Returns `None` for malformed input. Counts saturate, which is harmless
    /// since no word is longer than `MAX_WORD_LEN`.
    ///
    /// # Examples
    /// ```
    /// use lexicon_search::graph::Rack;
    ///
    /// let rack = Rack::parse("AEIPRS").unwrap();
    /// assert!(rack.matches("PRAISE", false));
    /// assert!(rack.matches("RISE", true));
    /// assert!(!rack.matches("RISE", false));
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let mut rack = Self {
            letters: [0; 26],
            blanks: 0,
            classes: Vec::new(),
            star: false,
        };
        for token in tokenize(s)? {
            match token {
                Token::Letter(c) => {
                    let count = &mut rack.letters[(c as u8 - b'A') as usize];
                    *count = count.saturating_add(1);
                }
                Token::Any => rack.blanks = rack.blanks.saturating_add(1),
                Token::Class(class) => rack.classes.push(class),
                Token::Star => rack.star = true,
            }
        }
        Some(rack)
    }

    /// Number of letter slots, ignoring the star
    #[must_use]
    pub fn num_slots(&self) -> usize {
        self.letters.iter().map(|&n| usize::from(n)).sum::<usize>()
            + usize::from(self.blanks)
            + self.classes.len()
    }

    /// Whether the rack carries a `*`
    #[inline]
    #[must_use]
    pub const fn has_star(&self) -> bool {
        self.star
    }

    /// Determine whether a word can be spelled from the rack
    ///
    /// An anagram must use every slot; a subanagram may leave slots unused.
    /// Either way the star absorbs any extra letters.
    #[must_use]
    pub fn matches(&self, word: &str, subanagram: bool) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut letters = self.letters;
        let mut leftover: Vec<char> = Vec::new();
        for c in word.chars() {
            let Some(bit) = letter_bit(c) else {
                return false;
            };
            let index = bit.trailing_zeros() as usize;
            if letters[index] > 0 {
                letters[index] -= 1;
            } else {
                leftover.push(c.to_ascii_uppercase());
            }
        }

        let literals_left = letters.iter().any(|&n| n > 0);
        if literals_left && !subanagram {
            return false;
        }
        let mut used = vec![false; self.classes.len()];
        self.assign(&leftover, 0, &mut used, self.blanks, subanagram)
    }

    fn assign(
        &self,
        leftover: &[char],
        next: usize,
        used: &mut [bool],
        blanks: u8,
        subanagram: bool,
    ) -> bool {
        let Some(&c) = leftover.get(next) else {
            return subanagram || (blanks == 0 && used.iter().all(|&u| u));
        };
        for i in 0..self.classes.len() {
            if !used[i] && self.classes[i].accepts(c) {
                used[i] = true;
                let found = self.assign(leftover, next + 1, used, blanks, subanagram);
                used[i] = false;
                if found {
                    return true;
                }
            }
        }
        if blanks > 0 && self.assign(leftover, next + 1, used, blanks - 1, subanagram) {
            return true;
        }
        self.star && self.assign(leftover, next + 1, used, blanks, subanagram)
    }
}
