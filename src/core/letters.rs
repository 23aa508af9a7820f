//! Letter-level helpers
//!
//! Words are stored upper-case. Search strings use `?` for a single blank,
//! `*` for any run of letters and `[...]` / `[^...]` for character classes.

/// Longest word the engine stores or searches for
pub const MAX_WORD_LEN: usize = 15;

/// Determine whether a letter is a vowel. `Y` is not a vowel.
#[inline]
#[must_use]
pub const fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_uppercase(), 'A' | 'E' | 'I' | 'O' | 'U')
}

/// Letters of a word sorted ascending
///
/// # Examples
/// ```
/// use lexicon_search::core::alphagram;
///
/// assert_eq!(alphagram("PRAISE"), "AEIPRS");
/// ```
#[must_use]
pub fn alphagram(word: &str) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    chars.sort_unstable();
    chars.into_iter().collect()
}

/// Number of vowels in a word
#[inline]
#[must_use]
pub fn num_vowels(word: &str) -> usize {
    word.chars().filter(|&c| is_vowel(c)).count()
}

/// Number of distinct letters in a word
#[must_use]
pub fn num_unique_letters(word: &str) -> usize {
    let mut seen: Vec<char> = Vec::with_capacity(word.len());
    for c in word.chars() {
        if !seen.contains(&c) {
            seen.push(c);
        }
    }
    seen.len()
}

/// Reverse a word or a search pattern
///
/// A bracketed character class is kept as one unit, so `[AB]CD` reverses to
/// `DC[AB]`. An unterminated class is reversed as ordinary characters.
///
/// # Examples
/// ```
/// use lexicon_search::core::reverse_pattern;
///
/// assert_eq!(reverse_pattern("*ING"), "GNI*");
/// assert_eq!(reverse_pattern("[^AE]?S"), "S?[^AE]");
/// ```
#[must_use]
pub fn reverse_pattern(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut units: Vec<&[char]> = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '[' {
            if let Some(offset) = chars[i..].iter().position(|&c| c == ']') {
                units.push(&chars[i..=i + offset]);
                i += offset + 1;
                continue;
            }
        }
        units.push(&chars[i..=i]);
        i += 1;
    }
    units.iter().rev().flat_map(|unit| unit.iter()).collect()
}

/// Normalize a pattern, anagram or letter-list string
///
/// Letters are upper-cased, `.` becomes `?`, whitespace is dropped, runs of
/// `*` collapse to one, and the letters inside each character class are
/// sorted and deduplicated (a leading `^` is kept). Applying it twice gives
/// the same string.
///
/// # Examples
/// ```
/// use lexicon_search::core::canonical_search_string;
///
/// assert_eq!(canonical_search_string("c.t**s"), "C?T*S");
/// assert_eq!(canonical_search_string("[^cba]x"), "[^ABC]X");
/// ```
#[must_use]
pub fn canonical_search_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut class: Option<Vec<char>> = None;

    for c in s.chars().filter(|c| !c.is_whitespace()) {
        if let Some(members) = class.as_mut() {
            if c == ']' {
                push_class(&mut out, members);
                class = None;
            } else {
                members.push(c.to_ascii_uppercase());
            }
            continue;
        }
        match c {
            '[' => class = Some(Vec::new()),
            '*' if out.ends_with('*') => {}
            '.' => out.push('?'),
            _ => out.push(c.to_ascii_uppercase()),
        }
    }

    // Unterminated class: keep it verbatim so the matcher rejects it
    if let Some(members) = class {
        out.push('[');
        out.extend(members);
    }
    out
}

fn push_class(out: &mut String, members: &[char]) {
    let negated = members.first() == Some(&'^');
    let mut letters: Vec<char> = members
        .iter()
        .copied()
        .skip(usize::from(negated))
        .collect();
    letters.sort_unstable();
    letters.dedup();

    out.push('[');
    if negated {
        out.push('^');
    }
    out.extend(letters);
    out.push(']');
}

/// Number of letter slots in a search string, counting each class as one
///
/// `*` is not counted.
#[must_use]
pub fn slot_count(s: &str) -> usize {
    let mut count = 0;
    let mut in_class = false;
    for c in s.chars() {
        match c {
            '[' => in_class = true,
            ']' => {
                in_class = false;
                count += 1;
            }
            '*' => {}
            _ if !in_class => count += 1,
            _ => {}
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vowels_exclude_y() {
        assert!(is_vowel('A'));
        assert!(is_vowel('u'));
        assert!(!is_vowel('Y'));
        assert!(!is_vowel('B'));
    }

    #[test]
    fn alphagram_sorts_letters() {
        assert_eq!(alphagram("PARIES"), "AEIPRS");
        assert_eq!(alphagram(""), "");
    }

    #[test]
    fn counts_vowels_and_unique_letters() {
        assert_eq!(num_vowels("QUEUE"), 4);
        assert_eq!(num_unique_letters("QUEUE"), 3);
        assert_eq!(num_unique_letters(""), 0);
    }

    #[test]
    fn reverse_plain_word() {
        assert_eq!(reverse_pattern("CATS"), "STAC");
        assert_eq!(reverse_pattern(""), "");
    }

    #[test]
    fn reverse_keeps_classes_atomic() {
        assert_eq!(reverse_pattern("*[AEIOU]NG"), "GN[AEIOU]*");
        assert_eq!(reverse_pattern("[^XY]"), "[^XY]");
    }

    #[test]
    fn reverse_unterminated_class_is_plain() {
        assert_eq!(reverse_pattern("A[B"), "B[A");
    }

    #[test]
    fn canonical_collapses_stars() {
        assert_eq!(canonical_search_string("***a*"), "*A*");
    }

    #[test]
    fn canonical_is_idempotent() {
        let once = canonical_search_string("[zza] .q* *");
        assert_eq!(once, "[AZ]?Q*");
        assert_eq!(canonical_search_string(&once), once);
    }

    #[test]
    fn slot_count_treats_class_as_one() {
        assert_eq!(slot_count("[AB]?C"), 3);
        assert_eq!(slot_count("A*B"), 2);
        assert_eq!(slot_count("[^QZ]"), 1);
    }
}
