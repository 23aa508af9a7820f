//! Word list parsing and loading
//!
//! A word list is plain text with one word per line. Anything after the first
//! whitespace on a line is the word's definition. Blank lines and lines
//! starting with `#` are skipped.

use std::fs;
use std::io;
use std::path::Path;

/// One line of a word list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    /// Upper-case spelling
    pub word: String,
    /// Definition text with whitespace runs collapsed, possibly empty
    pub definition: String,
}

/// Parse one line of a word list
///
/// Returns `None` for blank and comment lines.
///
/// # Examples
/// ```
/// use lexicon_search::wordlists::loader::parse_line;
///
/// let entry = parse_line("cat   a feline [n -S]").unwrap();
/// assert_eq!(entry.word, "CAT");
/// assert_eq!(entry.definition, "a feline [n -S]");
/// assert!(parse_line("# comment").is_none());
/// ```
#[must_use]
pub fn parse_line(line: &str) -> Option<WordEntry> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let mut tokens = line.split_whitespace();
    let word = tokens.next()?.to_uppercase();
    let definition = tokens.collect::<Vec<_>>().join(" ");
    Some(WordEntry { word, definition })
}

/// Entries of a word list, in file order
pub fn entries(text: &str) -> impl Iterator<Item = WordEntry> + '_ {
    text.lines().filter_map(parse_line)
}

/// Load the entries of a word list file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened or read.
///
/// # Examples
/// ```no_run
/// use lexicon_search::wordlists::loader::load_from_file;
///
/// let entries = load_from_file("words.txt").unwrap();
/// println!("Loaded {} words", entries.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<WordEntry>> {
    let content = fs::read_to_string(path)?;
    Ok(entries(&content).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_line_splits_word_and_definition() {
        let entry = parse_line("  Praise\tto express approval [v -D, -ING, -S]  ").unwrap();
        assert_eq!(entry.word, "PRAISE");
        assert_eq!(entry.definition, "to express approval [v -D, -ING, -S]");
    }

    #[test]
    fn parse_line_without_definition() {
        let entry = parse_line("dog").unwrap();
        assert_eq!(entry.word, "DOG");
        assert!(entry.definition.is_empty());
    }

    #[test]
    fn parse_line_skips_blank_and_comments() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("#CAT").is_none());
        assert!(parse_line("  # indented comment").is_none());
    }

    #[test]
    fn entries_keep_file_order() {
        let words: Vec<String> = entries("cat\n\n# skip\ndog a canine\n")
            .map(|e| e.word)
            .collect();
        assert_eq!(words, vec!["CAT", "DOG"]);
    }

    #[test]
    fn load_from_file_reads_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cat a feline [n]").unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file, "dog").unwrap();

        let loaded = load_from_file(file.path()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].definition, "a feline [n]");
    }

    #[test]
    fn load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from_file(dir.path().join("missing.txt")).is_err());
    }
}
