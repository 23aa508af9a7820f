//! Search command
//!
//! Builds a search spec from command-line options, or loads a saved one, and
//! runs it against the engine.

use crate::engine::WordEngine;
use crate::search::{SearchCondition, SearchSpec};
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

/// Search options as given on the command line
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub pattern: Option<String>,
    pub anagram: Option<String>,
    pub subanagram: Option<String>,
    /// `N` or `MIN-MAX`
    pub length: Option<String>,
    pub include: Option<String>,
    pub exclude: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub group: Option<String>,
    /// Join the conditions with OR instead of AND
    pub any: bool,
}

/// Result of running a search
pub struct SearchResult {
    pub spec: String,
    pub words: Vec<String>,
    pub duration: Duration,
}

/// Build a spec from command-line options
///
/// # Errors
///
/// Returns an error if a length is malformed or no condition was given.
pub fn build_spec(options: &SearchOptions) -> Result<SearchSpec> {
    let mut conditions = Vec::new();
    if let Some(pattern) = &options.pattern {
        conditions.push(SearchCondition::pattern(pattern.as_str()));
    }
    if let Some(letters) = &options.anagram {
        conditions.push(SearchCondition::anagram(letters.as_str()));
    }
    if let Some(letters) = &options.subanagram {
        conditions.push(SearchCondition::subanagram(letters.as_str()));
    }
    if let Some(letters) = &options.include {
        conditions.push(SearchCondition::include_letters(letters.as_str()));
    }
    if let Some(letters) = &options.exclude {
        conditions.push(SearchCondition::exclude_letters(letters.as_str()));
    }
    if let Some(letters) = &options.prefix {
        conditions.push(SearchCondition::prefix(letters.as_str()));
    }
    if let Some(letters) = &options.suffix {
        conditions.push(SearchCondition::suffix(letters.as_str()));
    }
    if let Some(group) = &options.group {
        conditions.push(SearchCondition::belong_to_group(group.as_str()));
    }
    if let Some(length) = &options.length {
        let (min, max) = parse_length(length)?;
        conditions.push(SearchCondition::length(min, max));
    }

    if conditions.is_empty() {
        bail!("no search conditions given");
    }
    Ok(if options.any {
        SearchSpec::any_of(conditions)
    } else {
        SearchSpec::all_of(conditions)
    })
}

/// Parse `N` or `MIN-MAX`
fn parse_length(length: &str) -> Result<(i32, i32)> {
    let parse = |s: &str| {
        s.trim()
            .parse::<i32>()
            .with_context(|| format!("invalid length '{length}'"))
    };
    match length.split_once('-') {
        Some((min, max)) => Ok((parse(min)?, parse(max)?)),
        None => {
            let n = parse(length)?;
            Ok((n, n))
        }
    }
}

/// Load a saved search spec
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid saved search.
pub fn load_spec<P: AsRef<Path>>(path: P) -> Result<SearchSpec> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path)
        .with_context(|| format!("failed to read search file '{}'", path.display()))?;
    SearchSpec::from_xml(&xml)
        .with_context(|| format!("failed to parse search file '{}'", path.display()))
}

/// Save a search spec
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_spec<P: AsRef<Path>>(spec: &SearchSpec, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, spec.to_xml())
        .with_context(|| format!("failed to write search file '{}'", path.display()))
}

/// Run a spec, optionally keeping wildcard-filled letters lower-case
#[must_use]
pub fn run_search(engine: &WordEngine, spec: &SearchSpec, marked: bool) -> SearchResult {
    let start = Instant::now();
    let words = if marked {
        engine.search_marked(spec)
    } else {
        engine.search(spec)
    };
    SearchResult {
        spec: spec.to_string(),
        words,
        duration: start.elapsed(),
    }
}
