//! Lexicon Search - CLI
//!
//! Load a word list and search it by pattern, anagram, subanagram and a range
//! of word properties, or check and look up individual words.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use lexicon_search::{
    commands::{
        SearchOptions, all_valid, build_spec, check_words, define_word, load_spec, run_search,
        save_spec, word_info,
    },
    core::{DEFAULT_DISTRIBUTION, DEFAULT_LEXICON, EngineConfig},
    engine::WordEngine,
    output::{
        print_check_results, print_definition, print_load_summary, print_search_result,
        print_word_info,
    },
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lexicon_search",
    about = "Word search over a lexicon: patterns, anagrams, subanagrams and word properties",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Word list file: one word per line, optional definition after the word
    #[arg(short = 'w', long, global = true)]
    wordlist: Option<PathBuf>,

    /// Stem list files used by the Type I set tests (repeatable)
    #[arg(long, global = true)]
    stems: Vec<PathBuf>,

    /// Name of the lexicon, matched by In Lexicon conditions
    #[arg(long, global = true, default_value = DEFAULT_LEXICON)]
    lexicon: String,

    /// Letter distribution, e.g. "A:9 B:2 ... _:2"
    #[arg(long, global = true, default_value = DEFAULT_DISTRIBUTION)]
    distribution: String,

    /// Show debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether words are in the lexicon
    Check {
        /// Words to check
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Search the lexicon
    Search {
        /// Pattern: letters, ? for any letter, [ABC] or [^ABC] classes, * for any run
        #[arg(short, long)]
        pattern: Option<String>,

        /// Letters to anagram (? for a blank, * for any extra letters)
        #[arg(short, long)]
        anagram: Option<String>,

        /// Letters to build subanagrams from
        #[arg(short = 'b', long)]
        subanagram: Option<String>,

        /// Word length: N or MIN-MAX
        #[arg(short, long)]
        length: Option<String>,

        /// Letters the word must include
        #[arg(short, long)]
        include: Option<String>,

        /// Letters the word must not include
        #[arg(short = 'x', long)]
        exclude: Option<String>,

        /// Letters the word must take as a front hook
        #[arg(long)]
        prefix: Option<String>,

        /// Letters the word must take as a back hook
        #[arg(long)]
        suffix: Option<String>,

        /// Named group, e.g. "Type I Sevens" or "Hook Words"
        #[arg(short, long)]
        group: Option<String>,

        /// Match any condition instead of all of them
        #[arg(long)]
        any: bool,

        /// Load the search from a saved search file instead
        #[arg(long, conflicts_with_all = ["pattern", "anagram", "subanagram", "length", "include", "exclude", "prefix", "suffix", "group", "any"])]
        spec: Option<PathBuf>,

        /// Save the search to a file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Highlight letters filled by wildcards
        #[arg(short, long)]
        marked: bool,
    },

    /// Show a word's definition
    Define {
        /// Word to define
        word: String,
    },

    /// Show hooks, anagrams, probability and groups of a word
    Info {
        /// Word to describe
        word: String,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Build the engine from the global options
fn load_engine(cli: &Cli) -> Result<WordEngine> {
    let config =
        EngineConfig::new(cli.lexicon.clone()).with_distribution(cli.distribution.clone());
    let mut engine = WordEngine::new(config).context("invalid letter distribution")?;

    let wordlist = cli
        .wordlist
        .as_deref()
        .context("no word list given, use --wordlist <FILE>")?;
    let spinner = spinner(&format!("Loading {}", wordlist.display()));
    let imported = engine.import_text_file(wordlist, true);
    spinner.finish_and_clear();
    imported?;

    let mut stems = 0;
    for path in &cli.stems {
        stems += engine.import_stems_file(path)?;
    }

    print_load_summary(&engine, stems);
    Ok(engine)
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let engine = load_engine(&cli)?;

    match cli.command {
        Commands::Check { words } => return Ok(run_check_command(&engine, &words)),
        Commands::Search {
            pattern,
            anagram,
            subanagram,
            length,
            include,
            exclude,
            prefix,
            suffix,
            group,
            any,
            spec,
            save,
            marked,
        } => {
            let options = SearchOptions {
                pattern,
                anagram,
                subanagram,
                length,
                include,
                exclude,
                prefix,
                suffix,
                group,
                any,
            };
            run_search_command(
                &engine,
                &options,
                spec.as_deref(),
                save.as_deref(),
                marked,
            )?;
        }
        Commands::Define { word } => print_definition(&define_word(&engine, &word)),
        Commands::Info { word } => print_word_info(&word_info(&engine, &word)),
    }
    Ok(ExitCode::SUCCESS)
}

/// Fails the process when any word is not acceptable
fn run_check_command(engine: &WordEngine, words: &[String]) -> ExitCode {
    let results = check_words(engine, words);
    print_check_results(&results);
    if all_valid(&results) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_search_command(
    engine: &WordEngine,
    options: &SearchOptions,
    spec_file: Option<&Path>,
    save: Option<&Path>,
    marked: bool,
) -> Result<()> {
    let spec = match spec_file {
        Some(path) => load_spec(path)?,
        None => build_spec(options)?,
    };
    if let Some(path) = save {
        save_spec(&spec, path)?;
        println!("💾 Saved search to {}", path.display());
    }

    let result = run_search(engine, &spec, marked);
    print_search_result(&result, marked);
    Ok(())
}
