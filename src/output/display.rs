//! Display functions for command results

use super::formatters::{columns, format_odds, hooked_word, thousands};
use crate::commands::{CheckResult, DefineResult, SearchResult, WordInfo};
use crate::engine::WordEngine;
use colored::{ColoredString, Colorize};

const WORDS_PER_ROW: usize = 6;

fn header(title: &str, subject: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        title.bright_cyan().bold(),
        subject.bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());
}

/// Print what was loaded into the engine
pub fn print_load_summary(engine: &WordEngine, stems: usize) {
    let (forward, reverse) = engine.graph().num_nodes();
    println!(
        "📚 {} {} words ({} + {} nodes), {} stems",
        engine.lexicon().bright_cyan().bold(),
        thousands(engine.num_words() as u64).bright_yellow(),
        thousands(forward as u64),
        thousands(reverse as u64),
        thousands(stems as u64)
    );
}

/// Print word check verdicts
pub fn print_check_results(results: &[CheckResult]) {
    for result in results {
        if result.valid {
            println!("{} {}", "✅".green(), result.word.green().bold());
        } else {
            println!("{} {}", "❌".red(), result.word.red().bold());
        }
    }
    let valid = results.iter().filter(|r| r.valid).count();
    println!(
        "\n{} of {} acceptable",
        format!("{valid}").bright_yellow().bold(),
        results.len()
    );
}

/// Letters filled by wildcards, which come back lower-case, are highlighted
fn highlight_marked(word: &str) -> String {
    word.chars()
        .map(|c| -> ColoredString {
            if c.is_ascii_lowercase() {
                c.to_ascii_uppercase().to_string().bright_magenta().bold()
            } else {
                c.to_string().normal()
            }
        })
        .map(|s| s.to_string())
        .collect()
}

/// Print the words found by a search
pub fn print_search_result(result: &SearchResult, marked: bool) {
    header("SEARCH:", &result.spec);

    if result.words.is_empty() {
        println!("\n{}", "No words found".yellow());
    } else {
        println!();
        for row in columns(&result.words, WORDS_PER_ROW) {
            if marked {
                let row: Vec<String> = row.split(' ').map(highlight_marked).collect();
                println!("   {}", row.join(" "));
            } else {
                println!("   {row}");
            }
        }
    }

    println!(
        "\n{} words in {:.1}ms",
        thousands(result.words.len() as u64).bright_yellow().bold(),
        result.duration.as_secs_f64() * 1000.0
    );
}

/// Print a word's definition
pub fn print_definition(result: &DefineResult) {
    header("DEFINE:", &result.word);

    if !result.valid {
        println!("\n{}", format!("{} is not in the lexicon", result.word).red());
        return;
    }
    match &result.definition {
        Some(definition) => {
            println!();
            for line in definition.lines() {
                println!("   {line}");
            }
        }
        None => println!("\n{}", "No definition available".yellow()),
    }
}

/// Print everything known about a word
pub fn print_word_info(info: &WordInfo) {
    header("WORD INFO:", &info.word);

    let verdict = if info.valid {
        "acceptable".green().bold()
    } else {
        "not acceptable".red().bold()
    };
    println!(
        "\n   {}",
        hooked_word(&info.front_hooks, &info.word, &info.back_hooks, 4)
    );
    println!("   Status:        {verdict}");
    println!("   Alphagram:     {}", info.alphagram.bright_yellow());
    println!("   Anagrams:      {}", info.anagrams);
    println!("   Vowels:        {}", info.vowels);
    println!("   Unique:        {}", info.unique_letters);
    println!("   Points:        {}", info.point_value);
    println!("   Probability:   {}", format_odds(info.probability));
    if let Some(order) = info.probability_order {
        println!("   Prob. order:   {}", thousands(order as u64));
    }
    if !info.groups.is_empty() {
        println!("\n📂 {}", "Groups:".bright_cyan().bold());
        for group in &info.groups {
            println!("   {group}");
        }
    }
}
