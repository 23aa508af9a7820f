//! Formatting utilities for terminal output

/// Group digits in threes: `1234567` becomes `"1,234,567"`
#[must_use]
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Format a probability scaled by 1e9 as odds
#[must_use]
pub fn format_odds(probability: f64) -> String {
    if probability <= 0.0 {
        return "never".to_string();
    }
    let odds = (1e9 / probability).round().max(1.0);
    format!("1 in {}", thousands(odds as u64))
}

/// A word flanked by its hooks, hooks padded so words line up
#[must_use]
pub fn hooked_word(front: &str, word: &str, back: &str, hook_width: usize) -> String {
    format!("{front:>hook_width$} {word} {back}")
        .trim_end()
        .to_string()
}

/// Lay words out in rows of `per_row` columns, each padded to the longest word
#[must_use]
pub fn columns<S: AsRef<str>>(words: &[S], per_row: usize) -> Vec<String> {
    let per_row = per_row.max(1);
    let width = words
        .iter()
        .map(|w| w.as_ref().chars().count())
        .max()
        .unwrap_or(0);
    words
        .chunks(per_row)
        .map(|row| {
            row.iter()
                .map(|w| format!("{:<width$}", w.as_ref()))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn odds_from_scaled_probability() {
        assert_eq!(format_odds(0.0), "never");
        assert_eq!(format_odds(1e9), "1 in 1");
        assert_eq!(format_odds(1e6), "1 in 1,000");
    }

    #[test]
    fn hooked_word_pads_front() {
        assert_eq!(hooked_word("bc", "AT", "es", 3), " bc AT es");
        assert_eq!(hooked_word("", "CAT", "", 2), "   CAT");
    }

    #[test]
    fn columns_pad_to_longest() {
        let rows = columns(&["CAT", "DOGS", "EMU"], 2);
        assert_eq!(rows, vec!["CAT   DOGS", "EMU"]);
        assert!(columns::<&str>(&[], 4).is_empty());
    }
}
