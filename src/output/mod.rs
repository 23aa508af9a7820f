//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_check_results, print_definition, print_load_summary, print_search_result,
    print_word_info,
};
