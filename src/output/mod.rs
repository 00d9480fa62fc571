//! Output formatting module
//!
//! Provides console rendering of outcomes and alert decisions plus JSON and
//! newline-delimited JSON serialization.

pub mod json;
pub mod terminal;

pub use json::{print_json, write_ndjson_line};
pub use terminal::{
    print_decision, print_outcome, print_summary, render_decision, render_outcome, CertStatus,
};
