//! Supplier quote extraction, scoring and comparison.
//!
//! Text goes through [`heuristics::extract_quote`] into a [`QuoteRecord`],
//! [`scoring::score_quote`] reduces that to a score plus red flags, and
//! [`comparator::compare_quotes`] ranks two of them.

pub mod comparator;
pub mod config;
pub mod error;
pub mod heuristics;
pub mod pdf_extract;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod sentiment;

pub use comparator::{Comparison, Winner, compare_quotes};
pub use heuristics::{QuoteRecord, extract_quote, normalize_amount};
pub use scoring::{RedFlag, Rubric, ScoreResult, score_quote};
