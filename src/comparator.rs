// src/comparator.rs

use crate::heuristics::QuoteRecord;
use crate::scoring::{Rubric, ScoreResult, score_quote};
use serde::Serialize;
use std::fmt;
use time::Date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    First,
    Second,
    Tie,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Winner::First => "first quote",
            Winner::Second => "second quote",
            Winner::Tie => "tie — manual review required",
        })
    }
}

/// Both scores side by side plus the recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub first: ScoreResult,
    pub second: ScoreResult,
    pub winner: Winner,
}

/// Score two quotes independently and rank them. Advisory only: this never
/// fails, even when both records are empty.
pub fn compare_quotes(
    first: &QuoteRecord,
    second: &QuoteRecord,
    rubric: &Rubric,
    today: Date,
) -> Comparison {
    let first = score_quote(first, rubric, today);
    let second = score_quote(second, rubric, today);

    let winner = if first.score > second.score {
        Winner::First
    } else if second.score > first.score {
        Winner::Second
    } else {
        Winner::Tie
    };

    Comparison {
        first,
        second,
        winner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::extract_quote;
    use time::macros::date;

    const TODAY: Date = date!(2025 - 05 - 01);

    fn quote(price: &str, terms: &str) -> QuoteRecord {
        extract_quote(&format!(
            "Grand Total: {price}\nPayment Terms: {terms}\nDelivery: 12 days\nWarranty: 1 year"
        ))
    }

    #[test]
    fn test_lower_price_wins() {
        let cheap = quote("$9,500.00", "50% deposit");
        let dear = quote("$14,000.00", "50% deposit");
        let result = compare_quotes(&cheap, &dear, &Rubric::default(), TODAY);
        assert_eq!(result.winner, Winner::First);
        assert!(result.first.score > result.second.score);
    }

    #[test]
    fn test_swapping_inputs_swaps_slots() {
        let a = quote("$9,500.00", "100% upfront");
        let b = quote("$11,000.00", "60% deposit");
        let rubric = Rubric::default();

        let ab = compare_quotes(&a, &b, &rubric, TODAY);
        let ba = compare_quotes(&b, &a, &rubric, TODAY);

        assert_eq!(ab.first, ba.second);
        assert_eq!(ab.second, ba.first);
        match ab.winner {
            Winner::First => assert_eq!(ba.winner, Winner::Second),
            Winner::Second => assert_eq!(ba.winner, Winner::First),
            Winner::Tie => assert_eq!(ba.winner, Winner::Tie),
        }
    }

    #[test]
    fn test_empty_records_tie() {
        let empty = QuoteRecord::default();
        let result = compare_quotes(&empty, &empty, &Rubric::default(), TODAY);
        assert_eq!(result.winner, Winner::Tie);
        assert_eq!(result.first.flags.len(), 4);
        assert_eq!(result.winner.to_string(), "tie — manual review required");
    }
}
