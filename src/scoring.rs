// src/scoring.rs

use crate::heuristics::{QuoteRecord, Validity, WarrantyUnit};
use serde::{Serialize, Serializer};
use std::fmt;
use time::Date;

/// Weights and thresholds of the quote rubric.
///
/// Lower price, faster delivery, smaller deposits, longer warranty and cheaper
/// shipping all raise the score.
#[derive(Debug, Clone, PartialEq)]
pub struct Rubric {
    /// Price at which the price term is zero.
    pub price_baseline: f64,
    /// Currency units per score point.
    pub price_step: f64,
    pub delivery_baseline_days: f64,
    pub delivery_step_days: f64,
    /// Bonus when the terms mention a 60% split.
    pub terms_60_bonus: f64,
    /// Bonus when the terms mention a 50% split.
    pub terms_50_bonus: f64,
    pub warranty_points_per_year: f64,
    pub warranty_months_per_point: f64,
    pub shipping_baseline: f64,
    pub shipping_step: f64,
    /// Shipping above this is flagged.
    pub high_shipping_threshold: f64,
    /// Quotes expiring in fewer days than this are flagged.
    pub expiry_warning_days: i64,
}

impl Default for Rubric {
    fn default() -> Self {
        Self {
            price_baseline: 20_000.0,
            price_step: 1_000.0,
            delivery_baseline_days: 30.0,
            delivery_step_days: 5.0,
            terms_60_bonus: 2.0,
            terms_50_bonus: 1.0,
            warranty_points_per_year: 2.0,
            warranty_months_per_point: 6.0,
            shipping_baseline: 1_000.0,
            shipping_step: 200.0,
            high_shipping_threshold: 400.0,
            expiry_warning_days: 7,
        }
    }
}

/// A risk or missing-data condition found while scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum RedFlag {
    MissingPrice,
    MissingDelivery,
    UpfrontPayment,
    MissingPaymentTerms,
    MissingWarranty,
    HighShipping(f64),
    Expired,
    ExpiresSoon { within_days: i64 },
    InvalidValidityDate,
}

impl fmt::Display for RedFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedFlag::MissingPrice => f.write_str("Missing total price (critical information)"),
            RedFlag::MissingDelivery => {
                f.write_str("Missing delivery time (uncertain fulfillment)")
            }
            RedFlag::UpfrontPayment => f.write_str("Upfront payment required (less flexible)"),
            RedFlag::MissingPaymentTerms => {
                f.write_str("Missing payment terms (uncertain financial terms)")
            }
            RedFlag::MissingWarranty => {
                f.write_str("Missing warranty (potential risk if defective)")
            }
            // `{:?}` keeps a trailing ".0" on whole amounts
            RedFlag::HighShipping(cost) => write!(f, "High shipping cost (${cost:?})"),
            RedFlag::Expired => f.write_str("Quote expired"),
            RedFlag::ExpiresSoon { within_days } => {
                write!(f, "Quote expires soon (within {within_days} days)")
            }
            RedFlag::InvalidValidityDate => f.write_str("Invalid validity date format"),
        }
    }
}

impl Serialize for RedFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: f64,
    pub flags: Vec<RedFlag>,
}

/// Score a record against the rubric. `today` is only used for the validity
/// checks.
pub fn score_quote(record: &QuoteRecord, rubric: &Rubric, today: Date) -> ScoreResult {
    let mut score = 0.0;
    let mut flags = Vec::new();

    match record.total_price {
        Some(price) => score += (rubric.price_baseline - price) / rubric.price_step,
        None => flags.push(RedFlag::MissingPrice),
    }

    match record.delivery_days {
        Some(days) => {
            score += (rubric.delivery_baseline_days - f64::from(days)) / rubric.delivery_step_days
        }
        None => flags.push(RedFlag::MissingDelivery),
    }

    match record.payment_terms.as_deref() {
        Some(terms) => {
            if terms.contains("60%") {
                score += rubric.terms_60_bonus;
            } else if terms.contains("50%") {
                score += rubric.terms_50_bonus;
            } else if terms.contains("100%") || terms.to_lowercase().contains("upfront") {
                flags.push(RedFlag::UpfrontPayment);
            }
        }
        None => flags.push(RedFlag::MissingPaymentTerms),
    }

    match record.warranty_period {
        Some(w) => {
            let amount = f64::from(w.amount);
            score += match w.unit {
                WarrantyUnit::Year => amount * rubric.warranty_points_per_year,
                WarrantyUnit::Month => amount / rubric.warranty_months_per_point,
            };
        }
        None => flags.push(RedFlag::MissingWarranty),
    }

    score += (rubric.shipping_baseline - record.shipping_cost) / rubric.shipping_step;
    if record.shipping_cost > rubric.high_shipping_threshold {
        flags.push(RedFlag::HighShipping(record.shipping_cost));
    }

    match &record.validity_date {
        Some(Validity::Date(expiry)) => {
            if *expiry < today {
                flags.push(RedFlag::Expired);
            } else if (*expiry - today).whole_days() < rubric.expiry_warning_days {
                flags.push(RedFlag::ExpiresSoon {
                    within_days: rubric.expiry_warning_days,
                });
            }
        }
        Some(Validity::Malformed(_)) => flags.push(RedFlag::InvalidValidityDate),
        None => {}
    }

    ScoreResult { score, flags }
}
