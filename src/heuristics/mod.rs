// src/heuristics/mod.rs

mod generic;
mod normalize;

pub use normalize::normalize_amount;

use crate::sentiment::{Lexicon, PolarityScorer};
use serde::{Serialize, Serializer};
use std::fmt;
use time::Date;

/// Unit of a stated warranty period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarrantyUnit {
    Year,
    Month,
}

impl WarrantyUnit {
    fn as_str(self) -> &'static str {
        match self {
            WarrantyUnit::Year => "year",
            WarrantyUnit::Month => "month",
        }
    }
}

/// A warranty period such as "2 year" or "18 month".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Warranty {
    pub amount: u32,
    pub unit: WarrantyUnit,
}

impl fmt::Display for Warranty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit.as_str())
    }
}

impl Serialize for Warranty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Quote expiry as found in the document.
///
/// `Malformed` keeps text that looked like `YYYY-MM-DD` but is not a real
/// calendar date, so the scorer can report it instead of dropping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    Date(Date),
    Malformed(String),
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validity::Date(date) => write!(f, "{date}"),
            Validity::Malformed(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for Validity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// All structured data we can extract from a supplier quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteRecord {
    pub supplier: Option<String>,
    pub total_price: Option<f64>,
    pub discount: f64,
    pub delivery_days: Option<u32>,
    pub shipping_cost: f64,
    pub payment_terms: Option<String>,
    pub warranty_period: Option<Warranty>,
    pub validity_date: Option<Validity>,
    pub sentiment: f64,
}

impl Default for QuoteRecord {
    fn default() -> Self {
        Self {
            supplier: None,
            total_price: None,
            discount: 0.0,
            delivery_days: None,
            shipping_cost: 0.0,
            payment_terms: None,
            warranty_period: None,
            validity_date: None,
            sentiment: 0.0,
        }
    }
}

impl QuoteRecord {
    /// Supplier name for display, "Unknown" when none was found.
    pub fn supplier_name(&self) -> &str {
        self.supplier.as_deref().unwrap_or("Unknown")
    }

    /// How many fields were successfully extracted (sentiment is always computed,
    /// so it is not counted).
    ///
    /// Discount and shipping default to 0.0 when absent, so they only count
    /// when non-zero: an explicit "Shipping: 0" is indistinguishable from a
    /// missing line and reports as uncovered.
    pub fn coverage(&self) -> (usize, usize) {
        let total = 8;
        let filled = [
            self.supplier.is_some(),
            self.total_price.is_some(),
            self.discount > 0.0,
            self.delivery_days.is_some(),
            self.shipping_cost > 0.0,
            self.payment_terms.is_some(),
            self.warranty_period.is_some(),
            self.validity_date.is_some(),
        ]
        .iter()
        .filter(|&&v| v)
        .count();
        (filled, total)
    }

    pub fn has_data(&self) -> bool {
        self.coverage().0 > 0
    }
}

/// Extract structured quote data from raw document text.
pub fn extract_quote(text: &str) -> QuoteRecord {
    extract_quote_with(text, &Lexicon::default())
}

/// Same as [`extract_quote`], with a caller-supplied sentiment scorer.
pub fn extract_quote_with(text: &str, scorer: &dyn PolarityScorer) -> QuoteRecord {
    generic::extract(text, scorer)
}
