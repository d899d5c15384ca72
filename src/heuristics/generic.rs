use super::normalize::normalize_amount;
use super::{QuoteRecord, Validity, Warranty, WarrantyUnit};
use crate::sentiment::PolarityScorer;
use regex::Regex;
use std::sync::LazyLock;
use time::Date;
use time::macros::format_description;

/// Main extraction entry point. Every field is looked up independently with
/// keyword-anchored patterns, so a miss on one never affects another.
pub fn extract(text: &str, scorer: &dyn PolarityScorer) -> QuoteRecord {
    QuoteRecord {
        supplier: extract_supplier(text),
        total_price: first_amount(text, &TOTAL_PRICE_RULES),
        discount: first_amount(text, &[&RE_DISCOUNT]).unwrap_or(0.0),
        delivery_days: extract_delivery_days(text),
        shipping_cost: first_amount(text, &[&RE_SHIPPING]).unwrap_or(0.0),
        payment_terms: extract_payment_terms(text),
        warranty_period: extract_warranty(text),
        validity_date: extract_validity(text),
        sentiment: scorer.polarity(text).clamp(-1.0, 1.0),
    }
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

// "$12,500.00 USD", "12500", "1,250.5"
macro_rules! amount {
    () => {
        r"\$?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{1,2})?\s*(?:USD)?"
    };
}

static RE_SUPPLIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Supplier\s+Quote\s*-\s*(.+?)(?:\n|$|Supplier Details)").unwrap()
});

static RE_GRAND_TOTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(concat!(r"(?i)Grand\s+Total[:\s]*", amount!())).unwrap());

static RE_SUBTOTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(concat!(r"(?i)Subtotal[:\s]*", amount!())).unwrap());

static RE_DISCOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(concat!(r"(?i)Discount[:\s]*-?", amount!())).unwrap());

static RE_SHIPPING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(concat!(r"(?i)Shipping(?:\s+Cost)?[:\s]*", amount!())).unwrap());

static RE_DELIVERY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:Delivery(?:\s+Time)?|Lead\s+Time)\s*(?:\(\s*Days\s*\)|Days)?[:\s]*(?:(?:in|within)\s+)?(\d+)\s*(?:days?)?",
    )
    .unwrap()
});

static RE_PAYMENT_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Payment\s+Terms[:\s]*(.*?)(?:\n|$|Lead Time|Shipping)").unwrap()
});

static RE_WARRANTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Warranty[:\s]*(\d+)-?\s*(year|month)s?(?:\s*manufacturers\s*warranty)?")
        .unwrap()
});

static RE_VALIDITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Valid(?:ity\s+Period|\s+until)[:\s]*(\d{4}-\d{2}-\d{2})").unwrap()
});

/// Grand total wins; subtotal is the fallback.
static TOTAL_PRICE_RULES: [&LazyLock<Regex>; 2] = [&RE_GRAND_TOTAL, &RE_SUBTOTAL];

// ---------------------------------------------------------------------------
// Field extractors
// ---------------------------------------------------------------------------

/// First non-empty, trimmed capture group 1 of `re`.
fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// Walk the priority chain and normalize the first whole match.
fn first_amount(text: &str, rules: &[&LazyLock<Regex>]) -> Option<f64> {
    rules
        .iter()
        .find_map(|re| re.find(text))
        .and_then(|m| normalize_amount(m.as_str()))
}

fn extract_supplier(text: &str) -> Option<String> {
    capture(&RE_SUPPLIER, text).map(str::to_string)
}

fn extract_delivery_days(text: &str) -> Option<u32> {
    capture(&RE_DELIVERY, text)
        .and_then(|d| d.parse::<u32>().ok())
        .filter(|&d| d > 0)
}

fn extract_payment_terms(text: &str) -> Option<String> {
    capture(&RE_PAYMENT_TERMS, text).map(str::to_string)
}

fn extract_warranty(text: &str) -> Option<Warranty> {
    let cap = RE_WARRANTY.captures(text)?;
    let amount = cap[1].parse::<u32>().ok()?;
    let unit = if cap[2].eq_ignore_ascii_case("year") {
        WarrantyUnit::Year
    } else {
        WarrantyUnit::Month
    };
    Some(Warranty { amount, unit })
}

fn extract_validity(text: &str) -> Option<Validity> {
    let raw = capture(&RE_VALIDITY, text)?;
    let format = format_description!("[year]-[month]-[day]");
    Some(match Date::parse(raw, &format) {
        Ok(date) => Validity::Date(date),
        Err(_) => Validity::Malformed(raw.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Lexicon;
    use time::macros::date;

    const ACME_QUOTE: &str = "Supplier Quote - Acme Industrial Supply\n\
        Supplier Details: 12 Harbor Road\n\
        Item: Hydraulic press x2\n\
        Subtotal: $20,000.00\n\
        Discount: -$1,000.00\n\
        Shipping Cost: $250 USD\n\
        Grand Total: $19,250.00 USD\n\
        Payment Terms: 60% deposit, 40% on delivery\n\
        Lead Time: 14 days\n\
        Warranty: 2-year manufacturers warranty\n\
        Validity Period: 2025-06-30\n\
        We are happy to offer excellent support.";

    struct FixedPolarity(f64);

    impl PolarityScorer for FixedPolarity {
        fn polarity(&self, _text: &str) -> f64 {
            self.0
        }
    }

    fn run(text: &str) -> QuoteRecord {
        extract(text, &Lexicon::default())
    }

    #[test]
    fn test_full_quote() {
        let q = run(ACME_QUOTE);
        assert_eq!(q.supplier.as_deref(), Some("Acme Industrial Supply"));
        assert_eq!(q.total_price, Some(19250.0));
        assert_eq!(q.discount, 1000.0);
        assert_eq!(q.shipping_cost, 250.0);
        assert_eq!(q.delivery_days, Some(14));
        assert_eq!(
            q.payment_terms.as_deref(),
            Some("60% deposit, 40% on delivery")
        );
        assert_eq!(
            q.warranty_period,
            Some(Warranty {
                amount: 2,
                unit: WarrantyUnit::Year
            })
        );
        assert_eq!(q.validity_date, Some(Validity::Date(date!(2025 - 06 - 30))));
        assert!(q.sentiment > 0.0);
    }

    #[test]
    fn test_empty_text_defaults_everything() {
        let q = run("");
        assert_eq!(q, QuoteRecord::default());
    }

    #[test]
    fn test_subtotal_fallback() {
        let q = run("Subtotal: 8,400.00\nShipping: 120");
        assert_eq!(q.total_price, Some(8400.0));
        assert_eq!(q.shipping_cost, 120.0);
    }

    #[test]
    fn test_plain_digit_amounts_are_not_truncated() {
        let q = run("Grand Total: 12500 USD");
        assert_eq!(q.total_price, Some(12500.0));
    }

    #[test]
    fn test_supplier_stops_at_details_marker() {
        let q = run("Supplier Quote - Beta Parts Co Supplier Details: Unit 4");
        assert_eq!(q.supplier.as_deref(), Some("Beta Parts Co"));
    }

    #[test]
    fn test_delivery_variants() {
        assert_eq!(run("Delivery: within 21 days").delivery_days, Some(21));
        assert_eq!(run("Delivery (Days): 10").delivery_days, Some(10));
        assert_eq!(run("delivery in 5 days").delivery_days, Some(5));
        assert_eq!(run("Lead time: 30").delivery_days, Some(30));
        assert_eq!(run("Delivery: 0 days").delivery_days, None);
        assert_eq!(run("Delivery: to be confirmed").delivery_days, None);
    }

    #[test]
    fn test_payment_terms_stop_at_markers() {
        let q = run("Payment Terms: 100% upfront Lead Time: 7 days");
        assert_eq!(q.payment_terms.as_deref(), Some("100% upfront"));
        assert_eq!(q.delivery_days, Some(7));
        assert_eq!(run("Payment Terms:").payment_terms, None);
    }

    #[test]
    fn test_warranty_months() {
        let q = run("WARRANTY: 18 Months");
        assert_eq!(
            q.warranty_period,
            Some(Warranty {
                amount: 18,
                unit: WarrantyUnit::Month
            })
        );
        assert_eq!(run("Warranty: none offered").warranty_period, None);
    }

    #[test]
    fn test_validity_variants() {
        assert_eq!(
            run("Valid until 2026-01-15").validity_date,
            Some(Validity::Date(date!(2026 - 01 - 15)))
        );
        assert_eq!(
            run("Validity Period: 2025-13-40").validity_date,
            Some(Validity::Malformed("2025-13-40".to_string()))
        );
        assert_eq!(run("Valid until end of month").validity_date, None);
    }

    #[test]
    fn test_amounts_are_never_negative() {
        let q = run("Discount: -$750\nShipping Cost: -20");
        assert_eq!(q.discount, 750.0);
        assert_eq!(q.shipping_cost, 0.0);
    }

    #[test]
    fn test_odd_inputs_stay_well_formed() {
        let inputs = [
            "\n\n\n",
            "Grand Total:",
            "Subtotal: $,,,",
            "Delivery: 99999999999999999999 days",
            "Warranty: 0-month",
            "Payment Terms: Shipping",
            "Supplier Quote - \nSupplier Quote - Real Name",
            "ünïcödé Grand Total: ¥ 300",
        ];
        for text in inputs {
            let q = run(text);
            assert!(q.total_price.is_none_or(|p| p >= 0.0), "{text:?}");
            assert!(q.discount >= 0.0 && q.shipping_cost >= 0.0, "{text:?}");
            assert!(q.delivery_days.is_none_or(|d| d > 0), "{text:?}");
            assert!((-1.0..=1.0).contains(&q.sentiment), "{text:?}");
        }
        assert_eq!(run("Delivery: 99999999999999999999 days").delivery_days, None);
        assert_eq!(run("Payment Terms: Shipping").payment_terms, None);
    }

    #[test]
    fn test_sentiment_is_clamped() {
        let q = extract("anything", &FixedPolarity(3.5));
        assert_eq!(q.sentiment, 1.0);
    }
}
