use regex::Regex;
use std::sync::LazyLock;

/// Label words that commonly precede an amount in a quote line.
static RE_AMOUNT_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(Total|Grand Total|Total Price|Price|Subtotal|Discount|Shipping Cost|VAT)[:\s]*")
        .unwrap()
});

/// Turn a currency fragment such as `"$10,000 USD"` or `"Subtotal: 10000"`
/// into a number.
///
/// Labels are dropped first, then everything that is not a digit or a decimal
/// point. Returns `None` when what is left does not parse (empty string, more
/// than one decimal point).
pub fn normalize_amount(fragment: &str) -> Option<f64> {
    let unlabelled = RE_AMOUNT_LABEL.replace_all(fragment, "");
    let digits: String = unlabelled
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse::<f64>().ok()
}
