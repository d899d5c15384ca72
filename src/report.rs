use crate::comparator::Winner;
use crate::heuristics::QuoteRecord;
use crate::pipeline::Evaluation;
use crate::scoring::ScoreResult;
use crate::sentiment::TextStats;
use std::fmt::Write;

const NOT_SPECIFIED: &str = "Not specified";

/// Human-readable comparison report.
pub fn render_comparison(eval: &Evaluation) -> String {
    let mut out = String::new();
    let first = &eval.first;
    let second = &eval.second;
    let cmp = &eval.comparison;

    out.push_str("Comparison Results:\n");
    write_record(&mut out, "Quote 1", first);
    out.push('\n');
    write_record(&mut out, "Quote 2", second);

    out.push_str("\nRed Flags:\n");
    write_flags(&mut out, "Quote 1", first, &cmp.first);
    write_flags(&mut out, "Quote 2", second, &cmp.second);

    out.push_str("\nRecommendation:\n");
    let _ = writeln!(
        out,
        "Score for Quote 1 ({}): {:.2}",
        first.supplier_name(),
        cmp.first.score
    );
    let _ = writeln!(
        out,
        "Score for Quote 2 ({}): {:.2}",
        second.supplier_name(),
        cmp.second.score
    );
    let _ = match cmp.winner {
        Winner::First => writeln!(
            out,
            "{} is recommended (higher score: {:.2} vs {:.2}).",
            first.supplier_name(),
            cmp.first.score,
            cmp.second.score
        ),
        Winner::Second => writeln!(
            out,
            "{} is recommended (higher score: {:.2} vs {:.2}).",
            second.supplier_name(),
            cmp.second.score,
            cmp.first.score
        ),
        Winner::Tie => writeln!(
            out,
            "Scores are equal ({}). Review red flags and other factors to decide.",
            cmp.winner
        ),
    };
    out
}

/// Single-document view used by `extract`.
pub fn render_record(record: &QuoteRecord, result: &ScoreResult) -> String {
    let mut out = String::new();
    write_record(&mut out, "Quote", record);
    let (filled, total) = record.coverage();
    let _ = writeln!(out, "  Coverage: {filled}/{total} fields");
    let _ = writeln!(out, "  Score: {:.2}", result.score);
    write_flag_list(&mut out, result);
    out
}

pub fn render_stats(stats: &TextStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Word Count: {}", stats.word_count);
    let top: Vec<String> = stats
        .top_words
        .iter()
        .map(|(word, count)| format!("{word} ({count})"))
        .collect();
    let _ = writeln!(out, "Top Words: {}", top.join(", "));
    let _ = writeln!(out, "Sentiment: {:.3} ({})", stats.polarity, stats.label);
    out
}

fn write_record(out: &mut String, title: &str, record: &QuoteRecord) {
    let _ = writeln!(out, "{title} ({}):", record.supplier_name());
    let _ = writeln!(
        out,
        "  Total Price: {}",
        record
            .total_price
            .map(|p| format!("${p:.2}"))
            .unwrap_or_else(|| NOT_SPECIFIED.to_string())
    );
    let _ = writeln!(out, "  Discount: ${:.2}", record.discount);
    let _ = writeln!(
        out,
        "  Delivery: {}",
        record
            .delivery_days
            .map(|d| format!("{d} days"))
            .unwrap_or_else(|| NOT_SPECIFIED.to_string())
    );
    let _ = writeln!(out, "  Shipping Cost: ${:.2}", record.shipping_cost);
    let _ = writeln!(
        out,
        "  Payment Terms: {}",
        record.payment_terms.as_deref().unwrap_or("Unknown")
    );
    let _ = writeln!(
        out,
        "  Warranty: {}",
        record
            .warranty_period
            .map(|w| w.to_string())
            .unwrap_or_else(|| "None".to_string())
    );
    let _ = writeln!(
        out,
        "  Validity: {}",
        record
            .validity_date
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| NOT_SPECIFIED.to_string())
    );
    let _ = writeln!(out, "  Sentiment: {:.3}", record.sentiment);
}

fn write_flags(out: &mut String, title: &str, record: &QuoteRecord, result: &ScoreResult) {
    let _ = writeln!(out, "{title} ({}):", record.supplier_name());
    write_flag_list(out, result);
}

fn write_flag_list(out: &mut String, result: &ScoreResult) {
    if result.flags.is_empty() {
        out.push_str("  No red flags identified.\n");
    }
    for flag in &result.flags {
        let _ = writeln!(out, "  - {flag}");
    }
}
