// src/pipeline.rs

use crate::comparator::{Comparison, compare_quotes};
use crate::error::{AnalysisError, IngestError};
use crate::heuristics::{QuoteRecord, extract_quote};
use crate::pdf_extract::require_text;
use crate::scoring::Rubric;
use serde::Serialize;
use time::Date;
use tracing::{info, warn};

/// Everything produced for one pair of documents.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub first: QuoteRecord,
    pub second: QuoteRecord,
    pub comparison: Comparison,
}

/// Extract a record from document text and log what was found.
pub fn extract_logged(slot: &str, text: &str) -> QuoteRecord {
    let record = extract_quote(text);
    let (filled, total) = record.coverage();
    info!(
        slot,
        filled,
        total,
        supplier = %record.supplier_name(),
        total_price = ?record.total_price,
        delivery_days = ?record.delivery_days,
        sentiment = record.sentiment,
        "Extraction result"
    );
    if !record.has_data() {
        warn!(slot, "No quote fields recognised in document text");
    }
    record
}

/// Turn two ingestion outcomes into a comparison.
///
/// Blank text counts as unreadable. Both documents unreadable is always
/// [`AnalysisError::NoData`]. With a single
/// failure, `allow_partial` substitutes an empty record for the missing side;
/// otherwise that failure is returned.
pub fn evaluate_pair(
    first: Result<String, IngestError>,
    second: Result<String, IngestError>,
    allow_partial: bool,
    rubric: &Rubric,
    today: Date,
) -> Result<Evaluation, AnalysisError> {
    let first = first.and_then(require_text);
    let second = second.and_then(require_text);

    let (first, second) = match (first, second) {
        (Err(first), Err(second)) => return Err(AnalysisError::NoData { first, second }),
        (first, second) => (
            resolve("first", first, allow_partial)?,
            resolve("second", second, allow_partial)?,
        ),
    };

    let comparison = compare_quotes(&first, &second, rubric, today);
    info!(
        first = comparison.first.score,
        second = comparison.second.score,
        winner = %comparison.winner,
        "Comparison complete"
    );

    Ok(Evaluation {
        first,
        second,
        comparison,
    })
}

fn resolve(
    slot: &'static str,
    outcome: Result<String, IngestError>,
    allow_partial: bool,
) -> Result<QuoteRecord, AnalysisError> {
    match outcome {
        Ok(text) => Ok(extract_logged(slot, &text)),
        Err(source) if allow_partial => {
            warn!(slot, error = %source, "Document unreadable — scoring an empty record");
            Ok(QuoteRecord::default())
        }
        Err(source) => Err(AnalysisError::Unreadable { slot, source }),
    }
}
