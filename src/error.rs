use std::path::PathBuf;
use thiserror::Error;

/// A document could not be turned into text.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse PDF {}: {reason}", .path.display())]
    Pdf { path: PathBuf, reason: String },

    #[error("PDF {} is scanned / image-only and has no extractable text", .0.display())]
    Scanned(PathBuf),

    #[error("document contains no text")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Why a pair of documents could not be compared.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Neither document produced text, so any comparison would be two empty
    /// records tying on defaults.
    #[error("no data: neither quote could be read ({first}; {second})")]
    NoData {
        first: IngestError,
        second: IngestError,
    },

    #[error("{slot} quote could not be read: {source}")]
    Unreadable {
        slot: &'static str,
        #[source]
        source: IngestError,
    },
}
