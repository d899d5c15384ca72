use crate::error::ConfigError;
use serde::Deserialize;
use std::{fs, io, path::Path};

pub const DEFAULT_CONFIG_PATH: &str = ".config/quote_compare.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub documents: DocumentPaths,
    #[serde(default)]
    pub ingest: IngestConfig,
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Quotes compared when none are given on the command line.
#[derive(Debug, Deserialize)]
pub struct DocumentPaths {
    #[serde(default = "default_first")]
    pub first: String,
    #[serde(default = "default_second")]
    pub second: String,
}

fn default_first() -> String {
    "quote1.pdf".to_string()
}

fn default_second() -> String {
    "quote2.pdf".to_string()
}

impl Default for DocumentPaths {
    fn default() -> Self {
        Self {
            first: default_first(),
            second: default_second(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// Minimum number of non-whitespace characters we expect from a
    /// "real" text PDF. Below this threshold we treat it as scanned.
    #[serde(default = "default_min_text_chars")]
    pub min_text_chars: usize,
}

fn default_min_text_chars() -> usize {
    30
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            min_text_chars: default_min_text_chars(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            documents: DocumentPaths::default(),
            ingest: IngestConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Like [`Config::load`], but a missing file just means defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_filter = \"debug\"\n\n[documents]\nfirst = \"acme.pdf\"").unwrap();

        let cfg = Config::load(file.path()).unwrap();
        assert_eq!(cfg.log_filter, "debug");
        assert_eq!(cfg.documents.first, "acme.pdf");
        assert_eq!(cfg.documents.second, "quote2.pdf");
        assert_eq!(cfg.ingest.min_text_chars, 30);
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.log_filter, "info");
        assert_eq!(cfg.documents.first, "quote1.pdf");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ingest]\nmin_text_chars = \"many\"").unwrap();
        assert!(matches!(
            Config::load_or_default(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
