//! Ingest configuration.

use std::path::PathBuf;

use crate::format::{Format, UnknownFormat};

/// Formats to leave out, as a comma separated list of extensions.
pub const SKIP_VAR: &str = "CIF_SKIP";
/// Directory receiving one JSON lines file per input.
pub const OUTPUT_DIR_VAR: &str = "CIF_OUTPUT_DIR";
/// Number of lines between progress messages.
pub const PROGRESS_EVERY_VAR: &str = "CIF_PROGRESS_EVERY";

/// Errors in configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: {source}")]
    UnknownFormat {
        var: &'static str,
        #[source]
        source: UnknownFormat,
    },

    #[error("{var}: expected a positive whole number, got {value:?}")]
    NotAPositiveNumber { var: &'static str, value: String },
}

/// Settings for an ingest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Formats not to process, even when given matching files.
    pub skip: Vec<Format>,

    /// Where output files are written.
    pub output_dir: PathBuf,

    /// Log progress every this many lines of a file.
    pub progress_every: usize,
}

impl IngestConfig {
    pub fn new(skip: Vec<Format>, output_dir: impl Into<PathBuf>, progress_every: usize) -> Self {
        Self {
            skip,
            output_dir: output_dir.into(),
            progress_every,
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`, falling back to the defaults
    /// for anything unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(skip) = lookup(SKIP_VAR) {
            config.skip = skip
                .split(',')
                .filter(|name| !name.trim().is_empty())
                .map(|name| {
                    name.parse::<Format>()
                        .map_err(|source| ConfigError::UnknownFormat {
                            var: SKIP_VAR,
                            source,
                        })
                })
                .collect::<Result<_, _>>()?;
        }

        if let Some(dir) = lookup(OUTPUT_DIR_VAR) {
            config.output_dir = PathBuf::from(dir);
        }

        if let Some(value) = lookup(PROGRESS_EVERY_VAR) {
            config.progress_every = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::NotAPositiveNumber {
                    var: PROGRESS_EVERY_VAR,
                    value,
                })?;
        }

        Ok(config)
    }

    /// Whether files of `format` should be processed.
    pub fn wants(&self, format: Format) -> bool {
        !self.skip.contains(&format)
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            skip: Vec::new(),
            output_dir: PathBuf::from("."),
            progress_every: 100_000,
        }
    }
}
