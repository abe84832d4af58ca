#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset loader for the conflict dashboard.
//!
//! Reads the per-event CSV log and the weekly indicator CSV table once at
//! startup, parses their dates, restricts the indicator table to the
//! configured window, and exposes both as read-only tables. Nothing in this
//! crate hands out mutable access after load; the server shares one
//! [`Dataset`] across all requests.

pub mod events;
pub mod indicators;
pub mod parsing;

use std::path::PathBuf;

use chrono::NaiveDate;
use conflict_dash_config::DataConfig;

pub use events::EventTable;
pub use indicators::IndicatorTable;

/// Errors that can occur while loading the source tables.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// A row's date does not match `YYYY-MM-DD`.
    #[error("Malformed date '{value}' in {file} at line {line}")]
    MalformedDate {
        /// Name of the file (or reader label) being loaded.
        file: String,
        /// One-based line number in the source.
        line: u64,
        /// The raw date cell.
        value: String,
    },

    /// Two indicator rows inside the window share a date.
    #[error("Duplicate indicator date {date} in {file}")]
    DuplicateDate {
        /// Name of the file being loaded.
        file: String,
        /// The repeated date.
        date: NaiveDate,
    },

    /// A required header is missing.
    #[error("Missing column '{column}' in {file}")]
    MissingColumn {
        /// Name of the file being loaded.
        file: String,
        /// The required column.
        column: String,
    },

    /// The CSV structure could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A source file could not be opened.
    #[error("Failed to open {}: {source}", path.display())]
    Io {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Both source tables, loaded once and never mutated.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// The per-event log.
    pub events: EventTable,
    /// The weekly indicator table, restricted to the configured window.
    pub indicators: IndicatorTable,
}

impl Dataset {
    /// Loads both source tables described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if either file cannot be read or contains a
    /// malformed date.
    pub fn load(config: &DataConfig) -> Result<Self, DatasetError> {
        log::info!("Loading event log from {}", config.events_path.display());
        let events = EventTable::load(&config.events_path)?;
        log::info!(
            "Loaded {} events across {} dates",
            events.len(),
            events.dates().len()
        );

        log::info!(
            "Loading indicator table from {} (window {} .. {})",
            config.indicators_path.display(),
            config.window_start,
            config.window_end
        );
        let indicators = IndicatorTable::load(
            &config.indicators_path,
            config.window_start,
            config.window_end,
        )?;
        log::info!(
            "Loaded {} indicator weeks with {} columns",
            indicators.len(),
            indicators.columns().len()
        );

        Ok(Self { events, indicators })
    }
}

fn open(path: &std::path::Path) -> Result<std::fs::File, DatasetError> {
    std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_are_io_errors() {
        let config = DataConfig {
            events_path: PathBuf::from("does/not/exist/events.csv"),
            indicators_path: PathBuf::from("does/not/exist/indicators.csv"),
            window_start: parsing::parse_date("2020-01-01").unwrap(),
            window_end: parsing::parse_date("2022-01-01").unwrap(),
        };
        let err = Dataset::load(&config).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
