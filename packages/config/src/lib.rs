#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard configuration.
//!
//! Everything the query layer treats as external input lives here: source
//! file paths, the indicator window, the historical marker table, the summary
//! table's excluded columns and relabel rules, and the forecast directory.
//!
//! A default document (`dashboard.toml`) is baked into the binary with
//! [`include_str!`]; [`DashboardConfig::load`] reads a replacement from disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use conflict_dash_event_models::MarkerStyle;
use serde::Deserialize;

/// Default configuration embedded at compile time.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../dashboard.toml");

/// Errors that can occur while reading dashboard configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document is not valid TOML or does not match the schema.
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The indicator window does not span any dates.
    #[error("Invalid indicator window: {start} is not before {end}")]
    InvalidWindow {
        /// Exclusive window start.
        start: NaiveDate,
        /// Exclusive window end.
        end: NaiveDate,
    },
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Country the dashboard presents (used in titles and artifact names).
    pub country: String,
    /// Source files and indicator window.
    pub data: DataConfig,
    /// Event map settings.
    pub map: MapConfig,
    /// Indicator time-series settings.
    pub series: SeriesConfig,
    /// Weekly summary table settings.
    pub summary: SummaryConfig,
    /// Pre-rendered forecast documents.
    pub forecast: ForecastConfig,
}

/// Where the two source tables live and which indicator dates to keep.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Per-event CSV log.
    pub events_path: PathBuf,
    /// Weekly indicator CSV table.
    pub indicators_path: PathBuf,
    /// Indicator rows must be strictly after this date.
    pub window_start: NaiveDate,
    /// Indicator rows must be strictly before this date.
    pub window_end: NaiveDate,
}

impl DataConfig {
    /// Returns `true` if `date` falls inside the exclusive indicator window.
    #[must_use]
    pub fn in_window(&self, date: NaiveDate) -> bool {
        self.window_start < date && date < self.window_end
    }
}

/// Event map settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    /// Date preselected in the event map's date selector.
    pub default_event_date: NaiveDate,
}

/// Indicator time-series settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesConfig {
    /// Column that receives the moving-average overlay.
    pub primary_indicator: String,
    /// Column preselected in the indicator selector.
    pub default_column: String,
    /// Columns that are never offered in the indicator selector.
    #[serde(default)]
    pub non_selectable_columns: Vec<String>,
    /// Overlay drawn alongside the primary indicator.
    pub moving_average: MovingAverageConfig,
    /// Label and style of the marker at the user-selected date.
    pub selected_marker: SelectedMarkerConfig,
    /// Fixed historical milestones annotated on every series.
    #[serde(default)]
    pub markers: Vec<HistoricalMarker>,
}

/// The one-year moving-average overlay paired with the primary indicator.
#[derive(Debug, Clone, Deserialize)]
pub struct MovingAverageConfig {
    /// Source column holding the moving average.
    pub column: String,
    /// Legend label for the overlay.
    pub label: String,
    /// Line colour.
    pub color: String,
}

/// Marker drawn at the user's selected date.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectedMarkerConfig {
    /// Legend label.
    pub label: String,
    /// Visual style.
    #[serde(flatten)]
    pub style: MarkerStyle,
}

/// A known historical event annotated on the indicator series.
///
/// The value is looked up at `event_date` but drawn at `display_date`, which
/// may be a few days away so the star does not hide the line.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalMarker {
    /// Legend label.
    pub label: String,
    /// Date whose indicator value the marker shows. Must exist in the table.
    pub event_date: NaiveDate,
    /// Date the marker is drawn at.
    pub display_date: NaiveDate,
    /// Visual style.
    #[serde(flatten)]
    pub style: MarkerStyle,
}

/// Which value the summary table's zero filter looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroRule {
    /// Drop rows whose rounded display value is zero.
    #[default]
    Rounded,
    /// Drop rows whose raw value is exactly zero and show the remaining
    /// values unrounded.
    Raw,
}

/// Weekly summary table settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryConfig {
    /// Columns never shown in the table.
    #[serde(default)]
    pub excluded_columns: Vec<String>,
    /// How zero-valued rows are detected.
    #[serde(default)]
    pub zero_rule: ZeroRule,
    /// Column name to display label rules.
    #[serde(default)]
    pub relabel: RelabelRules,
}

/// Rules turning raw column names into display labels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelabelRules {
    /// Replacement for every `_`.
    #[serde(default = "default_underscore")]
    pub underscore: String,
    /// Replacement for every `/`.
    #[serde(default = "default_slash")]
    pub slash: String,
    /// Full-name substitutions keyed by raw column name. These win over the
    /// character replacements.
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

fn default_underscore() -> String {
    ": ".to_string()
}

fn default_slash() -> String {
    ", ".to_string()
}

impl Default for RelabelRules {
    fn default() -> Self {
        Self {
            underscore: default_underscore(),
            slash: default_slash(),
            overrides: BTreeMap::new(),
        }
    }
}

/// Pre-rendered forecast documents.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    /// Directory holding `{country}_{model}.{extension}` documents.
    pub directory: PathBuf,
    /// File extension of the documents, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Model names offered to the UI.
    #[serde(default)]
    pub models: Vec<String>,
}

fn default_extension() -> String {
    "html".to_string()
}

impl DashboardConfig {
    /// Parses and validates a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the TOML is malformed or the indicator
    /// window is empty.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses the configuration embedded at compile time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the embedded document is invalid.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml_str(DEFAULT_CONFIG_TOML)
    }

    /// Reads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("Loaded dashboard config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.data.window_start >= self.data.window_end {
            return Err(ConfigError::InvalidWindow {
                start: self.data.window_start,
                end: self.data.window_end,
            });
        }
        Ok(())
    }
}
