#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Conflict event and weekly indicator types.
//!
//! This crate defines the source records loaded from the event log and the
//! weekly indicator table, plus the transient presentation types derived from
//! them on every dashboard query (clusters, time-series points and summary
//! rows). It contains no I/O.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A single conflict event from the event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Calendar date the event occurred on.
    pub event_date: NaiveDate,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    /// Event category (e.g. `"Battles"`).
    pub event_type: String,
    /// Event subcategory (e.g. `"Armed clash"`).
    pub sub_event_type: String,
    /// Primary actor.
    pub actor1: String,
    /// Reported fatalities. Missing source cells load as zero.
    pub fatalities: u32,
    /// Free-text description of the event.
    pub notes: String,
    /// First-level administrative division (province).
    pub admin1: String,
    /// Second-level administrative division (district).
    pub admin2: String,
}

/// One cell of the weekly indicator table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorValue {
    /// A cell that parses as a number.
    Number(f64),
    /// A categorical cell (country name, ISO code, ...).
    Text(String),
    /// An empty cell.
    Missing,
}

impl IndicatorValue {
    /// Classifies a raw CSV cell. Empty cells and non-finite numbers
    /// (`NaN`, `inf`) are [`IndicatorValue::Missing`].
    #[must_use]
    pub fn parse(cell: &str) -> Self {
        let cell = cell.trim();
        if cell.is_empty() {
            return Self::Missing;
        }
        match cell.parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            Ok(_) => Self::Missing,
            Err(_) => Self::Text(cell.to_string()),
        }
    }

    /// Returns the numeric value, if this cell holds one.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) | Self::Missing => None,
        }
    }
}

/// One reporting week of the indicator table.
///
/// `values` is aligned with the owning table's column list, so column order
/// from the source file is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorRow {
    /// Reporting date; unique within the loaded window.
    pub event_date: NaiveDate,
    /// Country name from the `country` column (empty if absent).
    pub country: String,
    /// Every cell of the row, in source column order.
    pub values: Vec<IndicatorValue>,
}

/// Events sharing a location and event type on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCluster {
    /// Shared latitude.
    pub latitude: f64,
    /// Shared longitude.
    pub longitude: f64,
    /// Shared event type.
    pub event_type: String,
    /// Number of events in the cluster.
    pub count: u64,
    /// Sum of fatalities across the cluster.
    pub fatalities_sum: u64,
    /// Distinct primary actors, sorted and comma-joined.
    pub actor_set: String,
    /// Distinct sub-event types, sorted and comma-joined.
    pub sub_event_set: String,
    /// Distinct provinces, sorted and comma-joined.
    pub admin1_set: String,
    /// Distinct districts, sorted and comma-joined.
    pub admin2_set: String,
    /// Distinct notes, sorted and wrapped for hover display.
    pub description: String,
}

/// A point on an indicator time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Position on the date axis.
    pub date: NaiveDate,
    /// Indicator value; `None` for a gap (missing or non-numeric cell).
    pub value: Option<f64>,
    /// Label when this point is a marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_label: Option<String>,
}

/// Shape used to draw a marker point.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MarkerSymbol {
    /// Filled circle.
    #[default]
    Circle,
    /// Five-pointed star.
    Star,
    /// Diamond.
    Diamond,
    /// Square.
    Square,
    /// Upward triangle.
    TriangleUp,
}

/// Visual style for a marker point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    /// CSS colour name or hex string.
    pub color: String,
    /// Marker size in pixels.
    pub size: u32,
    /// Marker shape.
    #[serde(default)]
    pub symbol: MarkerSymbol,
}

/// Value shown in one summary table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryValue {
    /// A numeric indicator rounded to the nearest integer.
    Number(i64),
    /// A numeric indicator shown unrounded.
    Decimal(f64),
    /// A categorical cell, shown verbatim.
    Text(String),
}

impl SummaryValue {
    /// The value as a number, if it is one.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n as f64),
            Self::Decimal(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

/// One relabeled indicator value for the selected week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    /// Display label derived from the column name.
    pub label: String,
    /// Display value.
    pub value: SummaryValue,
}
