#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Selection and result types for the dashboard query functions.
//!
//! Each query takes a typed selection (what the user picked in the UI) and
//! returns a typed result the front end renders as-is. All types serialize
//! to camelCase JSON.

use chrono::NaiveDate;
use conflict_dash_event_models::{EventCluster, MarkerStyle, SummaryRow, TimeSeriesPoint};
use serde::{Deserialize, Serialize};

/// Selection for the event map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterParams {
    /// Exact event date to show.
    pub date: NaiveDate,
}

/// Event clusters for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResult {
    /// The selected date.
    pub date: NaiveDate,
    /// Number of events on that date (the sum of every cluster's count).
    pub total_events: u64,
    /// One entry per (latitude, longitude, event type).
    pub clusters: Vec<EventCluster>,
}

/// Selection for the indicator time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesParams {
    /// Indicator column to plot.
    pub column: String,
    /// Date to highlight with the selection marker.
    pub date: NaiveDate,
}

/// A secondary line drawn on the same date axis as the primary series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySeries {
    /// Legend label.
    pub name: String,
    /// Source column.
    pub column: String,
    /// Line colour.
    pub color: String,
    /// One point per indicator row.
    pub points: Vec<TimeSeriesPoint>,
}

/// An annotated point drawn on top of the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesMarker {
    /// Position, value and label of the marker.
    #[serde(flatten)]
    pub point: TimeSeriesPoint,
    /// How to draw it.
    pub style: MarkerStyle,
}

/// A full indicator time series with overlays and markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedSeries {
    /// Chart title.
    pub title: String,
    /// Plotted column.
    pub column: String,
    /// One point per indicator row, ascending by date.
    pub points: Vec<TimeSeriesPoint>,
    /// Extra lines; only the primary indicator has one (its moving average).
    pub overlays: Vec<OverlaySeries>,
    /// The selected-date marker followed by the historical markers.
    pub markers: Vec<SeriesMarker>,
}

/// Selection for the weekly summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryParams {
    /// Reporting week to summarize.
    pub date: NaiveDate,
}

/// The weekly summary table for one reporting date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTable {
    /// The selected reporting date.
    pub date: NaiveDate,
    /// Header of the label column.
    pub label_header: String,
    /// Header of the value column (the country name).
    pub value_header: String,
    /// Non-zero rows, descending by value.
    pub rows: Vec<SummaryRow>,
}

/// Everything the UI needs to populate its selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOptions {
    /// Country presented by the dashboard.
    pub country: String,
    /// Distinct event dates, ascending.
    pub event_dates: Vec<NaiveDate>,
    /// Preselected event date.
    pub default_event_date: Option<NaiveDate>,
    /// Indicator reporting dates, ascending.
    pub indicator_dates: Vec<NaiveDate>,
    /// Preselected reporting date (the latest one).
    pub default_indicator_date: Option<NaiveDate>,
    /// Indicator columns that can be plotted, in source order.
    pub columns: Vec<String>,
    /// Preselected indicator column.
    pub default_column: String,
    /// Forecast models with pre-rendered documents.
    pub forecast_models: Vec<String>,
}
