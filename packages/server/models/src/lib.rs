#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the conflict dashboard server.
//!
//! Query strings deserialize into these types and convert into the
//! analytics selections, so the HTTP contract can evolve separately from
//! the query functions.

use chrono::NaiveDate;
use conflict_dash_analytics_models::{ClusterParams, SeriesParams, SummaryParams};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// Error body carrying the display text of `error`.
    #[must_use]
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

/// Query parameters for `GET /api/clusters`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterQuery {
    /// Event date (`YYYY-MM-DD`).
    pub date: NaiveDate,
}

impl From<ClusterQuery> for ClusterParams {
    fn from(query: ClusterQuery) -> Self {
        Self { date: query.date }
    }
}

/// Query parameters for `GET /api/series`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesQuery {
    /// Indicator column.
    pub column: String,
    /// Selected reporting date (`YYYY-MM-DD`).
    pub date: NaiveDate,
}

impl From<SeriesQuery> for SeriesParams {
    fn from(query: SeriesQuery) -> Self {
        Self {
            column: query.column,
            date: query.date,
        }
    }
}

/// Query parameters for `GET /api/summary`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    /// Selected reporting date (`YYYY-MM-DD`).
    pub date: NaiveDate,
}

impl From<SummaryQuery> for SummaryParams {
    fn from(query: SummaryQuery) -> Self {
        Self { date: query.date }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_shape() {
        let json = serde_json::to_string(&ApiError::new("No indicator data for 2021-08-14")).unwrap();
        assert_eq!(json, r#"{"error":"No indicator data for 2021-08-14"}"#);
    }

    #[test]
    fn series_query_converts_to_params() {
        let query: SeriesQuery =
            serde_json::from_str(r#"{"column":"violence index","date":"2021-08-13"}"#).unwrap();
        let params = SeriesParams::from(query);
        assert_eq!(params.column, "violence index");
        assert_eq!(params.date, NaiveDate::from_ymd_opt(2021, 8, 13).unwrap());
    }
}
