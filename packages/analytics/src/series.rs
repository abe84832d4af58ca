//! Annotated indicator time series.

use conflict_dash_analytics_models::{AnnotatedSeries, OverlaySeries, SeriesMarker, SeriesParams};
use conflict_dash_config::SeriesConfig;
use conflict_dash_dataset::IndicatorTable;
use conflict_dash_event_models::{IndicatorRow, IndicatorValue, TimeSeriesPoint};

use crate::AnalyticsError;

fn column_index(table: &IndicatorTable, column: &str) -> Result<usize, AnalyticsError> {
    table
        .column_index(column)
        .ok_or_else(|| AnalyticsError::UnknownColumn(column.to_string()))
}

/// One point per row for the column at `idx`.
fn column_points(table: &IndicatorTable, idx: usize) -> Vec<TimeSeriesPoint> {
    table
        .rows()
        .iter()
        .map(|row| TimeSeriesPoint {
            date: row.event_date,
            value: cell_number(row, idx),
            marker_label: None,
        })
        .collect()
}

fn cell_number(row: &IndicatorRow, idx: usize) -> Option<f64> {
    row.values.get(idx).and_then(IndicatorValue::as_number)
}

/// Builds the time series for `params.column` with its markers.
///
/// The primary indicator also gets its moving-average overlay. Markers are
/// the selected-date marker first, then every configured historical marker
/// in configuration order.
///
/// # Errors
///
/// * [`AnalyticsError::UnknownColumn`] if the column (or the moving-average
///   column, for the primary indicator) is not in the table.
/// * [`AnalyticsError::UnknownDate`] if `params.date` has no row.
/// * [`AnalyticsError::MissingReferenceDate`] if a historical marker's
///   lookup date has no row.
pub fn build_series(
    table: &IndicatorTable,
    config: &SeriesConfig,
    country: &str,
    params: &SeriesParams,
) -> Result<AnnotatedSeries, AnalyticsError> {
    let idx = column_index(table, &params.column)?;
    let points = column_points(table, idx);

    let mut overlays = Vec::new();
    if params.column == config.primary_indicator {
        let average = &config.moving_average;
        let avg_idx = column_index(table, &average.column)?;
        overlays.push(OverlaySeries {
            name: average.label.clone(),
            column: average.column.clone(),
            color: average.color.clone(),
            points: column_points(table, avg_idx),
        });
    }

    let selected_row = table
        .row(params.date)
        .ok_or(AnalyticsError::UnknownDate(params.date))?;

    let mut markers = Vec::with_capacity(config.markers.len() + 1);
    markers.push(SeriesMarker {
        point: TimeSeriesPoint {
            date: params.date,
            value: cell_number(selected_row, idx),
            marker_label: Some(config.selected_marker.label.clone()),
        },
        style: config.selected_marker.style.clone(),
    });

    for marker in &config.markers {
        let row = table.row(marker.event_date).ok_or_else(|| {
            AnalyticsError::MissingReferenceDate {
                label: marker.label.clone(),
                date: marker.event_date,
            }
        })?;
        markers.push(SeriesMarker {
            point: TimeSeriesPoint {
                date: marker.display_date,
                value: cell_number(row, idx),
                marker_label: Some(marker.label.clone()),
            },
            style: marker.style.clone(),
        });
    }

    log::debug!(
        "Built series '{}' with {} points, {} overlays, {} markers",
        params.column,
        points.len(),
        overlays.len(),
        markers.len()
    );

    Ok(AnnotatedSeries {
        title: format!("{} over time for {country}", params.column),
        column: params.column.clone(),
        points,
        overlays,
        markers,
    })
}
