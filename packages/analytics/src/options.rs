//! Selector options for the UI.

use chrono::NaiveDate;
use conflict_dash_analytics_models::DashboardOptions;
use conflict_dash_config::DashboardConfig;
use conflict_dash_dataset::Dataset;

/// The configured default event date when it has events, otherwise the
/// latest event date.
fn default_event_date(event_dates: &[NaiveDate], configured: NaiveDate) -> Option<NaiveDate> {
    if event_dates.binary_search(&configured).is_ok() {
        Some(configured)
    } else {
        event_dates.last().copied()
    }
}

/// Collects the dates, columns and models the selectors offer.
#[must_use]
pub fn build_options(dataset: &Dataset, config: &DashboardConfig) -> DashboardOptions {
    let event_dates = dataset.events.dates();
    let default_event = default_event_date(&event_dates, config.map.default_event_date);

    let columns: Vec<String> = dataset
        .indicators
        .columns()
        .iter()
        .filter(|column| !config.series.non_selectable_columns.contains(column))
        .cloned()
        .collect();

    DashboardOptions {
        country: config.country.clone(),
        default_event_date: default_event,
        event_dates,
        indicator_dates: dataset.indicators.dates(),
        default_indicator_date: dataset.indicators.latest_date(),
        columns,
        default_column: config.series.default_column.clone(),
        forecast_models: config.forecast.models.clone(),
    }
}
