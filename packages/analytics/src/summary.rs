//! Weekly summary table.

use std::cmp::Ordering;

use conflict_dash_analytics_models::{SummaryParams, SummaryTable};
use conflict_dash_config::{RelabelRules, SummaryConfig, ZeroRule};
use conflict_dash_dataset::IndicatorTable;
use conflict_dash_event_models::{IndicatorValue, SummaryRow, SummaryValue};

use crate::AnalyticsError;

/// Header of the label column.
pub const LABEL_HEADER: &str = "Country";

/// Display label for a raw column name.
#[must_use]
pub fn relabel(rules: &RelabelRules, column: &str) -> String {
    if let Some(label) = rules.overrides.get(column) {
        return label.clone();
    }
    column
        .replace('_', &rules.underscore)
        .replace('/', &rules.slash)
}

#[allow(clippy::cast_possible_truncation)]
fn round(value: f64) -> i64 {
    value.round() as i64
}

fn summary_value(value: &IndicatorValue, zero_rule: ZeroRule) -> Option<SummaryValue> {
    match value {
        IndicatorValue::Missing => None,
        IndicatorValue::Text(text) => Some(SummaryValue::Text(text.clone())),
        IndicatorValue::Number(number) => match zero_rule {
            ZeroRule::Rounded => {
                let rounded = round(*number);
                (rounded != 0).then_some(SummaryValue::Number(rounded))
            }
            ZeroRule::Raw => (*number != 0.0).then_some(SummaryValue::Decimal(*number)),
        },
    }
}

/// Numbers descending, then text.
fn by_value_descending(a: &SummaryValue, b: &SummaryValue) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Builds the summary table for the week reported on `params.date`.
///
/// Excluded columns, missing cells and zero values are left out. Rows are
/// sorted by value descending; ties keep column order.
///
/// # Errors
///
/// * [`AnalyticsError::UnknownDate`] if `params.date` has no row.
pub fn build_summary(
    table: &IndicatorTable,
    config: &SummaryConfig,
    country: &str,
    params: &SummaryParams,
) -> Result<SummaryTable, AnalyticsError> {
    let row = table
        .row(params.date)
        .ok_or(AnalyticsError::UnknownDate(params.date))?;

    let mut rows: Vec<SummaryRow> = table
        .columns()
        .iter()
        .zip(&row.values)
        .filter(|(column, _)| !config.excluded_columns.contains(column))
        .filter_map(|(column, value)| {
            summary_value(value, config.zero_rule).map(|value| SummaryRow {
                label: relabel(&config.relabel, column),
                value,
            })
        })
        .collect();

    rows.sort_by(|a, b| by_value_descending(&a.value, &b.value));

    log::debug!("Built summary for {} with {} rows", params.date, rows.len());

    Ok(SummaryTable {
        date: params.date,
        label_header: LABEL_HEADER.to_string(),
        value_header: country.to_string(),
        rows,
    })
}
