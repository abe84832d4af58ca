//! The weekly indicator table.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use conflict_dash_event_models::{IndicatorRow, IndicatorValue};

use crate::parsing::parse_date;
use crate::{DatasetError, open};

/// Column holding each row's reporting date.
pub const DATE_COLUMN: &str = "event_date";

/// Column holding the country name.
pub const COUNTRY_COLUMN: &str = "country";

/// Weekly indicator rows restricted to the loaded window, keyed by date.
///
/// Rows are kept in ascending date order and every row's `values` line up
/// with [`IndicatorTable::columns`].
#[derive(Debug, Clone, Default)]
pub struct IndicatorTable {
    columns: Vec<String>,
    rows: Vec<IndicatorRow>,
    by_date: BTreeMap<NaiveDate, usize>,
}

impl IndicatorTable {
    /// Loads the indicator table from a CSV file, keeping only rows dated
    /// strictly between `window_start` and `window_end`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the file cannot be opened, the CSV is
    /// malformed, a date cannot be parsed, or two kept rows share a date.
    pub fn load(
        path: &Path,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Result<Self, DatasetError> {
        Self::from_reader(
            open(path)?,
            &path.display().to_string(),
            window_start,
            window_end,
        )
    }

    /// Loads the indicator table from any CSV reader. `label` names the
    /// source in error messages.
    ///
    /// Dates are validated on every row, including rows outside the window.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the CSV is malformed, the `event_date`
    /// header is missing, a date cannot be parsed, or two kept rows share a
    /// date.
    pub fn from_reader<R: Read>(
        reader: R,
        label: &str,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_owned())
            .collect();

        let date_idx = columns
            .iter()
            .position(|c| c == DATE_COLUMN)
            .ok_or_else(|| DatasetError::MissingColumn {
                file: label.to_string(),
                column: DATE_COLUMN.to_string(),
            })?;
        let country_idx = columns.iter().position(|c| c == COUNTRY_COLUMN);

        let mut rows = Vec::new();
        let mut skipped: usize = 0;

        for result in reader.records() {
            let record = result?;
            let raw_date = record.get(date_idx).unwrap_or("");

            let Some(event_date) = parse_date(raw_date) else {
                return Err(DatasetError::MalformedDate {
                    file: label.to_string(),
                    line: record.position().map_or(0, csv::Position::line),
                    value: raw_date.to_string(),
                });
            };

            if !(window_start < event_date && event_date < window_end) {
                skipped += 1;
                continue;
            }

            let values: Vec<IndicatorValue> = (0..columns.len())
                .map(|i| IndicatorValue::parse(record.get(i).unwrap_or("")))
                .collect();
            let country = country_idx
                .and_then(|i| record.get(i))
                .unwrap_or("")
                .trim()
                .to_string();

            rows.push(IndicatorRow {
                event_date,
                country,
                values,
            });
        }

        if skipped > 0 {
            log::debug!("[{label}] Dropped {skipped} rows outside the indicator window");
        }

        Self::from_rows(columns, rows, label)
    }

    /// Builds a table from already-parsed rows, sorting them by date.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::DuplicateDate`] if two rows share a date.
    pub fn from_rows(
        columns: Vec<String>,
        mut rows: Vec<IndicatorRow>,
        label: &str,
    ) -> Result<Self, DatasetError> {
        rows.sort_by_key(|row| row.event_date);

        let mut by_date = BTreeMap::new();
        for (idx, row) in rows.iter().enumerate() {
            if by_date.insert(row.event_date, idx).is_some() {
                return Err(DatasetError::DuplicateDate {
                    file: label.to_string(),
                    date: row.event_date,
                });
            }
        }

        Ok(Self {
            columns,
            rows,
            by_date,
        })
    }

    /// Column names in source order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of `name` in [`Self::columns`].
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Rows in ascending date order.
    #[must_use]
    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    /// The row reported on `date`, if any.
    #[must_use]
    pub fn row(&self, date: NaiveDate) -> Option<&IndicatorRow> {
        self.by_date.get(&date).map(|&idx| &self.rows[idx])
    }

    /// The cell at (`date`, column index), if the row exists.
    #[must_use]
    pub fn value(&self, date: NaiveDate, column: usize) -> Option<&IndicatorValue> {
        self.row(date).and_then(|row| row.values.get(column))
    }

    /// Reporting dates, ascending.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.by_date.keys().copied().collect()
    }

    /// The most recent reporting date.
    #[must_use]
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.by_date.keys().next_back().copied()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no rows fall inside the window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
event_date,country,ISO_3,capital_lat,capital_lon,month,quarter,week,violence index,violence index_moving_avg
2020-01-01,Afghanistan,AFG,34.5,69.2,1,1,1,80,70
2021-08-20,Afghanistan,AFG,34.5,69.2,8,3,33,140,96
2021-08-13,Afghanistan,AFG,34.5,69.2,8,3,32,130,95
2022-01-01,Afghanistan,AFG,34.5,69.2,1,1,1,60,90
";

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn load(csv: &str) -> Result<IndicatorTable, DatasetError> {
        IndicatorTable::from_reader(
            csv.as_bytes(),
            "indicators.csv",
            date("2020-01-01"),
            date("2022-01-01"),
        )
    }

    #[test]
    fn window_excludes_both_bounds() {
        let table = load(CSV).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.row(date("2020-01-01")).is_none());
        assert!(table.row(date("2022-01-01")).is_none());
    }

    #[test]
    fn rows_are_sorted_and_keyed_by_date() {
        let table = load(CSV).unwrap();
        assert_eq!(table.dates(), vec![date("2021-08-13"), date("2021-08-20")]);
        assert_eq!(table.latest_date(), Some(date("2021-08-20")));

        let row = table.row(date("2021-08-13")).unwrap();
        assert_eq!(row.country, "Afghanistan");
        assert_eq!(row.values.len(), table.columns().len());
    }

    #[test]
    fn cells_are_classified() {
        let table = load(CSV).unwrap();
        let d = date("2021-08-13");

        let vi = table.column_index("violence index").unwrap();
        assert_eq!(table.value(d, vi), Some(&IndicatorValue::Number(130.0)));

        let iso = table.column_index("ISO_3").unwrap();
        assert_eq!(
            table.value(d, iso),
            Some(&IndicatorValue::Text("AFG".to_string()))
        );
    }

    #[test]
    fn missing_date_column_is_rejected() {
        let err = load("country,violence index\nAfghanistan,3\n").unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { .. }));
    }

    #[test]
    fn malformed_date_outside_window_still_fails() {
        let csv = "event_date,country\n2021-08-13,Afghanistan\n2019-13-01,Afghanistan\n";
        let err = load(csv).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MalformedDate { line: 3, .. }
        ));
    }

    #[test]
    fn duplicate_dates_in_window_are_rejected() {
        let csv = "event_date,country\n2021-08-13,Afghanistan\n2021-08-13,Afghanistan\n";
        let err = load(csv).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateDate { .. }));
    }
}
