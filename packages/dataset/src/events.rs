//! The per-event conflict log.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use conflict_dash_event_models::EventRecord;
use serde::Deserialize;

use crate::parsing::parse_date;
use crate::{DatasetError, open};

/// One event row as it appears in the CSV, before date parsing.
///
/// Columns beyond these are ignored. Empty text cells become empty strings
/// and an empty `fatalities` cell becomes zero.
#[derive(Debug, Deserialize)]
struct RawEvent {
    event_date: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    event_type: String,
    #[serde(default)]
    sub_event_type: String,
    #[serde(default)]
    actor1: String,
    #[serde(default)]
    fatalities: Option<u32>,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    admin1: String,
    #[serde(default)]
    admin2: String,
}

/// Every event from the log, indexed by date.
#[derive(Debug, Clone, Default)]
pub struct EventTable {
    events: Vec<EventRecord>,
    by_date: BTreeMap<NaiveDate, Vec<usize>>,
}

impl EventTable {
    /// Loads the event log from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the file cannot be opened, the CSV is
    /// malformed, or any `event_date` cell is not `YYYY-MM-DD`.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        Self::from_reader(open(path)?, &path.display().to_string())
    }

    /// Loads the event log from any CSV reader. `label` names the source in
    /// error messages.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the CSV is malformed or a date cannot be
    /// parsed.
    pub fn from_reader<R: Read>(reader: R, label: &str) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers: csv::StringRecord = reader.headers()?.iter().map(str::trim).collect();

        let mut record = csv::StringRecord::new();
        let mut events = Vec::new();

        while reader.read_record(&mut record)? {
            let line = record.position().map_or(0, csv::Position::line);
            record.trim();
            let raw: RawEvent = record.deserialize(Some(&headers))?;

            let Some(event_date) = parse_date(&raw.event_date) else {
                return Err(DatasetError::MalformedDate {
                    file: label.to_string(),
                    line,
                    value: raw.event_date,
                });
            };

            events.push(EventRecord {
                event_date,
                latitude: raw.latitude,
                longitude: raw.longitude,
                event_type: raw.event_type,
                sub_event_type: raw.sub_event_type,
                actor1: raw.actor1,
                fatalities: raw.fatalities.unwrap_or(0),
                notes: raw.notes,
                admin1: raw.admin1,
                admin2: raw.admin2,
            });
        }

        Ok(Self::from_records(events))
    }

    /// Builds a table from already-parsed records.
    #[must_use]
    pub fn from_records(events: Vec<EventRecord>) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
        for (idx, event) in events.iter().enumerate() {
            by_date.entry(event.event_date).or_default().push(idx);
        }
        Self { events, by_date }
    }

    /// All events in source order.
    #[must_use]
    pub fn records(&self) -> &[EventRecord] {
        &self.events
    }

    /// Events whose date equals `date` exactly, in source order.
    pub fn on_date(&self, date: NaiveDate) -> impl Iterator<Item = &EventRecord> {
        self.by_date
            .get(&date)
            .into_iter()
            .flatten()
            .map(|&idx| &self.events[idx])
    }

    /// Distinct event dates, ascending.
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.by_date.keys().copied().collect()
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if the log has no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
