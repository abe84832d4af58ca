//! Event clusters for the map.
//!
//! Events on the selected date are grouped by (latitude, longitude, event
//! type). Each group becomes one [`EventCluster`] carrying its size, summed
//! fatalities and the distinct actors, sub-event types, admin areas and notes
//! of its members.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use conflict_dash_analytics_models::{ClusterParams, ClusterResult};
use conflict_dash_dataset::EventTable;
use conflict_dash_event_models::{EventCluster, EventRecord};

use crate::wrap::{NOTE_SEPARATOR, wrap_description};

/// Separator between distinct values in the joined set fields.
const SET_SEPARATOR: &str = ", ";

/// Grouping key. Coordinates are compared by bit pattern, with `-0.0`
/// folded into `0.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ClusterKey<'a> {
    event_type: &'a str,
    latitude: u64,
    longitude: u64,
}

impl<'a> ClusterKey<'a> {
    fn of(event: &'a EventRecord) -> Self {
        Self {
            event_type: &event.event_type,
            latitude: coord_bits(event.latitude),
            longitude: coord_bits(event.longitude),
        }
    }
}

fn coord_bits(value: f64) -> u64 {
    if value == 0.0 { 0.0_f64 } else { value }.to_bits()
}

#[derive(Debug)]
struct ClusterAccumulator<'a> {
    latitude: f64,
    longitude: f64,
    event_type: &'a str,
    count: u64,
    fatalities: u64,
    actors: BTreeSet<&'a str>,
    sub_events: BTreeSet<&'a str>,
    admin1: BTreeSet<&'a str>,
    admin2: BTreeSet<&'a str>,
    notes: BTreeSet<&'a str>,
}

impl<'a> ClusterAccumulator<'a> {
    fn new(first: &'a EventRecord) -> Self {
        Self {
            latitude: first.latitude,
            longitude: first.longitude,
            event_type: &first.event_type,
            count: 0,
            fatalities: 0,
            actors: BTreeSet::new(),
            sub_events: BTreeSet::new(),
            admin1: BTreeSet::new(),
            admin2: BTreeSet::new(),
            notes: BTreeSet::new(),
        }
    }

    fn add(&mut self, event: &'a EventRecord) {
        self.count += 1;
        self.fatalities += u64::from(event.fatalities);
        insert_non_empty(&mut self.actors, &event.actor1);
        insert_non_empty(&mut self.sub_events, &event.sub_event_type);
        insert_non_empty(&mut self.admin1, &event.admin1);
        insert_non_empty(&mut self.admin2, &event.admin2);
        insert_non_empty(&mut self.notes, &event.notes);
    }

    fn finish(self) -> EventCluster {
        let joined_notes = join(&self.notes, &NOTE_SEPARATOR.to_string());

        EventCluster {
            latitude: self.latitude,
            longitude: self.longitude,
            event_type: self.event_type.to_string(),
            count: self.count,
            fatalities_sum: self.fatalities,
            actor_set: join(&self.actors, SET_SEPARATOR),
            sub_event_set: join(&self.sub_events, SET_SEPARATOR),
            admin1_set: join(&self.admin1, SET_SEPARATOR),
            admin2_set: join(&self.admin2, SET_SEPARATOR),
            description: wrap_description(&joined_notes),
        }
    }
}

fn insert_non_empty<'a>(set: &mut BTreeSet<&'a str>, value: &'a str) {
    if !value.is_empty() {
        set.insert(value);
    }
}

fn join(set: &BTreeSet<&str>, separator: &str) -> String {
    set.iter().copied().collect::<Vec<_>>().join(separator)
}

/// Groups the events that occurred exactly on `date`.
///
/// Returns one cluster per distinct (latitude, longitude, event type),
/// ordered by event type, then latitude, then longitude. An empty vector
/// means no events on that date.
#[must_use]
pub fn cluster_events(events: &EventTable, date: NaiveDate) -> Vec<EventCluster> {
    let mut groups: BTreeMap<ClusterKey<'_>, ClusterAccumulator<'_>> = BTreeMap::new();

    for event in events.on_date(date) {
        groups
            .entry(ClusterKey::of(event))
            .or_insert_with(|| ClusterAccumulator::new(event))
            .add(event);
    }

    let mut clusters: Vec<EventCluster> = groups
        .into_values()
        .map(ClusterAccumulator::finish)
        .collect();

    clusters.sort_by(|a, b| {
        a.event_type
            .cmp(&b.event_type)
            .then(a.latitude.total_cmp(&b.latitude))
            .then(a.longitude.total_cmp(&b.longitude))
    });

    clusters
}

/// Answers an event map selection.
#[must_use]
pub fn event_clusters(events: &EventTable, params: &ClusterParams) -> ClusterResult {
    let clusters = cluster_events(events, params.date);
    let total_events = clusters.iter().map(|c| c.count).sum();

    log::debug!(
        "Built {} clusters from {total_events} events on {}",
        clusters.len(),
        params.date
    );

    ClusterResult {
        date: params.date,
        total_events,
        clusters,
    }
}
