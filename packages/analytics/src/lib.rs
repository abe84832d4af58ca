#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard query functions.
//!
//! Each public query takes the immutable tables loaded at startup plus a
//! typed selection and returns a freshly built, typed result. Nothing here
//! keeps state between calls, so queries may run concurrently against one
//! shared [`conflict_dash_dataset::Dataset`].

pub mod clusters;
pub mod options;
pub mod series;
pub mod summary;
pub mod wrap;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while answering a dashboard query.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyticsError {
    /// The selected date has no row in the indicator table.
    #[error("No indicator data for {0}")]
    UnknownDate(NaiveDate),

    /// A configured historical marker points at a date missing from the
    /// indicator table.
    #[error("Marker '{label}' references {date}, which is not in the indicator table")]
    MissingReferenceDate {
        /// Marker label.
        label: String,
        /// The missing lookup date.
        date: NaiveDate,
    },

    /// The requested column does not exist in the indicator table.
    #[error("Unknown indicator column '{0}'")]
    UnknownColumn(String),
}

#[cfg(test)]
pub(crate) mod fixtures {
    use conflict_dash_config::DashboardConfig;
    use conflict_dash_dataset::{Dataset, EventTable, IndicatorTable};

    pub const EVENTS_CSV: &str = "\
event_date,latitude,longitude,event_type,sub_event_type,actor1,fatalities,notes,admin1,admin2
2021-08-13,34.5553,69.2075,Battles,Armed clash,Taliban,4,Taliban fighters clashed with ANSF on the outskirts of Kabul city.,Kabul,Kabul
2021-08-13,34.5553,69.2075,Battles,Armed clash,Military Forces of Afghanistan (2014-2021),2,Taliban fighters clashed with ANSF on the outskirts of Kabul city.,Kabul,Kabul
2021-08-13,34.5553,69.2075,Battles,Government regains territory,Taliban,,ANSF retook a checkpoint/Second report,Kabul,Kabul
2021-08-13,31.6289,65.7372,Explosions/Remote violence,Air/drone strike,Military Forces of Afghanistan (2014-2021),7,Airstrike on Taliban positions,Kandahar,Kandahar
2021-08-15,34.5553,69.2075,Strategic developments,Non-violent transfer of territory,Taliban,0,Taliban entered Kabul,Kabul,Kabul
";

    pub const INDICATORS_CSV: &str = "\
event_date,country,ISO_3,capital_lat,capital_lon,month,quarter,week,violence index,violence index_moving_avg,fatalities_battles,events/explosions,civilian_targeting
2020-04-24,Afghanistan,AFG,34.5,69.2,4,2,17,60,55,30,4,0
2020-05-01,Afghanistan,AFG,34.5,69.2,5,2,18,70,56,35,5,1
2021-02-19,Afghanistan,AFG,34.5,69.2,2,1,7,80,70,40,6,2
2021-05-07,Afghanistan,AFG,34.5,69.2,5,2,18,100,80,50,8,0
2021-08-13,Afghanistan,AFG,34.5,69.2,8,3,32,130,95,95,12,0.4
2021-08-20,Afghanistan,AFG,34.5,69.2,8,3,33,120,95,0,3,
";

    pub fn config() -> DashboardConfig {
        DashboardConfig::embedded().unwrap()
    }

    pub fn dataset() -> Dataset {
        let config = config();
        Dataset {
            events: EventTable::from_reader(EVENTS_CSV.as_bytes(), "events.csv").unwrap(),
            indicators: IndicatorTable::from_reader(
                INDICATORS_CSV.as_bytes(),
                "indicators.csv",
                config.data.window_start,
                config.data.window_end,
            )
            .unwrap(),
        }
    }

    pub fn date(s: &str) -> chrono::NaiveDate {
        chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }
}
