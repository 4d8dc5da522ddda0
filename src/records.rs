//! High/low records and the "no record yet" sentinel.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static DEFAULT_RECORD_TIME: LazyLock<NaiveDateTime> = LazyLock::new(|| {
    NaiveDate::from_ymd_opt(1900, 1, 1)
        .expect("sentinel date is valid")
        .and_hms_opt(0, 0, 0)
        .expect("sentinel time is valid")
});

/// Timestamp marking a record that has never been set.
pub fn default_record_time() -> NaiveDateTime {
    *DEFAULT_RECORD_TIME
}

/// An extreme value and the instant it was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueRecord {
    pub value: f64,
    pub time: NaiveDateTime,
}

impl Default for ValueRecord {
    fn default() -> Self {
        Self {
            value: 0.0,
            time: default_record_time(),
        }
    }
}

impl ValueRecord {
    pub fn new(value: f64, time: NaiveDateTime) -> Self {
        Self { value, time }
    }

    /// A record at or before the sentinel has never been set.
    pub fn is_set(&self) -> bool {
        self.time > default_record_time()
    }
}

/// All tracked extremes for one statistics period.
///
/// The daily periods (today, yesterday) leave the long-term fields at their
/// defaults; the station driver fills what it tracks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodRecords {
    pub high_temp: ValueRecord,
    pub low_temp: ValueRecord,
    pub high_humidity: ValueRecord,
    pub low_humidity: ValueRecord,
    pub high_pressure: ValueRecord,
    pub low_pressure: ValueRecord,
    pub high_dew_point: ValueRecord,
    pub low_dew_point: ValueRecord,
    pub high_apparent_temp: ValueRecord,
    pub low_apparent_temp: ValueRecord,
    pub high_feels_like: ValueRecord,
    pub low_feels_like: ValueRecord,
    pub high_humidex: ValueRecord,
    pub high_heat_index: ValueRecord,
    pub low_wind_chill: ValueRecord,
    pub high_gust: ValueRecord,
    pub high_wind_speed: ValueRecord,
    pub high_rain_rate: ValueRecord,
    pub high_hourly_rain: ValueRecord,
    pub high_daily_rain: ValueRecord,
    pub high_monthly_rain: ValueRecord,
    pub high_temp_range: ValueRecord,
    pub low_temp_range: ValueRecord,
    pub longest_dry_period: ValueRecord,
    pub longest_wet_period: ValueRecord,
}
