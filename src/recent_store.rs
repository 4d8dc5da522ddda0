//! Rolling time-series store backing the `Recent…` webtags.

use crate::station_state::CurrentReadings;
use chrono::{Duration, NaiveDateTime};
use std::collections::BTreeMap;

/// Samples older than this are pruned on every insert cycle.
pub const RETENTION_DAYS: i64 = 7;

/// One persisted reading, captured on the realtime cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecentSample {
    pub time: NaiveDateTime,
    pub temperature: f64,
    pub humidity: f64,
    pub dew_point: f64,
    pub wind_chill: f64,
    pub heat_index: f64,
    pub feels_like: f64,
    pub humidex: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_gust: f64,
    pub wind_latest: f64,
    pub wind_bearing: f64,
    pub wind_bearing_avg: f64,
    pub rain_today: f64,
    pub solar_radiation: f64,
    pub uv_index: f64,
}

impl RecentSample {
    /// Snapshot the live readings; also the fallback when a lookup finds no
    /// qualifying row.
    pub fn new_from_current(current: &CurrentReadings, time: NaiveDateTime) -> Self {
        Self {
            time,
            temperature: current.temperature,
            humidity: current.humidity,
            dew_point: current.dew_point,
            wind_chill: current.wind_chill,
            heat_index: current.heat_index,
            feels_like: current.feels_like,
            humidex: current.humidex,
            pressure: current.pressure,
            wind_speed: current.wind_speed,
            wind_gust: current.wind_gust,
            wind_latest: current.wind_latest,
            wind_bearing: current.wind_bearing,
            wind_bearing_avg: current.wind_bearing_avg,
            rain_today: current.rain_today,
            solar_radiation: current.solar_radiation,
            uv_index: current.uv_index,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecentStore {
    samples: BTreeMap<NaiveDateTime, RecentSample>,
}

impl RecentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sample: RecentSample) {
        self.samples.insert(sample.time, sample);
    }

    /// The first sample at or after `target` — the query behind every
    /// `Recent…` tag. None when nothing qualifies.
    pub fn first_at_or_after(&self, target: NaiveDateTime) -> Option<RecentSample> {
        self.samples.range(target..).next().map(|(_, s)| *s)
    }

    pub fn latest(&self) -> Option<RecentSample> {
        self.samples.values().next_back().copied()
    }

    pub fn prune(&mut self, now: NaiveDateTime) {
        let cutoff = now - Duration::days(RETENTION_DAYS);
        self.samples = self.samples.split_off(&cutoff);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
