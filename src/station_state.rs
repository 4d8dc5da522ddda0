//! Live measurement state at the station-driver boundary.
//!
//! The station driver owns and refreshes this state; the rendering core only
//! ever reads a cloned snapshot of it.

use crate::records::{PeriodRecords, default_record_time};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

pub type SharedStation = Arc<RwLock<StationData>>;

/// Current sensor readings and derived values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentReadings {
    pub temperature: f64,
    pub indoor_temperature: f64,
    pub humidity: f64,
    pub indoor_humidity: f64,
    pub dew_point: f64,
    pub wind_chill: f64,
    pub heat_index: f64,
    pub apparent_temperature: f64,
    pub feels_like: f64,
    pub humidex: f64,
    pub temp_trend: f64,
    pub pressure: f64,
    pub pressure_trend: f64,
    pub wind_speed: f64,
    pub wind_latest: f64,
    pub wind_gust: f64,
    pub wind_bearing: f64,
    pub wind_bearing_avg: f64,
    pub wind_run: f64,
    pub rain_today: f64,
    pub rain_rate: f64,
    pub rain_month: f64,
    pub rain_year: f64,
    pub rain_last_hour: f64,
    pub rain_last_24h: f64,
    pub solar_radiation: f64,
    pub uv_index: f64,
    pub sunshine_hours: f64,
    pub extra_temperature: Vec<f64>,
    pub extra_humidity: Vec<f64>,
    pub extra_dew_point: Vec<f64>,
    pub soil_temperature: Vec<f64>,
    pub soil_moisture: Vec<f64>,
    pub leaf_wetness: Vec<f64>,
    pub pm2p5: f64,
    pub pm10: f64,
    pub lightning_distance: f64,
    pub lightning_strikes_today: u32,
    pub lightning_last_strike: NaiveDateTime,
    pub tx_battery_ok: Vec<bool>,
    pub console_battery: f64,
    pub update_time: NaiveDateTime,
}

impl Default for CurrentReadings {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            indoor_temperature: 0.0,
            humidity: 0.0,
            indoor_humidity: 0.0,
            dew_point: 0.0,
            wind_chill: 0.0,
            heat_index: 0.0,
            apparent_temperature: 0.0,
            feels_like: 0.0,
            humidex: 0.0,
            temp_trend: 0.0,
            pressure: 0.0,
            pressure_trend: 0.0,
            wind_speed: 0.0,
            wind_latest: 0.0,
            wind_gust: 0.0,
            wind_bearing: 0.0,
            wind_bearing_avg: 0.0,
            wind_run: 0.0,
            rain_today: 0.0,
            rain_rate: 0.0,
            rain_month: 0.0,
            rain_year: 0.0,
            rain_last_hour: 0.0,
            rain_last_24h: 0.0,
            solar_radiation: 0.0,
            uv_index: 0.0,
            sunshine_hours: 0.0,
            extra_temperature: vec![],
            extra_humidity: vec![],
            extra_dew_point: vec![],
            soil_temperature: vec![],
            soil_moisture: vec![],
            leaf_wetness: vec![],
            pm2p5: 0.0,
            pm10: 0.0,
            lightning_distance: 0.0,
            lightning_strikes_today: 0,
            lightning_last_strike: default_record_time(),
            tx_battery_ok: vec![],
            console_battery: 0.0,
            update_time: default_record_time(),
        }
    }
}

/// The full station snapshot: current readings plus the per-period record
/// tables the historical webtags read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationData {
    pub current: CurrentReadings,
    pub today: PeriodRecords,
    pub yesterday: PeriodRecords,
    pub this_month: PeriodRecords,
    pub this_year: PeriodRecords,
    pub all_time: PeriodRecords,
    /// All-time records per calendar month, January first.
    pub by_month: Vec<PeriodRecords>,
    pub forecast: String,
}

impl Default for StationData {
    fn default() -> Self {
        Self {
            current: CurrentReadings::default(),
            today: PeriodRecords::default(),
            yesterday: PeriodRecords::default(),
            this_month: PeriodRecords::default(),
            this_year: PeriodRecords::default(),
            all_time: PeriodRecords::default(),
            by_month: vec![PeriodRecords::default(); 12],
            forecast: String::new(),
        }
    }
}

impl StationData {
    pub fn new_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)
            .with_context(|| format!("cannot open state file {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);
        let mut ret: Self = serde_json::from_reader(reader)
            .with_context(|| format!("cannot parse state file {}", path.as_ref().display()))?;
        ret.by_month.resize_with(12, Default::default);
        Ok(ret)
    }

    /// All-time records for a calendar month (1-12); defaults for anything
    /// out of range so by-month tags render placeholders, never panic.
    pub fn month_records(&self, month: u32) -> PeriodRecords {
        self.by_month
            .get(month.saturating_sub(1) as usize)
            .cloned()
            .unwrap_or_default()
    }
}
