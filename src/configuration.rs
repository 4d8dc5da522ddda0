//! Daemon configuration, loaded once at startup from a JSON file.

use crate::units::{DecimalSettings, Units};
use anyhow::{Result, anyhow};
use log::warn;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// One template to render: source file and output destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateJob {
    pub source: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Configuration {
    units: Units,
    decimals: DecimalSettings,
    location: String,
    long_location: String,
    latitude: String,
    longitude: String,
    altitude: String,
    station_id: String,
    templates: Vec<TemplateJob>,
    realtime_template: Option<TemplateJob>,
    realtime_interval_secs: u64,
    web_interval_secs: u64,
    record_timeout_hours: i64,
    decimal_separator: String,
    list_web_tags: bool,
    web_tag_file: PathBuf,
    state_file: PathBuf,
    current_conditions_file: Option<PathBuf>,
    snow_diary_file: Option<PathBuf>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            units: Units::default(),
            decimals: DecimalSettings::default(),
            location: String::new(),
            long_location: String::new(),
            latitude: String::new(),
            longitude: String::new(),
            altitude: String::new(),
            station_id: String::new(),
            templates: vec![],
            realtime_template: None,
            realtime_interval_secs: 15,
            web_interval_secs: 600,
            record_timeout_hours: 24,
            decimal_separator: ".".to_string(),
            list_web_tags: false,
            web_tag_file: PathBuf::from("webtags.txt"),
            state_file: PathBuf::from("state.json"),
            current_conditions_file: None,
            snow_diary_file: None,
        }
    }
}

impl Configuration {
    pub fn new_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)
            .map_err(|e| anyhow!("cannot open config file {}: {e}", path.as_ref().display()))?;
        let reader = BufReader::new(file);
        let j = serde_json::from_reader(reader)
            .map_err(|e| anyhow!("cannot parse config file {}: {e}", path.as_ref().display()))?;
        Self::new_from_json(j)
    }

    pub fn new_from_json(j: Value) -> Result<Self> {
        let mut ret: Self = Default::default();

        ret.units = Units::new(
            j["units"]["temperature"].as_str(),
            j["units"]["wind"].as_str(),
            j["units"]["pressure"].as_str(),
            j["units"]["rain"].as_str(),
        );
        ret.decimals = DecimalSettings::new(&ret.units);
        if let Some(o) = j["decimals"].as_object() {
            for (quantity, v) in o.iter() {
                match v.as_u64() {
                    Some(dp) => {
                        ret.decimals.set_override(quantity, dp as usize);
                    }
                    None => warn!("decimal override '{quantity}' is not a number, ignored"),
                }
            }
        }

        if let Some(s) = j["station"]["location"].as_str() {
            ret.location = s.to_string();
        }
        if let Some(s) = j["station"]["long_location"].as_str() {
            ret.long_location = s.to_string();
        }
        if let Some(s) = j["station"]["latitude"].as_str() {
            ret.latitude = s.to_string();
        }
        if let Some(s) = j["station"]["longitude"].as_str() {
            ret.longitude = s.to_string();
        }
        if let Some(s) = j["station"]["altitude"].as_str() {
            ret.altitude = s.to_string();
        }
        if let Some(s) = j["station"]["id"].as_str() {
            ret.station_id = s.to_string();
        }

        if let Some(a) = j["templates"].as_array() {
            for t in a.iter() {
                match (t["source"].as_str(), t["output"].as_str()) {
                    (Some(source), Some(output)) => ret.templates.push(TemplateJob {
                        source: PathBuf::from(source),
                        output: PathBuf::from(output),
                    }),
                    _ => return Err(anyhow!("template entry needs 'source' and 'output'")),
                }
            }
        }

        if let (Some(source), Some(output)) = (
            j["realtime"]["template"].as_str(),
            j["realtime"]["output"].as_str(),
        ) {
            ret.realtime_template = Some(TemplateJob {
                source: PathBuf::from(source),
                output: PathBuf::from(output),
            });
        }
        if let Some(i) = j["realtime"]["interval_secs"].as_u64() {
            ret.realtime_interval_secs = i.max(1);
        }
        if let Some(i) = j["web_interval_secs"].as_u64() {
            ret.web_interval_secs = i.max(1);
        }
        if let Some(i) = j["record_timeout_hours"].as_i64() {
            ret.record_timeout_hours = i;
        }
        if let Some(s) = j["decimal_separator"].as_str() {
            ret.decimal_separator = s.to_string();
        }
        if let Some(b) = j["list_web_tags"].as_bool() {
            ret.list_web_tags = b;
        }
        if let Some(s) = j["web_tag_file"].as_str() {
            ret.web_tag_file = PathBuf::from(s);
        }
        if let Some(s) = j["state_file"].as_str() {
            ret.state_file = PathBuf::from(s);
        }
        if let Some(s) = j["current_conditions_file"].as_str() {
            ret.current_conditions_file = Some(PathBuf::from(s));
        }
        if let Some(s) = j["snow_diary_file"].as_str() {
            ret.snow_diary_file = Some(PathBuf::from(s));
        }

        Ok(ret)
    }

    pub const fn units(&self) -> &Units {
        &self.units
    }

    pub const fn decimals(&self) -> &DecimalSettings {
        &self.decimals
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn long_location(&self) -> &str {
        &self.long_location
    }

    pub fn latitude(&self) -> &str {
        &self.latitude
    }

    pub fn longitude(&self) -> &str {
        &self.longitude
    }

    pub fn altitude(&self) -> &str {
        &self.altitude
    }

    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    pub fn templates(&self) -> &[TemplateJob] {
        &self.templates
    }

    pub const fn realtime_template(&self) -> &Option<TemplateJob> {
        &self.realtime_template
    }

    pub const fn realtime_interval_secs(&self) -> u64 {
        self.realtime_interval_secs
    }

    pub const fn web_interval_secs(&self) -> u64 {
        self.web_interval_secs
    }

    pub const fn record_timeout_hours(&self) -> i64 {
        self.record_timeout_hours
    }

    pub fn decimal_separator(&self) -> &str {
        &self.decimal_separator
    }

    pub const fn list_web_tags(&self) -> bool {
        self.list_web_tags
    }

    pub fn web_tag_file(&self) -> &Path {
        &self.web_tag_file
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    pub const fn current_conditions_file(&self) -> &Option<PathBuf> {
        &self.current_conditions_file
    }

    pub const fn snow_diary_file(&self) -> &Option<PathBuf> {
        &self.snow_diary_file
    }
}
