//! Typed webtag parameters, converted once from the raw string pairs so
//! resolvers never re-parse strings.

use crate::tag_invocation::TagInvocation;
use log::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagParams {
    /// Date/time format override (`format=`), validated at use.
    pub format: Option<String>,
    /// Decimal places override (`dp=`).
    pub dp: Option<usize>,
    /// Force comma-to-period replacement (`rc=y`).
    pub rc: bool,
    /// Truncate instead of round (`tc=y`).
    pub tc: bool,
    /// Calendar month selector 1-12 (`mon=`); None falls back to the current month.
    pub mon: Option<u32>,
    /// Recent-history offsets (`d=`, `h=`, `m=`).
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    /// Extra-sensor channel (`tx=`), 1-based.
    pub tx: Option<usize>,
    /// Battery-status channel (`channel=`), 1-based.
    pub channel: Option<usize>,
}

impl TagParams {
    pub fn new_from_invocation(invocation: &TagInvocation) -> Self {
        let tag = invocation.name();
        let mut ret = Self::default();
        for (key, value) in invocation.params() {
            match key.as_str() {
                "format" => ret.format = Some(value.clone()),
                "dp" => ret.dp = parse_or_warn(tag, "dp", value),
                "rc" => ret.rc = is_yes(value),
                "tc" => ret.tc = is_yes(value),
                "mon" => ret.mon = parse_month(tag, value),
                "d" => ret.days = parse_or_warn(tag, "d", value).unwrap_or(0),
                "h" => ret.hours = parse_or_warn(tag, "h", value).unwrap_or(0),
                "m" => ret.minutes = parse_or_warn(tag, "m", value).unwrap_or(0),
                "tx" => ret.tx = parse_or_warn(tag, "tx", value),
                "channel" => ret.channel = parse_or_warn(tag, "channel", value),
                _ => debug!("webtag '{tag}': unrecognised parameter '{key}' ignored"),
            }
        }
        ret
    }

    /// Total minutes-ago offset for recent-history lookups.
    pub const fn minutes_ago(&self) -> u64 {
        self.days * 1440 + self.hours * 60 + self.minutes
    }
}

fn is_yes(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("y")
}

fn parse_or_warn<T: std::str::FromStr>(tag: &str, key: &str, value: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("webtag '{tag}': cannot parse {key}='{value}', using default");
            None
        }
    }
}

fn parse_month(tag: &str, value: &str) -> Option<u32> {
    match parse_or_warn::<u32>(tag, "mon", value) {
        Some(m) if (1..=12).contains(&m) => Some(m),
        Some(m) => {
            warn!("webtag '{tag}': month {m} out of range, using current month");
            None
        }
        None => None,
    }
}
