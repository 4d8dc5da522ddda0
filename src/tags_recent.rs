//! Recent-history webtags: values as they were `d=`/`h=`/`m=` ago, served
//! from the rolling sample store with a live-value fallback.

use crate::recent_store::RecentSample;
use crate::render_context::RenderContext;
use crate::tag_params::TagParams;
use crate::tag_registry::TagRegistry;
use crate::tags_current::compass_point;
use crate::units::Measure;
use crate::value_format::format_timestamp;
use chrono::Duration;

type SampleField = fn(&RecentSample) -> f64;

struct RecentTagSpec {
    name: &'static str,
    measure: Measure,
    field: SampleField,
}

const RECENT_TAGS: &[RecentTagSpec] = &[
    RecentTagSpec { name: "RecentTemp", measure: Measure::Temperature, field: |s| s.temperature },
    RecentTagSpec { name: "RecentHum", measure: Measure::Humidity, field: |s| s.humidity },
    RecentTagSpec { name: "RecentDewPoint", measure: Measure::Temperature, field: |s| s.dew_point },
    RecentTagSpec { name: "RecentWindChill", measure: Measure::Temperature, field: |s| s.wind_chill },
    RecentTagSpec { name: "RecentHeatIndex", measure: Measure::Temperature, field: |s| s.heat_index },
    RecentTagSpec { name: "RecentFeelsLike", measure: Measure::Temperature, field: |s| s.feels_like },
    RecentTagSpec { name: "RecentHumidex", measure: Measure::Temperature, field: |s| s.humidex },
    RecentTagSpec { name: "RecentPress", measure: Measure::Pressure, field: |s| s.pressure },
    RecentTagSpec { name: "RecentWindSpeed", measure: Measure::Wind, field: |s| s.wind_speed },
    RecentTagSpec { name: "RecentWindGust", measure: Measure::Wind, field: |s| s.wind_gust },
    RecentTagSpec { name: "RecentWindLatest", measure: Measure::Wind, field: |s| s.wind_latest },
    RecentTagSpec { name: "RecentWindBearing", measure: Measure::Degrees, field: |s| s.wind_bearing },
    RecentTagSpec { name: "RecentWindAvgBearing", measure: Measure::Degrees, field: |s| s.wind_bearing_avg },
    RecentTagSpec { name: "RecentRainToday", measure: Measure::Rain, field: |s| s.rain_today },
    RecentTagSpec { name: "RecentSolarRad", measure: Measure::Solar, field: |s| s.solar_radiation },
    RecentTagSpec { name: "RecentUV", measure: Measure::Uv, field: |s| s.uv_index },
];

/// The sample behind every `Recent…` tag: first row at or after the target
/// instant, else the current live readings.
fn recent_sample(params: &TagParams, ctx: &RenderContext) -> RecentSample {
    let target = ctx.now - Duration::minutes(params.minutes_ago() as i64);
    match ctx.recent.first_at_or_after(target) {
        Some(sample) => sample,
        None => RecentSample::new_from_current(&ctx.station.current, ctx.now),
    }
}

pub(crate) fn register(reg: &mut TagRegistry) {
    for spec in RECENT_TAGS {
        let field = spec.field;
        let measure = spec.measure;
        reg.register(spec.name, move |params, ctx| {
            let sample = recent_sample(params, ctx);
            ctx.number(field(&sample), measure.decimals(ctx.decimals()), params)
        });
    }

    reg.register("RecentWindDir", |params, ctx| {
        compass_point(recent_sample(params, ctx).wind_bearing).to_string()
    });
    reg.register("RecentWindAvgDir", |params, ctx| {
        compass_point(recent_sample(params, ctx).wind_bearing_avg).to_string()
    });
    reg.register("RecentTS", |params, ctx| {
        let sample = recent_sample(params, ctx);
        format_timestamp(&sample.time, params.format.as_deref(), "%Y-%m-%d %H:%M")
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Configuration;
    use crate::recent_store::RecentStore;
    use crate::snow_diary::SnowDiary;
    use crate::station_state::{CurrentReadings, StationData};
    use crate::tag_invocation::TagInvocation;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 1)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn sample_at(time: NaiveDateTime, temperature: f64) -> RecentSample {
        RecentSample {
            temperature,
            ..RecentSample::new_from_current(&CurrentReadings::default(), time)
        }
    }

    fn resolve(invocation: &str, station: &StationData, recent: &RecentStore) -> String {
        let registry = TagRegistry::new();
        let config = Configuration::default();
        let diary = SnowDiary::new();
        let ctx = RenderContext {
            config: &config,
            station,
            recent,
            diary: &diary,
            now: ts(12, 0),
        };
        let invocation = TagInvocation::new_from_text(invocation).unwrap();
        let params = TagParams::new_from_invocation(&invocation);
        let resolver = registry.resolve(invocation.name()).expect("tag registered");
        resolver(&params, &ctx)
    }

    #[test]
    fn test_recent_temp_finds_closest_newer_row() {
        // Target 30 minutes ago; only row is 29 minutes ago.
        let mut recent = RecentStore::new();
        recent.add(sample_at(ts(11, 31), 17.5));
        let station = StationData::default();
        assert_eq!(resolve("RecentTemp m=30", &station, &recent), "17.5");
    }

    #[test]
    fn test_recent_temp_falls_back_to_live_value() {
        let mut recent = RecentStore::new();
        recent.add(sample_at(ts(9, 0), 14.0));
        let mut station = StationData::default();
        station.current.temperature = 18.4;
        // Nothing at or after 11:00, so the live value wins.
        assert_eq!(resolve("RecentTemp h=1", &station, &recent), "18.4");
    }

    #[test]
    fn test_recent_temp_empty_store_falls_back_to_live_value() {
        let recent = RecentStore::new();
        let mut station = StationData::default();
        station.current.temperature = 18.4;
        assert_eq!(resolve("RecentTemp m=30", &station, &recent), "18.4");
    }

    #[test]
    fn test_recent_offsets_combine() {
        let mut recent = RecentStore::new();
        recent.add(sample_at(ts(10, 30), 15.0));
        recent.add(sample_at(ts(11, 45), 17.0));
        let station = StationData::default();
        // h=1 m=30 -> target 10:30, exact hit.
        assert_eq!(resolve("RecentTemp h=1 m=30", &station, &recent), "15.0");
    }

    #[test]
    fn test_recent_ts_formats_sample_time() {
        let mut recent = RecentStore::new();
        recent.add(sample_at(ts(11, 31), 17.5));
        let station = StationData::default();
        assert_eq!(
            resolve("RecentTS m=30", &station, &recent),
            "2026-08-01 11:31"
        );
        assert_eq!(
            resolve(r#"RecentTS m=30 format="%H:%M""#, &station, &recent),
            "11:31"
        );
    }

    #[test]
    fn test_recent_ts_fallback_uses_now() {
        let recent = RecentStore::new();
        let station = StationData::default();
        assert_eq!(
            resolve(r#"RecentTS m=30 format="%H:%M""#, &station, &recent),
            "12:00"
        );
    }

    #[test]
    fn test_recent_wind_dir_compass() {
        let mut recent = RecentStore::new();
        let mut sample = sample_at(ts(11, 31), 17.5);
        sample.wind_bearing = 90.0;
        recent.add(sample);
        let station = StationData::default();
        assert_eq!(resolve("RecentWindDir m=30", &station, &recent), "E");
    }

    #[test]
    fn test_bad_offset_parses_as_now() {
        // d=oops contributes zero; target is now, nothing at or after it,
        // fall back to live.
        let mut recent = RecentStore::new();
        recent.add(sample_at(ts(11, 0), 15.0));
        let mut station = StationData::default();
        station.current.temperature = 21.0;
        assert_eq!(resolve("RecentTemp d=oops", &station, &recent), "21.0");
    }
}
