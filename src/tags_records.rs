//! Historical-record webtags: one value tag and one `…Time` tag per tracked
//! extreme per statistics period, generated from a table rather than
//! hand-written per combination.

use crate::records::PeriodRecords;
use crate::records::ValueRecord;
use crate::station_state::StationData;
use crate::tag_registry::TagRegistry;
use crate::units::Measure;
use crate::value_format::{NO_DATE, NO_TIME};
use chrono::{Datelike, Duration};

type RecordSelector = fn(&PeriodRecords) -> ValueRecord;
type PeriodSelector = fn(&StationData) -> &PeriodRecords;

struct RecordTagSpec {
    stem: &'static str,
    measure: Measure,
    select: RecordSelector,
    /// Only tracked for month/year/all-time periods.
    long_term_only: bool,
}

const RECORD_TAGS: &[RecordTagSpec] = &[
    RecordTagSpec { stem: "TempH", measure: Measure::Temperature, select: |r| r.high_temp, long_term_only: false },
    RecordTagSpec { stem: "TempL", measure: Measure::Temperature, select: |r| r.low_temp, long_term_only: false },
    RecordTagSpec { stem: "HumH", measure: Measure::Humidity, select: |r| r.high_humidity, long_term_only: false },
    RecordTagSpec { stem: "HumL", measure: Measure::Humidity, select: |r| r.low_humidity, long_term_only: false },
    RecordTagSpec { stem: "PressH", measure: Measure::Pressure, select: |r| r.high_pressure, long_term_only: false },
    RecordTagSpec { stem: "PressL", measure: Measure::Pressure, select: |r| r.low_pressure, long_term_only: false },
    RecordTagSpec { stem: "DewH", measure: Measure::Temperature, select: |r| r.high_dew_point, long_term_only: false },
    RecordTagSpec { stem: "DewL", measure: Measure::Temperature, select: |r| r.low_dew_point, long_term_only: false },
    RecordTagSpec { stem: "AppTempH", measure: Measure::Temperature, select: |r| r.high_apparent_temp, long_term_only: false },
    RecordTagSpec { stem: "AppTempL", measure: Measure::Temperature, select: |r| r.low_apparent_temp, long_term_only: false },
    RecordTagSpec { stem: "FeelsLikeH", measure: Measure::Temperature, select: |r| r.high_feels_like, long_term_only: false },
    RecordTagSpec { stem: "FeelsLikeL", measure: Measure::Temperature, select: |r| r.low_feels_like, long_term_only: false },
    RecordTagSpec { stem: "HumidexH", measure: Measure::Temperature, select: |r| r.high_humidex, long_term_only: false },
    RecordTagSpec { stem: "HeatIndexH", measure: Measure::Temperature, select: |r| r.high_heat_index, long_term_only: false },
    RecordTagSpec { stem: "WindChillL", measure: Measure::Temperature, select: |r| r.low_wind_chill, long_term_only: false },
    RecordTagSpec { stem: "GustH", measure: Measure::Wind, select: |r| r.high_gust, long_term_only: false },
    RecordTagSpec { stem: "WindH", measure: Measure::Wind, select: |r| r.high_wind_speed, long_term_only: false },
    RecordTagSpec { stem: "RainRateH", measure: Measure::RainRate, select: |r| r.high_rain_rate, long_term_only: false },
    RecordTagSpec { stem: "HourlyRainH", measure: Measure::Rain, select: |r| r.high_hourly_rain, long_term_only: false },
    RecordTagSpec { stem: "DailyRainH", measure: Measure::Rain, select: |r| r.high_daily_rain, long_term_only: true },
    RecordTagSpec { stem: "MonthlyRainH", measure: Measure::Rain, select: |r| r.high_monthly_rain, long_term_only: true },
    RecordTagSpec { stem: "TempRangeH", measure: Measure::Temperature, select: |r| r.high_temp_range, long_term_only: true },
    RecordTagSpec { stem: "TempRangeL", measure: Measure::Temperature, select: |r| r.low_temp_range, long_term_only: true },
    RecordTagSpec { stem: "DryPeriod", measure: Measure::Days, select: |r| r.longest_dry_period, long_term_only: true },
    RecordTagSpec { stem: "WetPeriod", measure: Measure::Days, select: |r| r.longest_wet_period, long_term_only: true },
];

struct PeriodSpec {
    prefix: &'static str,
    select: PeriodSelector,
    long_term: bool,
    time_format: &'static str,
    time_placeholder: &'static str,
}

const PERIODS: &[PeriodSpec] = &[
    PeriodSpec {
        prefix: "today",
        select: |s| &s.today,
        long_term: false,
        time_format: "%H:%M",
        time_placeholder: NO_TIME,
    },
    PeriodSpec {
        prefix: "yday",
        select: |s| &s.yesterday,
        long_term: false,
        time_format: "%H:%M",
        time_placeholder: NO_TIME,
    },
    PeriodSpec {
        prefix: "month",
        select: |s| &s.this_month,
        long_term: true,
        time_format: "%H:%M on %d %B",
        time_placeholder: NO_DATE,
    },
    PeriodSpec {
        prefix: "year",
        select: |s| &s.this_year,
        long_term: true,
        time_format: "%H:%M on %d %B %Y",
        time_placeholder: NO_DATE,
    },
    PeriodSpec {
        prefix: "record",
        select: |s| &s.all_time,
        long_term: true,
        time_format: "%H:%M on %d %B %Y",
        time_placeholder: NO_DATE,
    },
];

struct NewRecordSpec {
    name: &'static str,
    records: &'static [RecordSelector],
}

// Freshness flags OR together a quantity's high and low all-time records.
const NEW_RECORD_TAGS: &[NewRecordSpec] = &[
    NewRecordSpec { name: "newRecordTemp", records: &[|r| r.high_temp, |r| r.low_temp] },
    NewRecordSpec { name: "newRecordHum", records: &[|r| r.high_humidity, |r| r.low_humidity] },
    NewRecordSpec { name: "newRecordPress", records: &[|r| r.high_pressure, |r| r.low_pressure] },
    NewRecordSpec { name: "newRecordDew", records: &[|r| r.high_dew_point, |r| r.low_dew_point] },
    NewRecordSpec { name: "newRecordAppTemp", records: &[|r| r.high_apparent_temp, |r| r.low_apparent_temp] },
    NewRecordSpec { name: "newRecordFeelsLike", records: &[|r| r.high_feels_like, |r| r.low_feels_like] },
    NewRecordSpec { name: "newRecordHumidex", records: &[|r| r.high_humidex] },
    NewRecordSpec { name: "newRecordHeatIndex", records: &[|r| r.high_heat_index] },
    NewRecordSpec { name: "newRecordWindChill", records: &[|r| r.low_wind_chill] },
    NewRecordSpec { name: "newRecordGust", records: &[|r| r.high_gust] },
    NewRecordSpec { name: "newRecordWind", records: &[|r| r.high_wind_speed] },
    NewRecordSpec { name: "newRecordRainRate", records: &[|r| r.high_rain_rate] },
    NewRecordSpec { name: "newRecordHourlyRain", records: &[|r| r.high_hourly_rain] },
    NewRecordSpec { name: "newRecordDailyRain", records: &[|r| r.high_daily_rain] },
    NewRecordSpec { name: "newRecordMonthlyRain", records: &[|r| r.high_monthly_rain] },
];

const BY_MONTH_TIME_FORMAT: &str = "%H:%M on %d %B %Y";

pub(crate) fn register(reg: &mut TagRegistry) {
    for period in PERIODS {
        for spec in RECORD_TAGS {
            if spec.long_term_only && !period.long_term {
                continue;
            }
            let select = spec.select;
            let period_select = period.select;
            let measure = spec.measure;
            reg.register(format!("{}{}", period.prefix, spec.stem), move |params, ctx| {
                ctx.record_value(select(period_select(ctx.station)), measure, params)
            });

            let time_format = period.time_format;
            let placeholder = period.time_placeholder;
            reg.register(
                format!("{}{}Time", period.prefix, spec.stem),
                move |params, ctx| {
                    ctx.record_time(
                        select(period_select(ctx.station)),
                        params,
                        time_format,
                        placeholder,
                    )
                },
            );
        }
    }

    // All-time records per calendar month, selected with `mon=` and falling
    // back to the current month.
    for spec in RECORD_TAGS {
        let select = spec.select;
        let measure = spec.measure;
        reg.register(format!("byMonth{}", spec.stem), move |params, ctx| {
            let month = params.mon.unwrap_or_else(|| ctx.now.month());
            ctx.record_value(select(&ctx.station.month_records(month)), measure, params)
        });
        reg.register(format!("byMonth{}Time", spec.stem), move |params, ctx| {
            let month = params.mon.unwrap_or_else(|| ctx.now.month());
            ctx.record_time(
                select(&ctx.station.month_records(month)),
                params,
                BY_MONTH_TIME_FORMAT,
                NO_DATE,
            )
        });
    }

    for spec in NEW_RECORD_TAGS {
        let records = spec.records;
        reg.register(spec.name, move |_params, ctx| {
            flag(is_fresh(records, ctx))
        });
    }
    reg.register("newRecord", |_params, ctx| {
        let fresh = NEW_RECORD_TAGS
            .iter()
            .any(|spec| is_fresh(spec.records, ctx));
        flag(fresh)
    });
}

fn is_fresh(records: &[RecordSelector], ctx: &crate::render_context::RenderContext) -> bool {
    let cutoff = ctx.now - Duration::hours(ctx.config.record_timeout_hours());
    records.iter().any(|select| {
        let record = select(&ctx.station.all_time);
        record.is_set() && record.time >= cutoff
    })
}

fn flag(set: bool) -> String {
    if set { "1" } else { "0" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Configuration;
    use crate::recent_store::RecentStore;
    use crate::render_context::RenderContext;
    use crate::snow_diary::SnowDiary;
    use crate::tag_invocation::TagInvocation;
    use crate::tag_params::TagParams;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn now() -> NaiveDateTime {
        ts(2026, 8, 1, 12, 0)
    }

    fn resolve(name: &str, invocation: &str, station: &StationData) -> String {
        let registry = TagRegistry::new();
        let config = Configuration::default();
        let recent = RecentStore::new();
        let diary = SnowDiary::new();
        let ctx = RenderContext {
            config: &config,
            station,
            recent: &recent,
            diary: &diary,
            now: now(),
        };
        let invocation = TagInvocation::new_from_text(invocation).unwrap();
        let params = TagParams::new_from_invocation(&invocation);
        let resolver = registry.resolve(name).expect("tag registered");
        resolver(&params, &ctx)
    }

    fn station() -> StationData {
        let mut data = StationData::default();
        data.today.high_temp = ValueRecord::new(24.6, ts(2026, 8, 1, 15, 4));
        data.today.low_temp = ValueRecord::new(11.2, ts(2026, 8, 1, 5, 30));
        data.all_time.high_temp = ValueRecord::new(38.7, ts(2019, 7, 25, 14, 56));
        data.by_month[4].high_temp = ValueRecord::new(27.1, ts(2012, 5, 27, 15, 10));
        data
    }

    #[test]
    fn test_today_high_temp_value_and_time() {
        let station = station();
        assert_eq!(resolve("todayTempH", "todayTempH", &station), "24.6");
        assert_eq!(resolve("todayTempHTime", "todayTempHTime", &station), "15:04");
    }

    #[test]
    fn test_time_format_override() {
        let station = station();
        assert_eq!(
            resolve(
                "todayTempHTime",
                r#"todayTempHTime format="%H.%M""#,
                &station
            ),
            "15.04"
        );
    }

    #[test]
    fn test_unset_record_placeholders() {
        let station = StationData::default();
        assert_eq!(resolve("todayTempH", "todayTempH", &station), "---");
        assert_eq!(resolve("todayTempHTime", "todayTempHTime", &station), "----");
        assert_eq!(resolve("recordTempH", "recordTempH", &station), "---");
        assert_eq!(
            resolve("recordTempHTime", "recordTempHTime", &station),
            "------"
        );
    }

    #[test]
    fn test_all_time_record_date_format() {
        let station = station();
        assert_eq!(
            resolve("recordTempHTime", "recordTempHTime", &station),
            "14:56 on 25 July 2019"
        );
    }

    #[test]
    fn test_by_month_with_mon_param() {
        let station = station();
        assert_eq!(
            resolve("byMonthTempH", "byMonthTempH mon=5", &station),
            "27.1"
        );
    }

    #[test]
    fn test_by_month_defaults_to_current_month() {
        let mut station = station();
        // Now is August; give August a record.
        station.by_month[7].high_temp = ValueRecord::new(33.3, ts(2003, 8, 10, 13, 0));
        assert_eq!(resolve("byMonthTempH", "byMonthTempH", &station), "33.3");
    }

    #[test]
    fn test_by_month_out_of_range_falls_back_to_current_month() {
        let mut station = station();
        station.by_month[7].high_temp = ValueRecord::new(33.3, ts(2003, 8, 10, 13, 0));
        assert_eq!(
            resolve("byMonthTempH", "byMonthTempH mon=14", &station),
            "33.3"
        );
    }

    #[test]
    fn test_by_month_unset_month_renders_placeholder() {
        let station = station();
        assert_eq!(
            resolve("byMonthTempH", "byMonthTempH mon=2", &station),
            "---"
        );
        assert_eq!(
            resolve("byMonthTempHTime", "byMonthTempHTime mon=2", &station),
            "------"
        );
    }

    #[test]
    fn test_daily_periods_skip_long_term_tags() {
        let registry = TagRegistry::new();
        assert!(registry.resolve("todayDryPeriod").is_none());
        assert!(registry.resolve("monthDryPeriod").is_some());
        assert!(registry.resolve("recordDailyRainH").is_some());
    }

    #[test]
    fn test_new_record_flag_fresh() {
        let mut station = StationData::default();
        station.all_time.high_temp = ValueRecord::new(38.7, ts(2026, 8, 1, 9, 0));
        assert_eq!(resolve("newRecordTemp", "newRecordTemp", &station), "1");
        assert_eq!(resolve("newRecord", "newRecord", &station), "1");
        assert_eq!(resolve("newRecordHum", "newRecordHum", &station), "0");
    }

    #[test]
    fn test_new_record_flag_stale() {
        let station = station(); // all-time record from 2019
        assert_eq!(resolve("newRecordTemp", "newRecordTemp", &station), "0");
        assert_eq!(resolve("newRecord", "newRecord", &station), "0");
    }

    #[test]
    fn test_new_record_flag_or_of_high_and_low() {
        let mut station = StationData::default();
        station.all_time.low_temp = ValueRecord::new(-15.0, ts(2026, 8, 1, 3, 0));
        assert_eq!(resolve("newRecordTemp", "newRecordTemp", &station), "1");
    }

    #[test]
    fn test_unset_record_is_never_fresh() {
        let station = StationData::default();
        assert_eq!(resolve("newRecord", "newRecord", &station), "0");
    }
}
