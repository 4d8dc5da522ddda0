//! Read-only state handed to every webtag resolver for one render pass.

use crate::configuration::Configuration;
use crate::recent_store::RecentStore;
use crate::records::ValueRecord;
use crate::snow_diary::SnowDiary;
use crate::station_state::StationData;
use crate::tag_params::TagParams;
use crate::units::{DecimalSettings, Measure};
use crate::value_format;
use chrono::NaiveDateTime;

/// Everything a resolver may read. Assembled once per render from a cloned
/// station snapshot, so a single render is internally consistent even while
/// the station driver keeps updating the live state.
pub struct RenderContext<'a> {
    pub config: &'a Configuration,
    pub station: &'a StationData,
    pub recent: &'a RecentStore,
    pub diary: &'a SnowDiary,
    /// Fixed at render start; every time-dependent tag in one pass agrees.
    pub now: NaiveDateTime,
}

impl RenderContext<'_> {
    pub fn decimals(&self) -> &DecimalSettings {
        self.config.decimals()
    }

    /// Format a live numeric value per the tag parameters.
    pub fn number(&self, value: f64, default_dp: usize, params: &TagParams) -> String {
        let dp = params.dp.unwrap_or(default_dp);
        let mut formatted =
            value_format::format_value(value, dp, params.tc, self.config.decimal_separator());
        if params.rc {
            formatted = value_format::commas_to_periods(&formatted);
        }
        formatted
    }

    /// Format a record's value, or the placeholder when it was never set.
    pub fn record_value(&self, record: ValueRecord, measure: Measure, params: &TagParams) -> String {
        if record.is_set() {
            self.number(record.value, measure.decimals(self.decimals()), params)
        } else {
            value_format::NO_VALUE.to_string()
        }
    }

    /// Format a record's timestamp, or the tag's placeholder when it was
    /// never set.
    pub fn record_time(
        &self,
        record: ValueRecord,
        params: &TagParams,
        default_fmt: &str,
        placeholder: &str,
    ) -> String {
        if record.is_set() {
            value_format::format_timestamp(&record.time, params.format.as_deref(), default_fmt)
        } else {
            placeholder.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::default_record_time;
    use chrono::NaiveDate;

    fn ts(h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 1)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    struct Fixture {
        config: Configuration,
        station: StationData,
        recent: RecentStore,
        diary: SnowDiary,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                config: Configuration::default(),
                station: StationData::default(),
                recent: RecentStore::new(),
                diary: SnowDiary::new(),
            }
        }

        fn ctx(&self) -> RenderContext<'_> {
            RenderContext {
                config: &self.config,
                station: &self.station,
                recent: &self.recent,
                diary: &self.diary,
                now: ts(12, 0),
            }
        }
    }

    #[test]
    fn test_number_uses_default_dp() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        assert_eq!(ctx.number(18.44, 1, &TagParams::default()), "18.4");
    }

    #[test]
    fn test_number_dp_override() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        let params = TagParams {
            dp: Some(3),
            ..Default::default()
        };
        assert_eq!(ctx.number(18.44, 1, &params), "18.440");
    }

    #[test]
    fn test_number_rc_converts_comma_separator() {
        let mut fixture = Fixture::new();
        fixture.config = Configuration::new_from_json(serde_json::json!({
            "decimal_separator": ","
        }))
        .unwrap();
        let ctx = fixture.ctx();
        assert_eq!(ctx.number(18.4, 1, &TagParams::default()), "18,4");
        let params = TagParams {
            rc: true,
            ..Default::default()
        };
        assert_eq!(ctx.number(18.4, 1, &params), "18.4");
    }

    #[test]
    fn test_record_value_placeholder_when_unset() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        let unset = ValueRecord::default();
        assert_eq!(
            ctx.record_value(unset, Measure::Temperature, &TagParams::default()),
            "---"
        );
    }

    #[test]
    fn test_record_time_placeholder_when_unset() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        let unset = ValueRecord::new(1.0, default_record_time());
        assert_eq!(
            ctx.record_time(unset, &TagParams::default(), "%H:%M", "----"),
            "----"
        );
    }

    #[test]
    fn test_record_time_formats_when_set() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx();
        let record = ValueRecord::new(25.0, ts(15, 4));
        assert_eq!(
            ctx.record_time(record, &TagParams::default(), "%H:%M", "----"),
            "15:04"
        );
    }
}
