//! Webtags reading the current sensor values.

use crate::station_state::CurrentReadings;
use crate::tag_params::TagParams;
use crate::tag_registry::TagRegistry;
use crate::units::Measure;
use crate::value_format::{NO_TIME, format_timestamp};
use log::debug;

type CurrentField = fn(&CurrentReadings) -> f64;
type ChannelField = fn(&CurrentReadings) -> &[f64];

struct CurrentTagSpec {
    name: &'static str,
    measure: Measure,
    field: CurrentField,
}

const CURRENT_TAGS: &[CurrentTagSpec] = &[
    CurrentTagSpec { name: "temp", measure: Measure::Temperature, field: |c| c.temperature },
    CurrentTagSpec { name: "intemp", measure: Measure::Temperature, field: |c| c.indoor_temperature },
    CurrentTagSpec { name: "hum", measure: Measure::Humidity, field: |c| c.humidity },
    CurrentTagSpec { name: "inhum", measure: Measure::Humidity, field: |c| c.indoor_humidity },
    CurrentTagSpec { name: "dew", measure: Measure::Temperature, field: |c| c.dew_point },
    CurrentTagSpec { name: "wchill", measure: Measure::Temperature, field: |c| c.wind_chill },
    CurrentTagSpec { name: "heatindex", measure: Measure::Temperature, field: |c| c.heat_index },
    CurrentTagSpec { name: "apptemp", measure: Measure::Temperature, field: |c| c.apparent_temperature },
    CurrentTagSpec { name: "feelslike", measure: Measure::Temperature, field: |c| c.feels_like },
    CurrentTagSpec { name: "humidex", measure: Measure::Temperature, field: |c| c.humidex },
    CurrentTagSpec { name: "temptrend", measure: Measure::Temperature, field: |c| c.temp_trend },
    CurrentTagSpec { name: "press", measure: Measure::Pressure, field: |c| c.pressure },
    CurrentTagSpec { name: "presstrend", measure: Measure::Pressure, field: |c| c.pressure_trend },
    CurrentTagSpec { name: "wspeed", measure: Measure::Wind, field: |c| c.wind_speed },
    CurrentTagSpec { name: "wlatest", measure: Measure::Wind, field: |c| c.wind_latest },
    CurrentTagSpec { name: "wgust", measure: Measure::Wind, field: |c| c.wind_gust },
    CurrentTagSpec { name: "windrun", measure: Measure::WindRun, field: |c| c.wind_run },
    CurrentTagSpec { name: "bearing", measure: Measure::Degrees, field: |c| c.wind_bearing },
    CurrentTagSpec { name: "avgbearing", measure: Measure::Degrees, field: |c| c.wind_bearing_avg },
    CurrentTagSpec { name: "rfall", measure: Measure::Rain, field: |c| c.rain_today },
    CurrentTagSpec { name: "rrate", measure: Measure::RainRate, field: |c| c.rain_rate },
    CurrentTagSpec { name: "rmonth", measure: Measure::Rain, field: |c| c.rain_month },
    CurrentTagSpec { name: "ryear", measure: Measure::Rain, field: |c| c.rain_year },
    CurrentTagSpec { name: "rhour", measure: Measure::Rain, field: |c| c.rain_last_hour },
    CurrentTagSpec { name: "r24hour", measure: Measure::Rain, field: |c| c.rain_last_24h },
    CurrentTagSpec { name: "SolarRad", measure: Measure::Solar, field: |c| c.solar_radiation },
    CurrentTagSpec { name: "UV", measure: Measure::Uv, field: |c| c.uv_index },
    CurrentTagSpec { name: "sunshinehours", measure: Measure::Sunshine, field: |c| c.sunshine_hours },
    CurrentTagSpec { name: "pm2p5", measure: Measure::AirQuality, field: |c| c.pm2p5 },
    CurrentTagSpec { name: "pm10", measure: Measure::AirQuality, field: |c| c.pm10 },
    CurrentTagSpec { name: "LightningDistance", measure: Measure::Distance, field: |c| c.lightning_distance },
];

struct ChannelTagSpec {
    name: &'static str,
    measure: Measure,
    field: ChannelField,
}

// Multi-sensor readings selected with the 1-based `tx=` parameter.
const CHANNEL_TAGS: &[ChannelTagSpec] = &[
    ChannelTagSpec { name: "ExtraTemp", measure: Measure::Temperature, field: |c| &c.extra_temperature },
    ChannelTagSpec { name: "ExtraHum", measure: Measure::Humidity, field: |c| &c.extra_humidity },
    ChannelTagSpec { name: "ExtraDew", measure: Measure::Temperature, field: |c| &c.extra_dew_point },
    ChannelTagSpec { name: "SoilTemp", measure: Measure::Temperature, field: |c| &c.soil_temperature },
    ChannelTagSpec { name: "SoilMoisture", measure: Measure::Index, field: |c| &c.soil_moisture },
    ChannelTagSpec { name: "LeafWetness", measure: Measure::Index, field: |c| &c.leaf_wetness },
];

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// 16-point compass rose for a bearing in degrees.
pub(crate) fn compass_point(bearing: f64) -> &'static str {
    let bearing = bearing.rem_euclid(360.0);
    let index = (bearing / 22.5).round() as usize % 16;
    COMPASS_POINTS[index]
}

fn channel_value(values: &[f64], params: &TagParams) -> f64 {
    let tx = params.tx.unwrap_or(1);
    values.get(tx.saturating_sub(1)).copied().unwrap_or(0.0)
}

pub(crate) fn register(reg: &mut TagRegistry) {
    for spec in CURRENT_TAGS {
        let field = spec.field;
        let measure = spec.measure;
        reg.register(spec.name, move |params, ctx| {
            ctx.number(
                field(&ctx.station.current),
                measure.decimals(ctx.decimals()),
                params,
            )
        });
    }

    for spec in CHANNEL_TAGS {
        let field = spec.field;
        let measure = spec.measure;
        reg.register(spec.name, move |params, ctx| {
            ctx.number(
                channel_value(field(&ctx.station.current), params),
                measure.decimals(ctx.decimals()),
                params,
            )
        });
    }

    reg.register("wdir", |_params, ctx| {
        compass_point(ctx.station.current.wind_bearing).to_string()
    });
    reg.register("avgwdir", |_params, ctx| {
        compass_point(ctx.station.current.wind_bearing_avg).to_string()
    });

    reg.register("LightningStrikesToday", |_params, ctx| {
        ctx.station.current.lightning_strikes_today.to_string()
    });
    reg.register("LightningTime", |params, ctx| {
        let strike = ctx.station.current.lightning_last_strike;
        if strike > crate::records::default_record_time() {
            format_timestamp(&strike, params.format.as_deref(), "%H:%M")
        } else {
            NO_TIME.to_string()
        }
    });

    reg.register("txbattery", |params, ctx| {
        let channel = params.channel.unwrap_or(1);
        match ctx
            .station
            .current
            .tx_battery_ok
            .get(channel.saturating_sub(1))
        {
            Some(true) => "ok".to_string(),
            Some(false) => "low".to_string(),
            None => {
                debug!("txbattery: no such channel {channel}");
                String::new()
            }
        }
    });
    reg.register("ConsoleBattery", |params, ctx| {
        ctx.number(ctx.station.current.console_battery, 2, params)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Configuration;
    use crate::recent_store::RecentStore;
    use crate::render_context::RenderContext;
    use crate::snow_diary::SnowDiary;
    use crate::station_state::StationData;
    use chrono::NaiveDate;

    fn resolve(name: &str, invocation: &str, station: &StationData) -> String {
        resolve_with_config(name, invocation, station, &Configuration::default())
    }

    fn resolve_with_config(
        name: &str,
        invocation: &str,
        station: &StationData,
        config: &Configuration,
    ) -> String {
        let registry = TagRegistry::new();
        let recent = RecentStore::new();
        let diary = SnowDiary::new();
        let ctx = RenderContext {
            config,
            station,
            recent: &recent,
            diary: &diary,
            now: NaiveDate::from_ymd_opt(2026, 8, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        };
        let invocation = crate::tag_invocation::TagInvocation::new_from_text(invocation).unwrap();
        let params = TagParams::new_from_invocation(&invocation);
        let resolver = registry.resolve(name).expect("tag registered");
        resolver(&params, &ctx)
    }

    fn station() -> StationData {
        let mut data = StationData::default();
        data.current.temperature = 18.4;
        data.current.humidity = 72.0;
        data.current.pressure = 1013.2;
        data.current.wind_bearing = 247.0;
        data.current.extra_temperature = vec![10.1, 11.2, 12.3];
        data.current.tx_battery_ok = vec![true, false];
        data
    }

    #[test]
    fn test_temp_renders_one_decimal() {
        assert_eq!(resolve("temp", "temp", &station()), "18.4");
    }

    #[test]
    fn test_temp_rc_is_noop_with_period_separator() {
        assert_eq!(resolve("temp", "temp rc=y", &station()), "18.4");
    }

    #[test]
    fn test_temp_rc_with_comma_separator() {
        let config = Configuration::new_from_json(serde_json::json!({
            "decimal_separator": ","
        }))
        .unwrap();
        assert_eq!(
            resolve_with_config("temp", "temp", &station(), &config),
            "18,4"
        );
        assert_eq!(
            resolve_with_config("temp", "temp rc=y", &station(), &config),
            "18.4"
        );
    }

    #[test]
    fn test_humidity_integer() {
        assert_eq!(resolve("hum", "hum", &station()), "72");
    }

    #[test]
    fn test_compass_point() {
        assert_eq!(compass_point(0.0), "N");
        assert_eq!(compass_point(90.0), "E");
        assert_eq!(compass_point(247.0), "WSW");
        assert_eq!(compass_point(359.0), "N");
        assert_eq!(compass_point(-90.0), "W");
    }

    #[test]
    fn test_wdir() {
        assert_eq!(resolve("wdir", "wdir", &station()), "WSW");
    }

    #[test]
    fn test_extra_temp_channels() {
        assert_eq!(resolve("ExtraTemp", "ExtraTemp", &station()), "10.1");
        assert_eq!(resolve("ExtraTemp", "ExtraTemp tx=2", &station()), "11.2");
        // Out-of-range channel reads zero.
        assert_eq!(resolve("ExtraTemp", "ExtraTemp tx=9", &station()), "0.0");
    }

    #[test]
    fn test_txbattery() {
        assert_eq!(resolve("txbattery", "txbattery", &station()), "ok");
        assert_eq!(
            resolve("txbattery", "txbattery channel=2", &station()),
            "low"
        );
        assert_eq!(resolve("txbattery", "txbattery channel=9", &station()), "");
    }

    #[test]
    fn test_lightning_time_placeholder_without_strike() {
        assert_eq!(
            resolve("LightningTime", "LightningTime", &station()),
            "----"
        );
    }

    #[test]
    fn test_bearing_integer_degrees() {
        assert_eq!(resolve("bearing", "bearing", &station()), "247");
    }
}
