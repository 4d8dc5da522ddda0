//! Station identity, unit text, date/time, forecast and snow webtags.

use crate::records::default_record_time;
use crate::tag_registry::TagRegistry;
use crate::value_format::{NO_TIME, format_timestamp};
use log::warn;

const DEFAULT_TIME_FORMAT: &str = "%H:%M on %d %B %Y";

fn encode(text: &str) -> String {
    html_escape::encode_safe(text).into_owned()
}

fn current_conditions(ctx: &crate::render_context::RenderContext) -> String {
    let path = match ctx.config.current_conditions_file() {
        Some(path) => path,
        None => return String::new(),
    };
    match std::fs::read_to_string(path) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("cannot read current conditions {}: {e}", path.display());
            String::new()
        }
    }
}

pub(crate) fn register(reg: &mut TagRegistry) {
    // Time and date; the explicitly time-dependent tags.
    reg.register("time", |params, ctx| {
        format_timestamp(&ctx.now, params.format.as_deref(), DEFAULT_TIME_FORMAT)
    });
    reg.register("timehhmmss", |_params, ctx| {
        format_timestamp(&ctx.now, None, "%H:%M:%S")
    });
    reg.register("date", |params, ctx| {
        format_timestamp(&ctx.now, params.format.as_deref(), "%d/%m/%Y")
    });
    reg.register("day", |_params, ctx| format_timestamp(&ctx.now, None, "%d"));
    reg.register("dayname", |_params, ctx| {
        format_timestamp(&ctx.now, None, "%A")
    });
    reg.register("month", |_params, ctx| {
        format_timestamp(&ctx.now, None, "%m")
    });
    reg.register("monthname", |_params, ctx| {
        format_timestamp(&ctx.now, None, "%B")
    });
    reg.register("year", |_params, ctx| format_timestamp(&ctx.now, None, "%Y"));
    reg.register("shortyear", |_params, ctx| {
        format_timestamp(&ctx.now, None, "%y")
    });

    // Last station data read.
    reg.register("update", |params, ctx| {
        let update = ctx.station.current.update_time;
        if update > default_record_time() {
            format_timestamp(&update, params.format.as_deref(), DEFAULT_TIME_FORMAT)
        } else {
            NO_TIME.to_string()
        }
    });

    // Unit text straight from configuration.
    reg.register("tempunit", |_params, ctx| {
        ctx.config.units().temperature.label().to_string()
    });
    reg.register("tempunitnodeg", |_params, ctx| {
        ctx.config.units().temperature.label_no_degree().to_string()
    });
    reg.register("pressunit", |_params, ctx| {
        ctx.config.units().pressure.label().to_string()
    });
    reg.register("windunit", |_params, ctx| {
        ctx.config.units().wind.label().to_string()
    });
    reg.register("windrununit", |_params, ctx| {
        ctx.config.units().wind.run_label().to_string()
    });
    reg.register("rainunit", |_params, ctx| {
        ctx.config.units().rain.label().to_string()
    });

    // Station identity.
    reg.register("location", |_params, ctx| {
        ctx.config.location().to_string()
    });
    reg.register("locationenc", |_params, ctx| encode(ctx.config.location()));
    reg.register("longlocation", |_params, ctx| {
        ctx.config.long_location().to_string()
    });
    reg.register("latitude", |_params, ctx| {
        ctx.config.latitude().to_string()
    });
    reg.register("longitude", |_params, ctx| {
        ctx.config.longitude().to_string()
    });
    reg.register("altitude", |_params, ctx| {
        ctx.config.altitude().to_string()
    });
    reg.register("stationid", |_params, ctx| {
        ctx.config.station_id().to_string()
    });

    // Config echo.
    reg.register("interval", |_params, ctx| {
        ctx.config.web_interval_secs().to_string()
    });
    reg.register("realtimeinterval", |_params, ctx| {
        ctx.config.realtime_interval_secs().to_string()
    });
    reg.register("version", |_params, _ctx| {
        env!("CARGO_PKG_VERSION").to_string()
    });

    // Free text, plain and HTML-encoded.
    reg.register("forecast", |_params, ctx| ctx.station.forecast.clone());
    reg.register("forecastenc", |_params, ctx| encode(&ctx.station.forecast));
    reg.register("currcond", |_params, ctx| current_conditions(ctx));
    reg.register("currcondenc", |_params, ctx| {
        encode(&current_conditions(ctx))
    });

    // Snow diary, keyed by the render date.
    reg.register("snowdepth", |params, ctx| {
        let entry = ctx.diary.entry_for(ctx.now.date());
        ctx.number(entry.depth, 0, params)
    });
    reg.register("snowlying", |_params, ctx| {
        let entry = ctx.diary.entry_for(ctx.now.date());
        if entry.lying { "1" } else { "0" }.to_string()
    });
    reg.register("snowfalling", |_params, ctx| {
        let entry = ctx.diary.entry_for(ctx.now.date());
        if entry.falling { "1" } else { "0" }.to_string()
    });
}
