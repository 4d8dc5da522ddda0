//! nimbus: a weather station data collection and web publishing daemon.
//!
//! The core is the webtag engine: text templates containing `<#tagname
//! param=value ...>` placeholders are rendered against live station state
//! and written to web pages, a short-period realtime file, or whatever else
//! the caller does with the string. Rendering is a single linear pass, free
//! of side effects, so the same machinery serves every output.

pub mod configuration;
pub mod main_commands;
pub mod publisher;
pub mod recent_store;
pub mod records;
pub mod render_context;
pub mod snow_diary;
pub mod station_state;
pub mod tag_invocation;
pub mod tag_params;
pub mod tag_registry;
pub mod tags_current;
pub mod tags_misc;
pub mod tags_recent;
pub mod tags_records;
pub mod template_renderer;
pub mod units;
pub mod value_format;
