pub mod config;
pub mod remind;
pub mod ring;
pub mod session;

use std::path::Path;

use chrono::{Local, NaiveDate, NaiveDateTime};
use cupmate_core::reminder::parse_time_of_day;
use cupmate_core::Config;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Load the config from `--config`, or the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(p) => Config::load_from(p)?,
        None => Config::load()?,
    };
    Ok(config)
}

/// Combine optional `YYYY-MM-DD` and `HH:MM` arguments with the local clock.
pub fn resolve_now(
    date: Option<&str>,
    time: Option<&str>,
) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    let now = Local::now().naive_local();
    let date = match date {
        Some(d) => NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d")
            .map_err(|e| format!("invalid date '{d}': {e}"))?,
        None => now.date(),
    };
    let time = match time {
        Some(t) => parse_time_of_day(t).map_err(|e| format!("invalid time '{t}': {e}"))?,
        None => now.time(),
    };
    Ok(date.and_time(time))
}
