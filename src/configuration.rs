use std::{env, fs, path::Path};

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::{error::Error, types::PeriodUnit};

pub const DEFAULT_LABEL_SEPARATOR: &str = " / ";

const TIME_ZONE_OFFSET_KEY: &str = "STATS_TIME_ZONE_OFFSET";
const LABEL_SEPARATOR_KEY: &str = "STATS_LABEL_SEPARATOR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Site time zone; period dates on the wire are wall-clock times in it.
    pub time_zone: FixedOffset,
    pub label_separator: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_zone: Utc.fix(),
            label_separator: DEFAULT_LABEL_SEPARATOR.to_owned(),
        }
    }
}

impl Config {
    pub fn with_time_zone(mut self, time_zone: FixedOffset) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn with_label_separator(mut self, separator: &str) -> Self {
        self.label_separator = separator.to_owned();
        self
    }
}

/// Per-request parameters that never appear in the payload itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeContext {
    pub config: Config,
    pub unit: PeriodUnit,
    /// Nominal anchor of the request, used as the record's period end date.
    pub period_end_date: DateTime<Utc>,
}

impl DecodeContext {
    pub fn new(config: Config, unit: PeriodUnit, period_end_date: DateTime<Utc>) -> DecodeContext {
        DecodeContext {
            config,
            unit,
            period_end_date,
        }
    }

    pub fn time_zone(&self) -> FixedOffset {
        self.config.time_zone
    }
}

/// Reads the configuration from the process environment. Both keys are
/// required.
pub fn get_configuration() -> Result<Config, Error> {
    let offset: i32 = env::var(TIME_ZONE_OFFSET_KEY)?.parse()?;
    let label_separator = env::var(LABEL_SEPARATOR_KEY)?;

    Ok(Config {
        time_zone: parse_time_zone(offset)?,
        label_separator,
    })
}

pub fn load_configuration<P: AsRef<Path>>(path: P) -> Result<Config, Error> {
    let config_string = fs::read_to_string(path)?;
    parse_config_string(&config_string)
}

/// Parses `KEY=VALUE` lines on top of the defaults. Unknown keys are ignored
/// so the same file can be shared with the host application.
pub fn parse_config_string(config: &str) -> Result<Config, Error> {
    let params = config
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim_start().starts_with('#'))
        .filter_map(|line| line.split_once('='));

    let mut result = Config::default();

    for (key, value) in params {
        match key.trim() {
            TIME_ZONE_OFFSET_KEY => {
                let offset: i32 = value.trim().parse()?;
                result.time_zone = parse_time_zone(offset)?;
            },
            LABEL_SEPARATOR_KEY => {
                result.label_separator = value.to_owned();
            },
            _ => {},
        }
    }

    Ok(result)
}

fn parse_time_zone(seconds_east: i32) -> Result<FixedOffset, Error> {
    FixedOffset::east_opt(seconds_east).ok_or_else(|| {
        Error::ConfigurationError(format!("time zone offset out of range: {}", seconds_east))
    })
}
