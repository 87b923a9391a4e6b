use std::{fmt, str::FromStr};

use clap::ArgMatches;

/// Minimum level of messages that will be logged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel {
    pub level: usize,
}

impl FromStr for LogLevel {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel { level: 0 }),
            "warn" => Ok(LogLevel { level: 1 }),
            "info" => Ok(LogLevel { level: 2 }),
            "debug" => Ok(LogLevel { level: 3 }),
            "trace" => Ok(LogLevel { level: 4 }),
            "none" => Ok(LogLevel { level: 5 }),
            _ => Err("expected one of error, warn, info, debug, trace, none"),
        }
    }
}

impl LogLevel {
    pub fn is_none(&self) -> bool {
        self.level > 4
    }

    pub fn get_level(&self) -> usize {
        if self.is_none() {
            0
        } else {
            self.level
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let level_str = ["error", "warn", "info", "debug", "trace", "none"];
        match level_str.get(self.level) {
            Some(s) => write!(f, "{s}"),
            None => write!(f, "unknown"),
        }
    }
}

/// Initialize stderr logging from the `loglevel` and `quiet` options
pub fn init_log(m: &ArgMatches) -> Result<(), log::SetLoggerError> {
    let verbose = m
        .get_one::<LogLevel>("loglevel")
        .copied()
        .unwrap_or(LogLevel { level: 1 });
    let quiet = verbose.is_none() || m.get_flag("quiet");

    stderrlog::new()
        .quiet(quiet)
        .verbosity(verbose.get_level())
        .init()
}
