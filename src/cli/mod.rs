//! CLI definition for logfilter
//!
//! Options left unset fall back to the settings resolved for each file.

use crate::config::FlatSettings;
use crate::level::Level;
use clap::Parser;
use std::path::PathBuf;

/// Filter some logs based on date and log level.
#[derive(Parser, Debug)]
#[command(
    name = "logfilter",
    version,
    about = "Filter some logs based on date and log level.",
    long_about = None
)]
pub struct Cli {
    /// Filter FILE(s), or the configured default logfiles
    #[arg(value_name = "FILE")]
    pub logfiles: Vec<PathBuf>,

    /// Filter logs older than DATE
    #[arg(short, long, value_name = "DATE")]
    pub after: Option<String>,

    /// Filter logs newer than DATE
    #[arg(short, long, value_name = "DATE")]
    pub before: Option<String>,

    /// Don't print headers giving file names
    #[arg(long, overrides_with = "no_batch")]
    pub batch: bool,

    /// Print headers giving file names
    #[arg(long, overrides_with = "batch")]
    pub no_batch: bool,

    /// Filter logs below LEVEL (EMERG, ALERT, CRIT, ERR, WARNING, NOTICE, INFO, DEBUG)
    #[arg(short, long, value_name = "LEVEL", value_parser = parse_level)]
    pub level: Option<Level>,

    /// Print the resolved settings for each file as JSON instead of filtering
    #[arg(long)]
    pub show_config: bool,
}

fn parse_level(s: &str) -> Result<Level, String> {
    s.parse()
}

impl Cli {
    /// Batch mode from the command line, if either flag was given.
    pub fn batch(&self) -> Option<bool> {
        match (self.batch, self.no_batch) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Command-line options as raw settings, to be laid over each file's
    /// resolved values before they are interpreted.
    pub fn overrides(&self) -> FlatSettings {
        let mut values = FlatSettings::new();
        if let Some(after) = &self.after {
            values.insert("after".to_string(), after.clone());
        }
        if let Some(before) = &self.before {
            values.insert("before".to_string(), before.clone());
        }
        if let Some(batch) = self.batch() {
            let value = if batch { "1" } else { "0" };
            values.insert("batch".to_string(), value.to_string());
        }
        if let Some(level) = self.level {
            values.insert("level".to_string(), level.as_str().to_string());
        }
        values
    }
}
