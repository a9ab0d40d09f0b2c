//! Log level vocabulary.

use crate::disambiguate::Disambiguator;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Syslog severity levels, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Emerg,
    Alert,
    Crit,
    Err,
    Warning,
    Notice,
    Info,
    Debug,
}

impl Level {
    /// Every level, in severity order.
    pub const ALL: [Level; 8] = [
        Level::Emerg,
        Level::Alert,
        Level::Crit,
        Level::Err,
        Level::Warning,
        Level::Notice,
        Level::Info,
        Level::Debug,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Emerg => "EMERG",
            Level::Alert => "ALERT",
            Level::Crit => "CRIT",
            Level::Err => "ERR",
            Level::Warning => "WARNING",
            Level::Notice => "NOTICE",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }

    /// Names of every level, in severity order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().map(Level::as_str)
    }

    /// Alternation of this level and every more severe one, for matching
    /// the level field of a log line.
    pub fn pattern(self) -> String {
        Self::ALL
            .into_iter()
            .filter(|level| *level <= self)
            .map(Level::as_str)
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    /// Accepts any case-insensitive prefix that names exactly one level.
    fn from_str(s: &str) -> Result<Self, String> {
        let name = Disambiguator::new(Self::names(), |s: &str| s.to_uppercase()).resolve(s);
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == name)
            .ok_or_else(|| {
                format!(
                    "invalid choice: '{}' (choose from {})",
                    s,
                    Self::names().collect::<Vec<_>>().join(", ")
                )
            })
    }
}
