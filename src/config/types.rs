//! Built-in defaults and the typed view of resolved settings.

use super::flat::FlatSettings;
use crate::error::{ConfigError, ConfigResult};
use crate::level::Level;
use serde::Serialize;

/// Built-in values, the lowest-precedence configuration layer.
pub const BUILTIN_DEFAULTS: [(&str, &str); 7] = [
    ("after", "today-3days"),
    ("before", "today+1day"),
    ("batch", "0"),
    ("datefmt", "+%Y-%m-%d"),
    ("level", "INFO"),
    ("logfiles", "~/.log/*.log"),
    ("program", "$1 > after && $1 <= before && $3 ~ level"),
];

/// The built-in defaults as a mapping.
pub fn builtin_defaults() -> FlatSettings {
    BUILTIN_DEFAULTS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn builtin(key: &str) -> &'static str {
    BUILTIN_DEFAULTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or_default()
}

/// Interpret a configuration string as a boolean.
///
/// `1`, `yes`, `true` and `on` are true; `0`, `no`, `false` and `off` are
/// false (any case). Anything else is true unless it is empty.
pub fn convert_boolean(value: &str) -> bool {
    match value.to_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => true,
        "0" | "no" | "false" | "off" => false,
        other => !other.is_empty(),
    }
}

/// Settings that control how one log file is filtered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSettings {
    /// Keep lines newer than this `date --date` expression.
    pub after: String,
    /// Keep lines no newer than this `date --date` expression.
    pub before: String,
    /// Skip the per-file headers.
    pub batch: bool,
    /// Output format passed to `date`, including the leading `+`.
    pub datefmt: String,
    /// Least severe level to keep.
    pub level: Level,
    /// Whitespace-separated glob patterns used when no files are given.
    pub logfiles: String,
    /// The awk program.
    pub program: String,
}

impl FilterSettings {
    /// Build settings from a resolved mapping.
    ///
    /// Missing keys take their built-in value. Unknown keys are ignored.
    pub fn from_values(values: &FlatSettings) -> ConfigResult<Self> {
        let get = |key: &str| {
            values
                .get(key)
                .map(String::as_str)
                .unwrap_or_else(|| builtin(key))
                .to_string()
        };

        let level_value = get("level");
        let level = level_value
            .parse::<Level>()
            .map_err(|reason| ConfigError::invalid_value("level", &level_value, reason))?;

        Ok(Self {
            after: get("after"),
            before: get("before"),
            batch: convert_boolean(&get("batch")),
            datefmt: get("datefmt"),
            level,
            logfiles: get("logfiles"),
            program: get("program"),
        })
    }
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            after: builtin("after").to_string(),
            before: builtin("before").to_string(),
            batch: false,
            datefmt: builtin("datefmt").to_string(),
            level: Level::Info,
            logfiles: builtin("logfiles").to_string(),
            program: builtin("program").to_string(),
        }
    }
}
