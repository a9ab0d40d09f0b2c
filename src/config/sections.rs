//! Sectioned configuration with glob-pattern section names.
//!
//! A sectioned file holds a `[DEFAULT]` block and any number of sections
//! named by shell glob patterns:
//!
//! ```text
//! [DEFAULT]
//! level = INFO
//!
//! [*.log]
//! datefmt = +%Y-%m-%d
//!
//! [/var/log/syslog*]
//! program = $5 ~ level
//! ```
//!
//! Resolving a target starts from DEFAULT and overlays every section whose
//! pattern matches it, in declaration order. Declaration order alone decides
//! precedence: a narrow pattern such as `[app.log]` declared before `[*]` is
//! overridden by `[*]` for every key both define.

use super::flat::{FlatSettings, split_kv};
use crate::error::{ConfigError, ConfigResult};
use glob::{MatchOptions, Pattern};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Name of the section that every target inherits from.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// A pattern-named block of settings.
#[derive(Debug, Clone)]
pub struct Section {
    pattern: String,
    matcher: Pattern,
    values: FlatSettings,
}

/// Shell matching: case-sensitive, with `/` and leading dots not special.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Collapse runs of `*` into one; with separators not special, `**` is `*`.
fn collapse_stars(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == '*' && out.ends_with('*') {
            continue;
        }
        out.push(c);
    }
    out
}

impl Section {
    fn compile(pattern: &str, origin: &Path, line: usize) -> ConfigResult<Self> {
        let matcher =
            Pattern::new(&collapse_stars(pattern)).map_err(|source| ConfigError::InvalidPattern {
                path: origin.to_path_buf(),
                line,
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
            values: FlatSettings::new(),
        })
    }

    /// The literal pattern string from the section header.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn values(&self) -> &FlatSettings {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Whether the pattern matches the whole of `target`, case-sensitively.
    pub fn matches(&self, target: &str) -> bool {
        self.matcher.matches_with(target, MATCH_OPTIONS)
    }
}

/// Effective settings for one target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedSettings {
    values: FlatSettings,
    matched: Vec<String>,
}

impl ResolvedSettings {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn values(&self) -> &FlatSettings {
        &self.values
    }

    pub fn into_values(self) -> FlatSettings {
        self.values
    }

    /// Patterns of the sections that matched, in the order they were applied.
    ///
    /// Empty when the settings came from DEFAULT alone.
    pub fn matched(&self) -> &[String] {
        &self.matched
    }

    /// Whether no settings were resolved at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// DEFAULT settings plus ordered glob-pattern sections.
#[derive(Debug, Clone, Default)]
pub struct SectionedDocument {
    defaults: FlatSettings,
    sections: Vec<Section>,
}

/// Where key lines are currently being stored while parsing.
#[derive(Clone, Copy)]
enum Cursor {
    BeforeHeader,
    Defaults,
    Section(usize),
}

impl SectionedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document whose DEFAULT block starts from `defaults`.
    pub fn with_defaults(defaults: FlatSettings) -> Self {
        Self {
            defaults,
            sections: Vec::new(),
        }
    }

    pub fn defaults(&self) -> &FlatSettings {
        &self.defaults
    }

    /// Sections in declaration order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Look up a section by its literal pattern.
    pub fn section(&self, pattern: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.pattern == pattern)
    }

    /// Parse one sectioned file. `origin` names the file in errors.
    ///
    /// The whole text is validated before anything is returned, so a
    /// malformed file never contributes partial settings.
    pub fn parse_str(text: &str, origin: &Path) -> ConfigResult<Self> {
        let mut doc = Self::new();
        let mut cursor = Cursor::BeforeHeader;
        let mut seen_sections: HashSet<String> = HashSet::new();
        let mut seen_keys: HashSet<(String, String)> = HashSet::new();

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') {
                let pattern = line
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                    .filter(|inner| !inner.is_empty())
                    .ok_or_else(|| ConfigError::MalformedSectionHeader {
                        path: origin.to_path_buf(),
                        line: line_no,
                        content: line.to_string(),
                    })?;

                if pattern == DEFAULT_SECTION {
                    cursor = Cursor::Defaults;
                    continue;
                }
                if !seen_sections.insert(pattern.to_string()) {
                    return Err(ConfigError::DuplicateSection {
                        path: origin.to_path_buf(),
                        line: line_no,
                        section: pattern.to_string(),
                    });
                }
                doc.sections.push(Section::compile(pattern, origin, line_no)?);
                cursor = Cursor::Section(doc.sections.len() - 1);
                continue;
            }

            let (key, value) = match (cursor, split_kv(line)) {
                (Cursor::BeforeHeader, _) => {
                    return Err(ConfigError::MissingSectionHeader {
                        path: origin.to_path_buf(),
                        line: line_no,
                        content: line.to_string(),
                    });
                }
                (_, None) => {
                    return Err(ConfigError::MissingDelimiter {
                        path: origin.to_path_buf(),
                        line: line_no,
                        content: line.to_string(),
                    });
                }
                (_, Some(pair)) => pair,
            };

            let (section_name, target) = match cursor {
                Cursor::Section(i) => (doc.sections[i].pattern.clone(), &mut doc.sections[i].values),
                _ => (DEFAULT_SECTION.to_string(), &mut doc.defaults),
            };
            if !seen_keys.insert((section_name.clone(), key.clone())) {
                return Err(ConfigError::DuplicateKey {
                    path: origin.to_path_buf(),
                    line: line_no,
                    section: section_name,
                    key,
                });
            }
            target.insert(key, value);
        }

        Ok(doc)
    }

    /// Overlay `other` onto this document.
    ///
    /// DEFAULT keys and keys of a same-pattern section are overwritten by
    /// `other`. Sections new to this document are appended, so each section
    /// keeps the position of its first appearance.
    pub fn merge(&mut self, other: SectionedDocument) {
        self.defaults.extend(other.defaults);
        for section in other.sections {
            match self.sections.iter_mut().find(|s| s.pattern == section.pattern) {
                Some(existing) => existing.values.extend(section.values),
                None => self.sections.push(section),
            }
        }
    }

    /// Load sectioned files listed highest precedence first.
    ///
    /// Files are applied lowest precedence first, so values from earlier
    /// paths win. Unreadable files are skipped. A malformed file aborts the
    /// whole load.
    pub fn load<P: AsRef<Path>>(paths: &[P], seed: FlatSettings) -> ConfigResult<Self> {
        let mut doc = Self::with_defaults(seed);
        for path in paths.iter().rev() {
            let path = path.as_ref();
            let text = match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    debug!(
                        "found config file but couldn't open for reading: {}: {}",
                        path.display(),
                        e
                    );
                    continue;
                }
            };
            let parsed = Self::parse_str(&text, path)?;
            debug!(
                "read {} section(s) from file: {}",
                parsed.sections.len(),
                path.display()
            );
            doc.merge(parsed);
        }
        Ok(doc)
    }

    /// Cumulative settings for `target`.
    ///
    /// Starts from DEFAULT and overlays every matching section in declaration
    /// order; later sections win on conflicting keys.
    pub fn resolve(&self, target: &str) -> ResolvedSettings {
        let mut resolved = ResolvedSettings {
            values: self.defaults.clone(),
            matched: Vec::new(),
        };
        for section in self.sections.iter().filter(|s| s.matches(target)) {
            resolved.values.extend(
                section
                    .values
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone())),
            );
            resolved.matched.push(section.pattern.clone());
        }
        resolved
    }

    /// The first declared section whose pattern matches `target`.
    ///
    /// Unlike [`resolve`](Self::resolve), DEFAULT and every later section
    /// are ignored.
    pub fn first_match(&self, target: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.matches(target))
    }
}
