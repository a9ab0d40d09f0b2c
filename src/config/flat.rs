//! Flat `key=value` configuration files and their layered merge.
//!
//! Layers are consulted in precedence order: the first layer defining a key
//! supplies its value, and a base mapping sits below every layer.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Mapping from lower-cased key to value.
pub type FlatSettings = BTreeMap<String, String>;

/// Split one physical line into a `(key, value)` pair.
///
/// Returns `None` for comments and for lines without an `=`. Keys are trimmed
/// and lower-cased, values are trimmed. Quotes are left alone.
pub(crate) fn split_kv(line: &str) -> Option<(String, String)> {
    let line = line.trim_start();
    if line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    Some((key.trim().to_lowercase(), value.trim().to_string()))
}

/// Parse `key=value` lines into a mapping.
///
/// Lines whose first non-blank character is `#` are comments. Lines without
/// an `=` are ignored. An empty key (`= value`) is kept as `""`. When a key
/// repeats, the last line wins.
///
/// # Example
/// ```
/// use logfilter::config::parse_kv;
///
/// let settings = parse_kv(["  # comment", "Level = ERR", "no equals sign"]);
/// assert_eq!(settings.len(), 1);
/// assert_eq!(settings["level"], "ERR");
/// ```
pub fn parse_kv<I, S>(lines: I) -> FlatSettings
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| split_kv(line.as_ref()))
        .collect()
}

/// Parse a whole flat configuration file's text.
pub fn parse_kv_str(text: &str) -> FlatSettings {
    parse_kv(text.lines())
}

/// A precedence chain of flat settings over a base mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayeredSettings {
    /// Layers, highest precedence first.
    layers: Vec<FlatSettings>,
    /// Lowest precedence, consulted when no layer defines a key.
    base: FlatSettings,
    /// Files the layers were read from, in layer order.
    sources: Vec<PathBuf>,
}

impl LayeredSettings {
    /// Create a chain from layers listed highest precedence first.
    pub fn new(layers: Vec<FlatSettings>, base: FlatSettings) -> Self {
        Self {
            layers,
            base,
            sources: Vec::new(),
        }
    }

    /// Read each file in `paths` (highest precedence first) as a layer.
    ///
    /// Files that cannot be read are skipped; later files are still used.
    pub fn from_files<P: AsRef<Path>>(paths: &[P], base: FlatSettings) -> Self {
        let mut layers = Vec::new();
        let mut sources = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if let Some(layer) = read_layer(path) {
                layers.push(layer);
                sources.push(path.to_path_buf());
            }
        }
        Self {
            layers,
            base,
            sources,
        }
    }

    /// Look up `key`, returning the value from the first defining layer.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.layers
            .iter()
            .chain(std::iter::once(&self.base))
            .find_map(|layer| layer.get(key))
            .map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Union of keys across every layer and the base, sorted.
    pub fn keys(&self) -> BTreeSet<&str> {
        self.layers
            .iter()
            .chain(std::iter::once(&self.base))
            .flat_map(|layer| layer.keys().map(String::as_str))
            .collect()
    }

    /// Number of layers above the base.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Files that contributed a layer, highest precedence first.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Flatten the chain into a single mapping of effective values.
    pub fn snapshot(&self) -> FlatSettings {
        let mut merged = self.base.clone();
        for layer in self.layers.iter().rev() {
            merged.extend(layer.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }
}

fn read_layer(path: &Path) -> Option<FlatSettings> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            debug!("read configuration from file: {}", path.display());
            Some(parse_kv_str(&text))
        }
        Err(e) => {
            debug!(
                "found config file but couldn't open for reading: {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}
