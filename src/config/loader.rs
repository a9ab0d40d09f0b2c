//! Configuration loader with tier-based merging.
//!
//! Loads the flat defaults file and the sectioned per-file settings from
//! every configuration directory, then resolves settings per log file.

use super::flat::{FlatSettings, LayeredSettings};
use super::sections::{ResolvedSettings, SectionedDocument};
use super::types::{FilterSettings, builtin_defaults};
use crate::error::ConfigResult;
use crate::paths::SearchPaths;
use std::path::PathBuf;

/// Program name, used as the configuration subdirectory.
pub const PROGRAM: &str = "logfilter";

/// Flat `key=value` defaults file.
pub const CONFIG_FILE: &str = "config";

/// Sectioned per-file settings.
pub const SECTIONS_FILE: &str = "filters.ini";

/// Configuration for one invocation, built once and read thereafter.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Directories searched for configuration
    pub paths: SearchPaths,
    defaults: LayeredSettings,
    document: SectionedDocument,
    section_files: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Load configuration from the directories named by the environment.
    pub fn load() -> ConfigResult<Self> {
        Self::load_with_paths(SearchPaths::from_env())
    }

    /// Load configuration with explicit search paths.
    pub fn load_with_paths(paths: SearchPaths) -> ConfigResult<Self> {
        let config_files: Vec<PathBuf> = paths.config_paths(&[PROGRAM, CONFIG_FILE]).collect();
        let defaults = LayeredSettings::from_files(&config_files, builtin_defaults());

        let section_files: Vec<PathBuf> =
            paths.config_paths(&[PROGRAM, SECTIONS_FILE]).collect();
        let document = SectionedDocument::load(&section_files, defaults.snapshot())?;

        Ok(Self {
            paths,
            defaults,
            document,
            section_files,
        })
    }

    /// Merged flat defaults over the built-in values.
    pub fn defaults(&self) -> &LayeredSettings {
        &self.defaults
    }

    /// The sectioned document, its DEFAULT seeded from [`defaults`](Self::defaults).
    pub fn document(&self) -> &SectionedDocument {
        &self.document
    }

    /// Configuration files that were found, highest precedence first.
    pub fn config_files(&self) -> Vec<PathBuf> {
        self.defaults
            .sources()
            .iter()
            .chain(self.section_files.iter())
            .cloned()
            .collect()
    }

    /// Raw settings for `target`.
    pub fn resolve(&self, target: &str) -> ResolvedSettings {
        self.document.resolve(target)
    }

    /// Typed settings for `target`.
    pub fn settings_for(&self, target: &str) -> ConfigResult<FilterSettings> {
        FilterSettings::from_values(self.resolve(target).values())
    }

    /// Typed settings for `target` with `overrides` laid over every file.
    ///
    /// Overrides replace raw values before anything is interpreted, so a bad
    /// configured value that is overridden is never parsed.
    pub fn settings_with(
        &self,
        target: &str,
        overrides: &FlatSettings,
    ) -> ConfigResult<FilterSettings> {
        let mut values = self.resolve(target).into_values();
        values.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        FilterSettings::from_values(&values)
    }

    /// Typed settings with no section applied.
    pub fn default_settings(&self) -> ConfigResult<FilterSettings> {
        FilterSettings::from_values(self.document.defaults())
    }

    /// Like [`default_settings`](Self::default_settings), with `overrides`
    /// laid over DEFAULT.
    pub fn default_settings_with(&self, overrides: &FlatSettings) -> ConfigResult<FilterSettings> {
        let mut values = self.document.defaults().clone();
        values.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        FilterSettings::from_values(&values)
    }
}
