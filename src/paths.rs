//! Configuration directory discovery.
//!
//! Follows the XDG base directory search order:
//! 1. `$XDG_CONFIG_HOME` (default `~/.config`)
//! 2. each entry of `$XDG_CONFIG_DIRS` (default `/etc/xdg`), in listed order
//!
//! The environment is read once, in [`SearchPaths::from_env`]. Everything
//! else works from the injected directories.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Fallback for `$XDG_CONFIG_DIRS`.
pub const DEFAULT_CONFIG_DIRS: &str = "/etc/xdg";

/// Base directories to search for configuration, most significant first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPaths {
    /// User-level base directory.
    pub config_home: PathBuf,
    /// System-level base directories, in precedence order.
    pub config_dirs: Vec<PathBuf>,
}

impl SearchPaths {
    /// Create search paths with explicit directories.
    pub fn new(config_home: impl Into<PathBuf>, config_dirs: Vec<PathBuf>) -> Self {
        Self {
            config_home: config_home.into(),
            config_dirs,
        }
    }

    /// Build search paths from raw environment values.
    ///
    /// Unset and empty values both fall back to the defaults. Empty entries in
    /// the colon-separated directory list are dropped. Values need not be
    /// UTF-8.
    pub fn from_values(
        xdg_config_home: Option<&OsStr>,
        xdg_config_dirs: Option<&OsStr>,
        home: Option<&Path>,
    ) -> Self {
        let config_home = match xdg_config_home.filter(|s| !s.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => home
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("~"))
                .join(".config"),
        };

        let config_dirs = std::env::split_paths(
            xdg_config_dirs
                .filter(|s| !s.is_empty())
                .unwrap_or(OsStr::new(DEFAULT_CONFIG_DIRS)),
        )
        .filter(|path| !path.as_os_str().is_empty())
        .collect();

        Self {
            config_home,
            config_dirs,
        }
    }

    /// Discover search paths from the process environment.
    pub fn from_env() -> Self {
        let config_home = std::env::var_os("XDG_CONFIG_HOME");
        let config_dirs = std::env::var_os("XDG_CONFIG_DIRS");
        let home = dirs::home_dir();
        Self::from_values(
            config_home.as_deref(),
            config_dirs.as_deref(),
            home.as_deref(),
        )
    }

    /// All base directories in precedence order, whether or not they exist.
    pub fn bases(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.config_home.as_path())
            .chain(self.config_dirs.iter().map(PathBuf::as_path))
    }

    /// Existing paths for `resource` under each base directory.
    ///
    /// Information in earlier paths should take precedence over later ones.
    /// Candidates are checked for existence only as the iterator is consumed.
    pub fn config_paths<'a>(
        &'a self,
        resource: &'a [&'a str],
    ) -> impl Iterator<Item = PathBuf> + 'a {
        self.bases()
            .map(move |base| {
                resource
                    .iter()
                    .fold(base.to_path_buf(), |path, part| path.join(part))
            })
            .filter(|path| path.exists())
    }
}
