//! Layered configuration.
//!
//! Consolidates configuration from three tiers:
//! 1. **Built-in** - [`BUILTIN_DEFAULTS`]
//! 2. **Flat defaults** - `logfilter/config` in each configuration directory
//! 3. **Sections** - `logfilter/filters.ini`, resolved per log file
//!
//! ## Precedence
//! - Directories: `$XDG_CONFIG_HOME` wins over `$XDG_CONFIG_DIRS`, and earlier
//!   entries of `$XDG_CONFIG_DIRS` win over later ones
//! - Flat defaults seed the `[DEFAULT]` block of the sectioned document
//! - Matching sections overlay DEFAULT in declaration order
//!
//! ## Environment Variables
//! - `XDG_CONFIG_HOME` - User config base (default: `~/.config`)
//! - `XDG_CONFIG_DIRS` - System config bases, colon-separated (default: `/etc/xdg`)

mod flat;
mod loader;
mod sections;
mod types;

pub use flat::{FlatSettings, LayeredSettings, parse_kv, parse_kv_str};
pub use loader::{CONFIG_FILE, ConfigLoader, PROGRAM, SECTIONS_FILE};
pub use sections::{DEFAULT_SECTION, ResolvedSettings, Section, SectionedDocument};
pub use types::{BUILTIN_DEFAULTS, FilterSettings, builtin_defaults, convert_boolean};
