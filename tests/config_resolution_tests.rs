//! Integration tests for configuration discovery and resolution.
//!
//! Tests the public configuration API end to end:
//! - SearchPaths discovery order
//! - Flat defaults merged across directories
//! - Sectioned settings loaded across directories and resolved per file

use logfilter::config::{
    CONFIG_FILE, ConfigLoader, LayeredSettings, PROGRAM, SECTIONS_FILE, SectionedDocument,
    builtin_defaults,
};
use logfilter::error::ConfigError;
use logfilter::level::Level;
use logfilter::paths::SearchPaths;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A user base and two system bases under one temp dir.
struct Dirs {
    _temp: TempDir,
    user: PathBuf,
    system: PathBuf,
    vendor: PathBuf,
}

impl Dirs {
    fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let user = temp.path().join("user");
        let system = temp.path().join("system");
        let vendor = temp.path().join("vendor");
        for dir in [&user, &system, &vendor] {
            fs::create_dir_all(dir).unwrap();
        }
        Self {
            _temp: temp,
            user,
            system,
            vendor,
        }
    }

    fn paths(&self) -> SearchPaths {
        SearchPaths::new(&self.user, vec![self.system.clone(), self.vendor.clone()])
    }

    fn write(&self, base: &Path, name: &str, content: &str) -> PathBuf {
        let dir = base.join(PROGRAM);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }
}

mod discovery {
    use super::*;

    #[test]
    fn resource_in_user_and_system_is_found_in_order() {
        let dirs = Dirs::new();
        let paths = SearchPaths::new(&dirs.user, vec![dirs.system.clone()]);
        fs::create_dir_all(dirs.user.join(PROGRAM)).unwrap();
        fs::create_dir_all(dirs.system.join(PROGRAM)).unwrap();

        let found: Vec<_> = paths.config_paths(&[PROGRAM]).collect();
        assert_eq!(found, vec![dirs.user.join(PROGRAM), dirs.system.join(PROGRAM)]);
    }

    #[test]
    fn system_dirs_keep_listed_order() {
        let dirs = Dirs::new();
        let vendor = dirs.write(&dirs.vendor, CONFIG_FILE, "");
        let system = dirs.write(&dirs.system, CONFIG_FILE, "");

        let found: Vec<_> = dirs.paths().config_paths(&[PROGRAM, CONFIG_FILE]).collect();
        assert_eq!(found, vec![system, vendor]);
    }

    #[test]
    fn from_values_reads_colon_list() {
        let dirs = Dirs::new();
        let list = std::env::join_paths([&dirs.system, &dirs.vendor]).unwrap();
        let paths = SearchPaths::from_values(
            Some(dirs.user.as_os_str()),
            Some(list.as_os_str()),
            None,
        );
        assert_eq!(paths, dirs.paths());
    }
}

mod flat_defaults {
    use super::*;

    #[test]
    fn earlier_directory_wins_per_key() {
        let dirs = Dirs::new();
        dirs.write(&dirs.vendor, CONFIG_FILE, "level = DEBUG\nafter = vendor\nbefore = vendor\n");
        dirs.write(&dirs.system, CONFIG_FILE, "level = NOTICE\nafter = system\n");
        dirs.write(&dirs.user, CONFIG_FILE, "Level = ERR\n");

        let loader = ConfigLoader::load_with_paths(dirs.paths()).unwrap();
        let defaults = loader.defaults();
        assert_eq!(defaults.get("level"), Some("ERR"));
        assert_eq!(defaults.get("after"), Some("system"));
        assert_eq!(defaults.get("before"), Some("vendor"));
        assert_eq!(defaults.get("datefmt"), Some("+%Y-%m-%d"));
    }

    #[test]
    fn unreadable_file_is_skipped_and_later_dirs_still_read() {
        let dirs = Dirs::new();
        // A directory where the file should be exists but cannot be read as text.
        fs::create_dir_all(dirs.system.join(PROGRAM).join(CONFIG_FILE)).unwrap();
        dirs.write(&dirs.vendor, CONFIG_FILE, "batch = yes\n");

        let loader = ConfigLoader::load_with_paths(dirs.paths()).unwrap();
        assert_eq!(loader.defaults().depth(), 1);
        assert_eq!(loader.defaults().get("batch"), Some("yes"));
        assert!(loader.default_settings().unwrap().batch);
    }

    #[test]
    fn snapshot_holds_every_key() {
        let dirs = Dirs::new();
        let file = dirs.write(&dirs.user, CONFIG_FILE, "custom = 1\n");

        let layered = LayeredSettings::from_files(&[file], builtin_defaults());
        let snapshot = layered.snapshot();
        assert_eq!(snapshot.len(), builtin_defaults().len() + 1);
        assert_eq!(snapshot["custom"], "1");
        assert_eq!(layered.keys().len(), snapshot.len());
    }
}

mod sections {
    use super::*;

    #[test]
    fn higher_precedence_file_wins_within_section() {
        let dirs = Dirs::new();
        dirs.write(
            &dirs.system,
            SECTIONS_FILE,
            "[DEFAULT]\nlevel = DEBUG\n[*.log]\nlevel = NOTICE\nbatch = yes\n[x*]\nlevel = CRIT\n",
        );
        dirs.write(&dirs.user, SECTIONS_FILE, "[DEFAULT]\nlevel = INFO\n[*.log]\nlevel = ERR\n");

        let loader = ConfigLoader::load_with_paths(dirs.paths()).unwrap();
        let doc = loader.document();
        assert_eq!(doc.defaults()["level"], "INFO");
        let patterns: Vec<_> = doc.sections().iter().map(|s| s.pattern()).collect();
        assert_eq!(patterns, vec!["*.log", "x*"]);

        let app = loader.resolve("app.log");
        assert_eq!(app.get("level"), Some("ERR"));
        assert_eq!(app.get("batch"), Some("yes"));

        // `x*` is declared after `*.log`, so it wins for x.log.
        let x = loader.settings_for("x.log").unwrap();
        assert_eq!(x.level, Level::Crit);
    }

    #[test]
    fn section_from_user_file_is_appended_after_system_sections() {
        let dirs = Dirs::new();
        dirs.write(&dirs.system, SECTIONS_FILE, "[*]\nlevel = DEBUG\n");
        dirs.write(&dirs.user, SECTIONS_FILE, "[app.log]\nlevel = ERR\n");

        let loader = ConfigLoader::load_with_paths(dirs.paths()).unwrap();
        assert_eq!(loader.settings_for("app.log").unwrap().level, Level::Err);
        assert_eq!(loader.settings_for("other.log").unwrap().level, Level::Debug);
    }

    #[test]
    fn flat_defaults_seed_default_block() {
        let dirs = Dirs::new();
        dirs.write(&dirs.user, CONFIG_FILE, "datefmt = +%s\nlevel = ERR\n");
        dirs.write(&dirs.system, SECTIONS_FILE, "[DEFAULT]\nlevel = WARNING\n");

        let loader = ConfigLoader::load_with_paths(dirs.paths()).unwrap();
        let settings = loader.settings_for("anything").unwrap();
        assert_eq!(settings.datefmt, "+%s");
        assert_eq!(settings.level, Level::Warning);
    }

    #[test]
    fn malformed_file_fails_load_and_names_file() {
        let dirs = Dirs::new();
        dirs.write(&dirs.system, SECTIONS_FILE, "[*.log]\nlevel = ERR\n");
        let bad = dirs.write(&dirs.vendor, SECTIONS_FILE, "[*.log]\nlevel = ERR\nlevel = INFO\n");

        let err = ConfigLoader::load_with_paths(dirs.paths()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateKey { .. }));
        assert_eq!(err.path(), Some(&bad));
        assert!(err.to_string().contains(&bad.display().to_string()));
    }

    #[test]
    fn unreadable_sections_file_is_skipped() {
        let dirs = Dirs::new();
        fs::create_dir_all(dirs.user.join(PROGRAM).join(SECTIONS_FILE)).unwrap();
        dirs.write(&dirs.system, SECTIONS_FILE, "[*.log]\nlevel = ERR\n");

        let loader = ConfigLoader::load_with_paths(dirs.paths()).unwrap();
        assert_eq!(loader.settings_for("a.log").unwrap().level, Level::Err);
    }

    #[test]
    fn first_match_and_resolve_differ() {
        let doc = SectionedDocument::parse_str(
            "[DEFAULT]\nlevel = INFO\n[*]\nlevel = DEBUG\nbatch = 1\n[*.log]\nlevel = ERR\n",
            Path::new("filters.ini"),
        )
        .unwrap();

        let first = doc.first_match("a.log").unwrap();
        assert_eq!(first.pattern(), "*");
        assert_eq!(first.get("level"), Some("DEBUG"));

        let resolved = doc.resolve("a.log");
        assert_eq!(resolved.get("level"), Some("ERR"));
        assert_eq!(resolved.get("batch"), Some("1"));
    }

    #[test]
    fn overlay_order_decides_precedence() {
        let doc = SectionedDocument::parse_str(
            "[DEFAULT]\na = 1\n[*]\na = 2\n[*]\n",
            Path::new("filters.ini"),
        );
        // Repeating a section within one file is an error.
        assert!(matches!(doc, Err(ConfigError::DuplicateSection { .. })));

        let doc = SectionedDocument::parse_str(
            "[DEFAULT]\na = 1\n[X*]\na = 2\n[*]\na = 3\n",
            Path::new("filters.ini"),
        )
        .unwrap();
        for target in ["", "X", "Xylophone", "other"] {
            assert_eq!(doc.resolve(target).get("a"), Some("3"), "target {:?}", target);
        }
    }
}
