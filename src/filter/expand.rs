//! Expansion of the configured `logfiles` patterns.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Expand shell-quoted glob patterns into existing paths.
///
/// Words are split the way a POSIX shell splits them, so quoting keeps a
/// path with spaces together and the quotes themselves are removed. A
/// leading `~` is replaced with the home directory. Patterns that match
/// nothing contribute nothing.
pub fn expand_logfiles(patterns: &str) -> Vec<PathBuf> {
    expand_logfiles_with_home(patterns, dirs::home_dir().as_deref())
}

/// Like [`expand_logfiles`], with an explicit home directory.
pub fn expand_logfiles_with_home(patterns: &str, home: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for word in split_words(patterns) {
        let pattern = expand_tilde(&word, home);
        match glob::glob(&pattern) {
            Ok(paths) => {
                for entry in paths {
                    match entry {
                        Ok(path) => files.push(path),
                        Err(e) => debug!("skipping unreadable path: {}", e),
                    }
                }
            }
            Err(e) => debug!("invalid logfiles pattern {:?}: {}", pattern, e),
        }
    }
    files
}

/// Split `patterns` into shell words, falling back to plain whitespace
/// splitting when the quoting is unbalanced.
fn split_words(patterns: &str) -> Vec<String> {
    shlex::split(patterns).unwrap_or_else(|| {
        warn!("unbalanced quotes in logfiles setting: {:?}", patterns);
        patterns.split_whitespace().map(str::to_string).collect()
    })
}

fn expand_tilde(word: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return word.to_string();
    };
    match word.strip_prefix('~') {
        Some("") => home.display().to_string(),
        Some(rest) if rest.starts_with('/') => format!("{}{}", home.display(), rest),
        _ => word.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_expand_tilde() {
        let home = Path::new("/home/dylan");
        assert_eq!(expand_tilde("~", Some(home)), "/home/dylan");
        assert_eq!(expand_tilde("~/.log/*.log", Some(home)), "/home/dylan/.log/*.log");
        assert_eq!(expand_tilde("~other/x", Some(home)), "~other/x");
        assert_eq!(expand_tilde("/var/~/x", Some(home)), "/var/~/x");
        assert_eq!(expand_tilde("~/x", None), "~/x");
    }

    #[test]
    fn test_expand_globs_under_home() {
        let temp = TempDir::new().unwrap();
        let logs = temp.path().join(".log");
        std::fs::create_dir_all(&logs).unwrap();
        std::fs::write(logs.join("b.log"), "").unwrap();
        std::fs::write(logs.join("a.log"), "").unwrap();
        std::fs::write(logs.join("notes.txt"), "").unwrap();

        let files = expand_logfiles_with_home("~/.log/*.log  ~/.log/missing*", Some(temp.path()));
        assert_eq!(files, vec![logs.join("a.log"), logs.join("b.log")]);
    }

    #[test]
    fn test_split_words_honours_quotes() {
        assert_eq!(
            split_words(r#"~/a.log "~/My Logs/*.log" '/var/log/x y' "${HOME}"/logs"#),
            vec!["~/a.log", "~/My Logs/*.log", "/var/log/x y", "${HOME}/logs"]
        );
        assert_eq!(split_words("\"unclosed  b"), vec!["\"unclosed", "b"]);
        assert!(split_words("   ").is_empty());
    }

    #[test]
    fn test_expand_quoted_path_with_space() {
        let temp = TempDir::new().unwrap();
        let logs = temp.path().join("My Logs");
        std::fs::create_dir_all(&logs).unwrap();
        std::fs::write(logs.join("a.log"), "").unwrap();

        let quoted = format!("\"{}/*.log\"", logs.display());
        assert_eq!(expand_logfiles_with_home(&quoted, None), vec![logs.join("a.log")]);

        let under_home = expand_logfiles_with_home("'~/My Logs/a.log'", Some(temp.path()));
        assert_eq!(under_home, vec![logs.join("a.log")]);
    }

    #[test]
    fn test_expand_nothing_matches() {
        let temp = TempDir::new().unwrap();
        let pattern = format!("{}/*.log", temp.path().display());
        assert!(expand_logfiles_with_home(&pattern, None).is_empty());
        assert!(expand_logfiles_with_home("", None).is_empty());
    }
}
