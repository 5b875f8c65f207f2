use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// One entry of the artist-name substitution table. Patterns are plain
/// substrings, matched only within the trailing song segment of a name.
#[derive(Debug, Clone, Deserialize)]
pub struct Substitution {
    pub pattern: String,
    pub replacement: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Case-sensitive filename suffixes accepted by the lister.
    pub extensions: Vec<String>,
    /// Log file path; an empty path keeps logging on stdout only.
    pub log_file: PathBuf,
    /// Destination of the CSV manifest, truncated on every export.
    pub export_file: PathBuf,
    pub substitutions: Vec<Substitution>,
    /// Extension (without the dot) forced onto names rebuilt from tags.
    /// When unset the source file's own extension is kept.
    pub rename_extension: Option<String>,
    /// Print every would-be rename or tag write without touching anything.
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            extensions: vec![".flac".to_string(), ".mp3".to_string()],
            log_file: PathBuf::from("tune_janitor.log"),
            export_file: PathBuf::from("library_export.csv"),
            substitutions: default_substitutions(),
            rename_extension: None,
            dry_run: false,
        }
    }
}

/// Optional TOML overlay; every field falls back to the built-in default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    extensions: Option<Vec<String>>,
    log_file: Option<PathBuf>,
    export_file: Option<PathBuf>,
    substitutions: Option<Vec<Substitution>>,
    rename_extension: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)?;
        let file: FileConfig = toml::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let mut config = Config::default();
        if let Some(extensions) = file.extensions {
            config.extensions = extensions;
        }
        if let Some(log_file) = file.log_file {
            config.log_file = log_file;
        }
        if let Some(export_file) = file.export_file {
            config.export_file = export_file;
        }
        if let Some(substitutions) = file.substitutions {
            config.substitutions = substitutions;
        }
        if file.rename_extension.is_some() {
            config.rename_extension = file.rename_extension;
        }
        Ok(config)
    }
}

fn default_substitutions() -> Vec<Substitution> {
    // variants of artist names that keep showing up in rips
    [
        ("陳奕迅", "陈奕迅"),
        ("梁靜茹", "梁静茹"),
        ("楊千嬅", "杨千嬅"),
        ("張敬軒", "张敬轩"),
        ("薛凱琪", "薛凯琪"),
        ("謝安琪", "谢安琪"),
        ("Jay Chou", "周杰伦"),
        ("G.E.M.", "邓紫棋"),
    ]
    .iter()
    .map(|(pattern, replacement)| Substitution {
        pattern: (*pattern).to_string(),
        replacement: (*replacement).to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_accept_both_formats() {
        let config = Config::default();
        assert_eq!(config.extensions, vec![".flac", ".mp3"]);
        assert!(!config.substitutions.is_empty());
        assert!(config.rename_extension.is_none());
    }

    #[test]
    fn toml_overlay_replaces_only_named_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("janitor.toml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "extensions = [\".flac\"]").unwrap();
        writeln!(f, "rename_extension = \"flac\"").unwrap();
        writeln!(f, "[[substitutions]]").unwrap();
        writeln!(f, "pattern = \"abc\"").unwrap();
        writeln!(f, "replacement = \"xyz\"").unwrap();
        drop(f);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.extensions, vec![".flac"]);
        assert_eq!(config.rename_extension.as_deref(), Some("flac"));
        assert_eq!(config.substitutions.len(), 1);
        assert_eq!(config.substitutions[0].pattern, "abc");
        // untouched fields keep their defaults
        assert_eq!(config.export_file, PathBuf::from("library_export.csv"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("janitor.toml");
        fs::write(&path, "no_such_key = 1\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
