//! User configuration loaded from `~/.lyrics-arranger/config.toml`. Every key
//! is optional so a missing or partial file still yields a usable setup.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::{BaseDirs, UserDirs};
use serde::Deserialize;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".lyrics-arranger";
/// Configuration file name stored inside the application data directory.
const CONFIG_FILE_NAME: &str = "config.toml";
/// Log file name stored inside the application data directory.
const LOG_FILE_NAME: &str = "lyrics-arranger.log";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory exports are written into. Falls back to the user's download
    /// folder, then to the working directory.
    pub export_dir: Option<PathBuf>,
    /// Open the exported file with the system viewer right after writing it.
    pub open_after_export: bool,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Where log lines go. The terminal belongs to the UI, so logs never hit
    /// stdout.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_dir: None,
            open_after_export: false,
            log_filter: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load the configuration from an explicit file. The file must exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("failed to read config file {}", path.as_ref().display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("invalid config file {}", path.as_ref().display()))
    }

    /// Load the configuration from the default location, falling back to the
    /// defaults when no file has been written yet.
    pub fn load_default() -> Result<Self> {
        let path = default_config_path()?;
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse TOML configuration")
    }

    /// Replace file values with the ones given on the command line. Absent
    /// flags leave the file value alone.
    pub fn apply_overrides(&mut self, export_dir: Option<PathBuf>, log_file: Option<PathBuf>) {
        if export_dir.is_some() {
            self.export_dir = export_dir;
        }
        if log_file.is_some() {
            self.log_file = log_file;
        }
    }

    /// Directory the exporter should write into.
    pub fn resolved_export_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.export_dir {
            return Ok(dir.clone());
        }
        let downloads =
            UserDirs::new().and_then(|dirs| dirs.download_dir().map(Path::to_path_buf));
        if let Some(downloads) = downloads {
            return Ok(downloads);
        }
        env::current_dir().context("failed to resolve the current directory")
    }

    /// File the log subscriber appends to.
    pub fn resolved_log_file(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(LOG_FILE_NAME)),
        }
    }
}

/// Absolute path of the configuration file inside the user's home.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(CONFIG_FILE_NAME))
}

fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config = Config::from_toml("open_after_export = true\n").unwrap();
        assert!(config.open_after_export);
        assert_eq!(config.log_filter, "info");
        assert!(config.export_dir.is_none());
    }

    #[test]
    fn explicit_export_dir_wins() {
        let config = Config::from_toml("export_dir = \"/tmp/songs\"\n").unwrap();
        assert_eq!(
            config.resolved_export_dir().unwrap(),
            PathBuf::from("/tmp/songs")
        );
    }

    #[test]
    fn flags_override_file_values() {
        let mut config =
            Config::from_toml("export_dir = \"/tmp/songs\"\nlog_file = \"/tmp/file.log\"\n")
                .unwrap();

        config.apply_overrides(Some(PathBuf::from("/tmp/flag-exports")), None);

        assert_eq!(config.export_dir, Some(PathBuf::from("/tmp/flag-exports")));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/file.log")));

        config.apply_overrides(None, Some(PathBuf::from("/tmp/flag.log")));
        assert_eq!(config.export_dir, Some(PathBuf::from("/tmp/flag-exports")));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/flag.log")));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "log_filter = \"lyrics_arranger=debug\"\nlog_file = \"/tmp/arranger.log\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.log_filter, "lyrics_arranger=debug");
        assert_eq!(
            config.resolved_log_file().unwrap(),
            PathBuf::from("/tmp/arranger.log")
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "open_after_export = \"sometimes\"").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config file"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(dir.path().join("absent.toml")).is_err());
    }
}
