//! Diary configuration.
//!
//! Read from `~/.config/diary/config.toml`, with `DIARY_*` environment
//! variables taking precedence (e.g. `DIARY_DIR=/tmp/diary`).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_DATE_FORMAT, DEFAULT_DAYS, DEFAULT_DIARY_DIR, DEFAULT_EVENTS_FILE,
    DEFAULT_REPORT_FILE, DEFAULT_TIME_FORMAT,
};
use crate::error::{DiaryError, DiaryResult};

fn default_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DIARY_DIR)
}

fn default_events_file() -> PathBuf {
    PathBuf::from(DEFAULT_EVENTS_FILE)
}

fn default_report_file() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_FILE)
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

fn default_days() -> i64 {
    DEFAULT_DAYS
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DiaryConfig {
    /// Directory holding the events file and the saved report
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_events_file")]
    pub events_file: PathBuf,

    #[serde(default = "default_report_file")]
    pub report_file: PathBuf,

    /// chrono format used when prompting for a date
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// chrono format used when prompting for a time
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Days listed when no window is given
    #[serde(default = "default_days")]
    pub default_days: i64,
}

impl Default for DiaryConfig {
    fn default() -> Self {
        DiaryConfig {
            dir: default_dir(),
            events_file: default_events_file(),
            report_file: default_report_file(),
            date_format: default_date_format(),
            time_format: default_time_format(),
            default_days: default_days(),
        }
    }
}

impl DiaryConfig {
    /// Load the user's config, writing a commented default file on first run.
    pub fn load() -> DiaryResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::build(&config_path, true)
    }

    /// Load an explicit config file. Environment overrides are not applied.
    pub fn load_from(path: &Path) -> DiaryResult<Self> {
        if !path.is_file() {
            return Err(DiaryError::Config(format!(
                "Config file {} does not exist",
                path.display()
            )));
        }

        Self::build(path, false)
    }

    fn build(path: &Path, with_env: bool) -> DiaryResult<Self> {
        // Always TOML, whatever the extension
        let source = File::from(path).format(FileFormat::Toml).required(true);
        let mut builder = Config::builder().add_source(source);
        if with_env {
            builder = builder.add_source(Environment::with_prefix("DIARY"));
        }

        let config: DiaryConfig = builder
            .build()
            .map_err(|e| DiaryError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DiaryError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), dir = %config.dir.display(), "loaded config");
        Ok(config)
    }

    pub fn config_path() -> DiaryResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DiaryError::Config("Could not determine config directory".into()))?
            .join("diary");

        Ok(config_dir.join("config.toml"))
    }

    /// Diary directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    /// Full path of the events file. An absolute `events_file` is used as is.
    pub fn events_path(&self) -> PathBuf {
        self.data_path().join(expand(&self.events_file))
    }

    /// Full path of the saved report.
    pub fn report_path(&self) -> PathBuf {
        self.data_path().join(expand(&self.report_file))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DiaryResult<()> {
        let contents = format!(
            "\
# diary configuration

# Where the events file and saved report live:
# dir = \"{}\"

# File names inside that directory (absolute paths are allowed):
# events_file = \"{}\"
# report_file = \"{}\"

# Formats used when adding an event (chrono strftime syntax):
# date_format = \"{}\"
# time_format = \"{}\"

# Days listed when no number is given:
# default_days = {}
",
            DEFAULT_DIARY_DIR,
            DEFAULT_EVENTS_FILE,
            DEFAULT_REPORT_FILE,
            DEFAULT_DATE_FORMAT,
            DEFAULT_TIME_FORMAT,
            DEFAULT_DAYS,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DiaryError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DiaryError::Config(format!("Could not write config file: {e}")))?;

        tracing::info!(path = %path.display(), "created default config");
        Ok(())
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
