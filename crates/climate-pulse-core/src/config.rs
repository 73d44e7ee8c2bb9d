//! Layered configuration.
//!
//! Settings are merged from, lowest precedence first:
//! 1. built-in defaults
//! 2. `~/.config/climate-pulse/config.<ext>`
//! 3. `.climate-pulse.<ext>` then `climate-pulse.<ext>` in the nearest
//!    directory at or above the working directory that has one; the walk
//!    ends at a repository root (a directory containing `.git`)
//! 4. files passed with `--config`
//! 5. `CLIMATE_PULSE_*` environment variables
//!
//! `<ext>` is `toml`, `yaml`, `yml` or `json`; within one directory later
//! extensions win. Layers merge per field, and unset analysis fields fall
//! back to the defaults of the stage that reads them.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use climate_pulse_core::config::{Config, ConfigLoader};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! let vocabulary = config.vocabulary().unwrap();
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::analysis::polarity::{DEFAULT_SAMPLE_SIZE, DEFAULT_SEED};
use crate::analysis::themes::DEFAULT_TOP_THEMES;
use crate::analysis::{DEFAULT_DATE_RANGE, DEFAULT_TOPIC, ReportOptions, SamplingOptions};
use crate::error::{AnalysisResult, ConfigError, ConfigResult};
use crate::vocab::{DEFAULT_CLIMATE_KEYWORDS, DEFAULT_STOPWORDS, Vocabulary};

/// Default maximum input file size (50 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 50 * 1024 * 1024;

/// The configuration for climate-pulse.
///
/// Every analysis field is optional; unset fields fall back to the
/// built-in defaults when the corresponding options are built.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files (falls back to platform defaults if unset).
    pub log_dir: Option<Utf8PathBuf>,
    /// Number of global themes to extract (default: 20).
    pub top_themes: Option<usize>,
    /// Maximum records scored by the polarity sampler (default: 5000).
    pub sample_size: Option<usize>,
    /// Seed for the polarity sampler (default: 42).
    pub sample_seed: Option<u64>,
    /// Period label copied into the report overview.
    pub date_range: Option<String>,
    /// Topic label copied into the report overview.
    pub topic: Option<String>,
    /// Stopword list. Replaces the built-in list when set.
    pub stopwords: Option<Vec<String>>,
    /// Stopwords added to the active list.
    pub extra_stopwords: Vec<String>,
    /// Climate keyword list. Replaces the built-in list when set.
    pub climate_keywords: Option<Vec<String>>,
    /// Maximum input size in bytes (default: 50 MiB).
    ///
    /// Omit to use the default. Use `disable_input_limit` to remove the
    /// limit entirely.
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    ///
    /// When `true`, `max_input_bytes` is ignored and no size check is performed.
    pub disable_input_limit: bool,
}

impl Config {
    /// Build the stopword and keyword lists this config selects.
    pub fn vocabulary(&self) -> AnalysisResult<Vocabulary> {
        let mut stopwords: Vec<String> = match &self.stopwords {
            Some(list) => list.clone(),
            None => DEFAULT_STOPWORDS.iter().map(|w| (*w).to_string()).collect(),
        };
        stopwords.extend(self.extra_stopwords.iter().cloned());

        match &self.climate_keywords {
            Some(keywords) => Vocabulary::new(stopwords, keywords),
            None => Vocabulary::new(stopwords, DEFAULT_CLIMATE_KEYWORDS),
        }
    }

    /// Polarity sampling options with defaults filled in.
    pub fn sampling_options(&self) -> SamplingOptions {
        SamplingOptions {
            sample_size: self.sample_size.unwrap_or(DEFAULT_SAMPLE_SIZE),
            seed: self.sample_seed.unwrap_or(DEFAULT_SEED),
        }
    }

    /// Report options with defaults filled in.
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            top_themes: self.top_themes.unwrap_or(DEFAULT_TOP_THEMES),
            date_range: self
                .date_range
                .clone()
                .unwrap_or_else(|| DEFAULT_DATE_RANGE.to_string()),
            topic: self
                .topic
                .clone()
                .unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
        }
    }

    /// Effective input size limit, or `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Config files that contributed to a [`Config`], by layer.
///
/// Returned alongside [`Config`] from [`ConfigLoader::load()`] so commands
/// can report the actual config files without re-discovering them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// User config file from the platform config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Project config files from the nearest directory that has any.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// Files passed with `--config`, in command-line order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Every file in merge order, lowest precedence first.
    pub fn merge_order(&self) -> impl Iterator<Item = &Utf8Path> {
        self.user_file
            .iter()
            .chain(&self.project_files)
            .chain(&self.explicit_files)
            .map(Utf8PathBuf::as_path)
    }

    /// The file that won the merge, if any file was loaded.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.merge_order().last()
    }
}

/// Extensions tried for each config file name, lowest precedence first.
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

const APP_NAME: &str = "climate-pulse";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "CLIMATE_PULSE_";

/// Project discovery never walks above a directory containing this entry.
const REPO_MARKER: &str = ".git";

/// Layers configuration from the user config, the nearest project config,
/// explicit files and the environment.
#[derive(Debug)]
pub struct ConfigLoader {
    search_root: Option<Utf8PathBuf>,
    user_config: bool,
    explicit_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads the user config and nothing else until configured.
    pub const fn new() -> Self {
        Self {
            search_root: None,
            user_config: true,
            explicit_files: Vec::new(),
        }
    }

    /// Look for project config in `dir` and its ancestors.
    ///
    /// The walk stops at the first directory holding a config file, or at
    /// the enclosing repository root.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, dir: P) -> Self {
        self.search_root = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Include or skip `~/.config/climate-pulse/config.<ext>`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.user_config = include;
        self
    }

    /// Merge `path` above every discovered file. Later calls win.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Discover config files without reading them.
    pub fn discover(&self) -> ConfigSources {
        ConfigSources {
            user_file: if self.user_config {
                user_config_file()
            } else {
                None
            },
            project_files: self
                .search_root
                .as_deref()
                .map(nearest_project_files)
                .unwrap_or_default(),
            explicit_files: self.explicit_files.clone(),
        }
    }

    /// Merge defaults, discovered files and `CLIMATE_PULSE_*` variables.
    ///
    /// Later layers override earlier ones field by field, so a project file
    /// that only sets `topic` keeps the user's `sample_seed`.
    #[tracing::instrument(skip(self), fields(search_root = ?self.search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = self.discover();
        let figment = sources.merge_order().fold(
            Figment::new().merge(Serialized::defaults(Config::default())),
            merge_file,
        );
        // CLIMATE_PULSE_SAMPLE_SIZE=100, CLIMATE_PULSE_LOG_LEVEL=debug, etc.
        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true))
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;

        tracing::info!(
            files = sources.merge_order().count(),
            primary = ?sources.primary_file(),
            "configuration loaded"
        );
        Ok((config, sources))
    }
}

/// Config files in one directory, dotfiles first, each name by extension.
fn project_files_in(dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    [format!(".{APP_NAME}"), APP_NAME.to_string()]
        .iter()
        .flat_map(|stem| CONFIG_EXTENSIONS.iter().map(move |ext| dir.join(format!("{stem}.{ext}"))))
        .filter(|path| path.is_file())
        .collect()
}

fn nearest_project_files(start: &Utf8Path) -> Vec<Utf8PathBuf> {
    for dir in start.ancestors() {
        let found = project_files_in(dir);
        if !found.is_empty() {
            tracing::debug!(%dir, count = found.len(), "project config found");
            return found;
        }
        if dir.join(REPO_MARKER).exists() {
            tracing::debug!(%dir, "stopped at repository root");
            break;
        }
    }
    Vec::new()
}

fn user_config_file() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}

/// Platform config directory for climate-pulse.
///
/// `~/.config/climate-pulse/` on Linux (honoring `XDG_CONFIG_HOME`),
/// `~/Library/Application Support/climate-pulse/` on macOS.
fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}
