use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::engine::{EngineOptions, OverlapStrategy};
use crate::error::ErrorCode;
use crate::parse::{DEFAULT_DATE_FORMATS, DEFAULT_OPEN_MARKERS, ParseOptions};

/// File name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "tandem.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_true")]
    pub has_header: bool,
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
    #[serde(default = "default_open_markers")]
    pub open_markers: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            has_header: default_true(),
            date_formats: default_date_formats(),
            open_markers: default_open_markers(),
        }
    }
}

impl InputConfig {
    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            has_header: self.has_header,
            date_formats: self.date_formats.clone(),
            open_markers: self.open_markers.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub strategy: OverlapStrategy,
    /// Warn about project groups larger than this. `0` disables the check.
    #[serde(default = "default_large_group_threshold")]
    pub large_group_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: OverlapStrategy::default(),
            large_group_threshold: default_large_group_threshold(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn engine_options(&self, today: NaiveDate) -> EngineOptions {
        let threshold = (self.large_group_threshold > 0).then_some(self.large_group_threshold);
        EngineOptions::new(today)
            .with_strategy(self.strategy)
            .with_large_group_threshold(threshold)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::ConfigUnreadable,
            Self::Parse { .. } => ErrorCode::ConfigParseError,
        }
    }
}

fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str::<T>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `tandem.toml` from `project_root`, or defaults when absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig, ConfigError> {
    let path = project_root.join(PROJECT_CONFIG_FILE);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }
    read_toml(&path)
}

/// Load a config file the caller named explicitly.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] if the file is missing or unreadable and
/// [`ConfigError::Parse`] if it is not valid TOML.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig, ConfigError> {
    read_toml(path)
}

/// Load `<config_dir>/tandem/config.toml`, or defaults when absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig, ConfigError> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("tandem/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    read_toml(&path)
}

/// Combine project config (explicit path wins over `tandem.toml`), user
/// config and output preferences.
///
/// # Errors
///
/// Returns the first [`ConfigError`] from loading either file.
pub fn resolve_config(
    project_root: &Path,
    explicit: Option<&Path>,
    cli_json: bool,
) -> Result<EffectiveConfig, ConfigError> {
    let project = match explicit {
        Some(path) => load_config_file(path)?,
        None => load_project_config(project_root)?,
    };
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(
        cli_json,
        user.output.as_deref(),
        env_format.as_deref(),
        std::io::stdout().is_terminal(),
    )
    .to_string();

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
    })
}

/// Normalize an output mode name, accepting legacy aliases.
#[must_use]
pub fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "table" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

fn resolve_output(
    cli_json: bool,
    user_output: Option<&str>,
    env_format: Option<&str>,
    is_tty: bool,
) -> &'static str {
    if cli_json {
        return "json";
    }

    if let Some(mode) = env_format.and_then(normalize_output_mode) {
        return mode;
    }

    if let Some(mode) = user_output.and_then(normalize_output_mode) {
        return mode;
    }

    if is_tty { "pretty" } else { "text" }
}

const fn default_true() -> bool {
    true
}

fn default_date_formats() -> Vec<String> {
    DEFAULT_DATE_FORMATS.iter().map(ToString::to_string).collect()
}

fn default_open_markers() -> Vec<String> {
    DEFAULT_OPEN_MARKERS.iter().map(ToString::to_string).collect()
}

const fn default_large_group_threshold() -> usize {
    1_000
}
