//! CLI configuration for the catalog request tool.
//!
//! Read from the file named by `CATALOG_REQUESTS_CONFIG`, else from
//! `catalog-requests.yml` in the working directory. Every field is optional.
//!
//! # Example YAML
//!
//! ```yaml
//! program: catalog-requests
//! color: auto
//! colors:
//!   cyan: 51
//!   red: 160
//! alias_matching: exact
//! http:
//!   timeout_secs: 10
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Duration;

use catalog_cli_core::{AliasMatching, ColorConfig, Palette};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CATALOG_REQUESTS_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "catalog-requests.yml";

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only on a terminal, and only without `NO_COLOR`.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolves the mode against the output stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_data::ColorMode;
    ///
    /// assert!(ColorMode::Auto.enabled(true, false));
    /// assert!(!ColorMode::Auto.enabled(true, true));
    /// assert!(!ColorMode::Auto.enabled(false, false));
    /// assert!(ColorMode::Always.enabled(false, true));
    /// ```
    pub fn enabled(self, is_terminal: bool, no_color: bool) -> bool {
        match self {
            ColorMode::Auto => is_terminal && !no_color,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Settings for the HTTP client used by `request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Top-level CLI configuration.
///
/// # Examples
///
/// ```
/// use catalog_data::{CliConfig, ColorMode};
///
/// let config = CliConfig::default();
/// assert_eq!(config.program, "catalog-requests");
/// assert_eq!(config.color, ColorMode::Auto);
/// assert_eq!(config.http.timeout_secs, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Program name shown in usage lines and examples.
    pub program: String,
    pub color: ColorMode,
    /// 256-color codes for the help palette.
    pub colors: ColorConfig,
    pub alias_matching: AliasMatching,
    pub http: HttpConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            program: "catalog-requests".to_string(),
            color: ColorMode::default(),
            colors: ColorConfig::default(),
            alias_matching: AliasMatching::default(),
            http: HttpConfig::default(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::DataError::IoError) if the file cannot be
    /// read, or [`YamlError`](crate::DataError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Finds and loads the configuration for this process.
    pub fn discover() -> Result<Self> {
        let env_value = std::env::var(CONFIG_ENV).ok();
        let cwd = std::env::current_dir()?;
        Self::discover_from(env_value.as_deref(), &cwd)
    }

    /// Loads `env_value` if set, else `cwd/catalog-requests.yml` if it
    /// exists, else the defaults.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn discover_from(env_value: Option<&str>, cwd: &Path) -> Result<Self> {
        if let Some(path) = env_value.filter(|value| !value.trim().is_empty()) {
            debug!(path, "Loading config from {CONFIG_ENV}");
            return Self::load(path);
        }

        let default_path = cwd.join(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            debug!(path = %default_path.display(), "Loading config");
            return Self::load(default_path);
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// The help palette for this configuration.
    pub fn palette(&self, is_terminal: bool, no_color: bool) -> Palette {
        if self.color.enabled(is_terminal, no_color) {
            Palette::new(self.colors)
        } else {
            Palette::plain()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataError;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "color: never\ncolors:\n  cyan: 51\nhttp:\n  timeout_secs: 5\n";
        let config: CliConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.program, "catalog-requests");
        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(config.colors.cyan, 51);
        assert_eq!(config.colors.red, ColorConfig::default().red);
        assert_eq!(config.http.timeout(), Duration::from_secs(5));
        assert_eq!(config.alias_matching, AliasMatching::Exact);
    }

    #[test]
    fn test_containment_matching_from_yaml() {
        let config: CliConfig = serde_yaml::from_str("alias_matching: containment\n").unwrap();
        assert_eq!(config.alias_matching, AliasMatching::Containment);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let mut config = CliConfig::default();
        config.program = "cr".to_string();
        config.color = ColorMode::Always;

        config.save(&path).unwrap();
        assert_eq!(CliConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_discover_prefers_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "program: from-cwd\n").unwrap();
        let explicit = dir.path().join("explicit.yml");
        std::fs::write(&explicit, "program: from-env\n").unwrap();

        let config = CliConfig::discover_from(explicit.to_str(), dir.path()).unwrap();
        assert_eq!(config.program, "from-env");

        let config = CliConfig::discover_from(None, dir.path()).unwrap();
        assert_eq!(config.program, "from-cwd");
    }

    #[test]
    fn test_discover_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::discover_from(None, dir.path()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yml");
        let err = CliConfig::discover_from(missing.to_str(), dir.path()).unwrap_err();
        assert!(matches!(err, DataError::IoError(_)));
    }

    #[test]
    fn test_palette_follows_color_mode() {
        let mut config = CliConfig::default();
        assert_eq!(config.palette(false, false), Palette::plain());
        config.color = ColorMode::Always;
        assert_eq!(config.palette(false, true), Palette::new(config.colors));
    }
}
