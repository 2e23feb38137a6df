use crate::error::{RecapError, Result};
use crate::render::commits::parse_timezone;
use crate::render::graph::SymbolSet;
use crate::source::wakatime::{DEFAULT_TIME_RANGE, DEFAULT_WAKATIME_URL};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `wakatime_api_key`
pub const WAKATIME_API_KEY_ENV: &str = "WAKATIME_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bar glyph style: 1 = blocks, 2 = braille, 3 = squares
    #[serde(default = "default_symbol_version")]
    pub symbol_version: u8,

    /// IANA zone for commit bucketing (falls back to WakaTime's, then UTC)
    pub time_zone: Option<String>,

    #[serde(default = "default_true")]
    pub show_commit: bool,
    #[serde(default = "default_true")]
    pub show_days_of_week: bool,
    #[serde(default = "default_true")]
    pub show_language: bool,
    #[serde(default = "default_true")]
    pub show_editors: bool,
    #[serde(default = "default_true")]
    pub show_os: bool,
    #[serde(default = "default_true")]
    pub show_language_per_repo: bool,
    #[serde(default)]
    pub show_loc_chart: bool,
    #[serde(default = "default_true")]
    pub show_total_code_time: bool,
    #[serde(default)]
    pub show_lines_of_code: bool,
    #[serde(default = "default_true")]
    pub show_profile_views: bool,

    /// JSON export of repositories, commit dates and line counts
    pub snapshot_path: Option<PathBuf>,

    /// WakaTime API key
    pub wakatime_api_key: Option<String>,

    /// WakaTime (or compatible) API base URL
    #[serde(default = "default_wakatime_url")]
    pub wakatime_url: String,

    /// Stats range requested from WakaTime
    #[serde(default = "default_time_range")]
    pub wakatime_time_range: String,

    /// TOML catalog of translated labels
    pub locale_path: Option<PathBuf>,

    /// Document whose section gets replaced
    #[serde(default = "default_readme_path")]
    pub readme_path: PathBuf,

    /// Marker name: `<!--START_SECTION:{name}-->`
    #[serde(default = "default_section_name")]
    pub section_name: String,

    /// Image embedded under the timeline heading
    pub chart_url: Option<String>,

    /// Index commits from repositories on disk
    pub local: Option<LocalScanConfig>,
}

/// Local git scan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalScanConfig {
    /// Directory to scan for repositories
    pub path: PathBuf,

    /// Only count commits by this author
    pub author_email: Option<String>,

    /// Directories/patterns to exclude from scanning
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Maximum directory depth for scanning (None = unlimited)
    pub max_depth: Option<u32>,
}

impl Config {
    /// Load configuration from the default location (~/.config/profile-recap/config.toml)
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RecapError::config(format!(
                "Config file not found at: {}",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RecapError::config("Could not determine home directory"))?;
        Ok(home.join(".config").join("profile-recap").join("config.toml"))
    }

    /// Write a default configuration file to `path`
    pub fn create_default_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config = Self::default();
        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(path, toml_string)?;

        Ok(config)
    }

    /// Load config from file, or fall back to defaults if it doesn't exist
    pub fn load_or_default() -> Result<Self> {
        if Self::default_config_path()?.exists() {
            Self::load()
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        SymbolSet::from_version(self.symbol_version)
            .map_err(|_| RecapError::config("symbol_version must be 1, 2 or 3"))?;

        if let Some(ref zone) = self.time_zone {
            parse_timezone(zone)?;
        }

        if self.section_name.trim().is_empty() {
            return Err(RecapError::config("section_name must not be empty"));
        }

        if self.wakatime_time_range.trim().is_empty() {
            return Err(RecapError::config("wakatime_time_range must not be empty"));
        }

        if self.show_loc_chart && self.chart_url.is_none() {
            return Err(RecapError::MissingConfig(
                "chart_url is required when show_loc_chart is enabled".to_string(),
            ));
        }

        Ok(())
    }

    /// Glyphs selected by `symbol_version`
    pub fn symbols(&self) -> Result<SymbolSet> {
        SymbolSet::from_version(self.symbol_version)
    }

    /// WakaTime API key, preferring the environment
    pub fn get_wakatime_api_key(&self) -> Option<String> {
        env::var(WAKATIME_API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.wakatime_api_key.clone().filter(|key| !key.is_empty()))
    }

    /// Whether any coding-time block is enabled
    pub fn shows_wakatime(&self) -> bool {
        self.show_language || self.show_editors || self.show_os
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbol_version: default_symbol_version(),
            time_zone: None,
            show_commit: true,
            show_days_of_week: true,
            show_language: true,
            show_editors: true,
            show_os: true,
            show_language_per_repo: true,
            show_loc_chart: false,
            show_total_code_time: true,
            show_lines_of_code: false,
            show_profile_views: true,
            snapshot_path: None,
            wakatime_api_key: None,
            wakatime_url: default_wakatime_url(),
            wakatime_time_range: default_time_range(),
            locale_path: None,
            readme_path: default_readme_path(),
            section_name: default_section_name(),
            chart_url: None,
            local: None,
        }
    }
}

// Serde default functions
fn default_symbol_version() -> u8 {
    1
}

fn default_true() -> bool {
    true
}

fn default_wakatime_url() -> String {
    DEFAULT_WAKATIME_URL.to_string()
}

fn default_time_range() -> String {
    DEFAULT_TIME_RANGE.to_string()
}

fn default_readme_path() -> PathBuf {
    PathBuf::from("README.md")
}

fn default_section_name() -> String {
    "waka".to_string()
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        "target".to_string(),
        "dist".to_string(),
        "build".to_string(),
        "vendor".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.symbol_version, 1);
        assert!(config.show_commit);
        assert!(!config.show_loc_chart);
        assert_eq!(config.section_name, "waka");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_symbol_version() {
        let mut config = Config::default();
        config.symbol_version = 4;
        assert!(matches!(config.validate(), Err(RecapError::Config(_))));
    }

    #[test]
    fn test_config_validation_time_zone() {
        let mut config = Config::default();
        config.time_zone = Some("Nowhere/Special".to_string());
        assert!(matches!(config.validate(), Err(RecapError::InvalidTimezone(_))));

        config.time_zone = Some("Europe/Lisbon".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_chart_requires_url() {
        let mut config = Config::default();
        config.show_loc_chart = true;
        assert!(matches!(config.validate(), Err(RecapError::MissingConfig(_))));

        config.chart_url = Some("assets/chart.png".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_section() {
        let mut config = Config::default();
        config.section_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("symbol_version"));
        assert!(toml_str.contains("section_name"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            symbol_version = 2
            time_zone = "Asia/Kolkata"
            show_editors = false

            [local]
            path = "/home/me/code"
            author_email = "me@example.com"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.symbol_version, 2);
        assert_eq!(config.symbols().unwrap(), SymbolSet::Braille);
        assert!(!config.show_editors);
        assert!(config.show_os);
        assert_eq!(config.wakatime_url, DEFAULT_WAKATIME_URL);

        let local = config.local.unwrap();
        assert_eq!(local.path, PathBuf::from("/home/me/code"));
        assert!(local.exclude_patterns.contains(&"node_modules".to_string()));
    }

    #[test]
    fn test_create_and_load_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        Config::create_default_at(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.readme_path, PathBuf::from("README.md"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load_from(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(RecapError::Config(_))));
    }
}
