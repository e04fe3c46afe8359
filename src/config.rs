// Application configuration
//
// Configuration is loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/moneylens/config.toml)
// 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Mirror logs to rotating JSON files (in addition to the TUI strip)
    pub file_enabled: bool,

    /// Directory for log files
    pub file_dir: PathBuf,

    /// Log file name prefix
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_prefix: "moneylens".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the reference-data JSON document
    pub data_path: PathBuf,

    /// Quiet period after the last keystroke before metrics recompute
    pub debounce: Duration,

    /// Duration of one value animation
    pub animation: Duration,

    /// Demo mode: run against built-in sample data instead of a file
    pub demo_mode: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging settings as loaded from the config file
#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
    file_prefix: Option<String>,
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    data_path: Option<String>,
    debounce_ms: Option<u64>,
    animation_ms: Option<u64>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

impl Config {
    /// Get the config file path: ~/.config/moneylens/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("moneylens").join("config.toml"))
    }

    /// Create a config template if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Write template (ignore errors - config is optional)
        let _ = std::fs::write(&path, TEMPLATE);
    }

    /// Load file config if it exists
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                FileConfig::default()
            }),
            Err(_) => FileConfig::default(), // File doesn't exist, use defaults
        }
    }

    /// Serialize config to TOML (single source of truth for the format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# moneylens configuration

# Path of the reference-data JSON document
data_path = "{data_path}"

# Quiet period after the last keystroke, in milliseconds
debounce_ms = {debounce}

# Duration of one value animation, in milliseconds
animation_ms = {animation}

# Logging configuration (RUST_LOG env var overrides the level)
[logging]
level = "{level}"
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_prefix = "{file_prefix}"
"#,
            data_path = self.data_path.display(),
            debounce = self.debounce.as_millis(),
            animation = self.animation.as_millis(),
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_prefix = self.logging.file_prefix,
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        // Data document path: env > file > default
        let data_path = std::env::var("MONEYLENS_DATA")
            .ok()
            .or(file.data_path)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data.json"));

        // Debounce quiet period: env > file > default (300 ms)
        let debounce_ms = std::env::var("MONEYLENS_DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.debounce_ms)
            .unwrap_or(300);

        // Animation duration: env > file > default (600 ms)
        let animation_ms = std::env::var("MONEYLENS_ANIMATION_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.animation_ms)
            .unwrap_or(600);

        // Demo mode: env only (runtime flag)
        let demo_mode = std::env::var("MONEYLENS_DEMO")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        // Logging settings: file config only (RUST_LOG handled in main.rs)
        let file_logging = file.logging.unwrap_or_default();
        let defaults = LoggingConfig::default();
        let logging = LoggingConfig {
            level: file_logging.level.unwrap_or(defaults.level),
            file_enabled: file_logging.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file_logging
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_prefix: file_logging.file_prefix.unwrap_or(defaults.file_prefix),
        };

        Self {
            data_path,
            debounce: Duration::from_millis(debounce_ms),
            animation: Duration::from_millis(animation_ms),
            demo_mode,
            logging,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./data.json"),
            debounce: crate::debounce::DEFAULT_QUIET,
            animation: crate::animate::DEFAULT_DURATION,
            demo_mode: false,
            logging: LoggingConfig::default(),
        }
    }
}

const TEMPLATE: &str = r#"# moneylens configuration
# Uncomment and modify options as needed

# Path of the reference-data JSON document (default: ./data.json)
# data_path = "./data.json"

# Quiet period after the last keystroke, in milliseconds (default: 300)
# debounce_ms = 300

# Duration of one value animation, in milliseconds (default: 600)
# animation_ms = 600

# Logging configuration
# [logging]
# level = "info"          # trace, debug, info, warn, error (RUST_LOG overrides)
# file_enabled = false    # mirror logs to rotating JSON files
# file_dir = "./logs"
# file_prefix = "moneylens"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pipeline_timings() {
        let config = Config::default();
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.animation, Duration::from_millis(600));
        assert_eq!(config.data_path, PathBuf::from("./data.json"));
        assert!(!config.demo_mode);
    }

    #[test]
    fn test_template_parses_as_file_config() {
        let parsed: FileConfig = toml::from_str(TEMPLATE).unwrap();
        // Everything is commented out, so nothing should be set
        assert!(parsed.data_path.is_none());
        assert!(parsed.debounce_ms.is_none());
        assert!(parsed.logging.is_none());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = Config::default();
        let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
        assert_eq!(parsed.data_path.as_deref(), Some("./data.json"));
        assert_eq!(parsed.debounce_ms, Some(300));
        assert_eq!(parsed.animation_ms, Some(600));
        let logging = parsed.logging.unwrap();
        assert_eq!(logging.level.as_deref(), Some("info"));
        assert_eq!(logging.file_enabled, Some(false));
    }

    #[test]
    fn test_file_config_sections_parse() {
        let parsed: FileConfig = toml::from_str(
            r#"
            data_path = "/tmp/data.json"
            debounce_ms = 150

            [logging]
            level = "debug"
            file_enabled = true
            "#,
        )
        .unwrap();
        assert_eq!(parsed.data_path.as_deref(), Some("/tmp/data.json"));
        assert_eq!(parsed.debounce_ms, Some(150));
        assert_eq!(parsed.logging.unwrap().file_enabled, Some(true));
    }
}
