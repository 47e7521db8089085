//! Configuration management for applang

use applang_foundation::{ApplangError, ApplangResult, Rule, RuleSet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "APPLANG_CONFIG";

/// Prefix for per-key environment overrides (`APPLANG__LOGGING__LEVEL=debug`)
pub const ENV_PREFIX: &str = "APPLANG__";

const CONFIG_DIR: &str = "applang";
const CONFIG_FILE: &str = "applang.toml";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Override rules, in priority order
    #[serde(default)]
    pub program_list: Vec<ProgramEntry>,
}

/// One entry of the overrides list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgramEntry {
    /// Executable path pattern; empty ends the list
    #[serde(default)]
    pub glob: String,
    /// Language identifier, `-1` for the system default
    #[serde(default = "default_lang_id")]
    pub lang_id: i64,
}

fn default_lang_id() -> i64 {
    -1
}

/// Log output format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// Structured JSON format
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Append logs to this file instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}

/// `applang.toml` inside the user's configuration directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Pick the configuration file to use.
///
/// Priority: `explicit`, then `APPLANG_CONFIG`, then the default location
/// (only if it exists).
pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }

    default_config_path().filter(|path| path.exists())
}

impl AppConfig {
    /// A starter configuration with a single example rule
    pub fn sample() -> Self {
        Self {
            logging: LoggingConfig::default(),
            program_list: vec![ProgramEntry {
                glob: "*\\example-executable-file.exe".to_string(),
                lang_id: -1,
            }],
        }
    }

    /// Locate and load the configuration. See [`locate`].
    pub fn load(explicit: Option<&Path>) -> ApplangResult<Self> {
        Self::load_from(locate(explicit).as_deref())
    }

    /// Load configuration from `path`, or defaults plus environment
    /// overrides when `path` is `None`.
    ///
    /// Layers (highest priority first):
    /// 1. Environment variables (`APPLANG__*`)
    /// 2. The TOML file
    /// 3. Default values
    pub fn load_from(path: Option<&Path>) -> ApplangResult<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Toml},
            Figment,
        };

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if let Some(path) = path {
            if !path.is_file() {
                return Err(ApplangError::config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            tracing::debug!(path = %path.display(), "Loading TOML configuration");
            figment = figment.merge(Toml::file(path));
        }

        let config: AppConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ApplangError::config(format!("Failed to load configuration: {}", e)))?;

        config.validate()?;

        tracing::debug!(
            rules = config.program_list.len(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration as TOML
    pub fn save(&self, path: &Path) -> ApplangResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ApplangError::config_with_source("Failed to serialize configuration", e))?;

        std::fs::write(path, content).map_err(|e| {
            ApplangError::config_with_source(
                format!("Failed to write configuration file {}", path.display()),
                e,
            )
        })
    }

    /// The overrides list as rules, in stored order
    pub fn rules(&self) -> RuleSet {
        self.program_list
            .iter()
            .map(|entry| {
                // validate() guarantees the range
                let id = i16::try_from(entry.lang_id).unwrap_or(-1);
                Rule::new(entry.glob.clone(), id)
            })
            .collect()
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApplangResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ApplangError::config(format!(
                "Invalid log level '{}', must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            )));
        }

        for (index, entry) in self.program_list.iter().enumerate() {
            if entry.lang_id != -1 && !(0..=i64::from(i16::MAX)).contains(&entry.lang_id) {
                return Err(ApplangError::config(format!(
                    "programList[{}].langId {} is out of range, use -1 or 0..={}",
                    index,
                    entry.lang_id,
                    i16::MAX
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.rules().is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_rules_preserve_order_and_terminator() {
        let config = AppConfig {
            program_list: vec![
                ProgramEntry {
                    glob: "*\\a.exe".into(),
                    lang_id: 1033,
                },
                ProgramEntry {
                    glob: String::new(),
                    lang_id: -1,
                },
                ProgramEntry {
                    glob: "*\\b.exe".into(),
                    lang_id: 2052,
                },
            ],
            ..Default::default()
        };

        let rules = config.rules();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules.active(), &[Rule::new("*\\a.exe", 1033)]);
    }

    #[test]
    fn test_rejects_out_of_range_lang_id() {
        let config = AppConfig {
            program_list: vec![ProgramEntry {
                glob: "*\\a.exe".into(),
                lang_id: 70000,
            }],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("programList[0].langId 70000"));
    }

    #[test]
    fn test_rejects_negative_lang_id_other_than_sentinel() {
        let config = AppConfig {
            program_list: vec![ProgramEntry {
                glob: "*\\a.exe".into(),
                lang_id: -2,
            }],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "verbose".into();
        assert!(config.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_sample_is_valid() {
        assert!(AppConfig::sample().validate().is_ok());
        assert_eq!(AppConfig::sample().rules().active().len(), 1);
    }
}
