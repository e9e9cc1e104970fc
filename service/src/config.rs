use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Application configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. config.yaml file (if exists)
/// 3. Environment variables with EPA_ prefix (always wins)
///
/// Term boundaries and batch sizes are fixed and deliberately absent here.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the open-data API, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Member statistics output file.
    #[serde(default = "default_members_path")]
    pub members_path: String,

    /// Shaped events output file. Not written when unset.
    #[serde(default)]
    pub events_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    "https://data.europarl.europa.eu/api/v1".to_string()
}

fn default_members_path() -> String {
    "european_parliament_stats.csv".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            members_path: default_members_path(),
            events_path: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration file not found: {0}")]
    MissingFile(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from defaults, `config.yaml`, and `EPA_` variables.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.yaml")
    }

    /// Load configuration with a custom YAML file path. A missing file is
    /// not an error; defaults and environment still apply.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("EPA_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file the caller named explicitly. Unlike
    /// [`Config::load_from`], the file must exist.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingFile`] if `yaml_path` is not a file, or
    /// any error [`Config::load_from`] returns.
    pub fn load_required(yaml_path: &str) -> Result<Self, ConfigError> {
        if !std::path::Path::new(yaml_path).is_file() {
            return Err(ConfigError::MissingFile(yaml_path.to_string()));
        }
        Self::load_from(yaml_path)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.api.base_url;
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "api.base_url must start with http:// or https://, got: '{base}'"
            )));
        }

        if self.export.members_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "export.members_path cannot be empty".into(),
            ));
        }

        if let Some(events_path) = &self.export.events_path {
            if events_path.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "export.events_path cannot be empty when set".into(),
                ));
            }
            if events_path == &self.export.members_path {
                return Err(ConfigError::Validation(
                    "export.events_path must differ from export.members_path".into(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://data.europarl.europa.eu/api/v1");
        assert_eq!(config.export.members_path, "european_parliament_stats.csv");
        assert!(config.export.events_path.is_none());
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_and_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r"
api:
  base_url: http://localhost:9000/api/v1
export:
  events_path: events_with_details.csv
logging:
  level: warn
",
            )?;
            jail.set_env("EPA_LOGGING__LEVEL", "debug");

            let config = Config::load().expect("should load");
            assert_eq!(config.api.base_url, "http://localhost:9000/api/v1");
            assert_eq!(config.export.events_path.as_deref(), Some("events_with_details.csv"));
            assert_eq!(config.export.members_path, "european_parliament_stats.csv");
            assert_eq!(config.logging.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load_from("absent.yaml").expect("should load");
            assert_eq!(config.export.members_path, "european_parliament_stats.csv");
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_must_exist() {
        Jail::expect_with(|jail| {
            let err = Config::load_required("absent.yaml").unwrap_err();
            assert!(matches!(err, ConfigError::MissingFile(ref path) if path == "absent.yaml"));

            jail.create_file("custom.yaml", "export:\n  members_path: custom.csv\n")?;
            let config = Config::load_required("custom.yaml").expect("should load");
            assert_eq!(config.export.members_path, "custom.csv");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_env_value_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("EPA_API__BASE_URL", "data.europarl.europa.eu");
            let err = Config::load().unwrap_err();
            assert!(err.to_string().contains("api.base_url"));
            Ok(())
        });
    }

    // Table-driven boundary tests for validation rules

    #[test]
    fn base_url_boundaries() {
        let cases = [
            ("https://data.europarl.europa.eu/api/v1", true, "default"),
            ("http://127.0.0.1:8080", true, "plain http"),
            ("ftp://data.europarl.europa.eu", false, "ftp scheme"),
            ("data.europarl.europa.eu", false, "no scheme"),
            ("", false, "empty"),
        ];

        for (url, should_pass, desc) in cases {
            let mut config = Config::default();
            config.api.base_url = url.into();
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }

    #[test]
    fn export_path_boundaries() {
        let cases = [
            ("stats.csv", None, true, "members only"),
            ("stats.csv", Some("events.csv"), true, "both files"),
            ("  ", None, false, "blank members path"),
            ("stats.csv", Some(""), false, "blank events path"),
            ("stats.csv", Some("stats.csv"), false, "same file twice"),
        ];

        for (members, events, should_pass, desc) in cases {
            let mut config = Config::default();
            config.export.members_path = members.into();
            config.export.events_path = events.map(String::from);
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }
}
