use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::CliError;

pub const DEFAULT_SETTINGS_FILE: &str = "sixcities.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generate: GenerateSettings,
    pub templates: TemplateSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateSettings {
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    pub timeout_secs: u64,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl TemplateSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub filter: String,
    /// JSON log file, appended to when set.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

/// Load settings from `explicit`, else from `sixcities.toml` in the working
/// directory, else fall back to defaults. An explicit path must exist.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, CliError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if !path.exists() {
                return Ok(Settings::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|err| {
        CliError::InvalidConfig(format!("can't read {}: {err}", path.display()))
    })?;
    parse_settings(&content)
        .map_err(|err| CliError::InvalidConfig(format!("{}: {err}", path.display())))
}

fn parse_settings(content: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let settings = parse_settings("").expect("parse settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.templates.timeout(), Duration::from_secs(10));
        assert_eq!(settings.logging.filter, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = parse_settings(
            r#"
            [generate]
            seed = 42

            [logging]
            file = "logs/sixcities.ndjson"
            "#,
        )
        .expect("parse settings");
        assert_eq!(settings.generate.seed, Some(42));
        assert_eq!(settings.templates.timeout_secs, 10);
        assert_eq!(settings.logging.filter, "info");
        assert_eq!(
            settings.logging.file,
            Some(PathBuf::from("logs/sixcities.ndjson"))
        );
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(parse_settings("[templates]\ntimeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn explicit_missing_file_is_invalid_config() {
        let result = load_settings(Some(Path::new("/nonexistent/sixcities.toml")));
        assert!(matches!(result, Err(CliError::InvalidConfig(_))));
    }
}
