use crate::error::AppError;
use clap::{Parser, ValueEnum};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix of environment variables that override configuration file values.
pub const ENV_PREFIX: &str = "SHADER_FORGE_";

/// How parsed shaders are reported.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable, colored overview.
    #[default]
    Summary,
    /// Full descriptors as JSON.
    Json,
    /// One CSV row per shader.
    Csv,
}

/// Global log level for every module.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalLogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

/// Command line of the Shader Forge application.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct AppConfig {
    /// Shader script files, or directories containing `*.shader` files.
    #[arg(value_name = "SCRIPT", required = true)]
    pub scripts: Vec<PathBuf>,

    /// Only report these shaders (repeatable). Defaults to every loaded shader.
    #[arg(short, long = "shader", value_name = "NAME")]
    pub shaders: Vec<String>,

    /// Lightmap index of the surface; negative means no lightmap is available.
    #[arg(long, allow_negative_numbers = true)]
    pub lightmap_index: Option<i32>,

    /// Skin file whose surfaces are resolved against the loaded shaders.
    #[arg(long, value_name = "FILE")]
    pub skin: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the report to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Fail on parse errors and on shaders containing NaN values.
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Global log level (`RUST_LOG` module directives still apply).
    #[arg(long, value_enum)]
    pub global_log_level: Option<GlobalLogLevel>,

    /// Optional TOML file providing defaults for the options above.
    #[arg(long, value_name = "FILE", env = "SHADER_FORGE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Values that may come from the command line, a config file or the environment.
///
/// Command line flags win over `SHADER_FORGE_*` variables, which win over the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub lightmap_index: i32,
    pub format: OutputFormat,
    pub global_log_level: GlobalLogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lightmap_index: 0,
            format: OutputFormat::default(),
            global_log_level: GlobalLogLevel::default(),
        }
    }
}

impl Settings {
    /// Merges defaults, the optional config file, the environment and the command line.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the config file is missing or a value has the wrong type.
    pub fn load(config: &AppConfig) -> Result<Self, AppError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = &config.config {
            if !path.is_file() {
                return Err(AppError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Toml::file(path));
        }

        let mut settings: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).only(&["lightmap_index", "format", "global_log_level"]))
            .extract()
            .map_err(|e| AppError::Config(e.to_string()))?;

        if let Some(index) = config.lightmap_index {
            settings.lightmap_index = index;
        }
        if let Some(format) = config.format {
            settings.format = format;
        }
        if let Some(level) = config.global_log_level {
            settings.global_log_level = level;
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*; // Import items from parent module (config)
    use std::fs;

    #[test]
    fn test_basic_args() {
        let args = vec!["shader-forge", "scripts/base.shader", "--shader", "textures/a"];
        let config = AppConfig::try_parse_from(args).unwrap();
        assert_eq!(config.scripts, vec![PathBuf::from("scripts/base.shader")]);
        assert_eq!(config.shaders, vec!["textures/a".to_owned()]);
        assert_eq!(config.lightmap_index, None);
        assert_eq!(config.format, None);
        assert!(!config.strict);
    }

    #[test]
    fn test_scripts_are_required() {
        assert!(AppConfig::try_parse_from(vec!["shader-forge"]).is_err());
    }

    #[test]
    fn test_negative_lightmap_index() {
        let args = vec!["shader-forge", "a.shader", "--lightmap-index", "-1"];
        let config = AppConfig::try_parse_from(args).unwrap();
        assert_eq!(config.lightmap_index, Some(-1));
    }

    #[test]
    fn test_format_enum_parsing() {
        let args = vec!["shader-forge", "a.shader", "--format", "csv"];
        let config = AppConfig::try_parse_from(args).unwrap();
        assert_eq!(config.format, Some(OutputFormat::Csv));

        let args_err = vec!["shader-forge", "a.shader", "--format", "yaml"];
        assert!(AppConfig::try_parse_from(args_err).is_err());
    }

    #[test]
    fn test_config_file_supplies_defaults_and_flags_win() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forge.toml");
        fs::write(&path, "lightmap_index = -1\nformat = \"json\"\n").unwrap();

        let config = AppConfig::try_parse_from(vec![
            "shader-forge".to_owned(),
            "a.shader".to_owned(),
            "--config".to_owned(),
            path.display().to_string(),
            "--format".to_owned(),
            "csv".to_owned(),
        ])
        .unwrap();
        let settings = Settings::load(&config).unwrap();
        assert_eq!(settings.lightmap_index, -1);
        assert_eq!(settings.format, OutputFormat::Csv);
        assert_eq!(settings.global_log_level, GlobalLogLevel::Info);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = vec!["shader-forge", "a.shader", "--config", "/nonexistent/forge.toml"];
        let config = AppConfig::try_parse_from(args).unwrap();
        assert!(matches!(Settings::load(&config), Err(AppError::Config(_))));
    }
}
