//! Console configuration

use axiom_client::ClientConfig;
use axiom_shell::ShellConfig;
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "AXIOM";

/// Effective console configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxiomConfig {
    /// Remote API endpoint and models
    #[serde(default)]
    pub api: ClientConfig,

    /// Shell timings and log capacity
    #[serde(default)]
    pub shell: ShellConfig,

    /// Diagnostic logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl AxiomConfig {
    /// Defaults, then the optional file, then `AXIOM_*` environment variables
    /// (`__` separates nested keys, e.g. `AXIOM_API__FAST_MODEL`).
    pub fn load(path: Option<&str>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder()
            .add_source(::config::Config::try_from(&AxiomConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(::config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AxiomConfig::default();
        assert_eq!(config.shell.log_capacity, 20);
        assert_eq!(config.logging.level, "warn");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = AxiomConfig::load(Some("/nonexistent/path/axiom")).unwrap();
        assert_eq!(config.api, ClientConfig::default());
        assert_eq!(config.shell, ShellConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("axiom-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("axiom.toml");
        std::fs::write(
            &path,
            "[api]\nfast_model = \"tiny-model\"\n\n[shell]\nstage_delay_ms = 5\n",
        )
        .unwrap();

        let config = AxiomConfig::load(path.to_str()).unwrap();
        assert_eq!(config.api.fast_model, "tiny-model");
        assert_eq!(config.api.chat_model, ClientConfig::default().chat_model);
        assert_eq!(config.shell.stage_delay_ms, 5);
        assert_eq!(config.shell.log_capacity, 20);

        std::fs::remove_dir_all(&dir).ok();
    }
}
