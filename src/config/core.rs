use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::report::ReportFormat;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Merged configuration for the `reckon` binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReckonConfig {
    pub parallel: ParallelConfig,
    pub demo: DemoConfig,
    pub output: OutputConfig,
}

/// Worker sizing for parallel aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Maximum number of worker threads (0 = no cap)
    pub max_threads: usize,
    /// Percentage of CPU cores to use (1-100)
    pub thread_percentage: u8,
    /// Minimum records before auto mode goes parallel
    pub min_items_for_parallel: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    pub field_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: ReportFormat,
}

impl ReckonConfig {
    /// Load defaults, then either `custom_config` alone or the user and
    /// repository files, then `RECKON_*` environment variables, then
    /// `overrides` (command-line flags).
    pub fn load<T: Serialize>(custom_config: Option<&str>, overrides: Option<&T>) -> Result<Self> {
        let figment = Self::figment(custom_config);
        let figment = match overrides {
            Some(overrides) => figment.merge(Serialized::defaults(overrides)),
            None => figment,
        };

        let config: ReckonConfig = figment
            .extract()
            .context("Failed to load reckon configuration")?;
        tracing::trace!("CONFIG LOAD: {:?}", config);
        config.validate()?;
        Ok(config)
    }

    fn figment(custom_config: Option<&str>) -> Figment {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(custom_path) = custom_config {
            tracing::debug!("Using custom config file: {}", custom_path);
            figment = match custom_path.rsplit('.').next() {
                Some("json") => figment.merge(Json::file(custom_path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(custom_path)),
                _ => figment.merge(Toml::file(custom_path)),
            };
        } else {
            let user = Self::user_config_path();
            figment = figment
                // User config - support multiple formats
                .merge(Toml::file(&user))
                .merge(Json::file(user.replace(".toml", ".json")))
                .merge(Yaml::file(user.replace(".toml", ".yaml")))
                .merge(Yaml::file(user.replace(".toml", ".yml")))
                // Repository config - support multiple formats
                .merge(Toml::file("reckon.toml"))
                .merge(Json::file("reckon.json"))
                .merge(Yaml::file("reckon.yaml"))
                .merge(Yaml::file("reckon.yml"));
        }

        // Environment variables always have highest priority
        figment.merge(Env::prefixed("RECKON_").split("__"))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.parallel.thread_percentage == 0 || self.parallel.thread_percentage > 100 {
            anyhow::bail!(
                "parallel.thread_percentage must be between 1 and 100, got {}",
                self.parallel.thread_percentage
            );
        }
        if self.parallel.min_items_for_parallel == 0 {
            anyhow::bail!("parallel.min_items_for_parallel cannot be 0");
        }
        Ok(())
    }

    /// Maximum workers allowed on this machine under this configuration
    pub fn max_workers(&self) -> usize {
        crate::parallel::ExecutionStrategy::calculate_optimal_workers(
            self.parallel.max_threads,
            self.parallel.thread_percentage,
        )
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{home}/.config/reckon/config.toml"),
            Err(_) => "~/.config/reckon/config.toml".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_loads_defaults() {
        let config = ReckonConfig::load(Some("non_existent.toml"), None::<&()>)
            .expect("Should load default config");

        assert_eq!(config.parallel.max_threads, 0);
        assert_eq!(config.parallel.thread_percentage, 75);
        assert_eq!(config.demo.field_delay_ms, 100);
        assert_eq!(config.output.format, ReportFormat::Text);
    }

    #[test]
    fn test_custom_config_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[parallel]\nmax_threads = 3\n\n[demo]\nfield_delay_ms = 0").unwrap();

        let config = ReckonConfig::load(Some(file.path().to_str().unwrap()), None::<&()>).unwrap();
        assert_eq!(config.parallel.max_threads, 3);
        assert_eq!(config.demo.field_delay_ms, 0);
        // Untouched keys keep their defaults
        assert_eq!(config.parallel.thread_percentage, 75);
        assert!(config.max_workers() <= 3);
    }

    #[test]
    fn test_custom_yaml_config_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "output:\n  format: json").unwrap();

        let config = ReckonConfig::load(Some(file.path().to_str().unwrap()), None::<&()>).unwrap();
        assert_eq!(config.output.format, ReportFormat::Json);
    }

    #[test]
    fn test_cli_overrides_win() {
        let overrides = serde_json::json!({ "demo": { "field_delay_ms": 7 } });
        let config = ReckonConfig::load(Some("non_existent.toml"), Some(&overrides)).unwrap();
        assert_eq!(config.demo.field_delay_ms, 7);
    }

    #[test]
    fn test_validate_rejects_bad_percentage() {
        let mut config = ReckonConfig::load(Some("non_existent.toml"), None::<&()>).unwrap();
        config.parallel.thread_percentage = 0;
        assert!(config.validate().is_err());

        config.parallel.thread_percentage = 101;
        assert!(config.validate().is_err());

        config.parallel.thread_percentage = 50;
        assert!(config.validate().is_ok());
    }
}
