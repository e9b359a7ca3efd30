//! Resolve parsed arguments into engine and oracle settings.

use std::sync::Arc;
use std::time::Duration;

use crisis_core::enums::PlayMode;
use crisis_oracle::{AnthropicOracle, OfflineOracle, Oracle, OracleConfig};
use crisis_sim::{scenario, EngineConfig};

use crate::args::Cli;
use crate::error::{AppError, ConfigError};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineConfig,
    /// `None` in menu mode, which never calls the oracle.
    pub oracle: Option<OracleConfig>,
    /// Skip restoring from the save file.
    pub fresh: bool,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mode = PlayMode::from(cli.mode);

        if let Some(id) = &cli.scenario {
            if scenario::by_id(id).is_none() {
                return Err(ConfigError::UnknownScenario(id.clone()));
            }
        }
        if cli.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        let oracle = match mode {
            PlayMode::Menu => None,
            PlayMode::FreeText => {
                let api_key = cli
                    .api_key
                    .as_deref()
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .ok_or(ConfigError::MissingApiKey)?;
                Some(OracleConfig {
                    api_key: api_key.to_string(),
                    base_url: cli.base_url.clone(),
                    model: cli.model.clone(),
                    timeout: Duration::from_secs(cli.timeout_secs),
                    ..Default::default()
                })
            }
        };

        Ok(Self {
            engine: EngineConfig {
                mode,
                scenario: cli.scenario.clone(),
                seed: cli.seed,
                save_path: (!cli.no_save).then(|| cli.save_file.clone()),
            },
            oracle,
            fresh: cli.new_game,
        })
    }

    pub fn build_oracle(&self) -> Result<Arc<dyn Oracle>, AppError> {
        match &self.oracle {
            Some(config) => Ok(Arc::new(AnthropicOracle::new(config.clone())?)),
            None => Ok(Arc::new(OfflineOracle)),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["crisis"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_menu_mode_needs_no_key() {
        let cli = parse(&["--mode", "menu", "--no-save", "--seed", "7"]);
        let config = AppConfig::from_cli(&cli).unwrap();
        assert_eq!(config.engine.mode, PlayMode::Menu);
        assert_eq!(config.engine.seed, Some(7));
        assert!(config.engine.save_path.is_none());
        assert!(config.oracle.is_none());
        assert!(config.build_oracle().is_ok());
    }

    #[test]
    fn test_free_text_requires_key() {
        let cli = parse(&["--mode", "free-text", "--api-key", "  "]);
        assert!(matches!(
            AppConfig::from_cli(&cli),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn test_free_text_oracle_settings() {
        let cli = parse(&[
            "--api-key",
            "sk-test",
            "--timeout-secs",
            "5",
            "--base-url",
            "http://localhost:9000",
            "--save-file",
            "/tmp/crisis.json",
        ]);
        let config = AppConfig::from_cli(&cli).unwrap();
        let oracle = config.oracle.unwrap();
        assert_eq!(oracle.api_key, "sk-test");
        assert_eq!(oracle.timeout, Duration::from_secs(5));
        assert_eq!(oracle.base_url, "http://localhost:9000");
        assert_eq!(oracle.command_max_tokens, 2000);
        assert_eq!(
            config.engine.save_path.as_deref(),
            Some(std::path::Path::new("/tmp/crisis.json"))
        );
    }

    #[test]
    fn test_rejects_bad_scenario_and_timeout() {
        let cli = parse(&["--mode", "menu", "--scenario", "moon_base"]);
        assert!(matches!(
            AppConfig::from_cli(&cli),
            Err(ConfigError::UnknownScenario(_))
        ));
        let cli = parse(&["--mode", "menu", "--timeout-secs", "0"]);
        assert!(matches!(
            AppConfig::from_cli(&cli),
            Err(ConfigError::InvalidTimeout)
        ));
    }
}
