//! Configuration merger for CLI arguments and config files
//!
//! CLI arguments sit on top of the layered file/environment configuration:
//! files < `COURSE_API_*` variables < global flags < subcommand flags.

use super::parser::{Cli, Commands};
use crate::config::{ConfigError, ConfigLoader, Environment, Settings};

/// Configuration merger that applies CLI overrides to file-based settings
pub struct ConfigurationMerger {
    base_config: Settings,
    environment: Environment,
}

impl ConfigurationMerger {
    /// Create a new configuration merger with base configuration
    pub fn new(base_config: Settings, environment: Environment) -> Self {
        Self {
            base_config,
            environment,
        }
    }

    /// Load the base configuration honouring `--config` and `--env`
    ///
    /// Validation is deferred to [`merge_cli_args`](Self::merge_cli_args)
    /// so flags such as `--port` can still fix an invalid file value.
    ///
    /// # Errors
    /// Returns ConfigError if the files cannot be found or parsed
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        Ok(Self::new(loader.load_unvalidated()?, loader.environment()))
    }

    /// Merge CLI arguments with the base configuration and validate the result
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// The environment whose files were loaded
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// The configuration before CLI overrides
    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn merger() -> ConfigurationMerger {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/courses".to_string();
        ConfigurationMerger::new(config, Environment::Test)
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        merger().merge_cli_args(&cli)
    }

    #[test]
    fn test_no_flags_keeps_base_config() {
        let merger = merger();
        let cli = Cli::try_parse_from(["course-api"]).unwrap();
        assert_eq!(&merger.merge_cli_args(&cli).unwrap(), merger.config());
        assert_eq!(merger.environment(), Environment::Test);
    }

    #[test]
    fn test_verbose_and_quiet_flags() {
        assert_eq!(merge(&["course-api", "--verbose"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["course-api", "--quiet"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_serve_overrides() {
        let config = merge(&["course-api", "serve", "--host", "0.0.0.0", "--port", "8080"]).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let config = merge(&["course-api", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(config.logger.level, "warn");
    }

    #[test]
    fn test_merged_config_is_validated() {
        let merger = ConfigurationMerger::new(Settings::default(), Environment::Test);
        let cli = Cli::try_parse_from(["course-api", "serve"]).unwrap();
        assert!(matches!(
            merger.merge_cli_args(&cli),
            Err(ConfigError::ValidationError { .. })
        ));
    }
}
