//! Configuration for the BCS CLI
//!
//! Global flags plus the environment decide how the API client is built.
//! Rate limit settings have no flags and come from `BCS_RATE_LIMIT_*` only.

use bcs_client::ClientConfig;
use bcs_common::logging::LogLevel;
use std::time::Duration;

use crate::error::Result;
use crate::Cli;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Default file written by `download` and read by `parse`.
pub const DEFAULT_BULK_FILENAME: &str = "bcs_bulk.jsonl";

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// API base URL
    pub base_url: String,

    /// Enable verbose output
    pub verbose: bool,
}

impl CliConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            base_url: cli.base_url.clone(),
            verbose: cli.verbose,
        }
    }

    /// Log level used unless `LOG_LEVEL` overrides it.
    pub fn log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        }
    }

    /// Build the API client configuration for one command.
    ///
    /// Starts from the `BCS_*` environment, then applies the flags, which
    /// take precedence.
    pub fn client_config(&self, api_key: &str, timeout: Duration) -> Result<ClientConfig> {
        let config = ClientConfig::from_env()?
            .with_base_url(self.base_url.clone())
            .with_timeout(timeout);

        Ok(ClientConfig {
            api_key: api_key.to_string(),
            ..config
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_flags_override_environment() {
        std::env::set_var("BCS_API_KEY", "from-env");
        std::env::set_var("BCS_RATE_LIMIT_PER_SECOND", "7");

        let cli = Cli::try_parse_from(["bcs", "--base-url", "http://localhost:1234", "version"])
            .unwrap();
        let config = CliConfig::from_cli(&cli)
            .client_config("from-flag", Duration::from_secs(3))
            .unwrap();

        std::env::remove_var("BCS_API_KEY");
        std::env::remove_var("BCS_RATE_LIMIT_PER_SECOND");

        assert_eq!(config.api_key, "from-flag");
        assert_eq!(config.base_url, "http://localhost:1234");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.rate_per_second, 7);
    }

    #[test]
    #[serial]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["bcs", "parse", "--verbose"]).unwrap();
        let config = CliConfig::from_cli(&cli);
        assert!(config.verbose);
        assert_eq!(config.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_quiet_by_default() {
        let cli = Cli::try_parse_from(["bcs", "version"]).unwrap();
        assert_eq!(CliConfig::from_cli(&cli).log_level(), LogLevel::Warn);
    }
}
