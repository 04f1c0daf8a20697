//! # o365-cli
//!
//! Command-line administration for Office 365 and SharePoint Online.
//!
//! ## Commands
//!
//! - `o365 spo status` - Show the connected site
//! - `o365 spo contenttype field-remove` - Remove a field link from a content type
//!
//! ## Configuration
//!
//! The CLI uses environment variables or command-line flags for settings:
//!
//! - `O365_SITE_URL` - SharePoint Online site the session is connected to
//! - `O365_ACCESS_TOKEN` - Bearer token for the tenant
//! - `O365_TIMEOUT_SECS` - HTTP timeout (default: `30`)
//! - `O365_LOG_FORMAT` - `pretty` or `json` logs on stderr (default: `pretty`)

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]
// CLI uses print! macros intentionally
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

pub mod commands;

use std::time::Duration;

use clap::{Parser, Subcommand};
use o365_core::LogFormat;

/// o365 CLI - Office 365 / SharePoint Online administration.
#[derive(Debug, Parser)]
#[command(name = "o365")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SharePoint Online site to connect to.
    #[arg(long, global = true, env = "O365_SITE_URL")]
    pub site_url: Option<String>,

    /// Access token for the tenant.
    #[arg(long, global = true, env = "O365_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// HTTP request timeout in seconds.
    #[arg(
        long,
        global = true,
        env = "O365_TIMEOUT_SECS",
        default_value = "30",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Log output format on stderr (`pretty` or `json`).
    #[arg(long, global = true, env = "O365_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    /// Log every request and response step.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Report completion of commands that otherwise print nothing.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the effective configuration.
    #[must_use]
    pub fn config(&self) -> Config {
        Config {
            site_url: self.site_url.clone(),
            access_token: self.access_token.clone(),
            format: self.format.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            log_format: self.log_format,
            debug: self.debug,
            verbose: self.verbose,
        }
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// SharePoint Online commands.
    Spo(SpoArgs),
}

/// Arguments for the `spo` command group.
#[derive(Debug, clap::Args)]
pub struct SpoArgs {
    /// SharePoint Online subcommand.
    #[command(subcommand)]
    pub command: SpoCommands,
}

/// SharePoint Online subcommands.
#[derive(Debug, Subcommand)]
pub enum SpoCommands {
    /// Show the connected site.
    Status(commands::status::StatusArgs),
    /// Content type commands.
    #[command(name = "contenttype")]
    ContentType(ContentTypeArgs),
}

/// Arguments for the `spo contenttype` command group.
#[derive(Debug, clap::Args)]
pub struct ContentTypeArgs {
    /// Content type subcommand.
    #[command(subcommand)]
    pub command: ContentTypeCommands,
}

/// Content type subcommands.
#[derive(Debug, Subcommand)]
pub enum ContentTypeCommands {
    /// Remove a field link from a content type.
    FieldRemove(commands::contenttype_field_remove::FieldRemoveArgs),
}

/// Output format.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// Table output.
    Table,
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connected SharePoint Online site.
    pub site_url: Option<String>,
    /// Access token for the tenant.
    pub access_token: Option<String>,
    /// Output format.
    pub format: OutputFormat,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Log output format.
    pub log_format: LogFormat,
    /// Debug mode.
    pub debug: bool,
    /// Verbose mode.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_url: None,
            access_token: None,
            format: OutputFormat::Text,
            timeout: o365_spo::DEFAULT_TIMEOUT,
            log_format: LogFormat::Pretty,
            debug: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Returns true when commands should report completion.
    #[must_use]
    pub fn reports_progress(&self) -> bool {
        self.debug || self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_config_from_flags() {
        let cli = Cli::parse_from([
            "o365",
            "--site-url",
            "https://contoso.sharepoint.com",
            "--access-token",
            "ABC",
            "--format",
            "json",
            "--timeout-secs",
            "5",
            "spo",
            "status",
        ]);

        let config = cli.config();
        assert_eq!(
            config.site_url.as_deref(),
            Some("https://contoso.sharepoint.com")
        );
        assert_eq!(config.access_token.as_deref(), Some("ABC"));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.reports_progress());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "o365",
            "spo",
            "contenttype",
            "field-remove",
            "-u",
            "https://contoso.sharepoint.com",
            "-i",
            "0x0100558D85B7216F6A489A499DB361E1AE2F",
            "-f",
            "5ee2dd25-d941-455a-9bdb-7f2c54aed11b",
            "--debug",
        ]);

        assert!(cli.config().debug);
        assert!(matches!(
            cli.command,
            Commands::Spo(SpoArgs {
                command: SpoCommands::ContentType(ContentTypeArgs {
                    command: ContentTypeCommands::FieldRemove(_)
                })
            })
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = Cli::try_parse_from(["o365", "--timeout-secs", "0", "spo", "status"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_format_flag() {
        let cli = Cli::parse_from(["o365", "spo", "status", "--log-format", "json"]);
        assert_eq!(cli.config().log_format, LogFormat::Json);

        let result = Cli::try_parse_from(["o365", "--log-format", "xml", "spo", "status"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.timeout, o365_spo::DEFAULT_TIMEOUT);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }
}
