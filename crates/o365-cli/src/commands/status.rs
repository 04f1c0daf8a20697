//! Status command - show the connected site.

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;

use o365_core::Redacted;

use crate::{Config, OutputFormat};

/// Arguments for the status command.
#[derive(Debug, Args)]
pub struct StatusArgs {}

/// Connection state as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    /// Whether both a site and a token are configured.
    pub connected: bool,
    /// Connected site, if any.
    pub site_url: Option<String>,
    /// Redacted token marker, if a token is configured.
    pub access_token: Option<String>,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl ConnectionStatus {
    /// Builds the status from configuration without contacting the site.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let access_token = config
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(|t| Redacted::new(t).to_string());
        Self {
            connected: config.site_url.is_some() && access_token.is_some(),
            site_url: config.site_url.clone(),
            access_token,
            timeout_secs: config.timeout.as_secs(),
        }
    }
}

/// Execute the status command.
///
/// # Errors
///
/// Returns an error if the status cannot be serialized.
#[allow(clippy::unused_async)]
pub async fn execute(_args: StatusArgs, config: &Config) -> Result<()> {
    let status = ConnectionStatus::from_config(config);

    match config.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        OutputFormat::Text => {
            if status.connected {
                println!("Status: {}", "Connected".green());
            } else {
                println!("Status: {}", "Logged out".yellow());
            }
            if let Some(site_url) = &status.site_url {
                println!("Site: {site_url}");
            }
            if let Some(token) = &status.access_token {
                println!("Access token: {}", token.dimmed());
            }
            println!("Timeout: {}s", status.timeout_secs);
        }
        OutputFormat::Table => {
            use tabled::{Table, Tabled};

            #[derive(Tabled)]
            struct StatusRow {
                #[tabled(rename = "Field")]
                field: &'static str,
                #[tabled(rename = "Value")]
                value: String,
            }

            let rows = vec![
                StatusRow {
                    field: "Connected",
                    value: status.connected.to_string(),
                },
                StatusRow {
                    field: "Site",
                    value: status.site_url.clone().unwrap_or_default(),
                },
                StatusRow {
                    field: "Access token",
                    value: status.access_token.clone().unwrap_or_default(),
                },
                StatusRow {
                    field: "Timeout",
                    value: format!("{}s", status.timeout_secs),
                },
            ];
            println!("{}", Table::new(rows));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_redacts_token() {
        let config = Config {
            site_url: Some("https://contoso.sharepoint.com".into()),
            access_token: Some("secret-token".into()),
            ..Config::default()
        };
        let status = ConnectionStatus::from_config(&config);
        assert!(status.connected);
        assert_eq!(status.access_token.as_deref(), Some("[REDACTED]"));

        let json = serde_json::to_string(&status).unwrap();
        assert!(!json.contains("secret-token"));
        assert!(json.contains("\"siteUrl\""));
    }

    #[test]
    fn test_status_without_token_is_logged_out() {
        let config = Config {
            site_url: Some("https://contoso.sharepoint.com".into()),
            access_token: Some("  ".into()),
            ..Config::default()
        };
        let status = ConnectionStatus::from_config(&config);
        assert!(!status.connected);
        assert!(status.access_token.is_none());
        assert_eq!(status.timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_status_needs_no_network() {
        let config = Config {
            format: OutputFormat::Table,
            ..Config::default()
        };
        assert!(execute(StatusArgs {}, &config).await.is_ok());
    }
}
