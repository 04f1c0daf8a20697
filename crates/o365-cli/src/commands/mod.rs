//! CLI command implementations.

pub mod contenttype_field_remove;
pub mod status;

use anyhow::{Context, Result};

use o365_core::SiteUrl;
use o365_spo::{Session, SpoClient, StaticTokenProvider};

use crate::Config;

/// Builds the HTTP client and connects a session from configuration.
///
/// # Errors
///
/// Returns an error if no site is configured, the site URL is invalid, no
/// access token is available, or the HTTP client cannot be created.
pub async fn connect(config: &Config) -> Result<(SpoClient, Session)> {
    let site_url = config.site_url.as_deref().map(SiteUrl::parse).transpose()?;
    let provider = StaticTokenProvider::new(config.access_token.clone());
    let session = Session::connect(site_url, &provider).await?;
    let client = SpoClient::new(config.timeout).context("failed to create HTTP client")?;
    tracing::debug!(site = %session.site_url(), "session connected");
    Ok((client, session))
}
