//! Explicit SharePoint sessions.
//!
//! A [`Session`] is built once per command from configuration and passed by
//! reference into every operation. Nothing about the connected site lives
//! in global state.

use async_trait::async_trait;

use o365_core::{Error, Redacted, Result, SiteUrl};

/// Message returned when no site is connected.
pub const NOT_CONNECTED: &str = "Log in to a SharePoint Online site first";

/// Supplies bearer tokens for a resource (the tenant origin).
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns an access token valid for `resource`.
    ///
    /// # Errors
    ///
    /// Returns an auth error if no token can be obtained.
    async fn access_token(&self, resource: &str) -> Result<String>;
}

/// Serves a token that was obtained out of band (flag or environment).
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: Option<Redacted<String>>,
}

impl StaticTokenProvider {
    /// Creates a provider; `None` or an empty token means "not signed in".
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()).map(Redacted::new),
        }
    }
}

#[async_trait]
impl SessionProvider for StaticTokenProvider {
    async fn access_token(&self, resource: &str) -> Result<String> {
        match &self.token {
            Some(token) => {
                tracing::debug!(resource, "using configured access token");
                Ok(token.expose().clone())
            }
            None => Err(Error::auth("Error getting access token")),
        }
    }
}

/// A connected site and the token used to talk to it.
#[derive(Debug, Clone)]
pub struct Session {
    site_url: SiteUrl,
    access_token: Redacted<String>,
}

impl Session {
    /// Creates a session from an already obtained token.
    #[must_use]
    pub fn new(site_url: SiteUrl, access_token: impl Into<String>) -> Self {
        Self {
            site_url,
            access_token: Redacted::new(access_token.into()),
        }
    }

    /// Connects to `site_url`, asking `provider` for a token for the tenant origin.
    ///
    /// # Errors
    ///
    /// Returns an auth error if no site is given or the provider fails.
    pub async fn connect(
        site_url: Option<SiteUrl>,
        provider: &dyn SessionProvider,
    ) -> Result<Self> {
        let site_url = site_url.ok_or_else(|| Error::auth(NOT_CONNECTED))?;
        let token = provider.access_token(site_url.origin()).await?;
        Ok(Self::new(site_url, token))
    }

    /// The connected site.
    #[must_use]
    pub fn site_url(&self) -> &SiteUrl {
        &self.site_url
    }

    /// The bearer token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        self.access_token.expose()
    }
}
