//! HTTP client for SharePoint Online REST and CSOM endpoints.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::Instrument;

use o365_core::{Error, Guid, Redacted, Result, SiteUrl, csom_span};

use crate::csom::{
    ActionList, ObjectPathGraph, PROCESS_QUERY_PATH, Phase, RequestEnvelope, ResponseEnvelope,
};
use crate::session::Session;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ACCEPT_NOMETADATA: &str = "application/json;odata=nometadata";

/// Anti-forgery token for mutating requests against one site.
#[derive(Debug, Clone)]
pub struct RequestDigest(Redacted<String>);

impl RequestDigest {
    /// Wraps a digest value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Redacted::new(value.into()))
    }

    /// The digest value sent as `X-RequestDigest`.
    #[must_use]
    pub fn value(&self) -> &str {
        self.0.expose()
    }
}

/// API client for SharePoint Online.
///
/// Holds no per-site state; every call takes the [`Session`] and web URL
/// it operates on.
#[derive(Debug, Clone)]
pub struct SpoClient {
    client: Client,
}

impl SpoClient {
    /// Creates a new client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("o365/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::transport_with_source("Failed to create HTTP client", e))?;

        Ok(Self { client })
    }

    /// Obtains a request digest from `/_api/contextinfo`.
    ///
    /// # Errors
    ///
    /// Returns an auth error if the digest cannot be retrieved.
    pub async fn request_digest(
        &self,
        session: &Session,
        web_url: &SiteUrl,
    ) -> Result<RequestDigest> {
        #[derive(Deserialize)]
        struct ContextInfo {
            #[serde(rename = "FormDigestValue")]
            form_digest_value: String,
        }

        let url = web_url.join("/_api/contextinfo");
        let req = self
            .client
            .post(&url)
            .bearer_auth(session.access_token())
            .header(reqwest::header::ACCEPT, ACCEPT_NOMETADATA);

        let info: ContextInfo = send_json(req, &url)
            .instrument(csom_span("request_digest", web_url.as_str()))
            .await
            .map_err(|e| {
                Error::auth_with_source(format!("Unable to obtain request digest: {e}"), e)
            })?;

        Ok(RequestDigest::new(info.form_digest_value))
    }

    /// Returns the id of the site collection containing `web_url`.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails or the response cannot be parsed.
    pub async fn site_id(&self, session: &Session, web_url: &SiteUrl) -> Result<Guid> {
        self.get_id(session, web_url, "/_api/site?$select=Id").await
    }

    /// Returns the id of the web at `web_url`.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails or the response cannot be parsed.
    pub async fn web_id(&self, session: &Session, web_url: &SiteUrl) -> Result<Guid> {
        self.get_id(session, web_url, "/_api/web?$select=Id").await
    }

    async fn get_id(&self, session: &Session, web_url: &SiteUrl, path: &str) -> Result<Guid> {
        #[derive(Deserialize)]
        struct IdResponse {
            #[serde(rename = "Id")]
            id: Guid,
        }

        let url = web_url.join(path);
        let req = self
            .client
            .get(&url)
            .bearer_auth(session.access_token())
            .header(reqwest::header::ACCEPT, ACCEPT_NOMETADATA);

        let response: IdResponse = send_json(req, &url)
            .instrument(csom_span("get_id", web_url.as_str()))
            .await?;
        Ok(response.id)
    }

    /// Posts an envelope to ProcessQuery and parses the response envelope.
    ///
    /// # Errors
    ///
    /// Returns a transport error on network failure, a non-2xx status, or an
    /// unparsable body.
    pub async fn process_query(
        &self,
        session: &Session,
        web_url: &SiteUrl,
        digest: &RequestDigest,
        envelope: RequestEnvelope,
    ) -> Result<ResponseEnvelope> {
        let url = web_url.join(PROCESS_QUERY_PATH);
        let req = self
            .client
            .post(&url)
            .bearer_auth(session.access_token())
            .header("X-RequestDigest", digest.value())
            .header(reqwest::header::CONTENT_TYPE, "text/xml")
            .body(envelope.into_string());

        tracing::debug!(phase = %Phase::Sent, %url, "posting ProcessQuery envelope");
        let response = send(req, &url).await?;
        let body = response.text().await.map_err(|e| {
            Error::transport_with_source(format!("Failed to read response from {url}: {e}"), e)
        })?;
        ResponseEnvelope::parse(&body)
    }

    /// Builds, sends and resolves one CSOM request.
    ///
    /// Succeeds only if every result record has a null `ErrorInfo`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed graph (before any network
    /// activity), a transport error for HTTP failures, or a remote error
    /// carrying the server's `ErrorMessage`.
    pub async fn execute_object_path_request(
        &self,
        session: &Session,
        web_url: &SiteUrl,
        digest: &RequestDigest,
        graph: &ObjectPathGraph,
        actions: &ActionList,
    ) -> Result<()> {
        let span = csom_span("process_query", web_url.as_str());
        async {
            let envelope = RequestEnvelope::build(graph, actions)?;
            tracing::debug!(
                phase = %Phase::Built,
                actions = envelope.action_count(),
                body = envelope.as_str(),
                "CSOM envelope built"
            );

            let outcome = self
                .process_query(session, web_url, digest, envelope)
                .await
                .and_then(ResponseEnvelope::into_result);

            match &outcome {
                Ok(()) => tracing::debug!(phase = %Phase::Resolved, "ProcessQuery succeeded"),
                Err(e) => tracing::debug!(
                    phase = %Phase::Resolved,
                    kind = e.kind(),
                    error = %e,
                    "ProcessQuery failed"
                ),
            }
            outcome
        }
        .instrument(span)
        .await
    }
}

async fn send(req: RequestBuilder, url: &str) -> Result<Response> {
    let response = req.send().await.map_err(|e| {
        Error::transport_with_source(format!("Failed to send request to {url}: {e}"), e)
    })?;

    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(Error::http_status(status.as_u16(), body))
    }
}

async fn send_json<T: DeserializeOwned>(req: RequestBuilder, url: &str) -> Result<T> {
    let response = send(req, url).await?;
    response.json().await.map_err(|e| {
        Error::transport_with_source(format!("Failed to parse response from {url}: {e}"), e)
    })
}
