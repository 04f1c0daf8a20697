//! Error types and result aliases for o365.
//!
//! Every command failure falls into one of four classes: bad input,
//! authentication, transport, or an error reported by SharePoint inside an
//! otherwise successful response. None of them are retried.

use std::fmt;

/// The result type used throughout o365.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running an o365 command.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Command input was missing or malformed. The remote call was never attempted.
    #[error("{message}")]
    Validation {
        /// Description of the invalid input.
        message: String,
    },

    /// An access token or request digest could not be obtained.
    #[error("{message}")]
    Auth {
        /// Description of the authentication failure.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The HTTP exchange failed: network error, non-2xx status, or an unparsable body.
    #[error("{message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
        /// HTTP status code, when a response was received.
        status: Option<u16>,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// SharePoint processed the request and reported an error.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl Error {
    /// Creates a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a new authentication error.
    #[must_use]
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an authentication error wrapping an underlying cause.
    #[must_use]
    pub fn auth_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Auth {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new transport error without a status or source.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Creates a transport error for a non-success HTTP status.
    #[must_use]
    pub fn http_status(status: u16, body: impl fmt::Display) -> Self {
        Self::Transport {
            message: format!("HTTP {status}: {body}"),
            status: Some(status),
            source: None,
        }
    }

    /// Creates a transport error wrapping an underlying cause.
    #[must_use]
    pub fn transport_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            status: None,
            source: Some(Box::new(source)),
        }
    }

    /// Returns the HTTP status behind this error, looking through a wrapped cause.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            Self::Auth {
                source: Some(source),
                ..
            } => source.downcast_ref::<Self>().and_then(Self::status),
            _ => None,
        }
    }

    /// Returns the error class as a short lowercase label, for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Auth { .. } => "auth",
            Self::Transport { .. } => "transport",
            Self::Remote(_) => "remote",
        }
    }
}

/// An error reported by SharePoint in a ProcessQuery response envelope.
///
/// Displays as the server-provided message and nothing else. The remaining
/// fields exist for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// `ErrorInfo.ErrorMessage`.
    pub message: String,
    /// `ErrorInfo.ErrorCode`.
    pub code: Option<i64>,
    /// `ErrorInfo.ErrorTypeName`.
    pub type_name: Option<String>,
    /// `ErrorInfo.TraceCorrelationId`, falling back to the record's id.
    pub correlation_id: Option<String>,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RemoteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_displays_server_message_only() {
        let err = Error::from(RemoteError {
            message: "Unknown Error".to_string(),
            code: Some(-1),
            type_name: Some("Microsoft.SharePoint.Client.UnknownError".to_string()),
            correlation_id: Some("b33c489e-009b-5000-8240-a8c28e5fd8b4".to_string()),
        });
        assert_eq!(err.to_string(), "Unknown Error");
        assert_eq!(err.kind(), "remote");
    }

    #[test]
    fn test_auth_error_keeps_cause_and_status() {
        let err = Error::auth_with_source(
            "Unable to obtain request digest: HTTP 401: Unauthorized",
            Error::http_status(401, "Unauthorized"),
        );
        assert_eq!(err.kind(), "auth");
        assert_eq!(err.status(), Some(401));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "HTTP 401: Unauthorized");
        assert_eq!(Error::auth("no token").status(), None);
    }

    #[test]
    fn test_http_status_keeps_status() {
        let err = Error::http_status(403, "Access denied");
        assert_eq!(err.to_string(), "HTTP 403: Access denied");
        assert!(matches!(
            err,
            Error::Transport {
                status: Some(403),
                ..
            }
        ));
    }

    #[test]
    fn test_validation_and_auth_messages_are_verbatim() {
        assert_eq!(
            Error::validation("xxx is not a valid GUID").to_string(),
            "xxx is not a valid GUID"
        );
        assert_eq!(
            Error::auth("Error getting access token").to_string(),
            "Error getting access token"
        );
    }
}
