//! ProcessQuery response envelope parsing.
//!
//! The body is a JSON array. Header records (objects carrying
//! `SchemaVersion` or `ErrorInfo`) are interleaved with bare action ids and
//! result objects; only header records are kept.

use serde::Deserialize;
use serde_json::Value;

use o365_core::{Error, RemoteError, Result};

/// Error details attached to a failed record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorInfo {
    /// Human-readable message; this is what the user sees. SharePoint may
    /// send `null` here.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Server-side value associated with the error.
    #[serde(default)]
    pub error_value: Option<Value>,
    /// Numeric error code.
    #[serde(default)]
    pub error_code: Option<i64>,
    /// Fully-qualified server exception type.
    #[serde(default)]
    pub error_type_name: Option<String>,
    /// Correlation id for the failing request.
    #[serde(default)]
    pub trace_correlation_id: Option<String>,
}

/// One header record of the response envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultRecord {
    /// Server schema version.
    #[serde(default)]
    pub schema_version: String,
    /// Server library version.
    #[serde(default)]
    pub library_version: String,
    /// `None` when the record succeeded.
    #[serde(default)]
    pub error_info: Option<ErrorInfo>,
    /// Correlation id of the request.
    #[serde(default)]
    pub trace_correlation_id: Option<String>,
}

/// Parsed response, consumed once by [`ResponseEnvelope::into_result`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    records: Vec<ResultRecord>,
}

impl ResponseEnvelope {
    /// Parses a ProcessQuery response body.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the body is not a JSON array, a header
    /// record is malformed, or no header record is present.
    pub fn parse(body: &str) -> Result<Self> {
        let entries: Vec<Value> = serde_json::from_str(body).map_err(|e| {
            Error::transport_with_source(format!("Unable to parse ProcessQuery response: {e}"), e)
        })?;

        let mut records = Vec::new();
        for entry in entries {
            let is_record = entry
                .as_object()
                .is_some_and(|o| o.contains_key("SchemaVersion") || o.contains_key("ErrorInfo"));
            if !is_record {
                continue;
            }
            let record: ResultRecord = serde_json::from_value(entry).map_err(|e| {
                Error::transport_with_source(format!("Malformed ProcessQuery result record: {e}"), e)
            })?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(Error::transport(
                "ProcessQuery response contained no result records",
            ));
        }
        Ok(Self { records })
    }

    /// Header records in response order.
    #[must_use]
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    /// Maps the envelope to success, or to the first record's error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Remote`] carrying `ErrorMessage`, `ErrorCode`,
    /// `ErrorTypeName` and the correlation id of the first failed record.
    pub fn into_result(self) -> Result<()> {
        for record in self.records {
            if let Some(info) = record.error_info {
                tracing::debug!(
                    error_code = ?info.error_code,
                    error_type = ?info.error_type_name,
                    error_value = ?info.error_value,
                    "ProcessQuery returned an error record"
                );
                let message = info
                    .error_message
                    .or_else(|| info.error_type_name.clone())
                    .unwrap_or_default();
                return Err(Error::Remote(RemoteError {
                    message,
                    code: info.error_code,
                    type_name: info.error_type_name,
                    correlation_id: info.trace_correlation_id.or(record.trace_correlation_id),
                }));
            }
        }
        Ok(())
    }
}
