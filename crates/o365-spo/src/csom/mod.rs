//! CSOM envelope protocol: object path graphs, actions, the ProcessQuery
//! request body and its response envelope.

pub mod action;
pub mod envelope;
pub mod object_path;
pub mod response;

pub use action::{Action, ActionList};
pub use envelope::{Phase, RequestEnvelope};
pub use object_path::{ObjectPath, ObjectPathGraph, Parameter};
pub use response::{ErrorInfo, ResponseEnvelope, ResultRecord};

/// Server-relative path of the ProcessQuery endpoint.
pub const PROCESS_QUERY_PATH: &str = "/_vti_bin/client.svc/ProcessQuery";
