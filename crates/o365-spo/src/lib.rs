//! # o365-spo
//!
//! SharePoint Online access for the o365 CLI.
//!
//! - [`csom`]: object path graphs, actions, the byte-exact ProcessQuery
//!   envelope and response envelope parsing
//! - [`session`]: explicit sessions and the token provider seam
//! - [`client`]: HTTP calls (request digest, id lookups, ProcessQuery)
//! - [`content_type`]: content type operations built on the above
//!
//! ## Example
//!
//! ```rust
//! use o365_spo::csom::{ActionList, ObjectPathGraph, Parameter, RequestEnvelope};
//!
//! let graph = ObjectPathGraph::new().identity(24, "ct");
//! let actions = ActionList::new().method(81, 24, "Update", vec![Parameter::Boolean(true)]);
//! let envelope = RequestEnvelope::build(&graph, &actions).unwrap();
//! assert!(envelope.as_str().starts_with("<Request AddExpandoFieldTypeSuffix=\"true\""));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod content_type;
pub mod csom;
pub mod session;

pub use client::{DEFAULT_TIMEOUT, RequestDigest, SpoClient};
pub use content_type::{RemoveFieldLinkOptions, remove_field_link};
pub use session::{Session, SessionProvider, StaticTokenProvider};
