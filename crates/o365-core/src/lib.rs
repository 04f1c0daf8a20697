//! # o365-core
//!
//! Shared primitives for the o365 administration CLI.
//!
//! - **Error Types**: the validation / auth / transport / remote taxonomy
//! - **Identifiers**: parsed GUIDs, content type ids and site URLs
//! - **Observability**: logging initialisation, spans, secret redaction
//!
//! ## Example
//!
//! ```rust
//! use o365_core::prelude::*;
//!
//! let web = SiteUrl::parse("https://contoso.sharepoint.com").unwrap();
//! assert_eq!(web.origin(), "https://contoso.sharepoint.com");
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod id;
pub mod observability;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{Error, RemoteError, Result};
    pub use crate::id::{ContentTypeId, Guid, SiteUrl};
}

pub use error::{Error, RemoteError, Result};
pub use id::{ContentTypeId, Guid, SiteUrl};
pub use observability::{LogFormat, Redacted, csom_span, init_logging};
