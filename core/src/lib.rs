//! Synchronous client for the Vero marketing-automation API.
//!
//! # Overview
//! Identifies users, edits their attributes and tags, toggles their
//! subscription state and tracks events. Every operation is one JSON request
//! carrying the account's auth token; the raw response body is handed back
//! to the caller.
//!
//! # Design
//! - `VeroClient` is stateless: auth token, base URL and a transport.
//! - Each operation has a pure `build_*` method producing an `HttpRequest`;
//!   `parse_response` turns an `HttpResponse` into body bytes or `ApiError`.
//! - Network I/O sits behind the `Transport` trait. `UreqTransport` is the
//!   default (feature `ureq-transport`); tests plug in their own.
//! - The operations themselves live on the object-safe `VeroApi` trait so
//!   applications can substitute a double for the whole client.
//!
//! ```no_run
//! use vero_core::{Attributes, VeroApi, VeroClient};
//!
//! let client = VeroClient::new("AUTH_TOKEN");
//! let mut data = Attributes::new();
//! data.insert("First name".into(), "Jeff".into());
//! client.identify("1234567890", &data, Some("jeff@yourdomain.com"))?;
//! # Ok::<(), vero_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
#[cfg(feature = "ureq-transport")]
pub mod transport;
pub mod types;

pub use client::{VeroApi, VeroClient, DEFAULT_BASE_URL};
pub use config::ClientConfig;
pub use endpoint::Endpoint;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
#[cfg(feature = "ureq-transport")]
pub use transport::UreqTransport;
pub use types::{Attributes, Identity};
