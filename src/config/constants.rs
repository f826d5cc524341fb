//! Configuration constants.
//!
//! This module defines the constants used throughout the client: content types
//! attached to request bodies, failure envelope status, and CLI defaults.

use std::time::Duration;

/// Status code carried by a failure envelope when the transport itself failed.
/// Non-200 responses from a server are never rewritten to this value.
pub const TRANSPORT_FAILURE_STATUS: u16 = 400;

/// Content-Type attached to JSON request bodies
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
/// Content-Type attached to urlencoded form bodies
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// Content-Type attached to plain text bodies
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Scheme prefix of a bearer token in the `Authorization` header
pub const BEARER_PREFIX: &str = "Bearer ";
/// Scheme prefix of basic credentials in the `Proxy-Authorization` header
pub const BASIC_PREFIX: &str = "Basic ";

/// Default per-request timeout for the CLI, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connect timeout applied to every transport
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent string for requests.
pub const DEFAULT_USER_AGENT: &str = concat!("proxyfetch/", env!("CARGO_PKG_VERSION"));
