//! Error type definitions.
//!
//! This module defines every error surfaced by the client: configuration faults,
//! URL validation faults, transport failures, and lazy body parse failures.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Malformed proxy configuration or a transport that cannot be built from it.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The proxy string matched neither the SOCKS nor the HTTP(S) grammar.
    #[error("unparseable proxy specification")]
    UnparseableProxy,

    /// The proxy string parsed, but reqwest rejected the resulting proxy URL.
    #[error("invalid proxy configuration: {0}")]
    InvalidProxy(String),

    /// The transport for this request could not be constructed.
    #[error("transport construction failed: {0}")]
    Transport(#[source] ReqwestError),
}

/// The base URL handed to [`crate::Client::new`] (or a request path joined onto it)
/// is not a usable target.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The string could not be parsed as a URL.
    #[error("initialize with URL: protocol://host:port only ({input}: {reason})")]
    InvalidUrl {
        /// The rejected input.
        input: String,
        /// Parser diagnostic.
        reason: url::ParseError,
    },

    /// Only `http` and `https` targets are dispatched.
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// The URL has no host component.
    #[error("URL has no host: {0}")]
    MissingHost(String),

    /// A request path resolved to a different origin than the client's.
    #[error("request path leaves the client origin: {0}")]
    OriginMismatch(String),
}

/// Failure raised by a lazy body accessor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The buffered text is not valid JSON.
    #[error("invalid JSON body: {0}")]
    InvalidJson(String),

    /// The JSON value does not match the requested type.
    #[error("JSON body does not match the requested type: {0}")]
    Deserialize(String),
}

/// Errors that abort a request before anything is sent.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Proxy or transport configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Target URL validation error.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The client's shared transport could not be created.
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    /// A caller-supplied header name or value is not valid HTTP.
    #[error("invalid header {name}: {reason}")]
    InvalidHeader {
        /// Offending header name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Body(String),
}

/// Categories of network-level failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum TransportErrorKind {
    /// TCP, TLS, or proxy handshake failed
    Connect,
    /// The per-request deadline expired
    Timeout,
    /// The caller's cancellation token fired
    Cancelled,
    /// Writing the request failed
    Request,
    /// Redirect loop or limit exceeded
    Redirect,
    /// Reading the response body failed
    Body,
    /// The response body could not be decoded (charset, compression)
    Decode,
    /// reqwest refused to build the request
    Builder,
    /// Anything else
    Other,
}

impl TransportErrorKind {
    /// Returns a human-readable label for the failure kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportErrorKind::Connect => "connect error",
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Cancelled => "cancelled",
            TransportErrorKind::Request => "request error",
            TransportErrorKind::Redirect => "redirect error",
            TransportErrorKind::Body => "body error",
            TransportErrorKind::Decode => "decode error",
            TransportErrorKind::Builder => "request builder error",
            TransportErrorKind::Other => "other transport error",
        }
    }
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A connect, write, read, deadline, or cancellation failure at the network layer.
///
/// Never returned as an `Err` from the public verbs; it is carried inside a
/// failure [`crate::Envelope`] instead.
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct TransportFailure {
    kind: TransportErrorKind,
    message: String,
    #[source]
    source: Option<ReqwestError>,
}

impl TransportFailure {
    /// Wraps a reqwest error, categorizing it.
    pub fn from_reqwest(error: ReqwestError) -> Self {
        Self {
            kind: super::categorize_reqwest_error(&error),
            message: error.to_string(),
            source: Some(error),
        }
    }

    /// Failure produced when a cancellation token fires mid-request.
    pub fn cancelled() -> Self {
        Self {
            kind: TransportErrorKind::Cancelled,
            message: "request cancelled before completion".to_string(),
            source: None,
        }
    }

    /// Category of the failure.
    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    /// Underlying error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ReqwestError> for TransportFailure {
    fn from(error: ReqwestError) -> Self {
        Self::from_reqwest(error)
    }
}
