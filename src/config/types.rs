//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and for constructing a [`crate::Client`] programmatically.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{CONNECT_TIMEOUT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// HTTP verb accepted by the CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Verb {
    /// Status, headers and cookies only
    Head,
    /// Fetch and decode the body
    Get,
    /// Send a JSON, form, or text body
    Post,
}

/// Settings applied to every request issued through one [`crate::Client`].
///
/// Per-request options override `timeout` and `accept_invalid_certs`.
///
/// # Examples
///
/// ```no_run
/// use proxyfetch::ClientSettings;
/// use std::time::Duration;
///
/// let settings = ClientSettings {
///     timeout: Some(Duration::from_secs(5)),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Default per-request deadline (`None` waits indefinitely)
    pub timeout: Option<Duration>,

    /// Timeout for establishing the TCP (and proxy) connection
    pub connect_timeout: Duration,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Disable TLS certificate verification for every transport.
    /// Off unless the caller explicitly turns it on.
    pub accept_invalid_certs: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_invalid_certs: false,
        }
    }
}

/// Command-line options for the `proxyfetch` binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "proxyfetch",
    version,
    about = "Issue HEAD/GET/POST requests directly or through an HTTP or SOCKS proxy"
)]
pub struct Opt {
    /// HTTP verb
    #[arg(value_enum)]
    pub method: Verb,

    /// Target URL (scheme://host[:port]/path?query)
    pub url: String,

    /// Proxy specification: socks4://, socks5://, http:// or https:// with optional user:pass@
    #[arg(long)]
    pub proxy: Option<String>,

    /// Request header as `Name: value` (repeatable)
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,

    /// Cookie as `name=value` (repeatable)
    #[arg(long = "cookie", short = 'b')]
    pub cookies: Vec<String>,

    /// Query parameter as `key=value` (repeatable)
    #[arg(long = "query", short = 'q')]
    pub query: Vec<String>,

    /// Bearer token sent in the Authorization header
    #[arg(long)]
    pub token: Option<String>,

    /// JSON request body (POST only)
    #[arg(long, conflicts_with_all = ["form", "text"])]
    pub json: Option<String>,

    /// Urlencoded form body (POST only)
    #[arg(long, conflicts_with = "text")]
    pub form: Option<String>,

    /// Plain text body (POST only)
    #[arg(long)]
    pub text: Option<String>,

    /// Follow up to N redirects instead of returning the 3xx response
    #[arg(long, num_args = 0..=1, default_missing_value = "10")]
    pub follow_redirects: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Accept invalid TLS certificates (target and proxy)
    #[arg(long)]
    pub insecure: bool,

    /// Emit debug traces, including the resolved proxy configuration
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Log level (overridden to debug by --verbose)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Opt {
    /// Effective log level once `--verbose` is taken into account.
    pub fn effective_log_level(&self) -> log::LevelFilter {
        let level = log::LevelFilter::from(self.log_level.clone());
        if self.verbose {
            level.max(log::LevelFilter::Debug)
        } else {
            level
        }
    }
}
