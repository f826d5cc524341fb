//! HTTP transport initialization.
//!
//! This module builds the `reqwest::Client` instances that carry requests, one per
//! combination of proxy, redirect policy and TLS policy.

use crate::config::ClientSettings;
use crate::error_handling::InitializationError;
use crate::fetch::RedirectPolicy;
use reqwest::ClientBuilder;

/// Transport-level choices that cannot be changed per request on a shared client.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// Proxy to route through; `None` forces a direct connection
    pub proxy: Option<reqwest::Proxy>,
    /// Redirect handling
    pub redirect: RedirectPolicy,
    /// Disable TLS certificate verification
    pub accept_invalid_certs: bool,
}

/// Initializes a transport for the given settings and options.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent and connect timeout from settings
/// - The requested redirect policy (redirects are returned, not followed, by default)
/// - The given proxy, or no proxy at all (environment proxies are ignored)
/// - Certificate verification unless explicitly disabled
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_transport(
    settings: &ClientSettings,
    options: TransportOptions,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = ClientBuilder::new()
        .user_agent(settings.user_agent.clone())
        .connect_timeout(settings.connect_timeout)
        .redirect(options.redirect.to_reqwest())
        .danger_accept_invalid_certs(options.accept_invalid_certs);

    if options.accept_invalid_certs {
        log::warn!("TLS certificate verification disabled for this transport");
    }

    builder = match options.proxy {
        Some(proxy) => builder.proxy(proxy),
        None => builder.no_proxy(),
    };

    builder.build()
}

/// Initializes the shared direct transport of a client.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(settings: &ClientSettings) -> Result<reqwest::Client, InitializationError> {
    let options = TransportOptions {
        accept_invalid_certs: settings.accept_invalid_certs,
        ..Default::default()
    };
    Ok(init_transport(settings, options)?)
}
