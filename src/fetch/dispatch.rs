//! Transport selection and request dispatch.

use std::time::Duration;

use super::options::RedirectPolicy;
use super::request::RequestDescriptor;
use crate::config::ClientSettings;
use crate::error_handling::{ConfigError, TransportFailure};
use crate::initialization::{init_transport, TransportOptions};
use crate::proxy::ProxySpec;

/// Owns the shared direct transport and builds dedicated ones on demand.
///
/// reqwest fixes proxy, redirect and TLS policy at client construction, so a
/// request that differs from the defaults in any of them gets its own client.
#[derive(Debug, Clone)]
pub(crate) struct Dispatcher {
    direct: reqwest::Client,
    settings: ClientSettings,
}

impl Dispatcher {
    pub(crate) fn new(direct: reqwest::Client, settings: ClientSettings) -> Self {
        Self { direct, settings }
    }

    /// Returns the transport for one request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the proxy cannot be expressed as a reqwest
    /// proxy or the transport cannot be built.
    pub(crate) fn transport_for(
        &self,
        proxy: &ProxySpec,
        redirect: Option<RedirectPolicy>,
        accept_invalid_certs: Option<bool>,
    ) -> Result<reqwest::Client, ConfigError> {
        let redirect = redirect.unwrap_or_default();
        let accept_invalid_certs = accept_invalid_certs.unwrap_or(self.settings.accept_invalid_certs);

        if proxy.is_direct()
            && redirect == RedirectPolicy::default()
            && accept_invalid_certs == self.settings.accept_invalid_certs
        {
            return Ok(self.direct.clone());
        }

        let options = TransportOptions {
            proxy: proxy.to_reqwest()?,
            redirect,
            accept_invalid_certs,
        };
        init_transport(&self.settings, options).map_err(ConfigError::Transport)
    }

    /// Sends the request and waits for the response head.
    ///
    /// The deadline stays attached to the response, so it also bounds the body read.
    pub(crate) async fn send(
        &self,
        client: &reqwest::Client,
        descriptor: RequestDescriptor,
        timeout: Option<Duration>,
    ) -> Result<reqwest::Response, TransportFailure> {
        let mut builder = client
            .request(descriptor.method, descriptor.url)
            .headers(descriptor.headers);
        if !descriptor.query.is_empty() {
            builder = builder.query(&descriptor.query);
        }
        if let Some(body) = descriptor.body {
            builder = builder.body(body);
        }
        if let Some(timeout) = timeout.or(self.settings.timeout) {
            builder = builder.timeout(timeout);
        }
        Ok(builder.send().await?)
    }
}
