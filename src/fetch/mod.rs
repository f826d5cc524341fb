//! Request dispatch.
//!
//! This module provides the [`Client`] and its three verbs. Each call runs the
//! same pipeline:
//! 1. Resolve the proxy specification (fails fast with `ConfigError`)
//! 2. Assemble the request descriptor (fails fast with `ValidationError` and friends)
//! 3. Pick a transport and send, racing the caller's cancellation token
//! 4. Buffer and decode the body by MIME type (skipped for HEAD)
//!
//! Transport faults in steps 3 and 4 never surface as `Err`; they produce an
//! envelope with `ok() == false` and status 400.

mod dispatch;
mod options;
mod request;
mod response;

use std::time::Duration;

use reqwest::Method;
use url::Url;

pub use options::{FormPayload, JsonPayload, PostOptions, RedirectPolicy, RequestOptions};
pub use request::RequestDescriptor;
pub use response::{
    classify, DecodedBody, Envelope, JsonBody, MarkupBody, MimeType, Representation,
};

use crate::config::ClientSettings;
use crate::error_handling::{RequestError, TransportFailure, ValidationError};
use crate::initialization::init_client;
use crate::logging::Logger;
use crate::proxy;
use dispatch::Dispatcher;
use request::Payload;

/// HTTP client bound to one origin.
///
/// # Examples
///
/// ```no_run
/// use proxyfetch::{Client, RequestOptions};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new("https://api.example.com")?;
/// let envelope = client
///     .get("/items", RequestOptions::default().proxy("socks5://127.0.0.1:1080"))
///     .await?;
/// if envelope.ok() {
///     println!("{:?}", envelope.json());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    base: Url,
    dispatcher: Dispatcher,
}

impl Client {
    /// Creates a client for `host` with default settings.
    ///
    /// # Errors
    ///
    /// See [`Client::with_settings`].
    pub fn new(host: &str) -> Result<Self, RequestError> {
        Self::with_settings(host, ClientSettings::default())
    }

    /// Creates a client for `host`, given as `scheme://host[:port]`.
    ///
    /// Any path, query or fragment is dropped; request paths are resolved against
    /// the origin.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Validation`] when `host` is not an absolute
    /// `http`/`https` URL with a host, and [`RequestError::Initialization`] when
    /// the shared transport cannot be built.
    pub fn with_settings(host: &str, settings: ClientSettings) -> Result<Self, RequestError> {
        let base = validate_base(host)?;
        let direct = init_client(&settings)?;
        Ok(Self {
            base,
            dispatcher: Dispatcher::new(direct, settings),
        })
    }

    /// Origin every request path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Issues a HEAD request; the envelope carries status, headers and cookies only.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for configuration and validation faults; transport
    /// faults produce a failure envelope.
    pub async fn head(&self, path: &str, options: RequestOptions) -> Result<Envelope, RequestError> {
        self.execute(Method::HEAD, path, &options, Payload::default())
            .await
    }

    /// Issues a GET request and decodes the body by MIME type.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for configuration and validation faults; transport
    /// faults produce a failure envelope.
    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<Envelope, RequestError> {
        self.execute(Method::GET, path, &options, Payload::default())
            .await
    }

    /// Issues a POST request with the body selected from `options`.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for configuration, validation and body encoding faults;
    /// transport faults produce a failure envelope.
    pub async fn post(&self, path: &str, options: PostOptions) -> Result<Envelope, RequestError> {
        self.execute(Method::POST, path, &options.request, Payload::from(&options))
            .await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        options: &RequestOptions,
        payload: Payload<'_>,
    ) -> Result<Envelope, RequestError> {
        let logger = options.logger.as_ref();
        let proxy = proxy::select(options.proxy.as_deref(), logger)?;
        let descriptor = request::build(&self.base, path, method, options, payload)?;
        let transport = self.dispatcher.transport_for(
            &proxy,
            descriptor.redirect,
            options.accept_invalid_certs,
        )?;

        trace(logger, &format!("{} {}", descriptor.method, descriptor.url));
        let read_body = descriptor.method != Method::HEAD;
        let exchange = self.exchange(&transport, descriptor, options.timeout, read_body);

        let outcome = match &options.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(TransportFailure::cancelled()),
                result = exchange => result,
            },
            None => exchange.await,
        };

        Ok(match outcome {
            Ok(envelope) => {
                trace(logger, &format!("response status {}", envelope.status()));
                envelope
            }
            Err(failure) => {
                trace(logger, &format!("transport failure: {failure}"));
                Envelope::transport_failure(failure)
            }
        })
    }

    async fn exchange(
        &self,
        transport: &reqwest::Client,
        descriptor: RequestDescriptor,
        timeout: Option<Duration>,
        read_body: bool,
    ) -> Result<Envelope, TransportFailure> {
        let reply = self.dispatcher.send(transport, descriptor, timeout).await?;
        let base = Envelope::from_parts(reply.status(), reply.headers().clone());
        if !read_body {
            return Ok(base);
        }
        let mime = MimeType::from_headers(reply.headers());
        response::decorate(mime, reply, base).await
    }
}

fn trace(logger: Option<&Logger>, message: &str) {
    if let Some(logger) = logger {
        logger.debug(message);
    }
}

/// Reduces `host` to its origin, rejecting anything that cannot be dispatched.
fn validate_base(host: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(host.trim()).map_err(|reason| ValidationError::InvalidUrl {
        input: host.to_string(),
        reason,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::UnsupportedScheme(url.scheme().to_string()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::MissingHost(host.to_string()));
    }
    let origin = url.origin().ascii_serialization();
    Url::parse(&origin).map_err(|reason| ValidationError::InvalidUrl {
        input: host.to_string(),
        reason,
    })
}
