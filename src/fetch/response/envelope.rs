//! The uniform response object returned by every verb.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use scraper::Html;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::body::DecodedBody;
use crate::config::TRANSPORT_FAILURE_STATUS;
use crate::cookies::{self, CookieJar};
use crate::error_handling::{ParseError, TransportFailure};

/// Status, headers, cookies and decoded body of one exchange.
///
/// `ok()` is true exactly when the status is 200. A non-200 server response is a
/// normal envelope; only transport faults set [`Envelope::error`], and those
/// envelopes carry status 400 with no headers, cookies or body.
#[derive(Debug)]
pub struct Envelope {
    status: u16,
    headers: HeaderMap,
    cookies: CookieJar,
    body: DecodedBody,
    error: Option<TransportFailure>,
}

impl Envelope {
    /// Base envelope built from a response head; cookies come from `Set-Cookie`.
    pub(crate) fn from_parts(status: StatusCode, headers: HeaderMap) -> Self {
        let cookies = cookies::parse(&headers);
        Self {
            status: status.as_u16(),
            headers,
            cookies,
            body: DecodedBody::Empty,
            error: None,
        }
    }

    pub(crate) fn transport_failure(failure: TransportFailure) -> Self {
        Self {
            status: TRANSPORT_FAILURE_STATUS,
            headers: HeaderMap::new(),
            cookies: CookieJar::new(),
            body: DecodedBody::Empty,
            error: Some(failure),
        }
    }

    pub(crate) fn with_body(mut self, body: DecodedBody) -> Self {
        self.body = body;
        self
    }

    /// True exactly when the status is 200.
    pub fn ok(&self) -> bool {
        self.status == StatusCode::OK.as_u16()
    }

    /// HTTP status, or 400 for a transport failure.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of a response header, if it is valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Cookies set by this response.
    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// Value of one response cookie.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name)
    }

    /// The transport failure behind a failure envelope.
    pub fn error(&self) -> Option<&TransportFailure> {
        self.error.as_ref()
    }

    /// True when the exchange failed below HTTP.
    pub fn is_transport_failure(&self) -> bool {
        self.error.is_some()
    }

    /// The decoded body, for matching on its representation.
    pub fn body(&self) -> &DecodedBody {
        &self.body
    }

    /// Buffered text, for textual bodies.
    pub fn text(&self) -> Option<&str> {
        self.body.text()
    }

    /// Parsed JSON body. `None` when the response is not JSON; `Some(Err)` when it
    /// claims to be but does not parse.
    pub fn json(&self) -> Option<Result<&Value, ParseError>> {
        self.body.json()
    }

    /// Deserializes the cached JSON body into `T`.
    pub fn json_as<T: DeserializeOwned>(&self) -> Option<Result<T, ParseError>> {
        self.json().map(|value| {
            value.and_then(|v| {
                T::deserialize(v).map_err(|e| ParseError::Deserialize(e.to_string()))
            })
        })
    }

    /// Parsed document, for HTML/XML bodies.
    pub fn dom(&self) -> Option<&Html> {
        self.body.dom()
    }

    /// Raw bytes, for non-textual bodies.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.body.bytes()
    }
}
