//! Request assembly.
//!
//! Turns a target path and caller options into a [`RequestDescriptor`]: the
//! method, absolute URL, headers (Host, Authorization, Cookie, Content-Type,
//! Content-Length), query, body and redirect flag that the transport sends.

use bytes::Bytes;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, COOKIE, HOST,
};
use reqwest::Method;
use url::Url;

use super::options::{FormPayload, JsonPayload, PostOptions, RedirectPolicy, RequestOptions};
use crate::config::{BEARER_PREFIX, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE, TEXT_CONTENT_TYPE};
use crate::cookies;
use crate::error_handling::{RequestError, ValidationError};

/// A fully assembled request, owned by the call that built it.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: Method,
    /// Absolute target URL
    pub url: Url,
    /// Final request headers
    pub headers: HeaderMap,
    /// Query pairs appended at send time
    pub query: Vec<(String, String)>,
    /// Encoded body, if any
    pub body: Option<Bytes>,
    /// Redirect policy requested by the caller
    pub redirect: Option<RedirectPolicy>,
}

/// Body fields of a POST, borrowed from [`PostOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Payload<'a> {
    pub(crate) json: Option<&'a JsonPayload>,
    pub(crate) form: Option<&'a FormPayload>,
    pub(crate) text: Option<&'a str>,
}

impl<'a> From<&'a PostOptions> for Payload<'a> {
    fn from(options: &'a PostOptions) -> Self {
        Payload {
            json: options.json.as_ref(),
            form: options.form.as_ref(),
            text: options.text.as_deref(),
        }
    }
}

/// Resolves `path` against the client's origin.
///
/// A path that would leave the origin (an absolute URL or `//host/...`) is rejected.
pub(crate) fn resolve_url(base: &Url, path: &str) -> Result<Url, ValidationError> {
    let url = base.join(path).map_err(|reason| ValidationError::InvalidUrl {
        input: path.to_string(),
        reason,
    })?;
    if url.origin() != base.origin() {
        return Err(ValidationError::OriginMismatch(url.to_string()));
    }
    Ok(url)
}

fn header_error(name: &str, reason: impl ToString) -> RequestError {
    RequestError::InvalidHeader {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

fn set_header(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<(), RequestError> {
    let value = HeaderValue::from_str(value).map_err(|e| header_error(name.as_str(), e))?;
    headers.insert(name, value);
    Ok(())
}

/// Picks the body by precedence `json` > `form` > `text`, returning its bytes and
/// Content-Type. Empty payloads are skipped.
fn select_body(payload: Payload<'_>) -> Result<Option<(Bytes, &'static str)>, RequestError> {
    let json = match payload.json {
        Some(JsonPayload::Value(value)) => Some(
            serde_json::to_vec(value)
                .map(Bytes::from)
                .map_err(|e| RequestError::Body(e.to_string()))?,
        ),
        Some(JsonPayload::Raw(raw)) => Some(Bytes::from(raw.clone())),
        None => None,
    };
    if let Some(body) = json.filter(|b| !b.is_empty()) {
        return Ok(Some((body, JSON_CONTENT_TYPE)));
    }

    let form = match payload.form {
        Some(FormPayload::Pairs(pairs)) => Some(
            serde_urlencoded::to_string(pairs)
                .map(Bytes::from)
                .map_err(|e| RequestError::Body(e.to_string()))?,
        ),
        Some(FormPayload::Raw(raw)) => Some(Bytes::from(raw.clone())),
        None => None,
    };
    if let Some(body) = form.filter(|b| !b.is_empty()) {
        return Ok(Some((body, FORM_CONTENT_TYPE)));
    }

    Ok(payload
        .text
        .filter(|t| !t.is_empty())
        .map(|t| (Bytes::from(t.to_string()), TEXT_CONTENT_TYPE)))
}

/// Builds the descriptor for one request.
///
/// # Errors
///
/// Returns [`RequestError::Validation`] when `path` does not resolve within the
/// base origin, [`RequestError::InvalidHeader`] for header names or values that
/// are not valid HTTP, and [`RequestError::Body`] when the body cannot be encoded.
pub(crate) fn build(
    base: &Url,
    path: &str,
    method: Method,
    options: &RequestOptions,
    payload: Payload<'_>,
) -> Result<RequestDescriptor, RequestError> {
    let url = resolve_url(base, path)?;
    let host = url
        .host_str()
        .ok_or_else(|| ValidationError::MissingHost(url.to_string()))?
        .to_string();

    let mut headers = HeaderMap::new();
    for (name, value) in &options.headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| header_error(name, e))?;
        set_header(&mut headers, header_name, value)?;
    }

    set_header(&mut headers, HOST, &host)?;
    if let Some(token) = &options.token {
        set_header(&mut headers, AUTHORIZATION, &format!("{BEARER_PREFIX}{token}"))?;
        if let Some(value) = headers.get_mut(AUTHORIZATION) {
            value.set_sensitive(true);
        }
    }
    if let Some(jar) = &options.cookies {
        set_header(&mut headers, COOKIE, &cookies::stringify(jar))?;
    }

    let body = match select_body(payload)? {
        Some((body, content_type)) => {
            set_header(&mut headers, CONTENT_TYPE, content_type)?;
            headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
            Some(body)
        }
        None => None,
    };

    Ok(RequestDescriptor {
        method,
        url,
        headers,
        query: options.query.clone(),
        body,
        redirect: options.redirect,
    })
}
