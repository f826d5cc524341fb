//! `Content-Type` parsing on top of [`mime::Mime`].

use std::fmt;

use reqwest::header::{HeaderMap, CONTENT_TYPE};

/// Parsed `Content-Type` of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct MimeType(mime::Mime);

impl MimeType {
    /// Parses a header value such as `text/html; charset=UTF-8`.
    ///
    /// Returns `None` when the value is not a well-formed media type.
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse::<mime::Mime>().ok().map(MimeType)
    }

    /// Parses the `Content-Type` of a response, if present and well-formed.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(MimeType::parse)
    }

    /// Top-level type, e.g. `text`.
    pub fn type_(&self) -> &str {
        self.0.type_().as_str()
    }

    /// Subtype without its structured suffix, e.g. `vnd.api` for `vnd.api+json`.
    pub fn subtype(&self) -> &str {
        self.0.subtype().as_str()
    }

    /// Structured syntax suffix, e.g. `json` for `vnd.api+json`.
    pub fn suffix(&self) -> Option<&str> {
        self.0.suffix().map(|suffix| suffix.as_str())
    }

    /// Value of the `charset` parameter, if any.
    pub fn charset(&self) -> Option<&str> {
        self.0.get_param(mime::CHARSET).map(|charset| charset.as_str())
    }

    /// `type/subtype` without parameters.
    pub fn essence(&self) -> &str {
        self.0.essence_str()
    }

    /// The underlying media type.
    pub fn as_mime(&self) -> &mime::Mime {
        &self.0
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_parse_simple() {
        let mime = MimeType::parse("application/json").unwrap();
        assert_eq!(mime.type_(), "application");
        assert_eq!(mime.subtype(), "json");
        assert_eq!(mime.suffix(), None);
        assert_eq!(mime.charset(), None);
    }

    #[test]
    fn test_parse_reads_charset() {
        let mime = MimeType::parse("text/html; charset=UTF-8").unwrap();
        assert_eq!(mime.essence(), "text/html");
        assert!(mime.charset().unwrap().eq_ignore_ascii_case("utf-8"));
    }

    #[test]
    fn test_parse_structured_suffix() {
        let mime = MimeType::parse("application/vnd.api+json").unwrap();
        assert_eq!(mime.subtype(), "vnd.api");
        assert_eq!(mime.suffix(), Some("json"));

        let mime = MimeType::parse("image/svg+xml").unwrap();
        assert_eq!(mime.subtype(), "svg");
        assert_eq!(mime.suffix(), Some("xml"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for value in ["", "json", "text/", "/html", "te xt/html"] {
            assert!(MimeType::parse(value).is_none(), "{value:?} should not parse");
        }
    }

    #[test]
    fn test_from_headers() {
        assert!(MimeType::from_headers(&HeaderMap::new()).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/atom+xml"));
        let mime = MimeType::from_headers(&headers).unwrap();
        assert_eq!(mime.essence(), "application/atom+xml");
    }
}
