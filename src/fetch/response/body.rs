//! Decoded response bodies.
//!
//! The representation is chosen once, from the response MIME type, and never
//! changes afterwards. Derived forms (parsed JSON, parsed document) are computed
//! on first access from the buffered text and cached.

use std::sync::OnceLock;

use bytes::Bytes;
use scraper::Html;
use serde_json::Value;

use crate::error_handling::ParseError;

/// Buffered text whose JSON value is parsed on demand.
#[derive(Debug)]
pub struct JsonBody {
    text: String,
    value: OnceLock<Result<Value, ParseError>>,
}

impl JsonBody {
    pub(crate) fn new(text: String) -> Self {
        Self {
            text,
            value: OnceLock::new(),
        }
    }

    /// Raw response text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parsed JSON value; parse failures are cached as well.
    pub fn value(&self) -> Result<&Value, ParseError> {
        self.value
            .get_or_init(|| {
                serde_json::from_str(&self.text).map_err(|e| ParseError::InvalidJson(e.to_string()))
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

/// Buffered HTML/XML text whose document is parsed on demand.
#[derive(Debug)]
pub struct MarkupBody {
    text: String,
    document: OnceLock<Html>,
}

impl MarkupBody {
    pub(crate) fn new(text: String) -> Self {
        Self {
            text,
            document: OnceLock::new(),
        }
    }

    /// Raw response text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parsed document; the same instance is returned on every call.
    pub fn document(&self) -> &Html {
        self.document
            .get_or_init(|| Html::parse_document(&self.text))
    }
}

/// A fully buffered response body in the representation its MIME type selects.
#[derive(Debug)]
pub enum DecodedBody {
    /// No body was read (HEAD requests and transport failures)
    Empty,
    /// Opaque text, including responses without a usable `Content-Type`
    Text(String),
    /// Text with a JSON view
    Json(JsonBody),
    /// Text with an HTML/XML document view
    Markup(MarkupBody),
    /// Raw bytes of any non-textual type
    Bytes(Bytes),
}

impl DecodedBody {
    /// Buffered text, for every textual representation.
    pub fn text(&self) -> Option<&str> {
        match self {
            DecodedBody::Text(text) => Some(text),
            DecodedBody::Json(json) => Some(json.text()),
            DecodedBody::Markup(markup) => Some(markup.text()),
            DecodedBody::Empty | DecodedBody::Bytes(_) => None,
        }
    }

    /// Parsed JSON, only offered for JSON subtypes.
    pub fn json(&self) -> Option<Result<&Value, ParseError>> {
        match self {
            DecodedBody::Json(json) => Some(json.value()),
            _ => None,
        }
    }

    /// Parsed document, only offered for HTML/XML subtypes.
    pub fn dom(&self) -> Option<&Html> {
        match self {
            DecodedBody::Markup(markup) => Some(markup.document()),
            _ => None,
        }
    }

    /// Raw bytes, only offered for non-textual types.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            DecodedBody::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// True for the bodies of HEAD responses and transport failures.
    pub fn is_empty(&self) -> bool {
        matches!(self, DecodedBody::Empty)
    }
}
