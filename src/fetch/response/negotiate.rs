//! Content negotiation: picks the body representation from the MIME type and
//! buffers the body into it.

use super::body::{DecodedBody, JsonBody, MarkupBody};
use super::envelope::Envelope;
use super::mime::MimeType;
use crate::error_handling::TransportFailure;

/// Body representation selected for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// Opaque text
    Text,
    /// Text with a JSON view
    Json,
    /// Text with an HTML/XML document view
    Markup,
    /// Raw bytes
    Bytes,
}

/// Subtype and structured suffix, lowercased, e.g. `vnd.api+json`.
fn full_subtype(mime: &MimeType) -> String {
    let full = match mime.suffix() {
        Some(suffix) => format!("{}+{}", mime.subtype(), suffix),
        None => mime.subtype().to_string(),
    };
    full.to_ascii_lowercase()
}

fn is_textual(mime: &MimeType, subtype: &str) -> bool {
    mime.type_().eq_ignore_ascii_case("text")
        || subtype.contains("json")
        || subtype.contains("xml")
}

/// Classifies a response by its MIME type.
///
/// A missing or unparseable type is buffered as text. The subtype is matched
/// together with its structured suffix, and one that mentions json is JSON even
/// if it also mentions xml or html.
pub fn classify(mime: Option<&MimeType>) -> Representation {
    let Some(mime) = mime else {
        return Representation::Text;
    };
    let subtype = full_subtype(mime);
    if !is_textual(mime, &subtype) {
        return Representation::Bytes;
    }
    if subtype.contains("json") {
        Representation::Json
    } else if subtype.contains("html") || subtype.contains("xml") {
        Representation::Markup
    } else {
        Representation::Text
    }
}

/// Reads the whole body of `response` and attaches it to `base`.
///
/// # Errors
///
/// Returns a [`TransportFailure`] when the body cannot be read or decoded, or
/// when the per-request deadline fires while reading.
pub(crate) async fn decorate(
    mime: Option<MimeType>,
    response: reqwest::Response,
    base: Envelope,
) -> Result<Envelope, TransportFailure> {
    let body = match classify(mime.as_ref()) {
        Representation::Bytes => DecodedBody::Bytes(response.bytes().await?),
        Representation::Json => DecodedBody::Json(JsonBody::new(response.text().await?)),
        Representation::Markup => DecodedBody::Markup(MarkupBody::new(response.text().await?)),
        Representation::Text => DecodedBody::Text(response.text().await?),
    };
    log::trace!(
        "decoded {} body as {:?}",
        mime.as_ref().map(MimeType::essence).unwrap_or("untyped"),
        classify(mime.as_ref())
    );
    Ok(base.with_body(body))
}
