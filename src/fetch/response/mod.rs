//! HTTP response decoding.
//!
//! This module turns a reqwest response into an [`Envelope`]: the MIME type is
//! parsed from `Content-Type`, the body is buffered into one [`DecodedBody`]
//! representation, and `Set-Cookie` headers are collected into a jar.

mod body;
mod envelope;
mod mime;
mod negotiate;

pub use body::{DecodedBody, JsonBody, MarkupBody};
pub use envelope::Envelope;
pub use mime::MimeType;
pub use negotiate::{classify, Representation};

pub(crate) use negotiate::decorate;
