//! Cookie header encoding and decoding.
//!
//! Converts between a [`CookieJar`] and the wire representations: the request
//! `Cookie` header and the response `Set-Cookie` headers. Attributes such as
//! `Path` or `Expires` are discarded; only name and value survive.

use reqwest::header::{HeaderMap, SET_COOKIE};

/// Ordered name→value map of cookies for one request or response.
///
/// Lookups ignore order, but [`stringify`] emits cookies in insertion order.
/// Inserting a name that already exists replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    entries: Vec<(String, String)>,
}

impl CookieJar {
    /// Creates an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a cookie, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Looks up a cookie value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of cookies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the jar holds no cookies.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CookieJar {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut jar = CookieJar::new();
        for (name, value) in iter {
            jar.insert(name, value);
        }
        jar
    }
}

/// Renders a jar as a `Cookie` request header value.
///
/// Pairs are joined with `"; "` in jar order. An empty jar yields an empty string.
pub fn stringify(jar: &CookieJar) -> String {
    jar.iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Extracts the name and value from one `Set-Cookie` entry.
///
/// The name runs up to the first `=`, the value from there up to the first `;`.
fn parse_set_cookie(entry: &str) -> Option<(&str, &str)> {
    let (name, rest) = entry.split_once('=')?;
    let value = rest.split(';').next().unwrap_or_default();
    Some((name, value))
}

/// Builds a jar from every `Set-Cookie` header in a response.
///
/// Entries without `=` and header values that are not valid UTF-8 are skipped.
/// When a name repeats, the last entry wins.
pub fn parse(headers: &HeaderMap) -> CookieJar {
    let mut jar = CookieJar::new();
    for value in headers.get_all(SET_COOKIE) {
        let Ok(entry) = value.to_str() else {
            log::trace!("Skipping non-UTF-8 Set-Cookie header");
            continue;
        };
        match parse_set_cookie(entry) {
            Some((name, value)) => {
                jar.insert(name, value);
            }
            None => log::trace!("Skipping malformed Set-Cookie entry: {entry}"),
        }
    }
    jar
}
