//! Proxy specification parsing and transport configuration.
//!
//! A proxy is given as a URL-like string (see [`select`]) and parsed once, at the
//! request boundary, into the closed [`ProxySpec`] variant. Everything downstream
//! works on the variant only.

mod parse;
mod transport;

#[cfg(test)]
mod tests;

use std::fmt;

pub use parse::select;

/// SOCKS protocol version, taken from the digit in the `socks4://` / `socks5://` scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocksVersion {
    /// SOCKS4
    V4,
    /// SOCKS5
    V5,
}

impl SocksVersion {
    /// Numeric protocol version.
    pub fn number(&self) -> u8 {
        match self {
            SocksVersion::V4 => 4,
            SocksVersion::V5 => 5,
        }
    }
}

/// A SOCKS proxy with optional inline credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocksProxy {
    /// Protocol version
    pub version: SocksVersion,
    /// Hostname, IPv4 literal or bracketed IPv6 literal
    pub host: String,
    /// Proxy port
    pub port: u16,
    /// SOCKS user id (username for SOCKS5)
    pub user_id: Option<String>,
    /// SOCKS5 password; ignored for SOCKS4
    pub password: Option<String>,
}

/// Scheme used to reach an HTTP forward proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardScheme {
    /// Plain HTTP to the proxy
    Http,
    /// TLS to the proxy
    Https,
}

impl ForwardScheme {
    /// URL scheme for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            ForwardScheme::Http => "http",
            ForwardScheme::Https => "https",
        }
    }
}

/// An HTTP(S) forward proxy.
///
/// `basic_credentials` is the base64 encoding of `user:pass`, sent to the proxy in
/// `Proxy-Authorization` and never to the origin server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpForwardProxy {
    /// Scheme used to reach the proxy
    pub scheme: ForwardScheme,
    /// Everything after `scheme://` and the optional credentials
    pub target_authority: String,
    /// Base64 `user:pass`, if the spec carried credentials
    pub basic_credentials: Option<String>,
}

/// Resolved dispatch configuration for one request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProxySpec {
    /// Connect directly to the origin
    #[default]
    None,
    /// Tunnel through a SOCKS4/5 proxy
    Socks(SocksProxy),
    /// Send through an HTTP(S) forward proxy
    HttpForward(HttpForwardProxy),
}

impl ProxySpec {
    /// True when no proxy is configured.
    pub fn is_direct(&self) -> bool {
        matches!(self, ProxySpec::None)
    }
}

/// Credential-free rendering used in debug traces.
impl fmt::Display for ProxySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxySpec::None => f.write_str("direct"),
            ProxySpec::Socks(socks) => {
                write!(f, "socks{}://", socks.version.number())?;
                if let Some(user) = &socks.user_id {
                    write!(f, "{user}:***@")?;
                }
                write!(f, "{}:{}", socks.host, socks.port)
            }
            ProxySpec::HttpForward(forward) => {
                write!(f, "{}://", forward.scheme.as_str())?;
                if forward.basic_credentials.is_some() {
                    f.write_str("***@")?;
                }
                f.write_str(&forward.target_authority)
            }
        }
    }
}
