//! Proxy specification grammar.
//!
//! ```text
//! socks4://[user:pass@]host:port
//! socks5://[user:pass@]host:port
//! http://[user:pass@]rest-of-url
//! https://[user:pass@]rest-of-url
//! ```

use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;

use super::{ForwardScheme, HttpForwardProxy, ProxySpec, SocksProxy, SocksVersion};
use crate::error_handling::ConfigError;
use crate::logging::Logger;

static SOCKS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:socks)([45])://(?:([^:@/]+):([^@/]*)@)?(\[[^\]/@]+\]|[^:@/\[\]]+):(\d{1,5})/?$")
        .expect("SOCKS proxy pattern should compile - this is a programming error")
});

static HTTP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:(https?))://(?:([^:@/]+):([^@/]*)@)?([^@]+)$")
        .expect("HTTP proxy pattern should compile - this is a programming error")
});

/// Parses an optional proxy specification.
///
/// Absent or blank input selects direct dispatch. SOCKS grammar is tried before the
/// HTTP(S) grammar; input matching neither fails with
/// [`ConfigError::UnparseableProxy`]. When a logger is supplied, the resolved
/// configuration (with credentials redacted) is traced at debug level.
pub fn select(spec: Option<&str>, logger: Option<&Logger>) -> Result<ProxySpec, ConfigError> {
    let resolved = match spec.map(str::trim).filter(|s| !s.is_empty()) {
        None => ProxySpec::None,
        Some(spec) => parse_socks(spec)
            .or_else(|| parse_http(spec))
            .ok_or(ConfigError::UnparseableProxy)?,
    };
    if let Some(logger) = logger {
        logger.debug(&format!("proxy configuration: {resolved}"));
    }
    Ok(resolved)
}

fn parse_socks(spec: &str) -> Option<ProxySpec> {
    let caps = SOCKS_PATTERN.captures(spec)?;
    let version = match &caps[1] {
        "4" => SocksVersion::V4,
        _ => SocksVersion::V5,
    };
    // Five digits can still overflow a u16; such a spec is unparseable
    let port = caps[5].parse::<u16>().ok()?;
    Some(ProxySpec::Socks(SocksProxy {
        version,
        host: caps[4].to_string(),
        port,
        user_id: caps.get(2).map(|m| m.as_str().to_string()),
        password: caps.get(3).map(|m| m.as_str().to_string()),
    }))
}

fn parse_http(spec: &str) -> Option<ProxySpec> {
    let caps = HTTP_PATTERN.captures(spec)?;
    let scheme = if caps[1].eq_ignore_ascii_case("https") {
        ForwardScheme::Https
    } else {
        ForwardScheme::Http
    };
    let basic_credentials = match (caps.get(2), caps.get(3)) {
        (Some(user), Some(pass)) => {
            Some(STANDARD.encode(format!("{}:{}", user.as_str(), pass.as_str())))
        }
        _ => None,
    };
    Some(ProxySpec::HttpForward(HttpForwardProxy {
        scheme,
        target_authority: caps[4].to_string(),
        basic_credentials,
    }))
}
