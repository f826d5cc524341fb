//! Mapping of a resolved [`ProxySpec`] onto reqwest's proxy configuration.

use reqwest::header::HeaderValue;
use url::Url;

use super::{HttpForwardProxy, ProxySpec, SocksProxy, SocksVersion};
use crate::config::BASIC_PREFIX;
use crate::error_handling::ConfigError;

impl ProxySpec {
    /// Builds the reqwest proxy for this configuration, or `None` for direct dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProxy`] when reqwest rejects the proxy URL,
    /// when a SOCKS5 username comes without a password, or when the credentials
    /// cannot be carried in a header.
    pub fn to_reqwest(&self) -> Result<Option<reqwest::Proxy>, ConfigError> {
        match self {
            ProxySpec::None => Ok(None),
            ProxySpec::Socks(socks) => socks_proxy(socks).map(Some),
            ProxySpec::HttpForward(forward) => forward_proxy(forward).map(Some),
        }
    }
}

fn socks_proxy(socks: &SocksProxy) -> Result<reqwest::Proxy, ConfigError> {
    let raw = format!(
        "socks{}://{}:{}",
        socks.version.number(),
        socks.host,
        socks.port
    );
    let mut url = Url::parse(&raw).map_err(|e| ConfigError::InvalidProxy(e.to_string()))?;

    match (socks.version, &socks.user_id) {
        (SocksVersion::V5, Some(user)) => {
            // reqwest only forwards a username together with a non-empty password
            if socks.password.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::InvalidProxy(format!(
                    "SOCKS5 user {user:?} needs a non-empty password"
                )));
            }
            // set_username/set_password percent-encode; reqwest decodes them again
            url.set_username(user)
                .map_err(|_| ConfigError::InvalidProxy("cannot set SOCKS username".into()))?;
            url.set_password(socks.password.as_deref())
                .map_err(|_| ConfigError::InvalidProxy("cannot set SOCKS password".into()))?;
        }
        (SocksVersion::V4, Some(_)) => {
            log::debug!("SOCKS4 user id is not forwarded by the transport; connecting without it");
        }
        (_, None) => {}
    }

    reqwest::Proxy::all(url.as_str()).map_err(|e| ConfigError::InvalidProxy(e.to_string()))
}

fn forward_proxy(forward: &HttpForwardProxy) -> Result<reqwest::Proxy, ConfigError> {
    let raw = format!("{}://{}", forward.scheme.as_str(), forward.target_authority);
    let proxy =
        reqwest::Proxy::all(raw.as_str()).map_err(|e| ConfigError::InvalidProxy(e.to_string()))?;

    match &forward.basic_credentials {
        Some(token) => {
            let mut value = HeaderValue::from_str(&format!("{BASIC_PREFIX}{token}"))
                .map_err(|e| ConfigError::InvalidProxy(e.to_string()))?;
            value.set_sensitive(true);
            Ok(proxy.custom_http_auth(value))
        }
        None => Ok(proxy),
    }
}
