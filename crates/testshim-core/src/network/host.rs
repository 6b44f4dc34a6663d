//! Loopback alias normalization.

use crate::config::ShimConfig;
use crate::network::target::{is_absolute, split_port, RequestOptions, RequestTarget};
use url::{Host, Url};

/// Rewrites the loopback alias (e.g. `localhost`) to the numeric loopback
/// address (e.g. `127.0.0.1`) in request targets.
///
/// Normalization is best-effort: anything that does not parse, or does not
/// point at the alias, comes back byte-identical. Hostnames are compared
/// ASCII case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostNormalizer {
    alias: String,
    address: String,
}

impl HostNormalizer {
    pub fn new(alias: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            address: address.into(),
        }
    }

    pub fn from_config(config: &ShimConfig) -> Self {
        Self::new(&config.loopback_alias, &config.loopback_address)
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_alias(&self, hostname: &str) -> bool {
        hostname.eq_ignore_ascii_case(&self.alias)
    }

    /// Normalize a bare hostname.
    pub fn normalize_hostname(&self, hostname: &str) -> String {
        if self.is_alias(hostname) {
            self.address.clone()
        } else {
            hostname.to_string()
        }
    }

    /// Normalize a `host` field, keeping any `:port` suffix.
    pub fn normalize_host(&self, host: &str) -> String {
        match split_port(host) {
            (hostname, Some(port)) if self.is_alias(hostname) => {
                format!("{}:{port}", self.address)
            }
            (hostname, None) if self.is_alias(hostname) => self.address.clone(),
            _ => host.to_string(),
        }
    }

    /// Normalize an absolute or protocol-relative (`//host/...`) address.
    ///
    /// Only the host span is replaced; scheme, credentials, port, path, query
    /// and fragment keep their original bytes.
    pub fn normalize_url(&self, raw: &str) -> String {
        let parsed = if raw.starts_with("//") {
            Url::parse(&format!("http:{raw}"))
        } else {
            Url::parse(raw)
        };
        let parsed = match parsed {
            Ok(parsed) => parsed,
            Err(url::ParseError::RelativeUrlWithoutBase) => return raw.to_string(),
            Err(err) => {
                tracing::debug!(url = raw, error = %err, "unparseable address left as is");
                return raw.to_string();
            }
        };

        match parsed.host() {
            Some(Host::Domain(domain)) if self.is_alias(domain) => {}
            _ => return raw.to_string(),
        }

        let Some((start, end)) = host_span(raw) else {
            return raw.to_string();
        };
        if !self.is_alias(&raw[start..end]) {
            return raw.to_string();
        }

        let normalized = format!("{}{}{}", &raw[..start], self.address, &raw[end..]);
        tracing::debug!(from = raw, to = %normalized, "rewrote loopback alias");
        normalized
    }

    /// Normalize the `url` part of a config: absolute and protocol-relative
    /// addresses only, paths are left alone.
    fn normalize_path_or_url(&self, url: &str) -> String {
        if is_absolute(url) {
            self.normalize_url(url)
        } else {
            url.to_string()
        }
    }

    /// Normalize request options into a new value; the input is left untouched.
    pub fn normalize_options(&self, options: &RequestOptions) -> RequestOptions {
        let mut normalized = options.clone();
        normalized.hostname = options
            .hostname
            .as_deref()
            .map(|h| self.normalize_hostname(h));
        normalized.host = options.host.as_deref().map(|h| self.normalize_host(h));
        normalized.base_url = options
            .base_url
            .as_deref()
            .map(|url| self.normalize_url(url));
        normalized.url = options
            .url
            .as_deref()
            .map(|url| self.normalize_path_or_url(url));
        normalized
    }

    /// Normalize any accepted target shape into a new value.
    pub fn normalize_target(&self, target: &RequestTarget) -> RequestTarget {
        match target {
            RequestTarget::Url(url) => RequestTarget::Url(self.normalize_url(url)),
            RequestTarget::Options(options) => {
                RequestTarget::Options(self.normalize_options(options))
            }
            RequestTarget::Composed {
                base_url,
                url,
                extra,
            } => RequestTarget::Composed {
                base_url: self.normalize_url(base_url),
                url: self.normalize_path_or_url(url),
                extra: extra.clone(),
            },
        }
    }
}

impl Default for HostNormalizer {
    fn default() -> Self {
        Self::from_config(&ShimConfig::default())
    }
}

/// Byte range of the hostname in `scheme:[//][userinfo@]host[:port]...`
/// or `//[userinfo@]host[:port]...`.
fn host_span(raw: &str) -> Option<(usize, usize)> {
    let after_scheme = if raw.starts_with("//") {
        0
    } else {
        raw.find(':')? + 1
    };
    let slashes = raw[after_scheme..]
        .bytes()
        .take_while(|b| matches!(b, b'/' | b'\\'))
        .count();
    let authority_start = after_scheme + slashes;
    let rest = &raw[authority_start..];
    let authority_len = rest.find(['/', '?', '#', '\\']).unwrap_or(rest.len());
    let authority = &rest[..authority_len];

    let host_start = authority.rfind('@').map_or(0, |i| i + 1);
    let host_len = split_port(&authority[host_start..]).0.len();

    let start = authority_start + host_start;
    Some((start, start + host_len))
}
