//! Request target shapes accepted by the request surfaces.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Port as given by the caller; transports accept both `4000` and `"4000"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Port {
    Number(u16),
    Text(String),
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Number(n) => write!(f, "{n}"),
            Port::Text(s) => f.write_str(s),
        }
    }
}

impl From<u16> for Port {
    fn from(n: u16) -> Self {
        Port::Number(n)
    }
}

/// Options object with separate host fields, as taken by raw transports.
///
/// Client-style configs that carry only `url` or only `baseURL` land here too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Host, optionally with a `:port` suffix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Bare hostname, takes precedence over `host`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<Port>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "baseURL", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Fields the shim does not interpret, carried over untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RequestOptions {
    /// Hostname the transport will connect to.
    pub fn resolved_hostname(&self) -> Option<&str> {
        self.hostname
            .as_deref()
            .or_else(|| self.host.as_deref().map(|h| split_port(h).0))
    }

    /// Address from the `url`/`baseURL` fields, if either is set.
    pub fn address(&self) -> Option<String> {
        match (&self.base_url, &self.url) {
            (Some(base), Some(url)) => Some(join_address(base, url)),
            (Some(base), None) => Some(base.clone()),
            (None, Some(url)) => Some(url.clone()),
            (None, None) => None,
        }
    }
}

/// A request target in one of the three accepted shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestTarget {
    /// Base address composed with a (usually relative) path
    Composed {
        #[serde(rename = "baseURL")]
        base_url: String,
        url: String,
        /// Remaining config fields (method, headers, body, ...)
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    /// Options object with host fields
    Options(RequestOptions),
    /// Bare address string
    Url(String),
}

impl RequestTarget {
    pub fn composed(base_url: impl Into<String>, url: impl Into<String>) -> Self {
        RequestTarget::Composed {
            base_url: base_url.into(),
            url: url.into(),
            extra: Map::new(),
        }
    }

    /// Full address of the target, if it has one.
    pub fn address(&self) -> Option<String> {
        match self {
            RequestTarget::Url(url) => Some(url.clone()),
            RequestTarget::Composed { base_url, url, .. } => Some(join_address(base_url, url)),
            RequestTarget::Options(options) => options.address(),
        }
    }

    /// Config fields outside the address, such as method or headers.
    pub fn extra(&self) -> Option<&Map<String, Value>> {
        match self {
            RequestTarget::Composed { extra, .. } => Some(extra),
            RequestTarget::Options(options) => Some(&options.extra),
            RequestTarget::Url(_) => None,
        }
    }
}

impl From<&str> for RequestTarget {
    fn from(url: &str) -> Self {
        RequestTarget::Url(url.to_string())
    }
}

impl From<String> for RequestTarget {
    fn from(url: String) -> Self {
        RequestTarget::Url(url)
    }
}

impl From<RequestOptions> for RequestTarget {
    fn from(options: RequestOptions) -> Self {
        RequestTarget::Options(options)
    }
}

/// Join a base address and a path the way HTTP clients do: an absolute
/// `url` wins, otherwise exactly one `/` goes between the two.
pub fn join_address(base_url: &str, url: &str) -> String {
    if is_absolute(url) || base_url.is_empty() {
        url.to_string()
    } else if url.is_empty() {
        base_url.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    }
}

/// `scheme://` prefix check, the same test HTTP clients use before
/// combining a base address with a path.
pub fn is_absolute(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once("://") else {
        return url.starts_with("//");
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Split `host:port` into its parts. Bracketed IPv6 hosts keep their colons.
pub fn split_port(host: &str) -> (&str, Option<&str>) {
    let port_start = if host.starts_with('[') {
        host.find("]:").map(|i| i + 1)
    } else {
        host.rfind(':')
    };
    match port_start {
        Some(i) => (&host[..i], Some(&host[i + 1..])),
        None => (host, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("http://localhost", true)]
    #[case("HTTPS://x", true)]
    #[case("git+ssh://x", true)]
    #[case("//cdn.example.com", true)]
    #[case("/api/users", false)]
    #[case("api?next=http://x", false)]
    #[case("1http://x", false)]
    fn test_is_absolute(#[case] url: &str, #[case] expected: bool) {
        assert_eq!(is_absolute(url), expected);
    }

    #[rstest]
    #[case("localhost", "localhost", None)]
    #[case("localhost:4000", "localhost", Some("4000"))]
    #[case("[::1]:8080", "[::1]", Some("8080"))]
    #[case("[::1]", "[::1]", None)]
    fn test_split_port(#[case] input: &str, #[case] host: &str, #[case] port: Option<&str>) {
        assert_eq!(split_port(input), (host, port));
    }

    #[rstest]
    #[case("http://localhost:3000", "/api", "http://localhost:3000/api")]
    #[case("http://localhost:3000/", "/api", "http://localhost:3000/api")]
    #[case("http://localhost:3000/v1", "users?x=1", "http://localhost:3000/v1/users?x=1")]
    #[case("http://localhost:3000", "", "http://localhost:3000")]
    #[case("http://localhost:3000", "http://example.com/a", "http://example.com/a")]
    #[case("", "/api", "/api")]
    fn test_composed_address(#[case] base: &str, #[case] url: &str, #[case] expected: &str) {
        let target = RequestTarget::composed(base, url);
        assert_eq!(target.address().as_deref(), Some(expected));
    }

    #[rstest]
    #[case(json!({"url": "http://localhost/a"}), Some("http://localhost/a"))]
    #[case(json!({"baseURL": "http://localhost:1"}), Some("http://localhost:1"))]
    #[case(json!({"hostname": "localhost", "path": "/a"}), None)]
    fn test_options_address(#[case] value: Value, #[case] expected: Option<&str>) {
        let options: RequestOptions = serde_json::from_value(value).unwrap();
        assert_eq!(options.address().as_deref(), expected);
    }

    #[rstest]
    #[case(RequestOptions { hostname: Some("a".into()), host: Some("b:1".into()), ..Default::default() }, Some("a"))]
    #[case(RequestOptions { host: Some("b:1".into()), ..Default::default() }, Some("b"))]
    #[case(RequestOptions::default(), None)]
    fn test_resolved_hostname(#[case] options: RequestOptions, #[case] expected: Option<&str>) {
        assert_eq!(options.resolved_hostname(), expected);
    }

    #[rstest]
    fn test_target_deserialize_shapes() {
        let url: RequestTarget = serde_json::from_value(json!("http://localhost/x")).unwrap();
        assert_eq!(url, RequestTarget::Url("http://localhost/x".into()));

        let composed: RequestTarget = serde_json::from_value(
            json!({"baseURL": "http://localhost", "url": "/x", "method": "post"}),
        )
        .unwrap();
        assert!(matches!(composed, RequestTarget::Composed { .. }));
        assert_eq!(composed.extra().unwrap().get("method"), Some(&json!("post")));

        let options: RequestTarget =
            serde_json::from_value(json!({"host": "localhost:80", "timeout": 5})).unwrap();
        let RequestTarget::Options(options) = options else {
            panic!("expected options shape");
        };
        assert_eq!(options.host.as_deref(), Some("localhost:80"));
        assert_eq!(options.extra.get("timeout"), Some(&json!(5)));
    }

    #[rstest]
    #[case(json!(4000), Port::Number(4000))]
    #[case(json!("4000"), Port::Text("4000".into()))]
    fn test_port_accepts_number_or_string(#[case] port: Value, #[case] expected: Port) {
        let target: RequestTarget =
            serde_json::from_value(json!({"hostname": "localhost", "port": port.clone()})).unwrap();
        let RequestTarget::Options(options) = &target else {
            panic!("expected options shape");
        };
        assert_eq!(options.port.as_ref(), Some(&expected));
        assert_eq!(serde_json::to_value(&target).unwrap()["port"], port);
    }

    #[rstest]
    fn test_composed_serializes_extra_fields() {
        let value = json!({
            "baseURL": "http://localhost:3000",
            "url": "/x",
            "method": "post",
            "headers": {"a": "b"}
        });
        let target: RequestTarget = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&target).unwrap(), value);
    }
}
