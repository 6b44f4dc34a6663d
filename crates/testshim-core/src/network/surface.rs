//! Request-issuing surfaces and their normalizing adapters.
//!
//! Each surface is a trait with the same call shape as the library it stands
//! for. A normalizing adapter implements the same trait, rewrites the target
//! through [`HostNormalizer`] and hands the copy to the wrapped value. Outputs
//! are passed back unchanged, so asynchronous transports keep their own
//! futures, retries and cancellation.
//!
//! Adapters report [`is_normalizing`](Transport::is_normalizing); wrapping
//! an adapter a second time yields a pass-through layer instead of a second
//! rewrite.

use crate::network::host::HostNormalizer;
use crate::network::target::{RequestOptions, RequestTarget};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Protocol scheme of a raw transport call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        })
    }
}

/// Raw transport: `request` and its `get` convenience, per scheme.
///
/// Redirect-following transports implement the same trait.
pub trait Transport {
    type Output;

    fn request(&self, scheme: Scheme, target: &RequestTarget) -> Self::Output;

    fn get(&self, scheme: Scheme, target: &RequestTarget) -> Self::Output;

    fn is_normalizing(&self) -> bool {
        false
    }
}

/// Higher-level HTTP client: generic `request` plus `get`/`post` helpers.
pub trait HttpClient {
    type Output;

    fn request(&self, target: &RequestTarget) -> Self::Output;

    fn get(&self, target: &RequestTarget) -> Self::Output;

    fn post(&self, target: &RequestTarget, body: &Value) -> Self::Output;

    fn is_normalizing(&self) -> bool {
        false
    }
}

/// Defaults a per-instance client is created with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDefaults {
    #[serde(rename = "baseURL", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<RequestOptions>,
}

/// Factory creating per-instance clients.
pub trait ClientFactory {
    type Client: HttpClient;

    fn create(&self, defaults: &ClientDefaults) -> Self::Client;
}

/// Normalizing [`Transport`] adapter.
#[derive(Debug, Clone)]
pub struct NormalizingTransport<T> {
    inner: T,
    normalizer: Option<Arc<HostNormalizer>>,
}

impl<T: Transport> NormalizingTransport<T> {
    pub fn new(inner: T, normalizer: Arc<HostNormalizer>) -> Self {
        let normalizer = (!inner.is_normalizing()).then_some(normalizer);
        Self { inner, normalizer }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    fn target(&self, target: &RequestTarget) -> RequestTarget {
        match &self.normalizer {
            Some(normalizer) => normalizer.normalize_target(target),
            None => target.clone(),
        }
    }
}

impl<T: Transport> Transport for NormalizingTransport<T> {
    type Output = T::Output;

    fn request(&self, scheme: Scheme, target: &RequestTarget) -> T::Output {
        self.inner.request(scheme, &self.target(target))
    }

    fn get(&self, scheme: Scheme, target: &RequestTarget) -> T::Output {
        self.inner.get(scheme, &self.target(target))
    }

    fn is_normalizing(&self) -> bool {
        true
    }
}

/// Normalizing [`HttpClient`] adapter.
#[derive(Debug, Clone)]
pub struct NormalizingClient<C> {
    inner: C,
    normalizer: Option<Arc<HostNormalizer>>,
}

impl<C: HttpClient> NormalizingClient<C> {
    pub fn new(inner: C, normalizer: Arc<HostNormalizer>) -> Self {
        let normalizer = (!inner.is_normalizing()).then_some(normalizer);
        Self { inner, normalizer }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn target(&self, target: &RequestTarget) -> RequestTarget {
        match &self.normalizer {
            Some(normalizer) => normalizer.normalize_target(target),
            None => target.clone(),
        }
    }
}

impl<C: HttpClient> HttpClient for NormalizingClient<C> {
    type Output = C::Output;

    fn request(&self, target: &RequestTarget) -> C::Output {
        self.inner.request(&self.target(target))
    }

    fn get(&self, target: &RequestTarget) -> C::Output {
        self.inner.get(&self.target(target))
    }

    fn post(&self, target: &RequestTarget, body: &Value) -> C::Output {
        self.inner.post(&self.target(target), body)
    }

    fn is_normalizing(&self) -> bool {
        true
    }
}

/// Normalizing [`ClientFactory`] adapter: normalizes the defaults and wraps
/// every created client in [`NormalizingClient`].
#[derive(Debug, Clone)]
pub struct NormalizingFactory<F> {
    inner: F,
    normalizer: Arc<HostNormalizer>,
}

impl<F: ClientFactory> NormalizingFactory<F> {
    pub fn new(inner: F, normalizer: Arc<HostNormalizer>) -> Self {
        Self { inner, normalizer }
    }
}

impl<F: ClientFactory> ClientFactory for NormalizingFactory<F> {
    type Client = NormalizingClient<F::Client>;

    fn create(&self, defaults: &ClientDefaults) -> Self::Client {
        let defaults = ClientDefaults {
            base_url: defaults
                .base_url
                .as_deref()
                .map(|url| self.normalizer.normalize_url(url)),
            options: defaults
                .options
                .as_ref()
                .map(|options| self.normalizer.normalize_options(options)),
        };
        NormalizingClient::new(self.inner.create(&defaults), Arc::clone(&self.normalizer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use std::cell::RefCell;

    /// Transport recording every call it receives.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(&'static str, Scheme, RequestTarget)>>,
    }

    impl Transport for Recorder {
        type Output = ();

        fn request(&self, scheme: Scheme, target: &RequestTarget) {
            self.calls
                .borrow_mut()
                .push(("request", scheme, target.clone()));
        }

        fn get(&self, scheme: Scheme, target: &RequestTarget) {
            self.calls.borrow_mut().push(("get", scheme, target.clone()));
        }
    }

    fn normalizer() -> Arc<HostNormalizer> {
        Arc::new(HostNormalizer::default())
    }

    #[rstest]
    #[case(Scheme::Http)]
    #[case(Scheme::Https)]
    fn test_transport_request_and_get(#[case] scheme: Scheme) {
        let transport = NormalizingTransport::new(Recorder::default(), normalizer());
        let target = RequestTarget::from("http://localhost:4000/api?x=1#top");

        transport.request(scheme, &target);
        transport.get(scheme, &target);

        let expected = RequestTarget::from("http://127.0.0.1:4000/api?x=1#top");
        let calls = transport.inner().calls.borrow();
        assert_eq!(calls[0], ("request", scheme, expected.clone()));
        assert_eq!(calls[1], ("get", scheme, expected));
        assert_eq!(target, RequestTarget::from("http://localhost:4000/api?x=1#top"));
    }

    #[rstest]
    fn test_transport_options_shape() {
        let transport = NormalizingTransport::new(Recorder::default(), normalizer());
        let options = RequestOptions {
            host: Some("localhost:8080".into()),
            path: Some("/health".into()),
            ..Default::default()
        };
        transport.request(Scheme::Http, &options.clone().into());

        let calls = transport.inner().calls.borrow();
        let RequestTarget::Options(sent) = &calls[0].2 else {
            panic!("expected options shape");
        };
        assert_eq!(sent.host.as_deref(), Some("127.0.0.1:8080"));
        assert_eq!(sent.path.as_deref(), Some("/health"));
        assert_eq!(options.host.as_deref(), Some("localhost:8080"));
    }

    #[rstest]
    fn test_transport_double_wrap_is_pass_through() {
        let once = NormalizingTransport::new(Recorder::default(), normalizer());
        let twice = NormalizingTransport::new(once, normalizer());
        assert!(twice.normalizer.is_none());
        assert!(twice.is_normalizing());

        twice.get(Scheme::Http, &"http://localhost/".into());
        let calls = twice.inner().inner().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].2, RequestTarget::from("http://127.0.0.1/"));
    }

    /// Client returning the address it was asked to hit.
    #[derive(Debug, Clone, Default)]
    struct EchoClient {
        base_url: Option<String>,
    }

    impl HttpClient for EchoClient {
        type Output = String;

        fn request(&self, target: &RequestTarget) -> String {
            match (&self.base_url, target) {
                (Some(base), RequestTarget::Url(url)) => RequestTarget::composed(base, url)
                    .address()
                    .unwrap_or_default(),
                _ => target.address().unwrap_or_default(),
            }
        }

        fn get(&self, target: &RequestTarget) -> String {
            format!("GET {}", self.request(target))
        }

        fn post(&self, target: &RequestTarget, body: &Value) -> String {
            format!("POST {} {body}", self.request(target))
        }
    }

    struct EchoFactory;

    impl ClientFactory for EchoFactory {
        type Client = EchoClient;

        fn create(&self, defaults: &ClientDefaults) -> EchoClient {
            EchoClient {
                base_url: defaults.base_url.clone(),
            }
        }
    }

    #[rstest]
    fn test_client_calls() {
        let client = NormalizingClient::new(EchoClient::default(), normalizer());
        let composed = RequestTarget::composed("http://localhost:3000/", "/users?page=2");

        assert_eq!(client.request(&composed), "http://127.0.0.1:3000/users?page=2");
        assert_eq!(
            client.get(&"http://localhost/a".into()),
            "GET http://127.0.0.1/a"
        );
        assert_eq!(
            client.post(&"https://localhost:8443/b".into(), &json!({"a": 1})),
            r#"POST https://127.0.0.1:8443/b {"a":1}"#
        );
        assert_eq!(
            client.get(&"https://example.com/a".into()),
            "GET https://example.com/a"
        );
    }

    /// Client handing back the config it was given.
    struct ConfigClient;

    impl HttpClient for ConfigClient {
        type Output = Value;

        fn request(&self, target: &RequestTarget) -> Value {
            serde_json::to_value(target).unwrap()
        }

        fn get(&self, target: &RequestTarget) -> Value {
            self.request(target)
        }

        fn post(&self, target: &RequestTarget, body: &Value) -> Value {
            json!({"config": self.request(target), "body": body})
        }
    }

    #[rstest]
    #[case(json!({
        "baseURL": "http://localhost:3000",
        "url": "/users",
        "method": "post",
        "headers": {"x-id": "1"}
    }))]
    #[case(json!({
        "url": "http://localhost:3000/users",
        "method": "post",
        "headers": {"x-id": "1"}
    }))]
    fn test_client_config_fields_survive(#[case] config: Value) {
        let client = NormalizingClient::new(ConfigClient, normalizer());
        let target: RequestTarget = serde_json::from_value(config).unwrap();

        let sent = client.post(&target, &json!({"name": "a"}));

        let sent_target: RequestTarget = serde_json::from_value(sent["config"].clone()).unwrap();
        assert_eq!(
            sent_target.address().as_deref(),
            Some("http://127.0.0.1:3000/users")
        );
        assert_eq!(sent["config"]["method"], "post");
        assert_eq!(sent["config"]["headers"], json!({"x-id": "1"}));
        assert_eq!(sent["body"], json!({"name": "a"}));
        assert_eq!(sent_target.extra(), target.extra());
    }

    #[rstest]
    fn test_factory_normalizes_defaults_and_instances() {
        let factory = NormalizingFactory::new(EchoFactory, normalizer());
        let client = factory.create(&ClientDefaults {
            base_url: Some("http://localhost:5000".into()),
            options: None,
        });

        assert!(client.is_normalizing());
        assert_eq!(client.get(&"/ping".into()), "GET http://127.0.0.1:5000/ping");
        assert_eq!(
            client.get(&"http://localhost:9/x".into()),
            "GET http://127.0.0.1:9/x"
        );
    }

    #[rstest]
    #[case(Scheme::Http, "http")]
    #[case(Scheme::Https, "https")]
    fn test_scheme_display(#[case] scheme: Scheme, #[case] expected: &str) {
        assert_eq!(scheme.to_string(), expected);
    }
}
