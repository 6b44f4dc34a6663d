//! Loopback normalization bindings.

use crate::config::shim;
use napi::bindgen_prelude::*;
use napi_derive::napi;
use serde_json::Value;
use testshim_core::network::RequestTarget;

/// Rewrite the loopback alias in an absolute address; anything else is returned as is.
#[napi]
pub fn normalize_url(url: String) -> Result<String> {
    Ok(shim()?.normalizer().normalize_url(&url))
}

/// Rewrite the loopback alias in a `host` or `host:port` value.
#[napi]
pub fn normalize_host(host: String) -> Result<String> {
    Ok(shim()?.normalizer().normalize_host(&host))
}

/// Normalized copy of a request target: an address string, an options object
/// with `host`/`hostname`, or `{ baseURL, url }`.
///
/// Values that match none of these shapes are returned unchanged.
#[napi]
pub fn normalize_request(target: Value) -> Result<Value> {
    let shim = shim()?;
    let Ok(parsed) = serde_json::from_value::<RequestTarget>(target.clone()) else {
        return Ok(target);
    };
    let normalized = shim.normalizer().normalize_target(&parsed);
    Ok(serde_json::to_value(normalized).unwrap_or(target))
}
