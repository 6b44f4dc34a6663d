//! Shim config and installation bindings.

use napi::bindgen_prelude::*;
use napi_derive::napi;
use testshim_core::config::{load_config, ShimConfig as CoreShimConfig};
use testshim_core::Shim;

/// Shim settings; omitted fields keep their defaults
#[napi(object)]
#[derive(Clone, Default)]
pub struct ShimConfig {
    pub pattern: Option<String>,
    pub substitute: Option<String>,
    pub sentinel: Option<String>,
    pub loopback_alias: Option<String>,
    pub loopback_address: Option<String>,
}

impl From<ShimConfig> for CoreShimConfig {
    fn from(c: ShimConfig) -> Self {
        let defaults = CoreShimConfig::default();
        Self {
            pattern: c.pattern.unwrap_or(defaults.pattern),
            substitute: c.substitute.unwrap_or(defaults.substitute),
            sentinel: c.sentinel.unwrap_or(defaults.sentinel),
            loopback_alias: c.loopback_alias.unwrap_or(defaults.loopback_alias),
            loopback_address: c.loopback_address.unwrap_or(defaults.loopback_address),
        }
    }
}

impl From<&CoreShimConfig> for ShimConfig {
    fn from(c: &CoreShimConfig) -> Self {
        Self {
            pattern: Some(c.pattern.clone()),
            substitute: Some(c.substitute.clone()),
            sentinel: Some(c.sentinel.clone()),
            loopback_alias: Some(c.loopback_alias.clone()),
            loopback_address: Some(c.loopback_address.clone()),
        }
    }
}

/// Install the shim for this process and return the effective config.
///
/// Only the first call takes effect; later calls return the installed config.
///
/// @param configPath - Optional YAML/JSON/JSONC config file
/// @param overrides - Optional settings applied when no file is given
#[napi]
pub fn install(config_path: Option<String>, overrides: Option<ShimConfig>) -> Result<ShimConfig> {
    let config = match config_path {
        Some(path) => load_config(&path)
            .map_err(|e| Error::from_reason(format!("Failed to load shim config: {e}")))?,
        None => overrides.unwrap_or_default().into(),
    };
    let shim = testshim_core::install(config).map_err(|e| Error::from_reason(e.to_string()))?;
    Ok(ShimConfig::from(shim.config()))
}

/// Installed shim, installing the defaults on first use.
pub(crate) fn shim() -> Result<&'static Shim> {
    if let Some(shim) = testshim_core::installed() {
        return Ok(shim);
    }
    tracing::debug!("no shim installed yet, installing defaults");
    testshim_core::install(CoreShimConfig::default()).map_err(|e| Error::from_reason(e.to_string()))
}
