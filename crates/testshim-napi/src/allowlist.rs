//! Allow-connect bindings.

use crate::config::shim;
use napi::bindgen_prelude::*;
use napi_derive::napi;
use std::sync::Arc;
use testshim_core::allowlist::{
    AllowPattern, Allowlist as CoreAllowlist, AllowlistPatcher, ConnectRegistry,
};

/// Allow-connect registry with loopback widening already installed
#[napi]
pub struct Allowlist {
    inner: Arc<AllowlistPatcher<CoreAllowlist>>,
}

#[napi]
impl Allowlist {
    /// Create a registry that already lets both loopback forms through
    #[napi(constructor)]
    pub fn new() -> Result<Self> {
        let patcher = AllowlistPatcher::from_config(CoreAllowlist::new(), shim()?.config())
            .map_err(|e| Error::from_reason(e.to_string()))?;
        patcher.install();
        Ok(Self {
            inner: Arc::new(patcher),
        })
    }

    /// Allow a literal host (`host` or `host:port`)
    #[napi]
    pub fn enable_net_connect(&self, host: String) {
        self.inner.enable_net_connect(AllowPattern::literal(host));
    }

    /// Allow hosts matching a regular expression
    ///
    /// @throws Error if the expression is invalid
    #[napi]
    pub fn enable_net_connect_pattern(&self, source: String) -> Result<()> {
        let pattern =
            AllowPattern::expression(&source).map_err(|e| Error::from_reason(e.to_string()))?;
        self.inner.enable_net_connect(pattern);
        Ok(())
    }

    /// Whether requests to `host` may reach a live listener
    #[napi]
    pub fn is_allowed(&self, host: String) -> bool {
        self.inner.registry().is_allowed(&host)
    }

    /// Registered patterns, regexes rendered as `/source/`
    #[napi]
    pub fn patterns(&self) -> Vec<String> {
        self.inner
            .registry()
            .patterns()
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}
