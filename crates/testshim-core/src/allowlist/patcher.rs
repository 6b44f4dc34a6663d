//! Allow-connect registration patching.

use crate::allowlist::pattern::AllowPattern;
use crate::config::ShimConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

/// The allow-connect side of a network-mocking library.
pub trait ConnectRegistry {
    /// Let requests to hosts matching `pattern` reach a live listener.
    fn enable_net_connect(&self, pattern: AllowPattern);
}

impl<R: ConnectRegistry + ?Sized> ConnectRegistry for &R {
    fn enable_net_connect(&self, pattern: AllowPattern) {
        (**self).enable_net_connect(pattern)
    }
}

/// In-memory allow-connect registry.
#[derive(Debug, Default)]
pub struct Allowlist {
    patterns: RwLock<Vec<AllowPattern>>,
}

impl Allowlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `host` (optionally `host:port`) may bypass mocked responses.
    pub fn is_allowed(&self, host: &str) -> bool {
        self.read().iter().any(|p| p.matches(host))
    }

    pub fn patterns(&self) -> Vec<AllowPattern> {
        self.read().clone()
    }

    // A panic elsewhere while holding the lock leaves the list itself intact.
    fn read(&self) -> RwLockReadGuard<'_, Vec<AllowPattern>> {
        self.patterns.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ConnectRegistry for Allowlist {
    fn enable_net_connect(&self, pattern: AllowPattern) {
        let mut patterns = self
            .patterns
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if !patterns.contains(&pattern) {
            patterns.push(pattern);
        }
    }
}

/// Wraps a [`ConnectRegistry`] so that registering the numeric loopback
/// address also lets the alias through, with or without a port.
#[derive(Debug)]
pub struct AllowlistPatcher<R> {
    registry: R,
    address: String,
    combined: AllowPattern,
    installed: AtomicBool,
}

impl<R: ConnectRegistry> AllowlistPatcher<R> {
    pub fn new(registry: R, address: &str, alias: &str) -> Result<Self, regex::Error> {
        let combined = AllowPattern::expression(&format!(
            r"^({}|{})(:\d+)?$",
            regex::escape(address),
            regex::escape(alias)
        ))?;
        Ok(Self {
            registry,
            address: address.to_string(),
            combined,
            installed: AtomicBool::new(false),
        })
    }

    pub fn from_config(registry: R, config: &ShimConfig) -> Result<Self, regex::Error> {
        Self::new(registry, &config.loopback_address, &config.loopback_alias)
    }

    /// Register the combined loopback pattern once. Later calls do nothing.
    pub fn install(&self) {
        if self.installed.swap(true, Ordering::AcqRel) {
            return;
        }
        tracing::debug!(pattern = %self.combined, "registering loopback allow-connect pattern");
        self.registry.enable_net_connect(self.combined.clone());
    }

    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::Acquire)
    }

    pub fn combined(&self) -> &AllowPattern {
        &self.combined
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }
}

impl<R: ConnectRegistry> ConnectRegistry for AllowlistPatcher<R> {
    fn enable_net_connect(&self, pattern: AllowPattern) {
        match pattern {
            AllowPattern::Literal(ref host) if *host == self.address => {
                tracing::debug!(%host, pattern = %self.combined, "widened loopback registration");
                self.registry.enable_net_connect(self.combined.clone());
            }
            other => self.registry.enable_net_connect(other),
        }
    }
}
