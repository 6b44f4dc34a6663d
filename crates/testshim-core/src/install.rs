//! Process-wide installation of the shim.
//!
//! The first successful [`install`] wins and stays for the rest of the
//! process; there is no uninstall. Later calls return the installed shim.

use crate::allowlist::{Allowlist, AllowlistPatcher};
use crate::config::ShimConfig;
use crate::network::{
    ClientFactory, HttpClient, HostNormalizer, NormalizingClient, NormalizingFactory,
    NormalizingTransport, Transport,
};
use crate::substitution::{
    RegexTransform, ReservedSubstitution, SubstitutionInterceptor, TextTransform,
};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

static SHIM: OnceLock<Shim> = OnceLock::new();

/// Installation error
#[derive(Debug, Error)]
pub enum InstallError {
    /// The loopback allow-connect pattern could not be built
    #[error("invalid loopback allow-connect pattern: {0}")]
    AllowPattern(#[from] regex::Error),
}

/// One instance of every shim component, built from a [`ShimConfig`].
#[derive(Debug)]
pub struct Shim {
    config: ShimConfig,
    substitution: SubstitutionInterceptor<RegexTransform>,
    normalizer: Arc<HostNormalizer>,
    allowlist: AllowlistPatcher<Allowlist>,
}

impl Shim {
    /// Build the components and register the loopback allow-connect pattern.
    pub fn new(config: ShimConfig) -> Result<Self, InstallError> {
        let allowlist = AllowlistPatcher::from_config(Allowlist::new(), &config)?;
        allowlist.install();

        Ok(Self {
            substitution: SubstitutionInterceptor::new(
                RegexTransform,
                ReservedSubstitution::from_config(&config),
            ),
            normalizer: Arc::new(HostNormalizer::from_config(&config)),
            allowlist,
            config,
        })
    }

    pub fn config(&self) -> &ShimConfig {
        &self.config
    }

    /// The intercepted replace operation.
    pub fn substitution(&self) -> &SubstitutionInterceptor<RegexTransform> {
        &self.substitution
    }

    /// Wrap another replace operation with the same policy.
    pub fn intercept<T: TextTransform>(&self, inner: T) -> SubstitutionInterceptor<T> {
        SubstitutionInterceptor::new(inner, self.substitution.policy().clone())
    }

    pub fn normalizer(&self) -> &HostNormalizer {
        &self.normalizer
    }

    pub fn allowlist(&self) -> &AllowlistPatcher<Allowlist> {
        &self.allowlist
    }

    pub fn transport<T: Transport>(&self, inner: T) -> NormalizingTransport<T> {
        NormalizingTransport::new(inner, Arc::clone(&self.normalizer))
    }

    pub fn client<C: HttpClient>(&self, inner: C) -> NormalizingClient<C> {
        NormalizingClient::new(inner, Arc::clone(&self.normalizer))
    }

    pub fn factory<F: ClientFactory>(&self, inner: F) -> NormalizingFactory<F> {
        NormalizingFactory::new(inner, Arc::clone(&self.normalizer))
    }
}

/// Install the shim for the rest of the process.
///
/// Idempotent: once a shim is installed, `config` is ignored and the
/// existing shim is returned.
pub fn install(config: ShimConfig) -> Result<&'static Shim, InstallError> {
    if let Some(shim) = SHIM.get() {
        if shim.config != config {
            tracing::debug!("shim already installed, ignoring new config");
        }
        return Ok(shim);
    }

    let shim = Shim::new(config)?;
    let installed = SHIM.get_or_init(|| shim);
    tracing::debug!(config = ?installed.config, "installed test shim");
    Ok(installed)
}

/// The installed shim, if any.
pub fn installed() -> Option<&'static Shim> {
    SHIM.get()
}
