//! Shim settings: the reserved substitution pair and the loopback rewrite rule.

use serde::{Deserialize, Serialize};

/// Settings for every component of the shim.
///
/// Missing fields in a config file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShimConfig {
    /// Reserved regex source intercepted by the substitution policy
    pub pattern: String,
    /// Reserved replacement paired with `pattern`
    pub substitute: String,
    /// Phrase that opts a subject out of substitution
    pub sentinel: String,
    /// Human-readable loopback hostname
    pub loopback_alias: String,
    /// Numeric loopback address the alias is rewritten to
    pub loopback_address: String,
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            pattern: "Yale".into(),
            substitute: "Fale".into(),
            sentinel: "no Yale references".into(),
            loopback_alias: "localhost".into(),
            loopback_address: "127.0.0.1".into(),
        }
    }
}
