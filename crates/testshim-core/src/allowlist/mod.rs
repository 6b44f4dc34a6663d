//! Allow-connect registration for the network-mocking library.
//!
//! - [`AllowPattern`]: literal or regex host matcher
//! - [`AllowlistPatcher`]: widens numeric loopback registrations to the alias too
//! - [`Allowlist`]: in-memory registry

mod patcher;
mod pattern;

pub use patcher::{Allowlist, AllowlistPatcher, ConnectRegistry};
pub use pattern::AllowPattern;
