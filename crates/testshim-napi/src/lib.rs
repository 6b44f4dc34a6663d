//! NAPI-RS bindings for the testshim interception layer.
//!
//! Lets a JavaScript test setup file delegate its reserved replace calls,
//! loopback normalization and allow-connect registration to the Rust core.

use napi_derive::napi;

mod allowlist;
mod config;
mod network;
mod text;

pub use allowlist::*;
pub use config::*;
pub use network::*;
pub use text::*;

/// Library version
#[napi]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
