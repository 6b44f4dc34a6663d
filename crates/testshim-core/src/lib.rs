//! Deterministic interception layer for integration test runs.
//!
//! The crate provides three independent adapters, installed once per process:
//! - [`substitution`]: case-preserving replacement for one reserved pattern
//! - [`network`]: rewrites the loopback alias to its numeric address before requests go out
//! - [`allowlist`]: widens allow-connect registrations so both loopback forms pass through

pub mod allowlist;
pub mod config;
pub mod install;
pub mod network;
pub mod substitution;

pub use install::{install, installed, InstallError, Shim};
