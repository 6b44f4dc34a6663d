//! Loopback alias normalization for outgoing requests.
//!
//! - [`HostNormalizer`]: rewrites the alias hostname in every accepted target shape
//! - [`surface`]: transport, client and factory traits with normalizing adapters

mod host;
pub mod surface;
mod target;

pub use host::HostNormalizer;
pub use surface::{
    ClientDefaults, ClientFactory, HttpClient, NormalizingClient, NormalizingFactory,
    NormalizingTransport, Scheme, Transport,
};
pub use target::{is_absolute, join_address, split_port, Port, RequestOptions, RequestTarget};
