//! breedrelay Backends
//!
//! Classification backends and the request pipeline for the breedrelay
//! image-classification relay.
//!
//! Two backend implementations share one interface, selected by
//! configuration:
//! - [`HostedBackend`] relays image bytes to a hosted inference API over
//!   HTTP (no internal retries; cold starts and timeouts surface as
//!   transient errors with a retry hint for the caller)
//! - [`LocalBackend`] runs an injected in-process inference capability on
//!   the blocking thread pool
//!
//! [`RelayPipeline`] wires the core's decode → classify → rank flow around
//! whichever backend is configured.

pub mod backend;
pub mod config;
pub mod hosted;
pub mod local;
pub mod pipeline;

pub use backend::ClassificationBackend;
pub use config::{BackendKind, HostedConfig, RelayConfig};
pub use hosted::HostedBackend;
pub use local::{InferenceFn, LocalBackend};
pub use pipeline::RelayPipeline;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::backend::ClassificationBackend;
    pub use crate::config::{BackendKind, HostedConfig, RelayConfig};
    pub use crate::hosted::HostedBackend;
    pub use crate::local::LocalBackend;
    pub use crate::pipeline::RelayPipeline;
    pub use breedrelay_core::prelude::*;
}
