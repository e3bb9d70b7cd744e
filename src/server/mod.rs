//! HTTP exposure of the dealership core
//!
//! [`DealershipHost`] holds the wired domain services, [`ServerBuilder`]
//! turns it into an axum `Router` and serves it.

pub mod builder;
pub mod handlers;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use host::{DealershipHost, HostStores};

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber
///
/// Honors `RUST_LOG`, defaulting to `dealership=info,tower_http=info`. Calling
/// it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dealership=info,tower_http=info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
