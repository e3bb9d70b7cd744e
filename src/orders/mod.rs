//! Orders derived from fulfilled reservations

pub mod derivation;
pub mod service;

pub use derivation::{
    DealerResolution, OrderDerivation, UNMATCHED_DEALER_ID, derive_order, resolve_dealer,
};
pub use service::OrderService;
