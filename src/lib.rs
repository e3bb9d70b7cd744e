//! # Dealership
//!
//! Core of a vehicle dealership network: a configurable catalog, a composable
//! pricing engine, the vehicle lifecycle state machine with its virtual-stock
//! variant, and the derivation of orders from fulfilled reservations.
//!
//! ## Features
//!
//! - **Catalog**: six item kinds with model/trim compatibility filtering
//! - **Pricing**: pure, additive quotes with an itemized breakdown
//! - **Lifecycle**: Available → Reserved → Ordered with atomic guards
//! - **Virtual stock**: deferred configuration and sampled arrival estimates
//! - **Orders**: dealer resolution, plafond snapshot, ODL-gated delivery
//! - **REST**: an axum router over the same services
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dealership::prelude::*;
//!
//! let host = DealershipHost::in_memory(DealershipConfig::default())?;
//! host.catalog
//!     .seed([CatalogItem::new(CatalogKind::Model, "Spider", 30_000)])
//!     .await?;
//!
//! let vehicle = host.vehicles.create(new_virtual_vehicle).await?;
//! let reserved = host.vehicles.reserve(&vehicle.id, request).await?;
//! let placement = host.vehicles.transform_to_order(&reserved.id).await?;
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod entities;
pub mod lifecycle;
pub mod orders;
pub mod pricing;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        DataService, DataServiceExt, DealershipError, DealershipResult, DomainEvent, Entity,
        EventBus, OrderEvent, VehicleEvent,
    };

    // === Entities ===
    pub use crate::entities::{
        CatalogItem, CatalogKind, Dealer, Location, MAX_ITEM_PRICE, NewVehicle, Order, OrderStatus,
        OrderUpdate, OriginalStock, ReserveRequest, Vehicle, VehicleConfiguration, VehicleStatus,
        VehicleUpdate, VirtualSelection,
    };

    // === Services ===
    pub use crate::catalog::CatalogRepository;
    pub use crate::config::DealershipConfig;
    pub use crate::lifecycle::{
        ArrivalEstimator, FixedRandom, OrderPlacement, RandomSource, SeededRandom,
        VehicleLifecycleManager,
    };
    pub use crate::orders::OrderService;
    pub use crate::pricing::{PriceQuote, PriceSelection, PricingEngine};

    // === Server ===
    pub use crate::server::{DealershipHost, HostStores, ServerBuilder, init_tracing};

    // === Storage ===
    pub use crate::storage::InMemoryDataService;

    // === External ===
    pub use async_trait::async_trait;
    pub use uuid::Uuid;
}
