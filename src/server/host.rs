//! Transport-agnostic application state
//!
//! `DealershipHost` wires the storage ports to the domain services once, and
//! every exposure (REST today) reads from it.

use crate::catalog::{CatalogRepository, CatalogStores};
use crate::config::DealershipConfig;
use crate::core::{DataService, DealershipResult, EventBus};
use crate::entities::{Dealer, Order, Vehicle};
use crate::lifecycle::{ArrivalEstimator, RandomSource, ThreadRandom, VehicleLifecycleManager};
use crate::orders::{OrderDerivation, OrderService};
use crate::pricing::PricingEngine;
use crate::storage::InMemoryDataService;
use std::sync::Arc;

/// Storage ports the host is built from
pub struct HostStores {
    pub catalog: CatalogStores,
    pub vehicles: Arc<dyn DataService<Vehicle>>,
    pub orders: Arc<dyn DataService<Order>>,
    pub dealers: Arc<dyn DataService<Dealer>>,
}

impl HostStores {
    pub fn in_memory() -> Self {
        Self {
            catalog: CatalogStores::in_memory(),
            vehicles: Arc::new(InMemoryDataService::new()),
            orders: Arc::new(InMemoryDataService::new()),
            dealers: Arc::new(InMemoryDataService::new()),
        }
    }
}

#[derive(Clone)]
pub struct DealershipHost {
    pub config: Arc<DealershipConfig>,
    pub catalog: Arc<CatalogRepository>,
    pub pricing: PricingEngine,
    pub vehicles: VehicleLifecycleManager,
    pub orders: OrderService,
    /// Read-only dealer directory used for order derivation
    pub dealers: Arc<dyn DataService<Dealer>>,
    pub events: EventBus,
}

impl DealershipHost {
    /// Build the host over in-memory storage with thread-local randomness
    pub fn in_memory(config: DealershipConfig) -> DealershipResult<Self> {
        Self::from_parts(config, HostStores::in_memory(), Arc::new(ThreadRandom))
    }

    /// Build the host from explicit storage ports and a random source
    pub fn from_parts(
        config: DealershipConfig,
        stores: HostStores,
        random: Arc<dyn RandomSource>,
    ) -> DealershipResult<Self> {
        config.validate()?;

        let events = EventBus::new(config.events.capacity);
        let catalog = Arc::new(CatalogRepository::new(stores.catalog));
        let pricing = PricingEngine::new(catalog.clone());
        let estimator = ArrivalEstimator::new(config.arrival.clone(), random);
        let derivation = OrderDerivation::new(
            stores.dealers.clone(),
            stores.orders.clone(),
            config.orders.strict_dealer_resolution,
        );

        let vehicles = VehicleLifecycleManager::new(
            stores.vehicles,
            pricing.clone(),
            estimator,
            derivation,
            events.clone(),
        );
        let orders = OrderService::new(stores.orders, events.clone());

        tracing::debug!(
            strict_dealer_resolution = config.orders.strict_dealer_resolution,
            event_capacity = config.events.capacity,
            "dealership host wired"
        );

        Ok(Self {
            config: Arc::new(config),
            catalog,
            pricing,
            vehicles,
            orders,
            dealers: stores.dealers,
            events,
        })
    }
}
