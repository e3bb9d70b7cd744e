//! Vehicle lifecycle state machine
//!
//! ```text
//!   Create ──▶ Available ──Reserve──▶ Reserved ──TransformToOrder──▶ Ordered
//!                  ▲                     │
//!                  └──CancelReservation──┘
//! ```
//!
//! Every guarded transition is written with
//! [`DataService::update_if_status`], so the guard is re-checked atomically
//! at write time: two concurrent reservations of the same vehicle cannot both
//! succeed. TransformToOrder inserts the order first and rolls it back if the
//! vehicle transition does not commit.

use crate::core::error::{NOT_AVAILABLE, NOT_RESERVED};
use crate::core::{
    DataService, DataServiceExt, DealershipError, DealershipResult, DomainEvent, Entity,
    EventBus, OrderEvent, VehicleEvent,
};
use crate::entities::{
    Location, NewVehicle, Order, OriginalStock, Reservation, ReserveRequest, Vehicle,
    VehiclePatch, VehicleStatus, VehicleUpdate, VirtualConfig,
};
use crate::lifecycle::ArrivalEstimator;
use crate::orders::OrderDerivation;
use crate::pricing::{NamedSelection, PricingEngine};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Outcome of a committed TransformToOrder
#[derive(Debug, Clone, Serialize)]
pub struct OrderPlacement {
    pub vehicle: Vehicle,
    pub order: Order,
}

#[derive(Clone)]
pub struct VehicleLifecycleManager {
    vehicles: Arc<dyn DataService<Vehicle>>,
    pricing: PricingEngine,
    estimator: ArrivalEstimator,
    derivation: OrderDerivation,
    events: EventBus,
}

impl VehicleLifecycleManager {
    pub fn new(
        vehicles: Arc<dyn DataService<Vehicle>>,
        pricing: PricingEngine,
        estimator: ArrivalEstimator,
        derivation: OrderDerivation,
        events: EventBus,
    ) -> Self {
        Self {
            vehicles,
            pricing,
            estimator,
            derivation,
            events,
        }
    }

    pub async fn list(&self) -> DealershipResult<Vec<Vehicle>> {
        let mut vehicles = self.vehicles.fetch_all().await?;
        vehicles.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        Ok(vehicles)
    }

    pub async fn get(&self, id: &Uuid) -> DealershipResult<Vehicle> {
        self.vehicles.fetch(id).await
    }

    /// Create a vehicle in Available status
    pub async fn create(&self, input: NewVehicle) -> DealershipResult<Vehicle> {
        let vehicle = if input.location == Location::VirtualStock {
            let model = input.configuration.model.trim();
            if model.is_empty() {
                return Err(DealershipError::invalid_argument("model is required"));
            }
            let origin: OriginalStock = input
                .original_stock
                .as_deref()
                .ok_or_else(|| {
                    DealershipError::invalid_argument("original stock is required for virtual stock")
                })?
                .parse()?;

            let mut vehicle = Vehicle::new_virtual(model, origin);
            vehicle.estimated_arrival_days = self.estimator.ensure(&vehicle);
            vehicle
        } else {
            if input.original_stock.is_some() {
                return Err(DealershipError::invalid_argument(
                    "original stock only applies to virtual stock",
                ));
            }
            input.configuration.validate()?;
            let quote = self.pricing.quote_names((&input.configuration).into()).await?;
            Vehicle::new_configured(input.configuration, input.location, quote.total)
        };

        let created = self
            .vehicles
            .create(vehicle)
            .await
            .map_err(DealershipError::Dependency)?;

        tracing::info!(
            vehicle_id = %created.id,
            model = %created.model,
            price = created.price,
            "vehicle created"
        );
        self.events.publish(DomainEvent::Vehicle(VehicleEvent::Created {
            vehicle_id: created.id,
            model: created.model.clone(),
            virtual_stock: created.is_virtual(),
        }));
        Ok(created)
    }

    /// Update descriptive fields; status only moves through the transitions below
    pub async fn update(&self, id: &Uuid, update: VehicleUpdate) -> DealershipResult<Vehicle> {
        let current = self.vehicles.fetch(id).await?;

        let moves_virtual = update
            .location
            .as_ref()
            .is_some_and(|location| (*location == Location::VirtualStock) != current.is_virtual());
        if moves_virtual {
            return Err(DealershipError::invalid_argument(
                "a vehicle cannot move in or out of virtual stock",
            ));
        }
        if current.is_virtual() && update.touches_configuration() {
            return Err(DealershipError::invalid_argument(
                "virtual stock is configured at reservation time",
            ));
        }

        let mut patch = update.into_patch();
        if !current.is_virtual() {
            let mut next = current.clone();
            next.apply(patch.clone());
            let configuration = next.configuration();
            configuration.validate()?;
            let quote = self.pricing.quote_names((&configuration).into()).await?;
            patch.price = Some(quote.total);
        }

        let updated = self
            .vehicles
            .update(id, patch)
            .await
            .map_err(DealershipError::Dependency)?
            .ok_or_else(|| DealershipError::not_found::<Vehicle>(*id))?;

        tracing::info!(vehicle_id = %id, price = updated.price, "vehicle updated");
        self.events
            .publish(DomainEvent::Vehicle(VehicleEvent::Updated { vehicle_id: *id }));
        Ok(updated)
    }

    /// Hard delete; orders referencing the vehicle are left untouched
    pub async fn delete(&self, id: &Uuid) -> DealershipResult<()> {
        let existed = self
            .vehicles
            .delete(id)
            .await
            .map_err(DealershipError::Dependency)?;
        if !existed {
            return Err(DealershipError::not_found::<Vehicle>(*id));
        }

        tracing::info!(vehicle_id = %id, "vehicle deleted");
        self.events
            .publish(DomainEvent::Vehicle(VehicleEvent::Deleted { vehicle_id: *id }));
        Ok(())
    }

    /// Available → Reserved
    pub async fn reserve(&self, id: &Uuid, request: ReserveRequest) -> DealershipResult<Vehicle> {
        request.validate()?;
        let vehicle = self.vehicles.fetch(id).await?;
        if vehicle.status != VehicleStatus::Available {
            tracing::warn!(vehicle_id = %id, status = %vehicle.status, "reserve rejected");
            return Err(DealershipError::invalid_state(NOT_AVAILABLE));
        }

        let virtual_config = match (&request.virtual_config, vehicle.is_virtual()) {
            (Some(selection), true) => {
                let quote = self
                    .pricing
                    .quote_names(NamedSelection {
                        model: &vehicle.model,
                        trim: &selection.trim,
                        fuel_type: &selection.fuel_type,
                        exterior_color: &selection.exterior_color,
                        transmission: &selection.transmission,
                        accessories: &selection.accessories,
                    })
                    .await?;
                Some(VirtualConfig {
                    trim: selection.trim.clone(),
                    fuel_type: selection.fuel_type.clone(),
                    exterior_color: selection.exterior_color.clone(),
                    transmission: selection.transmission.clone(),
                    accessories: selection.accessories.clone(),
                    price: quote.total,
                })
            }
            (Some(_), false) => {
                return Err(DealershipError::invalid_argument(
                    "a virtual configuration only applies to virtual stock",
                ));
            }
            (None, _) => None,
        };

        let reservation = Reservation {
            reserved_by: request.reserved_by.clone(),
            reserved_accessories: request.reserved_accessories,
            destination: request.destination,
            reserved_at: Utc::now().max(vehicle.date_added),
            virtual_config,
        };
        let patch = VehiclePatch {
            status: Some(VehicleStatus::Reserved),
            reservation: Some(Some(reservation)),
            estimated_arrival_days: self.estimator.ensure(&vehicle),
            ..Default::default()
        };

        let reserved = self
            .vehicles
            .update_if_status(id, VehicleStatus::Available.as_str(), patch)
            .await
            .map_err(DealershipError::Dependency)?
            .ok_or_else(|| {
                tracing::warn!(vehicle_id = %id, "reserve lost a concurrent update");
                DealershipError::invalid_state(NOT_AVAILABLE)
            })?;

        tracing::info!(
            vehicle_id = %id,
            dealer_id = %request.dealer_id,
            reserved_by = %request.reserved_by,
            "vehicle reserved"
        );
        self.events.publish(DomainEvent::Vehicle(VehicleEvent::Reserved {
            vehicle_id: *id,
            dealer_id: request.dealer_id,
            reserved_by: request.reserved_by,
        }));
        Ok(reserved)
    }

    /// Reserved → Available, clearing every reservation field
    pub async fn cancel_reservation(&self, id: &Uuid) -> DealershipResult<Vehicle> {
        let vehicle = self.vehicles.fetch(id).await?;
        if vehicle.status != VehicleStatus::Reserved {
            tracing::warn!(vehicle_id = %id, status = %vehicle.status, "cancel rejected");
            return Err(DealershipError::invalid_state(NOT_RESERVED));
        }

        let patch = VehiclePatch {
            status: Some(VehicleStatus::Available),
            reservation: Some(None),
            ..Default::default()
        };
        let released = self
            .vehicles
            .update_if_status(id, VehicleStatus::Reserved.as_str(), patch)
            .await
            .map_err(DealershipError::Dependency)?
            .ok_or_else(|| DealershipError::invalid_state(NOT_RESERVED))?;

        tracing::info!(vehicle_id = %id, "reservation cancelled");
        self.events
            .publish(DomainEvent::Vehicle(VehicleEvent::ReservationCancelled { vehicle_id: *id }));
        Ok(released)
    }

    /// Reserved → Ordered, creating exactly one order
    ///
    /// If the order insert fails the vehicle is untouched. If the status write
    /// fails or loses a race, the inserted order is deleted before the error
    /// is returned, so a failure never leaves a committed order behind.
    pub async fn transform_to_order(&self, id: &Uuid) -> DealershipResult<OrderPlacement> {
        let vehicle = self.vehicles.fetch(id).await?;
        if vehicle.status != VehicleStatus::Reserved {
            tracing::warn!(vehicle_id = %id, status = %vehicle.status, "transform rejected");
            return Err(DealershipError::invalid_state(NOT_RESERVED));
        }

        let order = self.derivation.create_order(&vehicle).await?;

        let patch = VehiclePatch {
            status: Some(VehicleStatus::Ordered),
            ..Default::default()
        };
        let ordered = match self
            .vehicles
            .update_if_status(id, VehicleStatus::Reserved.as_str(), patch)
            .await
        {
            Ok(Some(vehicle)) => vehicle,
            Ok(None) => {
                self.derivation.compensate(&order.id).await;
                return Err(DealershipError::invalid_state(NOT_RESERVED));
            }
            Err(e) => {
                self.derivation.compensate(&order.id).await;
                return Err(DealershipError::Dependency(e));
            }
        };

        tracing::info!(vehicle_id = %id, order_id = %order.id, dealer_id = %order.dealer_id, "vehicle ordered");
        self.events.publish(DomainEvent::Order(OrderEvent::Created {
            order_id: order.id,
            vehicle_id: *id,
            dealer_id: order.dealer_id,
        }));
        self.events.publish(DomainEvent::Vehicle(VehicleEvent::Ordered {
            vehicle_id: *id,
            order_id: order.id,
        }));
        Ok(OrderPlacement {
            vehicle: ordered,
            order,
        })
    }

    /// Copy a virtual-stock unit into a fresh Available one
    pub async fn duplicate(&self, id: &Uuid) -> DealershipResult<Vehicle> {
        let source = self.vehicles.fetch(id).await?;
        if !source.is_virtual() {
            return Err(DealershipError::invalid_argument(
                "only virtual stock can be duplicated",
            ));
        }

        let copy = Vehicle {
            id: Uuid::new_v4(),
            status: VehicleStatus::Available,
            date_added: Utc::now(),
            reservation: None,
            ..source
        };
        let created = self
            .vehicles
            .create(copy)
            .await
            .map_err(DealershipError::Dependency)?;

        tracing::info!(source_id = %id, vehicle_id = %created.id, "vehicle duplicated");
        self.events.publish(DomainEvent::Vehicle(VehicleEvent::Duplicated {
            source_id: *id,
            vehicle_id: created.id,
        }));
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogRepository;
    use crate::config::ArrivalConfig;
    use crate::entities::{CatalogItem, CatalogKind, Dealer, VirtualSelection};
    use crate::lifecycle::FixedRandom;
    use crate::storage::InMemoryDataService;
    use std::collections::BTreeSet;

    struct Harness {
        manager: VehicleLifecycleManager,
        orders: Arc<InMemoryDataService<Order>>,
    }

    async fn harness() -> Harness {
        let catalog = Arc::new(CatalogRepository::in_memory());
        catalog
            .seed([
                CatalogItem::new(CatalogKind::Model, "Spider", 30_000),
                CatalogItem::new(CatalogKind::Trim, "Sport", 3_000),
                CatalogItem::new(CatalogKind::FuelType, "Benzina", 0),
                CatalogItem::new(CatalogKind::Color, "Nero", 800),
                CatalogItem::new(CatalogKind::Transmission, "Manuale", 0),
            ])
            .await
            .unwrap();

        let dealers = Arc::new(InMemoryDataService::with_entities(vec![Dealer::new(
            "Autosalone Rossi",
            50_000,
        )]));
        let orders = Arc::new(InMemoryDataService::<Order>::new());
        let manager = VehicleLifecycleManager::new(
            Arc::new(InMemoryDataService::<Vehicle>::new()),
            PricingEngine::new(catalog),
            ArrivalEstimator::new(ArrivalConfig::default(), Arc::new(FixedRandom(45))),
            OrderDerivation::new(dealers, orders.clone(), false),
            EventBus::default(),
        );
        Harness { manager, orders }
    }

    fn virtual_input() -> NewVehicle {
        NewVehicle {
            configuration: crate::entities::VehicleConfiguration {
                model: "Spider".to_string(),
                ..Default::default()
            },
            location: Location::VirtualStock,
            original_stock: Some("Germania".to_string()),
        }
    }

    fn reserve_request(selection: Option<VirtualSelection>) -> ReserveRequest {
        ReserveRequest {
            dealer_id: Uuid::new_v4(),
            reserved_by: "Autosalone Rossi".to_string(),
            reserved_accessories: BTreeSet::new(),
            virtual_config: selection,
            destination: None,
        }
    }

    fn sport_selection() -> VirtualSelection {
        VirtualSelection {
            trim: "Sport".to_string(),
            fuel_type: "Benzina".to_string(),
            exterior_color: "Nero".to_string(),
            transmission: "Manuale".to_string(),
            accessories: BTreeSet::new(),
        }
    }

    #[tokio::test]
    async fn test_virtual_create_estimates_arrival() {
        let Harness { manager, .. } = harness().await;
        let vehicle = manager.create(virtual_input()).await.unwrap();

        assert_eq!(vehicle.original_stock, Some(OriginalStock::Germany));
        assert_eq!(vehicle.estimated_arrival_days, Some(45));
        assert_eq!(vehicle.price, 0);
    }

    #[tokio::test]
    async fn test_virtual_reserve_prices_selection() {
        let Harness { manager, .. } = harness().await;
        let vehicle = manager.create(virtual_input()).await.unwrap();

        let reserved = manager
            .reserve(&vehicle.id, reserve_request(Some(sport_selection())))
            .await
            .unwrap();

        assert_eq!(reserved.status, VehicleStatus::Reserved);
        let config = reserved.reservation.unwrap().virtual_config.unwrap();
        assert_eq!(config.price, 33_800);
    }

    #[tokio::test]
    async fn test_transform_creates_order_with_dealer_plafond() {
        let Harness { manager, orders } = harness().await;
        let vehicle = manager.create(virtual_input()).await.unwrap();
        manager
            .reserve(&vehicle.id, reserve_request(Some(sport_selection())))
            .await
            .unwrap();

        let placement = manager.transform_to_order(&vehicle.id).await.unwrap();

        assert_eq!(placement.vehicle.status, VehicleStatus::Ordered);
        assert_eq!(placement.order.price, 33_800);
        assert_eq!(placement.order.plafond_dealer, 50_000);
        assert_eq!(orders.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_rejects_physical_stock() {
        let Harness { manager, .. } = harness().await;
        let physical = manager
            .create(NewVehicle {
                configuration: crate::entities::VehicleConfiguration {
                    model: "Spider".to_string(),
                    trim: "Sport".to_string(),
                    fuel_type: "Benzina".to_string(),
                    exterior_color: "Nero".to_string(),
                    transmission: "Manuale".to_string(),
                    telaio: "ZFA123".to_string(),
                    accessories: BTreeSet::new(),
                },
                location: Location::PhysicalStock,
                original_stock: None,
            })
            .await
            .unwrap();

        assert_eq!(physical.price, 33_800);
        assert!(matches!(
            manager.duplicate(&physical.id).await,
            Err(DealershipError::InvalidArgument { .. })
        ));
    }
}
