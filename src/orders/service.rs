//! Order workflow: field-level updates and ODL generation

use crate::core::{
    DataService, DataServiceExt, DealershipError, DealershipResult, DomainEvent, EventBus,
    OrderEvent,
};
use crate::entities::{Order, OrderPatch, OrderStatus, OrderUpdate};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn DataService<Order>>,
    events: EventBus,
}

impl OrderService {
    pub fn new(orders: Arc<dyn DataService<Order>>, events: EventBus) -> Self {
        Self { orders, events }
    }

    pub async fn list(&self) -> DealershipResult<Vec<Order>> {
        let mut orders = self.orders.fetch_all().await?;
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(orders)
    }

    pub async fn get(&self, id: &Uuid) -> DealershipResult<Order> {
        self.orders.fetch(id).await
    }

    /// Orders placed for a given vehicle
    pub async fn for_vehicle(&self, vehicle_id: &Uuid) -> DealershipResult<Vec<Order>> {
        Ok(self
            .orders
            .fetch_all()
            .await?
            .into_iter()
            .filter(|order| &order.vehicle_id == vehicle_id)
            .collect())
    }

    /// Apply a field-level update
    ///
    /// Moving to `delivered` requires the ODL to have been generated.
    pub async fn update(&self, id: &Uuid, update: OrderUpdate) -> DealershipResult<Order> {
        update.validate()?;
        let current = self.orders.fetch(id).await?;

        if update.status == Some(OrderStatus::Delivered) && !current.odl_generated {
            tracing::warn!(order_id = %id, "delivery rejected, ODL not generated");
            return Err(DealershipError::invalid_state(
                "order cannot be delivered before the ODL is generated",
            ));
        }

        let updated = self
            .orders
            .update(id, update.into())
            .await
            .map_err(DealershipError::Dependency)?
            .ok_or_else(|| DealershipError::not_found::<Order>(*id))?;

        self.events
            .publish(DomainEvent::Order(OrderEvent::Updated { order_id: *id }));
        Ok(updated)
    }

    /// Mark the ODL as generated; repeated calls leave the order unchanged
    pub async fn generate_odl(&self, id: &Uuid) -> DealershipResult<Order> {
        let current = self.orders.fetch(id).await?;
        if current.odl_generated {
            return Ok(current);
        }
        if current.status == OrderStatus::Cancelled {
            return Err(DealershipError::invalid_state(
                "cannot generate the ODL of a cancelled order",
            ));
        }

        let patch = OrderPatch {
            generate_odl: true,
            ..Default::default()
        };
        let updated = self
            .orders
            .update_if_status(id, current.status.as_str(), patch)
            .await
            .map_err(DealershipError::Dependency)?
            .ok_or_else(|| DealershipError::invalid_state("order changed while generating the ODL"))?;

        tracing::info!(order_id = %id, "ODL generated");
        self.events
            .publish(DomainEvent::Order(OrderEvent::OdlGenerated { order_id: *id }));
        Ok(updated)
    }
}
