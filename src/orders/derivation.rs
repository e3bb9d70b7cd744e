//! Reservation → order derivation
//!
//! Resolves the reserving dealer by company name, snapshots its credit line
//! (plafond) and builds the order record. When no dealer matches, the order is
//! attributed to the nil dealer id with a zero plafond unless strict
//! resolution is configured.

use crate::core::error::NOT_RESERVED;
use crate::core::{DataService, DataServiceExt, DealershipError, DealershipResult};
use crate::entities::{Dealer, Order, OrderStatus, Vehicle};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Dealer id used when `reserved_by` matches no dealer
pub const UNMATCHED_DEALER_ID: Uuid = Uuid::nil();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealerResolution {
    pub dealer_id: Uuid,
    pub plafond: i64,
    pub matched: bool,
}

impl DealerResolution {
    pub fn unmatched() -> Self {
        Self {
            dealer_id: UNMATCHED_DEALER_ID,
            plafond: 0,
            matched: false,
        }
    }
}

/// Match a dealer by exact company name
pub fn resolve_dealer(dealers: &[Dealer], reserved_by: &str) -> DealerResolution {
    dealers
        .iter()
        .find(|dealer| dealer.company_name == reserved_by)
        .map(|dealer| DealerResolution {
            dealer_id: dealer.id,
            plafond: dealer.credit_limit,
            matched: true,
        })
        .unwrap_or_else(DealerResolution::unmatched)
}

/// Build the order for a reserved vehicle
///
/// Workflow flags start false and costs start at 0.
pub fn derive_order(
    vehicle: &Vehicle,
    dealer: &DealerResolution,
    now: DateTime<Utc>,
) -> DealershipResult<Order> {
    let reservation = vehicle
        .reservation
        .as_ref()
        .ok_or_else(|| DealershipError::invalid_state(NOT_RESERVED))?;

    Ok(Order {
        id: Uuid::new_v4(),
        vehicle_id: vehicle.id,
        dealer_id: dealer.dealer_id,
        customer_name: reservation.reserved_by.clone(),
        status: OrderStatus::Processing,
        order_date: now,
        delivery_date: None,
        price: vehicle.effective_price(),
        plafond_dealer: dealer.plafond,
        model_name: vehicle.model.clone(),
        is_licensable: false,
        has_proforma: false,
        proforma_number: None,
        proforma_date: None,
        is_paid: false,
        payment_date: None,
        is_invoiced: false,
        invoice_number: None,
        invoice_date: None,
        has_conformity: false,
        odl_generated: false,
        chassis: Some(vehicle.telaio.clone()).filter(|c| !c.is_empty()),
        previous_chassis: None,
        transport_costs: 0,
        restoration_costs: 0,
        funding_type: None,
        notes: None,
    })
}

/// Creates and, on saga rollback, removes derived orders
#[derive(Clone)]
pub struct OrderDerivation {
    dealers: Arc<dyn DataService<Dealer>>,
    orders: Arc<dyn DataService<Order>>,
    strict: bool,
}

impl OrderDerivation {
    pub fn new(
        dealers: Arc<dyn DataService<Dealer>>,
        orders: Arc<dyn DataService<Order>>,
        strict: bool,
    ) -> Self {
        Self {
            dealers,
            orders,
            strict,
        }
    }

    pub async fn resolve(&self, reserved_by: &str) -> DealershipResult<DealerResolution> {
        let dealers = self.dealers.fetch_all().await?;
        let resolution = resolve_dealer(&dealers, reserved_by);
        if !resolution.matched {
            if self.strict {
                return Err(DealershipError::NotFound {
                    entity_type: format!("dealer named '{reserved_by}'"),
                    id: UNMATCHED_DEALER_ID,
                });
            }
            tracing::warn!(reserved_by, "no dealer matches reservation, using nil dealer id");
        }
        Ok(resolution)
    }

    /// Resolve the dealer and insert exactly one order for the vehicle
    pub async fn create_order(&self, vehicle: &Vehicle) -> DealershipResult<Order> {
        let reserved_by = vehicle
            .reservation
            .as_ref()
            .map(|r| r.reserved_by.as_str())
            .ok_or_else(|| DealershipError::invalid_state(NOT_RESERVED))?;

        let dealer = self.resolve(reserved_by).await?;
        let order = derive_order(vehicle, &dealer, Utc::now())?;

        self.orders
            .create(order)
            .await
            .map_err(DealershipError::Dependency)
    }

    /// Compensating action: remove an order whose vehicle transition did not commit
    pub async fn compensate(&self, order_id: &Uuid) {
        match self.orders.delete(order_id).await {
            Ok(_) => tracing::info!(order_id = %order_id, "rolled back order"),
            Err(e) => {
                tracing::error!(order_id = %order_id, error = %e, "failed to roll back order")
            }
        }
    }
}
