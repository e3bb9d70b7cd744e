//! Order entity derived from a fulfilled reservation

use crate::core::Entity;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Processing,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// An order placed for a reserved vehicle
///
/// The workflow flags are independent of each other; `odl_generated` only ever
/// moves from false to true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub dealer_id: Uuid,
    pub customer_name: String,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub delivery_date: Option<NaiveDate>,
    pub price: i64,
    /// Dealer credit limit at the time the order was created
    pub plafond_dealer: i64,
    pub model_name: String,

    pub is_licensable: bool,
    pub has_proforma: bool,
    pub proforma_number: Option<String>,
    pub proforma_date: Option<NaiveDate>,
    pub is_paid: bool,
    pub payment_date: Option<NaiveDate>,
    pub is_invoiced: bool,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub has_conformity: bool,
    pub odl_generated: bool,

    pub chassis: Option<String>,
    pub previous_chassis: Option<String>,
    pub transport_costs: i64,
    pub restoration_costs: i64,
    pub funding_type: Option<String>,
    pub notes: Option<String>,
}

/// Storage-level partial update of an order
///
/// Optional fields use `Some(None)` to clear the stored value.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub delivery_date: Option<Option<NaiveDate>>,
    pub price: Option<i64>,
    pub is_licensable: Option<bool>,
    pub has_proforma: Option<bool>,
    pub proforma_number: Option<Option<String>>,
    pub proforma_date: Option<Option<NaiveDate>>,
    pub is_paid: Option<bool>,
    pub payment_date: Option<Option<NaiveDate>>,
    pub is_invoiced: Option<bool>,
    pub invoice_number: Option<Option<String>>,
    pub invoice_date: Option<Option<NaiveDate>>,
    pub has_conformity: Option<bool>,
    /// Sets `odl_generated`; there is no way to reset it
    pub generate_odl: bool,
    pub chassis: Option<Option<String>>,
    pub previous_chassis: Option<Option<String>>,
    pub transport_costs: Option<i64>,
    pub restoration_costs: Option<i64>,
    pub funding_type: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl Entity for Order {
    type Patch = OrderPatch;

    fn resource_name() -> &'static str {
        "orders"
    }

    fn resource_name_singular() -> &'static str {
        "order"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn status(&self) -> &str {
        self.status.as_str()
    }

    fn apply(&mut self, patch: OrderPatch) {
        macro_rules! set {
            ($target:ident, $patch:ident; $($field:ident),*) => {
                $(if let Some(value) = $patch.$field { $target.$field = value; })*
            };
        }

        let target = &mut *self;
        set!(
            target, patch;
            status,
            price,
            is_licensable,
            has_proforma,
            is_paid,
            is_invoiced,
            has_conformity,
            transport_costs,
            restoration_costs,
            delivery_date,
            proforma_number,
            proforma_date,
            payment_date,
            invoice_number,
            invoice_date,
            chassis,
            previous_chassis,
            funding_type,
            notes
        );
        if patch.generate_odl {
            target.odl_generated = true;
        }
    }
}

/// Caller-facing field-level order update
///
/// Optional fields distinguish an absent key (left unchanged) from an explicit
/// `null` (cleared).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<Option<NaiveDate>>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub price: Option<i64>,
    pub is_licensable: Option<bool>,
    pub has_proforma: Option<bool>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub proforma_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub proforma_date: Option<Option<NaiveDate>>,
    pub is_paid: Option<bool>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<Option<NaiveDate>>,
    pub is_invoiced: Option<bool>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<Option<NaiveDate>>,
    pub has_conformity: Option<bool>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub chassis: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub previous_chassis: Option<Option<String>>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub transport_costs: Option<i64>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub restoration_costs: Option<i64>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub funding_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

/// Deserialize a present key into `Some`, so that `null` becomes `Some(None)`
fn clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<OrderUpdate> for OrderPatch {
    fn from(update: OrderUpdate) -> Self {
        OrderPatch {
            status: update.status,
            delivery_date: update.delivery_date,
            price: update.price,
            is_licensable: update.is_licensable,
            has_proforma: update.has_proforma,
            proforma_number: update.proforma_number,
            proforma_date: update.proforma_date,
            is_paid: update.is_paid,
            payment_date: update.payment_date,
            is_invoiced: update.is_invoiced,
            invoice_number: update.invoice_number,
            invoice_date: update.invoice_date,
            has_conformity: update.has_conformity,
            generate_odl: false,
            chassis: update.chassis,
            previous_chassis: update.previous_chassis,
            transport_costs: update.transport_costs,
            restoration_costs: update.restoration_costs,
            funding_type: update.funding_type,
            notes: update.notes,
        }
    }
}
