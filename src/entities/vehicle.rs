//! Vehicle entity, its lifecycle status and the typed inputs that create and update it

use crate::core::{DealershipError, Entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle status of a vehicle
///
/// Delivered and Sold are reached through the external order workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    Reserved,
    Ordered,
    Delivered,
    Sold,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Reserved => "reserved",
            VehicleStatus::Ordered => "ordered",
            VehicleStatus::Delivered => "delivered",
            VehicleStatus::Sold => "sold",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a vehicle unit currently sits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    PhysicalStock,
    /// Not yet built; configuration and price are deferred until reservation
    VirtualStock,
    /// Held at a dealer, by dealer name
    DealerStock(String),
}

/// Factory of origin for virtual stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginalStock {
    China,
    Germany,
}

impl fmt::Display for OriginalStock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginalStock::China => f.write_str("China"),
            OriginalStock::Germany => f.write_str("Germany"),
        }
    }
}

impl FromStr for OriginalStock {
    type Err = DealershipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "china" | "cina" => Ok(OriginalStock::China),
            "germany" | "germania" => Ok(OriginalStock::Germany),
            other => Err(DealershipError::invalid_argument(format!(
                "original stock must be China or Germany, got '{other}'"
            ))),
        }
    }
}

/// Concrete configuration chosen for a virtual-stock unit at reservation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualConfig {
    pub trim: String,
    pub fuel_type: String,
    pub exterior_color: String,
    pub transmission: String,
    pub accessories: BTreeSet<String>,
    /// Pricing-engine quote for the chosen configuration
    pub price: i64,
}

/// Reservation data, present while Reserved and retained once Ordered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub reserved_by: String,
    pub reserved_accessories: BTreeSet<String>,
    pub destination: Option<String>,
    pub reserved_at: DateTime<Utc>,
    pub virtual_config: Option<VirtualConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub model: String,
    pub trim: String,
    pub fuel_type: String,
    pub exterior_color: String,
    pub transmission: String,
    /// Chassis number
    pub telaio: String,
    pub accessories: BTreeSet<String>,
    pub price: i64,
    pub location: Location,
    pub status: VehicleStatus,
    pub date_added: DateTime<Utc>,
    pub original_stock: Option<OriginalStock>,
    pub estimated_arrival_days: Option<u32>,
    pub reservation: Option<Reservation>,
}

impl Vehicle {
    /// A virtual-stock unit: only the model is known, price stays 0
    pub fn new_virtual(model: impl Into<String>, original_stock: OriginalStock) -> Self {
        Self {
            id: Uuid::new_v4(),
            model: model.into(),
            trim: String::new(),
            fuel_type: String::new(),
            exterior_color: String::new(),
            transmission: String::new(),
            telaio: String::new(),
            accessories: BTreeSet::new(),
            price: 0,
            location: Location::VirtualStock,
            status: VehicleStatus::Available,
            date_added: Utc::now(),
            original_stock: Some(original_stock),
            estimated_arrival_days: None,
            reservation: None,
        }
    }

    /// A fully configured unit in physical or dealer stock
    pub fn new_configured(configuration: VehicleConfiguration, location: Location, price: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            model: configuration.model,
            trim: configuration.trim,
            fuel_type: configuration.fuel_type,
            exterior_color: configuration.exterior_color,
            transmission: configuration.transmission,
            telaio: configuration.telaio,
            accessories: configuration.accessories,
            price,
            location,
            status: VehicleStatus::Available,
            date_added: Utc::now(),
            original_stock: None,
            estimated_arrival_days: None,
            reservation: None,
        }
    }

    pub fn is_virtual(&self) -> bool {
        self.location == Location::VirtualStock
    }

    /// Price an order should carry: the reserved configuration's quote for
    /// virtual stock, the stored price otherwise
    pub fn effective_price(&self) -> i64 {
        self.reservation
            .as_ref()
            .and_then(|r| r.virtual_config.as_ref())
            .map(|c| c.price)
            .unwrap_or(self.price)
    }

    pub fn configuration(&self) -> VehicleConfiguration {
        VehicleConfiguration {
            model: self.model.clone(),
            trim: self.trim.clone(),
            fuel_type: self.fuel_type.clone(),
            exterior_color: self.exterior_color.clone(),
            transmission: self.transmission.clone(),
            telaio: self.telaio.clone(),
            accessories: self.accessories.clone(),
        }
    }
}

/// Storage-level partial update of a vehicle
///
/// `estimated_arrival_days` is only written when the vehicle has none yet.
#[derive(Debug, Clone, Default)]
pub struct VehiclePatch {
    pub model: Option<String>,
    pub trim: Option<String>,
    pub fuel_type: Option<String>,
    pub exterior_color: Option<String>,
    pub transmission: Option<String>,
    pub telaio: Option<String>,
    pub accessories: Option<BTreeSet<String>>,
    pub price: Option<i64>,
    pub location: Option<Location>,
    pub status: Option<VehicleStatus>,
    pub estimated_arrival_days: Option<u32>,
    pub reservation: Option<Option<Reservation>>,
}

impl Entity for Vehicle {
    type Patch = VehiclePatch;

    fn resource_name() -> &'static str {
        "vehicles"
    }

    fn resource_name_singular() -> &'static str {
        "vehicle"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn status(&self) -> &str {
        self.status.as_str()
    }

    fn apply(&mut self, patch: VehiclePatch) {
        if let Some(model) = patch.model {
            self.model = model;
        }
        if let Some(trim) = patch.trim {
            self.trim = trim;
        }
        if let Some(fuel_type) = patch.fuel_type {
            self.fuel_type = fuel_type;
        }
        if let Some(color) = patch.exterior_color {
            self.exterior_color = color;
        }
        if let Some(transmission) = patch.transmission {
            self.transmission = transmission;
        }
        if let Some(telaio) = patch.telaio {
            self.telaio = telaio;
        }
        if let Some(accessories) = patch.accessories {
            self.accessories = accessories;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if self.estimated_arrival_days.is_none() {
            self.estimated_arrival_days = patch.estimated_arrival_days;
        }
        if let Some(reservation) = patch.reservation {
            self.reservation = reservation;
        }
    }
}

/// Named configuration of a vehicle; every string is required outside virtual stock
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct VehicleConfiguration {
    #[validate(length(min = 1, message = "required"))]
    pub model: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    pub trim: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    pub fuel_type: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    pub exterior_color: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    pub transmission: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "required"))]
    pub telaio: String,
    #[serde(default)]
    pub accessories: BTreeSet<String>,
}

/// Input for creating a vehicle
///
/// For virtual stock only `model` and `original_stock` are read; the rest of
/// the configuration is supplied at reservation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVehicle {
    #[serde(flatten)]
    pub configuration: VehicleConfiguration,
    pub location: Location,
    #[serde(default)]
    pub original_stock: Option<String>,
}

/// Caller-facing vehicle update; status is deliberately absent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleUpdate {
    pub model: Option<String>,
    pub trim: Option<String>,
    pub fuel_type: Option<String>,
    pub exterior_color: Option<String>,
    pub transmission: Option<String>,
    pub telaio: Option<String>,
    pub accessories: Option<BTreeSet<String>>,
    pub location: Option<Location>,
}

impl VehicleUpdate {
    /// True when any field other than model/location is set
    pub fn touches_configuration(&self) -> bool {
        self.trim.is_some()
            || self.fuel_type.is_some()
            || self.exterior_color.is_some()
            || self.transmission.is_some()
            || self.telaio.is_some()
            || self.accessories.is_some()
    }

    pub fn into_patch(self) -> VehiclePatch {
        VehiclePatch {
            model: self.model,
            trim: self.trim,
            fuel_type: self.fuel_type,
            exterior_color: self.exterior_color,
            transmission: self.transmission,
            telaio: self.telaio,
            accessories: self.accessories,
            location: self.location,
            ..VehiclePatch::default()
        }
    }
}

/// Configuration selected for a virtual-stock unit when reserving it
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VirtualSelection {
    #[validate(length(min = 1, message = "required"))]
    pub trim: String,
    #[validate(length(min = 1, message = "required"))]
    pub fuel_type: String,
    #[validate(length(min = 1, message = "required"))]
    pub exterior_color: String,
    #[validate(length(min = 1, message = "required"))]
    pub transmission: String,
    #[serde(default)]
    pub accessories: BTreeSet<String>,
}

/// Input for reserving a vehicle on behalf of a dealer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReserveRequest {
    pub dealer_id: Uuid,
    #[validate(length(min = 1, message = "required"))]
    pub reserved_by: String,
    #[serde(default)]
    pub reserved_accessories: BTreeSet<String>,
    #[serde(default)]
    #[validate(nested)]
    pub virtual_config: Option<VirtualSelection>,
    #[serde(default)]
    pub destination: Option<String>,
}
