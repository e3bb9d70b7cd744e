//! Catalog items: models, trims, fuel types, colors, transmissions and accessories

use crate::core::{DealershipError, Entity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// The six kinds of configurable catalog items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Model,
    Trim,
    FuelType,
    Color,
    Transmission,
    Accessory,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 6] = [
        CatalogKind::Model,
        CatalogKind::Trim,
        CatalogKind::FuelType,
        CatalogKind::Color,
        CatalogKind::Transmission,
        CatalogKind::Accessory,
    ];

    /// Plural path segment (e.g., "fuel-types")
    pub fn plural(&self) -> &'static str {
        match self {
            CatalogKind::Model => "models",
            CatalogKind::Trim => "trims",
            CatalogKind::FuelType => "fuel-types",
            CatalogKind::Color => "colors",
            CatalogKind::Transmission => "transmissions",
            CatalogKind::Accessory => "accessories",
        }
    }

    /// Label used in price breakdowns
    pub fn label(&self) -> &'static str {
        match self {
            CatalogKind::Model => "model",
            CatalogKind::Trim => "trim",
            CatalogKind::FuelType => "fuel_type",
            CatalogKind::Color => "color",
            CatalogKind::Transmission => "transmission",
            CatalogKind::Accessory => "accessory",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CatalogKind {
    type Err = DealershipError;

    /// Accepts either the plural path segment or the singular label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CatalogKind::ALL
            .into_iter()
            .find(|kind| kind.plural() == s || kind.label() == s)
            .ok_or_else(|| DealershipError::invalid_argument(format!("unknown catalog kind '{s}'")))
    }
}

/// Largest price or adjustment a catalog item may carry, in either direction
pub const MAX_ITEM_PRICE: i64 = 1_000_000_000;
const MIN_ITEM_PRICE: i64 = -MAX_ITEM_PRICE;

/// A configurable catalog item
///
/// `price` is the base price for models and trims, the price adjustment for
/// fuel types, colors and transmissions, and the list price for accessories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CatalogItem {
    pub id: Uuid,
    pub kind: CatalogKind,
    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    #[validate(range(min = MIN_ITEM_PRICE, max = MAX_ITEM_PRICE, message = "out of range"))]
    pub price: i64,
    /// Model ids this item can be combined with; empty means all models
    #[serde(default)]
    pub compatible_models: Vec<Uuid>,
    /// Trim ids this accessory can be combined with; empty means all trims
    #[serde(default)]
    pub compatible_trims: Vec<Uuid>,
}

impl CatalogItem {
    pub fn new(kind: CatalogKind, name: impl Into<String>, price: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name: name.into(),
            price,
            compatible_models: Vec::new(),
            compatible_trims: Vec::new(),
        }
    }

    pub fn with_models(mut self, models: impl IntoIterator<Item = Uuid>) -> Self {
        self.compatible_models = models.into_iter().collect();
        self
    }

    pub fn with_trims(mut self, trims: impl IntoIterator<Item = Uuid>) -> Self {
        self.compatible_trims = trims.into_iter().collect();
        self
    }

    /// Check compatibility with a model and, for accessories, a trim
    ///
    /// The trim restriction is only applied when a trim is given.
    pub fn is_compatible(&self, model_id: &Uuid, trim_id: Option<&Uuid>) -> bool {
        let model_ok =
            self.compatible_models.is_empty() || self.compatible_models.contains(model_id);
        let trim_ok = self.kind != CatalogKind::Accessory
            || self.compatible_trims.is_empty()
            || trim_id.is_none_or(|t| self.compatible_trims.contains(t));
        model_ok && trim_ok
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CatalogPatch {
    #[validate(length(min = 1, message = "required"))]
    pub name: Option<String>,
    #[validate(range(min = MIN_ITEM_PRICE, max = MAX_ITEM_PRICE, message = "out of range"))]
    pub price: Option<i64>,
    pub compatible_models: Option<Vec<Uuid>>,
    pub compatible_trims: Option<Vec<Uuid>>,
}

impl Entity for CatalogItem {
    type Patch = CatalogPatch;

    fn resource_name() -> &'static str {
        "catalog_items"
    }

    fn resource_name_singular() -> &'static str {
        "catalog_item"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn status(&self) -> &str {
        "active"
    }

    fn apply(&mut self, patch: CatalogPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(models) = patch.compatible_models {
            self.compatible_models = models;
        }
        if let Some(trims) = patch.compatible_trims {
            self.compatible_trims = trims;
        }
    }
}
