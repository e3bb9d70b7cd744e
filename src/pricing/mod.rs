//! Composable pricing engine
//!
//! `total = model + trim + fuel type + color + transmission + Σ accessories`
//!
//! [`calculate_price`] is a pure function of a [`CatalogSnapshot`]. A reference
//! that does not resolve against the snapshot contributes 0 and is left out of
//! the breakdown instead of failing the whole quote. An accessory id listed
//! more than once is priced once.

use crate::catalog::{CatalogRepository, CatalogSnapshot};
use crate::core::DealershipResult;
use crate::entities::{CatalogKind, VehicleConfiguration};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

/// Catalog ids making up a configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSelection {
    pub model_id: Option<Uuid>,
    pub trim_id: Option<Uuid>,
    pub fuel_type_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub transmission_id: Option<Uuid>,
    #[serde(default)]
    pub accessory_ids: Vec<Uuid>,
}

/// Catalog names making up a configuration, as stored on a vehicle
#[derive(Debug, Clone, Copy)]
pub struct NamedSelection<'a> {
    pub model: &'a str,
    pub trim: &'a str,
    pub fuel_type: &'a str,
    pub exterior_color: &'a str,
    pub transmission: &'a str,
    pub accessories: &'a BTreeSet<String>,
}

impl<'a> From<&'a VehicleConfiguration> for NamedSelection<'a> {
    fn from(configuration: &'a VehicleConfiguration) -> Self {
        Self {
            model: &configuration.model,
            trim: &configuration.trim,
            fuel_type: &configuration.fuel_type,
            exterior_color: &configuration.exterior_color,
            transmission: &configuration.transmission,
            accessories: &configuration.accessories,
        }
    }
}

/// One priced term of a quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLine {
    pub kind: CatalogKind,
    pub item_id: Uuid,
    pub name: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub total: i64,
    pub breakdown: Vec<PriceLine>,
}

impl PriceQuote {
    pub fn amounts(&self) -> Vec<i64> {
        self.breakdown.iter().map(|line| line.amount).collect()
    }
}

/// Compute a quote from catalog ids
pub fn calculate_price(snapshot: &CatalogSnapshot, selection: &PriceSelection) -> PriceQuote {
    let singles = [
        (CatalogKind::Model, selection.model_id),
        (CatalogKind::Trim, selection.trim_id),
        (CatalogKind::FuelType, selection.fuel_type_id),
        (CatalogKind::Color, selection.color_id),
        (CatalogKind::Transmission, selection.transmission_id),
    ];

    let breakdown: Vec<PriceLine> = singles
        .into_iter()
        .filter_map(|(kind, id)| id.map(|id| (kind, id)))
        .chain(
            selection
                .accessory_ids
                .iter()
                .collect::<IndexSet<_>>()
                .into_iter()
                .map(|id| (CatalogKind::Accessory, *id)),
        )
        .filter_map(|(kind, id)| {
            snapshot.get(kind, &id).map(|item| PriceLine {
                kind,
                item_id: item.id,
                name: item.name.clone(),
                amount: item.price,
            })
        })
        .collect();

    // Catalog writes bound each amount, so saturation is unreachable for stored items
    let total = breakdown
        .iter()
        .fold(0i64, |total, line| total.saturating_add(line.amount));
    PriceQuote { total, breakdown }
}

/// Translate catalog names into ids; names that do not resolve are left unset
///
/// The model is resolved first. When a name is shared by several rows, the row
/// compatible with that model (and, for accessories, the resolved trim) wins.
pub fn selection_by_names(snapshot: &CatalogSnapshot, names: NamedSelection<'_>) -> PriceSelection {
    let model_id = snapshot
        .find_by_name(CatalogKind::Model, names.model)
        .map(|item| item.id);
    let id_of = |kind, name: &str, trim_id: Option<&Uuid>| {
        snapshot
            .find_compatible_by_name(kind, name, model_id.as_ref(), trim_id)
            .map(|item| item.id)
    };
    let trim_id = id_of(CatalogKind::Trim, names.trim, None);

    PriceSelection {
        model_id,
        trim_id,
        fuel_type_id: id_of(CatalogKind::FuelType, names.fuel_type, None),
        color_id: id_of(CatalogKind::Color, names.exterior_color, None),
        transmission_id: id_of(CatalogKind::Transmission, names.transmission, None),
        accessory_ids: names
            .accessories
            .iter()
            .filter_map(|name| id_of(CatalogKind::Accessory, name, trim_id.as_ref()))
            .collect(),
    }
}

/// Pricing engine bound to a catalog repository
#[derive(Clone)]
pub struct PricingEngine {
    catalog: Arc<CatalogRepository>,
}

impl PricingEngine {
    pub fn new(catalog: Arc<CatalogRepository>) -> Self {
        Self { catalog }
    }

    /// Quote a selection of catalog ids against the current catalog
    pub async fn quote(&self, selection: &PriceSelection) -> DealershipResult<PriceQuote> {
        let snapshot = self.catalog.snapshot().await?;
        let quote = calculate_price(&snapshot, selection);
        tracing::debug!(total = quote.total, lines = quote.breakdown.len(), "priced selection");
        Ok(quote)
    }

    /// Quote a configuration expressed with catalog names
    pub async fn quote_names(&self, names: NamedSelection<'_>) -> DealershipResult<PriceQuote> {
        let snapshot = self.catalog.snapshot().await?;
        let selection = selection_by_names(&snapshot, names);
        Ok(calculate_price(&snapshot, &selection))
    }
}
