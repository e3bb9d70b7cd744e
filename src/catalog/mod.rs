//! Catalog repository
//!
//! Compatibility-filtered lookup over the six catalog kinds. Each kind is
//! persisted through its own [`DataService`], the same way every other entity
//! is. Listings are de-duplicated by name because upstream data is known to
//! contain repeated rows sharing a name.

use crate::core::{DataService, DataServiceExt, DealershipError, DealershipResult};
use crate::entities::{CatalogItem, CatalogKind, CatalogPatch};
use crate::storage::InMemoryDataService;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// One data service per catalog kind
#[derive(Clone)]
pub struct CatalogStores {
    pub models: Arc<dyn DataService<CatalogItem>>,
    pub trims: Arc<dyn DataService<CatalogItem>>,
    pub fuel_types: Arc<dyn DataService<CatalogItem>>,
    pub colors: Arc<dyn DataService<CatalogItem>>,
    pub transmissions: Arc<dyn DataService<CatalogItem>>,
    pub accessories: Arc<dyn DataService<CatalogItem>>,
}

impl CatalogStores {
    pub fn in_memory() -> Self {
        Self {
            models: Arc::new(InMemoryDataService::new()),
            trims: Arc::new(InMemoryDataService::new()),
            fuel_types: Arc::new(InMemoryDataService::new()),
            colors: Arc::new(InMemoryDataService::new()),
            transmissions: Arc::new(InMemoryDataService::new()),
            accessories: Arc::new(InMemoryDataService::new()),
        }
    }

    pub fn for_kind(&self, kind: CatalogKind) -> &Arc<dyn DataService<CatalogItem>> {
        match kind {
            CatalogKind::Model => &self.models,
            CatalogKind::Trim => &self.trims,
            CatalogKind::FuelType => &self.fuel_types,
            CatalogKind::Color => &self.colors,
            CatalogKind::Transmission => &self.transmissions,
            CatalogKind::Accessory => &self.accessories,
        }
    }
}

/// Immutable view of the whole catalog, keyed by id
///
/// Unlike listings, a snapshot keeps duplicate names so every stored id resolves.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    items: HashMap<Uuid, CatalogItem>,
}

impl CatalogSnapshot {
    pub fn new(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
        }
    }

    /// Resolve an id of the given kind; ids of another kind do not resolve
    pub fn get(&self, kind: CatalogKind, id: &Uuid) -> Option<&CatalogItem> {
        self.items.get(id).filter(|item| item.kind == kind)
    }

    /// Resolve a name of the given kind, preferring the lowest id among duplicates
    pub fn find_by_name(&self, kind: CatalogKind, name: &str) -> Option<&CatalogItem> {
        self.find_compatible_by_name(kind, name, None, None)
    }

    /// Resolve a name, preferring rows compatible with the given model and trim
    ///
    /// Among equally preferred rows the lowest id wins, which is the row
    /// [`CatalogRepository::list_compatible`] shows for that name.
    pub fn find_compatible_by_name(
        &self,
        kind: CatalogKind,
        name: &str,
        model_id: Option<&Uuid>,
        trim_id: Option<&Uuid>,
    ) -> Option<&CatalogItem> {
        self.items
            .values()
            .filter(|item| item.kind == kind && item.name == name)
            .min_by_key(|item| {
                let compatible = model_id.is_some_and(|model| item.is_compatible(model, trim_id));
                (!compatible, item.id)
            })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Catalog repository over injected per-kind stores
#[derive(Clone)]
pub struct CatalogRepository {
    stores: CatalogStores,
}

impl CatalogRepository {
    pub fn new(stores: CatalogStores) -> Self {
        Self { stores }
    }

    pub fn in_memory() -> Self {
        Self::new(CatalogStores::in_memory())
    }

    /// Insert items into the store of their kind
    pub async fn seed(&self, items: impl IntoIterator<Item = CatalogItem>) -> DealershipResult<()> {
        for item in items {
            self.create(item).await?;
        }
        Ok(())
    }

    pub async fn create(&self, item: CatalogItem) -> DealershipResult<CatalogItem> {
        item.validate()?;
        self.stores
            .for_kind(item.kind)
            .create(item)
            .await
            .map_err(DealershipError::Dependency)
    }

    pub async fn update(
        &self,
        kind: CatalogKind,
        id: &Uuid,
        patch: CatalogPatch,
    ) -> DealershipResult<CatalogItem> {
        patch.validate()?;
        self.stores
            .for_kind(kind)
            .update(id, patch)
            .await
            .map_err(DealershipError::Dependency)?
            .ok_or_else(|| DealershipError::not_found::<CatalogItem>(*id))
    }

    pub async fn delete(&self, kind: CatalogKind, id: &Uuid) -> DealershipResult<()> {
        let existed = self
            .stores
            .for_kind(kind)
            .delete(id)
            .await
            .map_err(DealershipError::Dependency)?;
        if existed {
            Ok(())
        } else {
            Err(DealershipError::not_found::<CatalogItem>(*id))
        }
    }

    /// All items of a kind, de-duplicated by name and sorted by name
    ///
    /// Among rows sharing a name the lowest id is kept, so repeated calls
    /// always return the same representative.
    pub async fn list(&self, kind: CatalogKind) -> DealershipResult<Vec<CatalogItem>> {
        let items = dedup_by_name(self.stores.for_kind(kind).fetch_all().await?);
        tracing::debug!(kind = %kind, count = items.len(), "listed catalog items");
        Ok(items)
    }

    pub async fn list_models(&self) -> DealershipResult<Vec<CatalogItem>> {
        self.list(CatalogKind::Model).await
    }

    pub async fn list_trims(&self) -> DealershipResult<Vec<CatalogItem>> {
        self.list(CatalogKind::Trim).await
    }

    pub async fn list_fuel_types(&self) -> DealershipResult<Vec<CatalogItem>> {
        self.list(CatalogKind::FuelType).await
    }

    pub async fn list_colors(&self) -> DealershipResult<Vec<CatalogItem>> {
        self.list(CatalogKind::Color).await
    }

    pub async fn list_transmissions(&self) -> DealershipResult<Vec<CatalogItem>> {
        self.list(CatalogKind::Transmission).await
    }

    pub async fn list_accessories(&self) -> DealershipResult<Vec<CatalogItem>> {
        self.list(CatalogKind::Accessory).await
    }

    /// Items of a kind compatible with a model and, for accessories, a trim
    ///
    /// Incompatible rows are dropped before de-duplication, so a name is
    /// listed whenever any of its rows is compatible.
    pub async fn list_compatible(
        &self,
        kind: CatalogKind,
        model_id: &Uuid,
        trim_id: Option<&Uuid>,
    ) -> DealershipResult<Vec<CatalogItem>> {
        let compatible = self
            .stores
            .for_kind(kind)
            .fetch_all()
            .await?
            .into_iter()
            .filter(|item| item.is_compatible(model_id, trim_id))
            .collect();
        Ok(dedup_by_name(compatible))
    }

    /// Plain lookup: unknown ids yield `None`
    pub async fn find(&self, kind: CatalogKind, id: &Uuid) -> DealershipResult<Option<CatalogItem>> {
        self.stores
            .for_kind(kind)
            .get(id)
            .await
            .map_err(DealershipError::Dependency)
    }

    /// Get-or-fail lookup
    pub async fn get_or_fail(&self, kind: CatalogKind, id: &Uuid) -> DealershipResult<CatalogItem> {
        self.stores.for_kind(kind).fetch(id).await
    }

    /// Load every kind into an immutable snapshot for pricing
    pub async fn snapshot(&self) -> DealershipResult<CatalogSnapshot> {
        let mut items = Vec::new();
        for kind in CatalogKind::ALL {
            items.extend(self.stores.for_kind(kind).fetch_all().await?);
        }
        Ok(CatalogSnapshot::new(items))
    }
}

/// Keep the lowest-id row per name, sorted by name
fn dedup_by_name(mut items: Vec<CatalogItem>) -> Vec<CatalogItem> {
    items.sort_by_key(|item| item.id);

    let mut by_name: IndexMap<String, CatalogItem> = IndexMap::with_capacity(items.len());
    for item in items {
        by_name.entry(item.name.clone()).or_insert(item);
    }
    by_name.sort_keys();
    by_name.into_values().collect()
}
