//! Shared fixtures for lifecycle, order and REST tests
//!
//! ```rust,ignore
//! mod fixtures;
//! use fixtures::*;
//! ```

#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use dealership::prelude::*;
use dealership::server::HostStores;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub const DEALER_NAME: &str = "Autosalone Rossi";
pub const DEALER_PLAFOND: i64 = 80_000;

/// Ids of the seeded catalog
pub struct SeededCatalog {
    pub spider: CatalogItem,
    pub berlina: CatalogItem,
    pub sport: CatalogItem,
    pub lusso: CatalogItem,
    pub ibrido: CatalogItem,
    pub rosso: CatalogItem,
    pub automatico: CatalogItem,
    pub roof: CatalogItem,
    pub spoiler: CatalogItem,
}

/// Seed a catalog where `Berlina/Lusso/Ibrido/Rosso/Automatico + roof` totals 32000
///
/// Also inserts a duplicate "Rosso" row to exercise de-duplication.
pub async fn seed_catalog(catalog: &CatalogRepository) -> SeededCatalog {
    let spider = CatalogItem::new(CatalogKind::Model, "Spider", 30_000);
    let berlina = CatalogItem::new(CatalogKind::Model, "Berlina", 22_000);
    let sport = CatalogItem::new(CatalogKind::Trim, "Sport", 3_000).with_models([spider.id]);
    let lusso = CatalogItem::new(CatalogKind::Trim, "Lusso", 2_500);
    let ibrido = CatalogItem::new(CatalogKind::FuelType, "Ibrido", 2_500);
    let rosso = CatalogItem::new(CatalogKind::Color, "Rosso", 1_000);
    let automatico = CatalogItem::new(CatalogKind::Transmission, "Automatico", 2_500);
    let roof = CatalogItem::new(CatalogKind::Accessory, "Tetto panoramico", 1_500)
        .with_models([berlina.id])
        .with_trims([lusso.id]);
    let spoiler = CatalogItem::new(CatalogKind::Accessory, "Spoiler", 900).with_models([spider.id]);

    catalog
        .seed([
            spider.clone(),
            berlina.clone(),
            sport.clone(),
            lusso.clone(),
            ibrido.clone(),
            rosso.clone(),
            CatalogItem::new(CatalogKind::Color, "Rosso", 1_000),
            automatico.clone(),
            roof.clone(),
            spoiler.clone(),
        ])
        .await
        .unwrap();

    SeededCatalog {
        spider,
        berlina,
        sport,
        lusso,
        ibrido,
        rosso,
        automatico,
        roof,
        spoiler,
    }
}

/// Storage wrapper that can be switched into failure modes
#[derive(Clone)]
pub struct FlakyDataService<T: Entity> {
    inner: InMemoryDataService<T>,
    pub fail_creates: Arc<AtomicBool>,
    pub fail_conditional_updates: Arc<AtomicBool>,
}

impl<T: Entity> FlakyDataService<T> {
    pub fn new() -> Self {
        Self {
            inner: InMemoryDataService::new(),
            fail_creates: Arc::new(AtomicBool::new(false)),
            fail_conditional_updates: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for FlakyDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(anyhow!("storage unavailable"));
        }
        self.inner.create(entity).await
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        self.inner.get(id).await
    }

    async fn list(&self) -> Result<Vec<T>> {
        self.inner.list().await
    }

    async fn update(&self, id: &Uuid, patch: T::Patch) -> Result<Option<T>> {
        self.inner.update(id, patch).await
    }

    async fn update_if_status(
        &self,
        id: &Uuid,
        expected: &str,
        patch: T::Patch,
    ) -> Result<Option<T>> {
        if self.fail_conditional_updates.load(Ordering::SeqCst) {
            return Err(anyhow!("storage unavailable"));
        }
        self.inner.update_if_status(id, expected, patch).await
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        self.inner.delete(id).await
    }
}

/// A host with a seeded catalog and one dealer
pub struct TestContext {
    pub host: DealershipHost,
    pub catalog: SeededCatalog,
    pub vehicles: FlakyDataService<Vehicle>,
    pub orders: FlakyDataService<Order>,
}

pub async fn context_with(config: DealershipConfig, random: Arc<dyn RandomSource>) -> TestContext {
    let vehicles = FlakyDataService::<Vehicle>::new();
    let orders = FlakyDataService::<Order>::new();
    let stores = HostStores {
        catalog: dealership::catalog::CatalogStores::in_memory(),
        vehicles: Arc::new(vehicles.clone()),
        orders: Arc::new(orders.clone()),
        dealers: Arc::new(InMemoryDataService::with_entities([Dealer::new(
            DEALER_NAME,
            DEALER_PLAFOND,
        )])),
    };
    let host = DealershipHost::from_parts(config, stores, random).unwrap();
    let catalog = seed_catalog(&host.catalog).await;
    TestContext {
        host,
        catalog,
        vehicles,
        orders,
    }
}

pub async fn context() -> TestContext {
    context_with(DealershipConfig::default(), Arc::new(SeededRandom::new(7))).await
}

pub fn virtual_vehicle(model: &str, origin: &str) -> NewVehicle {
    NewVehicle {
        configuration: VehicleConfiguration {
            model: model.to_string(),
            ..Default::default()
        },
        location: Location::VirtualStock,
        original_stock: Some(origin.to_string()),
    }
}

/// Physical Berlina priced at 32000 with the roof accessory
pub fn physical_berlina(telaio: &str) -> NewVehicle {
    NewVehicle {
        configuration: VehicleConfiguration {
            model: "Berlina".to_string(),
            trim: "Lusso".to_string(),
            fuel_type: "Ibrido".to_string(),
            exterior_color: "Rosso".to_string(),
            transmission: "Automatico".to_string(),
            telaio: telaio.to_string(),
            accessories: BTreeSet::from(["Tetto panoramico".to_string()]),
        },
        location: Location::PhysicalStock,
        original_stock: None,
    }
}

pub fn berlina_selection() -> VirtualSelection {
    VirtualSelection {
        trim: "Lusso".to_string(),
        fuel_type: "Ibrido".to_string(),
        exterior_color: "Rosso".to_string(),
        transmission: "Automatico".to_string(),
        accessories: BTreeSet::from(["Tetto panoramico".to_string()]),
    }
}

pub fn reserve_request(reserved_by: &str, selection: Option<VirtualSelection>) -> ReserveRequest {
    ReserveRequest {
        dealer_id: Uuid::new_v4(),
        reserved_by: reserved_by.to_string(),
        reserved_accessories: BTreeSet::new(),
        virtual_config: selection,
        destination: Some("Milano".to_string()),
    }
}
