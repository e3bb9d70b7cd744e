//! Domain entities persisted through [`DataService`](crate::core::DataService)

pub mod catalog;
pub mod dealer;
pub mod order;
pub mod vehicle;

pub use catalog::{CatalogItem, CatalogKind, CatalogPatch, MAX_ITEM_PRICE};
pub use dealer::{Dealer, DealerPatch};
pub use order::{Order, OrderPatch, OrderStatus, OrderUpdate};
pub use vehicle::{
    Location, NewVehicle, OriginalStock, Reservation, ReserveRequest, Vehicle,
    VehicleConfiguration, VehiclePatch, VehicleStatus, VehicleUpdate, VirtualConfig,
    VirtualSelection,
};
