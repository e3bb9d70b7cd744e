//! Entity trait defining the core abstraction for every persisted record

use uuid::Uuid;

/// Base trait for all entities handled by the dealership core.
///
/// Every entity has:
/// - id: Unique identifier
/// - status: Current lifecycle status, used by conditional updates
/// - a typed patch describing a partial update
///
/// Storage backends only see entities through this trait, so the same
/// [`DataService`](crate::core::DataService) implementation can persist
/// vehicles, orders, dealers and catalog items alike.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Partial update applied by [`DataService::update`](crate::core::DataService::update)
    type Patch: Clone + Send + Sync + 'static;

    /// The plural resource name used in URLs (e.g., "vehicles", "orders")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "vehicle", "order")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the entity status as stored
    fn status(&self) -> &str;

    /// Apply a partial update in place
    fn apply(&mut self, patch: Self::Patch);
}
