//! Service traits for persistence operations

use crate::core::Entity;
use crate::core::error::{DealershipError, DealershipResult};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing persisted entities
///
/// Implementations provide CRUD operations for a specific entity type.
/// The lifecycle manager is agnostic to the underlying storage mechanism and
/// only talks to this contract.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Create a new entity
    async fn create(&self, entity: T) -> Result<T>;

    /// Get an entity by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List all entities
    async fn list(&self) -> Result<Vec<T>>;

    /// Apply a partial update, returning `None` if the entity does not exist
    async fn update(&self, id: &Uuid, patch: T::Patch) -> Result<Option<T>>;

    /// Apply a partial update only if the stored status still equals `expected`
    ///
    /// The status check and the write must happen as one atomic step.
    /// Returns `None` when no entity was affected, either because it does not
    /// exist or because its status no longer matches.
    async fn update_if_status(
        &self,
        id: &Uuid,
        expected: &str,
        patch: T::Patch,
    ) -> Result<Option<T>>;

    /// Delete an entity, returning whether it existed
    async fn delete(&self, id: &Uuid) -> Result<bool>;
}

/// Typed accessors layered over [`DataService`]
///
/// Translates storage failures into [`DealershipError::Dependency`] and missing
/// ids into [`DealershipError::NotFound`].
#[async_trait]
pub trait DataServiceExt<T: Entity>: DataService<T> {
    /// Get-or-fail lookup
    async fn fetch(&self, id: &Uuid) -> DealershipResult<T> {
        self.get(id)
            .await
            .map_err(DealershipError::Dependency)?
            .ok_or_else(|| DealershipError::not_found::<T>(*id))
    }

    /// List all entities, wrapping storage failures
    async fn fetch_all(&self) -> DealershipResult<Vec<T>> {
        self.list().await.map_err(DealershipError::Dependency)
    }
}

impl<T: Entity, S: DataService<T> + ?Sized> DataServiceExt<T> for S {}
