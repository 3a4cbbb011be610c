//! Generic data access contract.

use crate::error::AppError;
use async_trait::async_trait;

/// CRUD contract over one entity type.
///
/// Each implementation binds the associated types to a concrete entity, the
/// predicate used to find it, the data needed to insert it and the partial
/// update applied to it. Every call is committed on its own.
#[async_trait]
pub trait Repository: Send + Sync {
    type Entity: Send + Sync + 'static;
    type Filter: Send + Sync + 'static;
    type New: Send + Sync + 'static;
    type Patch: Send + Sync + 'static;

    /// Returns every row, up to `limit` when given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get_all(&self, limit: Option<i64>) -> Result<Vec<Self::Entity>, AppError>;

    /// Returns the first row matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get(&self, filter: Self::Filter) -> Result<Option<Self::Entity>, AppError>;

    /// Persists a new row and returns it with generated fields populated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when a uniqueness constraint is violated.
    async fn add(&self, new: Self::New) -> Result<Self::Entity, AppError>;

    /// Applies `patch` to `entity`, persists it and returns the refreshed row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the row no longer exists and
    /// [`AppError::Conflict`] when a uniqueness constraint is violated.
    async fn update(
        &self,
        entity: Self::Entity,
        patch: Self::Patch,
    ) -> Result<Self::Entity, AppError>;

    /// Removes `entity` and returns its pre-deletion snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the row no longer exists.
    async fn delete(&self, entity: Self::Entity) -> Result<Self::Entity, AppError>;
}
