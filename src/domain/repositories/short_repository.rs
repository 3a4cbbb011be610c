//! Repository binding for short links.

use crate::domain::entities::{NewShort, Short, ShortFilter, ShortPatch};
use crate::domain::repositories::Repository;
#[cfg(test)]
use async_trait::async_trait;

/// [`Repository`] over [`Short`].
///
/// Blanket-implemented for every repository with matching associated types,
/// so it can be used as `dyn ShortRepository`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryShortRepository`] - process memory
/// - `MockShortRepository` with `cfg(test)`
pub trait ShortRepository:
    Repository<Entity = Short, Filter = ShortFilter, New = NewShort, Patch = ShortPatch>
{
}

impl<R> ShortRepository for R where
    R: Repository<Entity = Short, Filter = ShortFilter, New = NewShort, Patch = ShortPatch>
        + ?Sized
{
}

#[cfg(test)]
mockall::mock! {
    pub ShortRepository {}

    #[async_trait]
    impl Repository for ShortRepository {
        type Entity = Short;
        type Filter = ShortFilter;
        type New = NewShort;
        type Patch = ShortPatch;

        async fn get_all(&self, limit: Option<i64>) -> Result<Vec<Short>, crate::error::AppError>;
        async fn get(&self, filter: ShortFilter) -> Result<Option<Short>, crate::error::AppError>;
        async fn add(&self, new: NewShort) -> Result<Short, crate::error::AppError>;
        async fn update(&self, entity: Short, patch: ShortPatch) -> Result<Short, crate::error::AppError>;
        async fn delete(&self, entity: Short) -> Result<Short, crate::error::AppError>;
    }
}
