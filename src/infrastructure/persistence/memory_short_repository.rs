//! In-memory implementation of the short link repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{NewShort, Short, ShortFilter, ShortPatch};
use crate::domain::repositories::Repository;
use crate::error::{AppError, CODE_BUSY};

/// Process-local short link storage.
///
/// Code uniqueness is checked and enforced under the write lock, so it holds
/// across concurrent requests the same way the `uq_shorts_code` constraint
/// does in PostgreSQL. Data is lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryShortRepository {
    storage: RwLock<HashMap<Uuid, Short>>,
}

impl InMemoryShortRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub async fn len(&self) -> usize {
        self.storage.read().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.storage.read().await.is_empty()
    }
}

fn code_taken(storage: &HashMap<Uuid, Short>, code: &str, except: Option<Uuid>) -> bool {
    storage
        .values()
        .any(|s| s.code == code && Some(s.id) != except)
}

#[async_trait]
impl Repository for InMemoryShortRepository {
    type Entity = Short;
    type Filter = ShortFilter;
    type New = NewShort;
    type Patch = ShortPatch;

    async fn get_all(&self, limit: Option<i64>) -> Result<Vec<Short>, AppError> {
        let storage = self.storage.read().await;

        let mut rows: Vec<Short> = storage.values().cloned().collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        if let Some(limit) = limit {
            rows.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        }

        Ok(rows)
    }

    async fn get(&self, filter: ShortFilter) -> Result<Option<Short>, AppError> {
        let storage = self.storage.read().await;

        let found = match &filter {
            ShortFilter::Id(id) => storage.get(id).cloned(),
            ShortFilter::Code(_) => storage.values().find(|s| filter.matches(s)).cloned(),
        };

        Ok(found)
    }

    async fn add(&self, new: NewShort) -> Result<Short, AppError> {
        let mut storage = self.storage.write().await;

        if code_taken(&storage, &new.code, None) {
            return Err(AppError::conflict(CODE_BUSY));
        }

        let now = Utc::now();
        let short = Short {
            id: Uuid::new_v4(),
            code: new.code,
            url: new.url,
            is_activated: true,
            expires_at: new.expires_at,
            created_at: now,
            last_updated_at: now,
        };

        storage.insert(short.id, short.clone());
        Ok(short)
    }

    async fn update(&self, entity: Short, patch: ShortPatch) -> Result<Short, AppError> {
        let mut storage = self.storage.write().await;

        if let Some(code) = &patch.code
            && code_taken(&storage, code, Some(entity.id))
        {
            return Err(AppError::conflict(CODE_BUSY));
        }

        let Some(stored) = storage.get_mut(&entity.id) else {
            return Err(AppError::not_found(
                "Short link with such ID does not exist",
            ));
        };

        patch.apply(stored);
        Ok(stored.clone())
    }

    async fn delete(&self, entity: Short) -> Result<Short, AppError> {
        let mut storage = self.storage.write().await;

        storage.remove(&entity.id).ok_or_else(|| {
            AppError::not_found("Short link with such ID does not exist")
        })
    }
}
