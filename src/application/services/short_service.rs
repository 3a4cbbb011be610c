//! Short link management service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::services::code_service::{CodeGenerator, CodeService, DEFAULT_CODE_LENGTH};
use crate::domain::entities::{NewShort, Short, ShortFilter, ShortPatch};
use crate::domain::repositories::ShortRepository;
use crate::error::{AppError, CODE_BUSY};
use crate::utils::url_normalizer::normalize_url;

/// Number of inserts attempted with freshly generated codes before a storage
/// conflict is returned to the caller.
const MAX_INSERT_ATTEMPTS: usize = 3;

const ID_NOT_FOUND: &str = "Short link with such ID does not exist";
const CODE_NOT_FOUND: &str = "Short link with such code does not exist";
const COLLECTION_EMPTY: &str = "No short links found";

/// Service for creating, reading, updating and deleting short links.
///
/// Handles URL validation, code generation and the conflict and not-found
/// rules shared by the HTTP handlers and the admin CLI.
pub struct ShortService<R: ShortRepository + ?Sized> {
    repository: Arc<R>,
    codes: CodeService<R>,
}

impl<R: ShortRepository + ?Sized> ShortService<R> {
    /// Creates a new short link service.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            codes: CodeService::new(repository.clone()),
            repository,
        }
    }

    /// Creates a short link.
    ///
    /// A supplied `code` is used as is; otherwise a random
    /// [`DEFAULT_CODE_LENGTH`]-character code is generated. Generated codes
    /// that lose an insert race against another request are regenerated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is invalid and
    /// [`AppError::Conflict`] if the supplied code already exists.
    pub async fn create_short(
        &self,
        url: String,
        code: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Short, AppError> {
        let url = canonical_url(&url)?;

        if let Some(code) = code {
            if self
                .repository
                .get(ShortFilter::Code(code.clone()))
                .await?
                .is_some()
            {
                return Err(AppError::conflict(CODE_BUSY));
            }

            let short = self
                .repository
                .add(NewShort {
                    code,
                    url,
                    expires_at,
                })
                .await?;
            tracing::info!(id = %short.id, code = %short.code, "Short link created");
            return Ok(short);
        }

        let mut attempt = 1;
        loop {
            let code = self.codes.generate_code(DEFAULT_CODE_LENGTH).await?;

            match self
                .repository
                .add(NewShort {
                    code,
                    url: url.clone(),
                    expires_at,
                })
                .await
            {
                Err(AppError::Conflict(_)) if attempt < MAX_INSERT_ATTEMPTS => {
                    tracing::warn!(attempt, "Generated code was taken concurrently, retrying");
                    attempt += 1;
                }
                Ok(short) => {
                    tracing::info!(id = %short.id, code = %short.code, "Short link created");
                    return Ok(short);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Lists short links, up to `limit` when given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if there are no short links at all.
    pub async fn list_shorts(&self, limit: Option<i64>) -> Result<Vec<Short>, AppError> {
        let shorts = self.repository.get_all(limit).await?;

        if shorts.is_empty() {
            return Err(AppError::not_found(COLLECTION_EMPTY));
        }

        Ok(shorts)
    }

    /// Looks a short link up by id or by code.
    ///
    /// When both are given the id is used and the code is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if neither selector is given and
    /// [`AppError::NotFound`] if nothing matches.
    pub async fn lookup_short(
        &self,
        id: Option<Uuid>,
        code: Option<String>,
    ) -> Result<Short, AppError> {
        match (id, code) {
            (Some(id), _) => self.get_by_id(id).await,
            (None, Some(code)) => self.get_by_code(&code).await,
            (None, None) => Err(AppError::bad_request("No id and code for get object")),
        }
    }

    /// Retrieves a short link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Short, AppError> {
        self.repository
            .get(ShortFilter::Id(id))
            .await?
            .ok_or_else(|| AppError::not_found(ID_NOT_FOUND))
    }

    /// Retrieves a short link by code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get_by_code(&self, code: &str) -> Result<Short, AppError> {
        self.repository
            .get(ShortFilter::Code(code.to_string()))
            .await?
            .ok_or_else(|| AppError::not_found(CODE_NOT_FOUND))
    }

    /// Applies a partial update to the link with the given id.
    ///
    /// A new code only conflicts when another link holds it; keeping the
    /// link's own code is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist,
    /// [`AppError::BadRequest`] if the patch is empty,
    /// [`AppError::Validation`] if the new URL is invalid and
    /// [`AppError::Conflict`] if the new code belongs to another link.
    pub async fn update_short(&self, id: Uuid, patch: ShortPatch) -> Result<Short, AppError> {
        let short = self.get_by_id(id).await?;

        if patch.is_empty() {
            return Err(AppError::bad_request("No fields provided for update"));
        }

        let patch = ShortPatch {
            url: patch.url.as_deref().map(canonical_url).transpose()?,
            ..patch
        };

        if let Some(code) = &patch.code
            && let Some(holder) = self.repository.get(ShortFilter::Code(code.clone())).await?
            && holder.id != short.id
        {
            return Err(AppError::conflict(CODE_BUSY));
        }

        let updated = self.repository.update(short, patch).await?;
        tracing::info!(id = %updated.id, code = %updated.code, "Short link updated");

        Ok(updated)
    }

    /// Deletes the link with the given id and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn delete_short(&self, id: Uuid) -> Result<Short, AppError> {
        let short = self.get_by_id(id).await?;

        let deleted = self.repository.delete(short).await?;
        tracing::info!(id = %deleted.id, code = %deleted.code, "Short link deleted");

        Ok(deleted)
    }

    /// Deletes every link, one row at a time, and returns the rows removed.
    ///
    /// Rows deleted concurrently between listing and deleting are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if there are no short links at all.
    pub async fn delete_all_shorts(&self) -> Result<Vec<Short>, AppError> {
        let shorts = self.list_shorts(None).await?;

        let mut deleted = Vec::with_capacity(shorts.len());
        for short in shorts {
            let id = short.id;
            match self.repository.delete(short).await {
                Ok(short) => deleted.push(short),
                Err(AppError::NotFound(_)) => {
                    tracing::debug!(id = %id, "Short link already deleted, skipping");
                }
                Err(e) => return Err(e),
            }
        }
        tracing::info!(count = deleted.len(), "All short links deleted");

        Ok(deleted)
    }
}

fn canonical_url(url: &str) -> Result<String, AppError> {
    normalize_url(url).map_err(|e| AppError::validation(format!("url: {e}")))
}
