//! Random short code generation with a uniqueness check.

use std::sync::Arc;

use async_trait::async_trait;
use rand::{Rng, distr::Alphanumeric};

use crate::domain::entities::{MAX_CODE_LENGTH, ShortFilter};
use crate::domain::repositories::ShortRepository;
use crate::error::AppError;

/// Length of generated codes.
pub const DEFAULT_CODE_LENGTH: usize = MAX_CODE_LENGTH;

/// Produces short codes that are free at the time of the call.
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    /// Returns a code of exactly `max_length` characters not present in the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn generate_code(&self, max_length: usize) -> Result<String, AppError>;
}

/// Draws `length` characters uniformly from `[A-Za-z0-9]`.
pub fn random_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// [`CodeGenerator`] backed by a short link repository.
///
/// Retries until an unused code is drawn. With 62^6 possible codes a
/// collision is rare, but the loop has no upper bound.
pub struct CodeService<R: ShortRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: ShortRepository + ?Sized> CodeService<R> {
    /// Creates a generator checking codes against `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ShortRepository + ?Sized> CodeGenerator for CodeService<R> {
    async fn generate_code(&self, max_length: usize) -> Result<String, AppError> {
        loop {
            let code = random_code(max_length);

            if self
                .repository
                .get(ShortFilter::Code(code.clone()))
                .await?
                .is_none()
            {
                return Ok(code);
            }

            tracing::debug!(code = %code, "Generated code already taken, retrying");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Short;
    use crate::domain::repositories::MockShortRepository;
    use chrono::Utc;
    use mockall::Sequence;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn existing(code: &str) -> Short {
        Short {
            id: Uuid::new_v4(),
            code: code.to_string(),
            url: "https://example.com/".to_string(),
            is_activated: true,
            expires_at: None,
            created_at: Utc::now(),
            last_updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_random_code_length_and_alphabet() {
        for length in 1..=DEFAULT_CODE_LENGTH {
            let code = random_code(length);
            assert_eq!(code.len(), length);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_random_code_varies() {
        let codes: HashSet<String> = (0..1000).map(|_| random_code(6)).collect();
        assert!(codes.len() > 990);
    }

    #[tokio::test]
    async fn test_generate_code_first_try() {
        let mut repo = MockShortRepository::new();
        repo.expect_get()
            .withf(|filter| matches!(filter, ShortFilter::Code(c) if c.len() == 6))
            .times(1)
            .returning(|_| Ok(None));

        let service = CodeService::new(Arc::new(repo));
        let code = service.generate_code(DEFAULT_CODE_LENGTH).await.unwrap();

        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_generate_code_retries_on_collision() {
        let mut repo = MockShortRepository::new();
        let mut seq = Sequence::new();

        repo.expect_get()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|filter| match filter {
                ShortFilter::Code(code) => Ok(Some(existing(&code))),
                ShortFilter::Id(_) => Ok(None),
            });
        repo.expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));

        let service = CodeService::new(Arc::new(repo));
        let code = service.generate_code(DEFAULT_CODE_LENGTH).await.unwrap();

        assert_eq!(code.len(), 6);
    }

    #[tokio::test]
    async fn test_generate_code_custom_length() {
        let mut repo = MockShortRepository::new();
        repo.expect_get().returning(|_| Ok(None));

        let service = CodeService::new(Arc::new(repo));

        assert_eq!(service.generate_code(4).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_generate_code_propagates_storage_error() {
        let mut repo = MockShortRepository::new();
        repo.expect_get()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error")));

        let service = CodeService::new(Arc::new(repo));
        let result = service.generate_code(DEFAULT_CODE_LENGTH).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
