//! PostgreSQL repository tests.
//!
//! Each test gets a fresh database with `migrations/` applied. They need a
//! running server: `DATABASE_URL=postgres://... cargo test -- --ignored`.

use chrono::{Duration, Utc};
use shorter::domain::entities::{NewShort, ShortFilter, ShortPatch};
use shorter::domain::repositories::Repository;
use shorter::error::AppError;
use shorter::infrastructure::persistence::PgShortRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_short(code: &str, url: &str) -> NewShort {
    NewShort {
        code: code.to_string(),
        url: url.to_string(),
        expires_at: None,
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_add_short(pool: PgPool) {
    let repo = PgShortRepository::new(Arc::new(pool));

    let short = repo
        .add(new_short("test12", "https://example.com/"))
        .await
        .unwrap();

    assert_eq!(short.code, "test12");
    assert_eq!(short.url, "https://example.com/");
    assert!(short.is_activated);
    assert!(short.expires_at.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_add_duplicate_code_conflicts(pool: PgPool) {
    let repo = PgShortRepository::new(Arc::new(pool.clone()));
    repo.add(new_short("dup", "https://a.com/")).await.unwrap();

    let result = repo.add(new_short("dup", "https://b.com/")).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shorts")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_get_by_id_and_code(pool: PgPool) {
    let repo = PgShortRepository::new(Arc::new(pool));
    let short = repo.add(new_short("find", "https://example.com/")).await.unwrap();

    let by_id = repo.get(ShortFilter::Id(short.id)).await.unwrap();
    assert_eq!(by_id.as_ref().map(|s| s.code.as_str()), Some("find"));

    let by_code = repo
        .get(ShortFilter::Code("find".to_string()))
        .await
        .unwrap();
    assert_eq!(by_code.map(|s| s.id), Some(short.id));

    let missing = repo
        .get(ShortFilter::Code("nope".to_string()))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_get_all_with_limit(pool: PgPool) {
    let repo = PgShortRepository::new(Arc::new(pool));
    for code in ["a", "b", "c"] {
        repo.add(new_short(code, "https://example.com/")).await.unwrap();
    }

    assert_eq!(repo.get_all(None).await.unwrap().len(), 3);
    assert_eq!(repo.get_all(Some(2)).await.unwrap().len(), 2);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_partial(pool: PgPool) {
    let repo = PgShortRepository::new(Arc::new(pool));
    let expires_at = Utc::now() + Duration::days(1);
    let short = repo
        .add(NewShort {
            expires_at: Some(expires_at),
            ..new_short("upd", "https://example.com/")
        })
        .await
        .unwrap();

    let updated = repo
        .update(
            short.clone(),
            ShortPatch {
                is_activated: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(!updated.is_activated);
    assert_eq!(updated.code, "upd");
    assert!(updated.expires_at.is_some());
    assert!(updated.last_updated_at >= short.last_updated_at);

    let cleared = repo
        .update(
            updated,
            ShortPatch {
                code: Some("new".to_string()),
                expires_at: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(cleared.code, "new");
    assert!(cleared.expires_at.is_none());
    assert!(!cleared.is_activated);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_to_taken_code_conflicts(pool: PgPool) {
    let repo = PgShortRepository::new(Arc::new(pool));
    repo.add(new_short("one", "https://a.com/")).await.unwrap();
    let second = repo.add(new_short("two", "https://b.com/")).await.unwrap();

    let result = repo
        .update(
            second,
            ShortPatch {
                code: Some("one".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_delete(pool: PgPool) {
    let repo = PgShortRepository::new(Arc::new(pool));
    let short = repo.add(new_short("gone", "https://example.com/")).await.unwrap();

    let deleted = repo.delete(short.clone()).await.unwrap();
    assert_eq!(deleted.id, short.id);

    assert!(repo.get(ShortFilter::Id(short.id)).await.unwrap().is_none());

    let again = repo.delete(short).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));
}
