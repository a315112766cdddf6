//! PostgreSQL link repository tests. Run with `cargo test -- --ignored`
//! and `DATABASE_URL` pointing at a server `sqlx::test` may create databases on.

use chrono::{Duration, SubsecRound, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use token_shortener::domain::entities::{NewLink, NewUser};
use token_shortener::domain::repositories::{LinkRepository, UserRepository};
use token_shortener::error::AppError;
use token_shortener::infrastructure::persistence::{PgLinkRepository, PgUserRepository};

async fn create_owner(pool: &PgPool, name: &str) -> i64 {
    let now = Utc::now().trunc_subsecs(6);
    PgUserRepository::new(Arc::new(pool.clone()))
        .create(NewUser {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            token_hash: format!("hash-{name}"),
            created_at: now,
            expires_at: now + Duration::days(7),
        })
        .await
        .unwrap()
        .id
}

fn new_link(id: &str, owner_id: i64) -> NewLink {
    NewLink {
        id: id.to_string(),
        original_url: format!("https://example.com/{id}"),
        title: String::new(),
        created_at: Utc::now().trunc_subsecs(6),
        owner_id,
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_find(pool: PgPool) {
    let owner = create_owner(&pool, "alice").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let created = repo.create(new_link("abc12345", owner)).await.unwrap();
    assert_eq!(created.clicks, 0);
    assert_eq!(created.owner_id, owner);

    let found = repo.find_by_id("abc12345").await.unwrap();
    assert_eq!(found, Some(created));
    assert!(repo.find_by_id("missing1").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_duplicate_id_conflicts(pool: PgPool) {
    let owner = create_owner(&pool, "alice").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("dup00001", owner)).await.unwrap();
    let result = repo.create(new_link("dup00001", owner)).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_increment_clicks(pool: PgPool) {
    let owner = create_owner(&pool, "alice").await;
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("clk00001", owner)).await.unwrap();

    let first = repo.increment_clicks("clk00001").await.unwrap().unwrap();
    let second = repo.increment_clicks("clk00001").await.unwrap().unwrap();

    assert_eq!(first.clicks, 1);
    assert_eq!(second.clicks, 2);
    assert!(repo.increment_clicks("missing1").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_increments_not_lost(pool: PgPool) {
    let owner = create_owner(&pool, "alice").await;
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    repo.create(new_link("race0001", owner)).await.unwrap();

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_clicks("race0001").await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let link = repo.find_by_id("race0001").await.unwrap().unwrap();
    assert_eq!(link.clicks, 20);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_by_owner(pool: PgPool) {
    let alice = create_owner(&pool, "alice").await;
    let bob = create_owner(&pool, "bob").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("alice001", alice)).await.unwrap();
    repo.create(new_link("alice002", alice)).await.unwrap();
    repo.create(new_link("bob00001", bob)).await.unwrap();

    let links = repo.list_by_owner(alice).await.unwrap();

    assert_eq!(links.len(), 2);
    assert!(links.iter().all(|l| l.owner_id == alice));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_and_delete(pool: PgPool) {
    let owner = create_owner(&pool, "alice").await;
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_link("edit0001", owner)).await.unwrap();

    let updated = repo
        .update("edit0001", "https://example.org", "Renamed")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.original_url, "https://example.org");
    assert_eq!(updated.title, "Renamed");

    assert!(repo.delete("edit0001").await.unwrap());
    assert!(!repo.delete("edit0001").await.unwrap());
    assert!(
        repo.update("edit0001", "https://x", "x")
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_totals_and_ping(pool: PgPool) {
    let owner = create_owner(&pool, "alice").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert_eq!(repo.totals().await.unwrap(), (0, 0));

    repo.create(new_link("tot00001", owner)).await.unwrap();
    repo.create(new_link("tot00002", owner)).await.unwrap();
    repo.increment_clicks("tot00001").await.unwrap();

    assert_eq!(repo.totals().await.unwrap(), (2, 1));
    repo.ping().await.unwrap();
}
