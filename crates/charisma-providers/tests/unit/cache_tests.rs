//! Tests for the Moka cache provider

use std::time::Duration;

use charisma_domain::ports::{CacheEntryConfig, CacheProvider};
use charisma_providers::cache::MokaCacheProvider;

#[tokio::test]
async fn test_set_get_delete() {
    let cache = MokaCacheProvider::new();
    cache
        .set_json("roles:single:1", r#"{"name":"admin"}"#, CacheEntryConfig::new())
        .await
        .unwrap();

    let value = cache.get_json("roles:single:1").await.unwrap();
    assert_eq!(value.as_deref(), Some(r#"{"name":"admin"}"#));
    assert!(cache.exists("roles:single:1").await.unwrap());

    assert!(cache.delete("roles:single:1").await.unwrap());
    assert!(!cache.delete("roles:single:1").await.unwrap());
    assert_eq!(cache.get_json("roles:single:1").await.unwrap(), None);
}

#[tokio::test]
async fn test_entry_expires_after_ttl() {
    let cache = MokaCacheProvider::new();
    cache
        .set_json(
            "short",
            "1",
            CacheEntryConfig::new().with_ttl(Duration::from_millis(50)),
        )
        .await
        .unwrap();
    cache
        .set_json("long", "2", CacheEntryConfig::new().with_ttl_secs(60))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(cache.get_json("short").await.unwrap(), None);
    assert_eq!(cache.get_json("long").await.unwrap().as_deref(), Some("2"));
}

#[tokio::test]
async fn test_zero_ttl_rejected() {
    let cache = MokaCacheProvider::new();
    let err = cache
        .set_json("k", "1", CacheEntryConfig::new().with_ttl(Duration::ZERO))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("zero TTL"));
}

#[tokio::test]
async fn test_delete_pattern_only_matching_keys() {
    let cache = MokaCacheProvider::new();
    for key in [
        "roles:list:1:10",
        "roles:list:2:10",
        "roles:business:b1:1:10",
        "roles:single:r1",
    ] {
        cache
            .set_json(key, "[]", CacheEntryConfig::new())
            .await
            .unwrap();
    }

    let deleted = cache.delete_pattern("roles:list:*").await.unwrap();
    assert_eq!(deleted, 2);
    assert!(!cache.exists("roles:list:1:10").await.unwrap());
    assert!(cache.exists("roles:business:b1:1:10").await.unwrap());
    assert!(cache.exists("roles:single:r1").await.unwrap());
}

#[tokio::test]
async fn test_stats_and_clear() {
    let cache = MokaCacheProvider::new();
    cache
        .set_json("a", "1", CacheEntryConfig::new())
        .await
        .unwrap();
    let _ = cache.get_json("a").await.unwrap();
    let _ = cache.get_json("missing").await.unwrap();

    let stats = cache.stats().await.unwrap();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.entries, 1);
    assert!((stats.hit_rate - 0.5).abs() < f64::EPSILON);

    cache.clear().await.unwrap();
    assert_eq!(cache.size().await.unwrap(), 0);
    assert_eq!(cache.provider_name(), "moka");
}
