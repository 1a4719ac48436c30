//! Unit tests for the auto-discovery cache

use std::sync::Arc;

use relay_application::routing::AutoLoader;

use crate::support::{CountingLoader, StubProvider};

#[tokio::test]
async fn test_successful_load_is_cached() {
    let loader = CountingLoader::new(vec![("acme", StubProvider::completion("acme"))]);
    let auto = AutoLoader::new(loader.clone());

    let first = auto.discover("acme").await.unwrap();
    let second = auto.discover("acme").await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(auto.is_loaded("acme"));
    assert_eq!(loader.loads(), 1);
}

#[tokio::test]
async fn test_missing_provider_is_negatively_cached() {
    let loader = CountingLoader::new(Vec::new());
    let auto = AutoLoader::new(loader.clone());

    assert!(auto.discover("ghost").await.is_none());
    assert!(auto.discover("ghost").await.is_none());

    assert!(auto.is_failed("ghost"));
    assert_eq!(loader.loads(), 1);
}

#[tokio::test]
async fn test_load_error_is_negatively_cached() {
    let loader = CountingLoader::with_broken(Vec::new(), &["broken"]);
    let auto = AutoLoader::new(loader.clone());

    assert!(auto.discover("broken").await.is_none());
    assert!(auto.discover("broken").await.is_none());

    assert_eq!(loader.loads(), 1);
}

#[tokio::test]
async fn test_concurrent_discovery_loads_once() {
    let loader = CountingLoader::new(vec![("acme", StubProvider::completion("acme"))]);
    let auto = Arc::new(AutoLoader::new(loader.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let auto = Arc::clone(&auto);
            tokio::spawn(async move { auto.discover("acme").await.is_some() })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    assert_eq!(loader.loads(), 1);
}

#[test]
fn test_shared_instance_is_process_wide() {
    assert!(Arc::ptr_eq(&AutoLoader::shared(), &AutoLoader::shared()));
}
