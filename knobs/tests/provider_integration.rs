//! Integration tests for qualifier resolution and configurable providers.
//!
//! A registry binds several configurations loaded from files; providers then
//! pick theirs by qualifier and fall back to less specific bindings.

mod common;

use common::fixture_path;
use std::sync::Arc;
use std::thread;

use knobs::config::{ConfigLoader, ConfigurationsBuilder};
use knobs::provider::{
    resolve, ConfigurableProvider, ConfigurationsLookup, ConfigurationsRegistry, Marker,
    Qualifier,
};
use knobs::{Configurations, Error};

const CACHE: Marker = Marker::from_static("Cache");

fn registry() -> ConfigurationsRegistry {
    let json = ConfigLoader::load_file(&fixture_path("app.json")).unwrap();
    let yaml = ConfigLoader::load_file(&fixture_path("app.yaml")).unwrap();

    let mut registry = ConfigurationsRegistry::new();
    registry
        .bind(Qualifier::Unqualified, json.clone())
        .bind_named("database", json.extract("database"))
        .bind_marker(CACHE, yaml);
    registry
}

#[derive(Debug)]
struct Pool {
    url: String,
    size: i64,
}

fn pool_provider() -> ConfigurableProvider<Pool> {
    ConfigurableProvider::new("PoolProvider", |configurations: &Configurations| {
        Ok(Pool {
            url: configurations.get_string("url", "sqlite::memory:").to_string(),
            size: configurations.get_integer("pool.size")?,
        })
    })
}

#[test]
fn test_resolution_table() {
    let registry = registry();

    let named = resolve(&registry, &Qualifier::named("database")).unwrap();
    assert_eq!(named.get("url"), Some("postgres://localhost/app"));

    let unbound_name = resolve(&registry, &Qualifier::named("missing")).unwrap();
    assert_eq!(unbound_name.get("server.host"), Some("localhost"));

    let marker = resolve(&registry, &Qualifier::Marker(CACHE)).unwrap();
    assert_eq!(marker.get("server.host"), Some("yaml.example.com"));

    let annotated = resolve(&registry, &Qualifier::annotated(CACHE, "sessions")).unwrap();
    assert_eq!(annotated.get("server.host"), Some("yaml.example.com"));

    let nothing = resolve(&ConfigurationsRegistry::new(), &Qualifier::named("x")).unwrap();
    assert!(nothing.is_empty());
}

#[test]
fn test_provider_uses_named_section() {
    let provider = pool_provider().with_name("database").unwrap();
    let pool = provider.provide(&registry()).unwrap();

    assert_eq!(pool.url, "postgres://localhost/app");
    assert_eq!(pool.size, 10);
}

#[test]
fn test_provider_falls_back_and_reports_factory_failure() {
    // The unqualified binding has no top-level `pool.size`.
    let provider = pool_provider().with_name("unbound").unwrap();
    let err = provider.provide(&registry()).unwrap_err();

    assert!(matches!(err, Error::Provision { .. }));
    assert!(err.to_string().contains("PoolProvider"));
}

#[test]
fn test_explicit_configurations_skip_resolution() {
    let provider = pool_provider().with_configurations(
        ConfigurationsBuilder::new()
            .put("url", "mysql://override")
            .put("pool.size", "2")
            .build(),
    );
    let pool = provider.provide(&ConfigurationsRegistry::new()).unwrap();

    assert_eq!(pool.url, "mysql://override");
    assert_eq!(pool.size, 2);
}

#[test]
fn test_singleton_shared_across_threads() {
    let provider = Arc::new(pool_provider().with_name("database").unwrap());
    let registry = Arc::new(registry());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let provider = Arc::clone(&provider);
            let registry = Arc::clone(&registry);
            thread::spawn(move || provider.provide(&*registry).unwrap())
        })
        .collect();
    let pools: Vec<Arc<Pool>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for pool in &pools[1..] {
        assert!(Arc::ptr_eq(&pools[0], pool));
    }
}

/// A registry that refuses every lookup.
struct Offline;

#[derive(Debug, thiserror::Error)]
#[error("registry offline")]
struct OfflineError;

impl ConfigurationsLookup for Offline {
    type Error = OfflineError;

    fn lookup(&self, _: &Qualifier) -> Result<Option<Configurations>, OfflineError> {
        Err(OfflineError)
    }
}

#[test]
fn test_lookup_failure_becomes_provision_error() {
    let err = pool_provider().provide(&Offline).unwrap_err();
    assert!(matches!(err, Error::Provision { .. }));
    assert!(err.to_string().contains("registry offline"));
}
