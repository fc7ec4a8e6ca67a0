//! Container tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::Duration;

use charisma_application::registry::{Constructible, Instance};
use charisma_domain::error::Error;
use charisma_infrastructure::di::{Container, Registration};

/// Marker value carried by test instances
#[derive(Debug)]
struct Named(&'static str);

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

impl Greeter for Named {
    fn greet(&self) -> String {
        format!("hello from {}", self.0)
    }
}

fn leaf(key: &'static str) -> Registration {
    Registration::new(
        key,
        format!("test/{key}.rs"),
        Constructible::new(move |_| Ok(Instance::of(Arc::new(Named(key))))),
    )
}

fn node(key: &'static str, deps: &[&str]) -> Registration {
    let names: Vec<String> = deps.iter().map(|d| (*d).to_string()).collect();
    Registration::new(
        key,
        format!("test/{key}.rs"),
        Constructible::new(move |collaborators| {
            for name in &names {
                collaborators.get::<Named>(name)?;
            }
            Ok(Instance::of(Arc::new(Named(key))))
        })
        .depends_on(deps),
    )
}

fn counted(key: &'static str, deps: &[&str], counter: &Arc<AtomicUsize>) -> Registration {
    let counter = Arc::clone(counter);
    Registration::new(
        key,
        format!("test/{key}.rs"),
        Constructible::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Instance::of(Arc::new(Named(key))))
        })
        .depends_on(deps),
    )
}

fn released(key: &'static str, deps: &[&str], log: &Arc<Mutex<Vec<&'static str>>>) -> Registration {
    let log = Arc::clone(log);
    Registration::new(
        key,
        format!("test/{key}.rs"),
        Constructible::new(move |_| {
            let log = Arc::clone(&log);
            Ok(Instance::of(Arc::new(Named(key))).with_release(move || {
                let log = Arc::clone(&log);
                async move {
                    log.lock().unwrap().push(key);
                    Ok(())
                }
            }))
        })
        .depends_on(deps),
    )
}

fn container(batch: Vec<Registration>) -> Container {
    let container = Container::new();
    container.register(batch).unwrap();
    container
}

#[test]
fn test_resolve_returns_same_instance() {
    let c = container(vec![leaf("storageService")]);

    let first = c.resolve("storageService").unwrap();
    let second = c.resolve("storageService").unwrap();
    assert!(first.ptr_eq(&second));
    assert_eq!(c.resolved_count(), 1);
    assert!(c.is_resolved("storageService"));
}

#[test]
fn test_dependencies_injected_by_key() {
    let c = container(vec![
        leaf("storageService"),
        leaf("passwordsService"),
        node("usersService", &["storageService", "passwordsService"]),
    ]);

    let users = c.resolve_as::<Named>("usersService").unwrap();
    assert_eq!(users.0, "usersService");
    assert!(c.is_resolved("storageService"));
    assert!(c.is_resolved("passwordsService"));

    let storage = c.resolve("storageService").unwrap();
    assert!(storage.ptr_eq(&c.resolve("storageService").unwrap()));
}

#[test]
fn test_shared_dependency_constructed_once() {
    let counter = Arc::new(AtomicUsize::new(0));
    let c = container(vec![
        counted("cacheService", &[], &counter),
        node("rolesController", &["cacheService"]),
        node("usersController", &["cacheService"]),
    ]);

    c.resolve("rolesController").unwrap();
    c.resolve("usersController").unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unknown_key() {
    let c = container(vec![leaf("rolesService")]);
    assert!(matches!(
        c.resolve("ghostService"),
        Err(Error::UnknownKey { key }) if key == "ghostService"
    ));
    assert!(!c.contains("ghostService"));
}

#[test]
fn test_unknown_dependency_detected_before_construction() {
    let counter = Arc::new(AtomicUsize::new(0));
    let c = container(vec![counted("rolesService", &["storageService"], &counter)]);

    assert!(matches!(
        c.resolve("rolesService"),
        Err(Error::UnknownKey { key }) if key == "storageService"
    ));
    assert!(c.validate().is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn test_cycle_detected_before_construction() {
    let counter = Arc::new(AtomicUsize::new(0));
    let c = container(vec![
        counted("aService", &["bService"], &counter),
        counted("bService", &["aService"], &counter),
        counted("cService", &["aService"], &counter),
    ]);

    match c.resolve("cService") {
        Err(Error::CircularDependency { cycle }) => {
            assert_eq!(cycle, ["aService", "bService", "aService"]);
        }
        other => panic!("expected a cycle, got {other:?}"),
    }
    assert!(matches!(
        c.validate(),
        Err(Error::CircularDependency { .. })
    ));
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert_eq!(c.resolved_count(), 0);
}

#[test]
fn test_validate_accepts_acyclic_graph() {
    let c = container(vec![
        leaf("storageService"),
        node("rolesService", &["storageService"]),
        node("rolesController", &["rolesService", "storageService"]),
    ]);
    c.validate().unwrap();
    assert_eq!(c.resolved_count(), 0);
}

#[test]
fn test_concurrent_first_resolution_constructs_once() {
    let counter = Arc::new(AtomicUsize::new(0));
    let factory_counter = Arc::clone(&counter);
    let c = container(vec![Registration::new(
        "slowService",
        "test/slow_service.rs",
        Constructible::new(move |_| {
            factory_counter.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(50));
            Ok(Instance::of(Arc::new(Named("slowService"))))
        }),
    )]);

    let instances: Vec<Instance> = thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| scope.spawn(|| c.resolve("slowService").unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert!(instances.windows(2).all(|w| w[0].ptr_eq(&w[1])));
}

#[test]
fn test_resolved_key_readable_while_dependent_builds() {
    let entered = Arc::new(Barrier::new(2));
    let proceed = Arc::new(Barrier::new(2));
    let (factory_entered, factory_proceed) = (Arc::clone(&entered), Arc::clone(&proceed));
    let c = container(vec![
        leaf("storageService"),
        Registration::new(
            "slowService",
            "test/slow_service.rs",
            Constructible::new(move |_| {
                factory_entered.wait();
                factory_proceed.wait();
                Ok(Instance::of(Arc::new(Named("slowService"))))
            })
            .depends_on(&["storageService"]),
        ),
    ]);
    let storage = c.resolve("storageService").unwrap();

    thread::scope(|scope| {
        let slow = scope.spawn(|| c.resolve("slowService").unwrap());
        entered.wait();
        for _ in 0..100 {
            assert!(c.resolve("storageService").unwrap().ptr_eq(&storage));
        }
        assert!(!c.is_resolved("slowService"));
        proceed.wait();
        slow.join().unwrap();
    });
    assert!(c.is_resolved("slowService"));
}

#[test]
fn test_duplicate_key_rejected() {
    let c = Container::new();
    let result = c.register(vec![
        leaf("rolesService"),
        Registration::new(
            "rolesService",
            "other/roles_service.rs",
            Constructible::value(Instance::of(Arc::new(Named("other")))),
        ),
    ]);

    match result {
        Err(Error::DuplicateKey { key, first, second }) => {
            assert_eq!(key, "rolesService");
            assert_eq!(first, "test/rolesService.rs");
            assert_eq!(second, "other/roles_service.rs");
        }
        other => panic!("expected a duplicate key, got {other:?}"),
    }
    assert!(c.keys().is_empty());
}

#[test]
fn test_register_only_once() {
    let c = container(vec![leaf("rolesService")]);
    assert!(matches!(
        c.register(vec![leaf("usersService")]),
        Err(Error::AlreadyRegistered)
    ));
    assert_eq!(c.keys(), ["rolesService"]);
}

#[test]
fn test_value_registration() {
    let c = container(vec![Registration::value(
        "cacheSettings",
        Instance::of(Arc::new(42_u64)),
    )]);
    assert_eq!(*c.resolve_as::<u64>("cacheSettings").unwrap(), 42);
    assert_eq!(
        c.constructible("cacheSettings").unwrap().dependencies(),
        &[] as &[String]
    );
}

#[test]
fn test_resolve_as_views() {
    let c = container(vec![Registration::new(
        "greeterService",
        "test/greeter_service.rs",
        Constructible::new(|_| {
            let named = Arc::new(Named("greeter"));
            Ok(Instance::of(Arc::clone(&named)).with_view::<dyn Greeter>(named))
        }),
    )]);

    let greeter = c.resolve_as::<dyn Greeter>("greeterService").unwrap();
    assert_eq!(greeter.greet(), "hello from greeter");
    assert!(matches!(
        c.resolve_as::<String>("greeterService"),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn test_failing_factory_leaves_key_unresolved() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let factory_attempts = Arc::clone(&attempts);
    let c = container(vec![Registration::new(
        "flakyService",
        "test/flaky_service.rs",
        Constructible::new(move |_| {
            if factory_attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(Error::internal("not yet"))
            } else {
                Ok(Instance::of(Arc::new(Named("flaky"))))
            }
        }),
    )]);

    assert!(c.resolve("flakyService").is_err());
    assert!(!c.is_resolved("flakyService"));
    assert!(c.resolve("flakyService").is_ok());
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_teardown_releases_in_reverse_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let c = container(vec![
        released("storageService", &[], &log),
        released("rolesService", &["storageService"], &log),
        released("rolesController", &["rolesService"], &log),
        released("unusedService", &[], &log),
    ]);

    c.resolve("rolesController").unwrap();
    c.teardown().await;

    assert_eq!(
        *log.lock().unwrap(),
        ["rolesController", "rolesService", "storageService"]
    );
    assert!(c.is_closed());
    assert!(!c.is_resolved("rolesController"));
    assert!(matches!(
        c.resolve("rolesController"),
        Err(Error::ContainerClosed)
    ));

    c.teardown().await;
    assert_eq!(log.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_teardown_continues_after_release_failure() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let c = container(vec![
        released("storageService", &[], &log),
        Registration::new(
            "brokenService",
            "test/broken_service.rs",
            Constructible::new(|_| {
                Ok(Instance::of(Arc::new(Named("broken")))
                    .with_release(|| async { Err(Error::internal("release failed")) }))
            })
            .depends_on(&["storageService"]),
        ),
    ]);

    c.resolve("brokenService").unwrap();
    c.teardown().await;
    assert_eq!(*log.lock().unwrap(), ["storageService"]);
}
