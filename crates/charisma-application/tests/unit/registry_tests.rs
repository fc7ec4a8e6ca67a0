//! Tests for instances, constructibles and collaborators

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use charisma_application::registry::{Collaborators, Constructible, Instance, list_modules};
use charisma_domain::error::Error;

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

trait Counter: Send + Sync {
    fn count(&self) -> usize;
}

struct English;

impl Greeter for English {
    fn greet(&self) -> String {
        "hello".into()
    }
}

impl Counter for English {
    fn count(&self) -> usize {
        5
    }
}

#[test]
fn test_instance_exposes_registered_views_only() {
    let english = Arc::new(English);
    let instance =
        Instance::of::<dyn Greeter>(english.clone()).with_view::<dyn Counter>(english);

    assert_eq!(instance.get::<dyn Greeter>().unwrap().greet(), "hello");
    assert_eq!(instance.get::<dyn Counter>().unwrap().count(), 5);
    assert!(instance.get::<English>().is_none());
    assert_eq!(instance.type_names().len(), 2);
}

#[test]
fn test_instance_clones_share_identity() {
    let a = Instance::of(Arc::new(English));
    let b = a.clone();
    let c = Instance::of(Arc::new(English));

    assert!(a.ptr_eq(&b));
    assert!(!a.ptr_eq(&c));
    assert!(Arc::ptr_eq(
        &a.get::<English>().unwrap(),
        &b.get::<English>().unwrap()
    ));
}

#[tokio::test]
async fn test_release_hook_runs() {
    let released = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&released);
    let instance = Instance::of(Arc::new(English)).with_release(move || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });

    let hook = instance.release_hook().unwrap();
    hook().await.unwrap();
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn test_collaborators_lookup_errors() {
    let mut deps = Collaborators::new();
    deps.insert("greeter", Instance::of::<dyn Greeter>(Arc::new(English)));

    assert_eq!(deps.get::<dyn Greeter>("greeter").unwrap().greet(), "hello");
    assert!(matches!(
        deps.get::<dyn Greeter>("missing").err().unwrap(),
        Error::UnknownKey { .. }
    ));
    assert!(matches!(
        deps.get::<dyn Counter>("greeter").err().unwrap(),
        Error::TypeMismatch { .. }
    ));
}

#[test]
fn test_constructible_declarations() {
    let constructible = Constructible::new(|deps| {
        let greeter = deps.get::<dyn Greeter>("greeter")?;
        Ok(Instance::of(Arc::new(greeter.greet())))
    })
    .depends_on(&["greeter"])
    .with_methods(&["greet"]);

    assert_eq!(constructible.dependencies(), ["greeter".to_string()]);
    assert!(constructible.declares_method("greet"));
    assert!(!constructible.declares_method("shout"));

    let mut deps = Collaborators::new();
    deps.insert("greeter", Instance::of::<dyn Greeter>(Arc::new(English)));
    let built = constructible.construct(&deps).unwrap();
    assert_eq!(*built.get::<String>().unwrap(), "hello");
}

#[test]
fn test_value_constructible_yields_same_instance() {
    let instance = Instance::of(Arc::new(42_u32));
    let constructible = Constructible::value(instance.clone());
    let built = constructible.construct(&Collaborators::new()).unwrap();
    assert!(built.ptr_eq(&instance));
    assert!(constructible.dependencies().is_empty());
}

#[test]
fn test_application_modules_linked() {
    let modules = list_modules();
    for stem in [
        "roles_service.rs",
        "roles_controller.rs",
        "users_service.rs",
        "users_controller.rs",
    ] {
        assert!(
            modules.iter().any(|m| m.ends_with(stem)),
            "{stem} is not registered"
        );
    }
}
