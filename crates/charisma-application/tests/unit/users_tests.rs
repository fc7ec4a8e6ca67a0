//! Users controller flows

use charisma_application::dispatch::{Controller, RequestContext};
use charisma_application::modules::application::users::UsersController;
use charisma_domain::error::Error;
use charisma_domain::ports::{CacheProvider, StorageProvider};
use charisma_domain::value_objects::RequestIdentity;
use serde_json::{Value, json};

use crate::support::Fixture;

async fn setup() -> (Fixture, UsersController, String) {
    let fixture = Fixture::new();
    let role = fixture
        .storage
        .roles()
        .insert(charisma_domain::entities::Role::new("member"))
        .await
        .unwrap();
    let controller = fixture.users_controller();
    (fixture, controller, role.id)
}

fn identity(subject: &str) -> RequestIdentity {
    let mut claims = serde_json::Map::new();
    claims.insert("sub".into(), json!(subject));
    RequestIdentity::from_claims(claims).unwrap()
}

async fn create(controller: &UsersController, body: Value) -> Value {
    let reply = controller
        .handle("createUser", RequestContext::new().with_body(body))
        .await
        .unwrap();
    assert_eq!(reply.status, 201);
    reply.body.unwrap()
}

fn user_body(role: &str, phone: &str) -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "Ada@Example.com",
        "phone": phone,
        "password": "s3cret-pw",
        "role": role,
        "address": {
            "city": "London",
            "location": {"type": "Point", "coordinates": [-0.1276, 51.5072]}
        }
    })
}

#[tokio::test]
async fn test_create_user_queues_side_effects() {
    let (fixture, controller, role) = setup().await;
    let user = create(&controller, user_body(&role, "+44 20 7946 0000")).await;

    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["status"], "pending");
    assert!(user.get("password").is_none());

    // Nothing is sent until the background work runs
    assert_eq!(fixture.emails.sent(), 0);
    assert_eq!(fixture.queue.run_all().await, vec!["users.create"]);
    assert_eq!(fixture.emails.sent(), 1);
    assert_eq!(fixture.notifications.sent(), 1);

    let stored = fixture
        .storage
        .users()
        .find_by_id(user["id"].as_str().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(stored.password.unwrap().starts_with("$argon2"));
}

#[tokio::test]
async fn test_create_user_requires_existing_role() {
    let (_fixture, controller, _role) = setup().await;
    let err = controller
        .handle(
            "createUser",
            RequestContext::new().with_body(user_body("no-such-role", "+15550001")),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_create_user_validation() {
    let (_fixture, controller, role) = setup().await;
    let mut bad_phone = user_body(&role, "call me");
    let mut bad_coords = user_body(&role, "+15550001");
    bad_coords["address"]["location"]["coordinates"] = json!([200.0, 10.0]);
    let mut short_password = user_body(&role, "+15550001");
    short_password["password"] = json!("123");
    bad_phone["email"] = json!("ada@example.com");

    for body in [bad_phone, bad_coords, short_password] {
        let err = controller
            .handle("createUser", RequestContext::new().with_body(body))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }), "{err}");
    }
}

#[tokio::test]
async fn test_duplicate_phone_conflicts() {
    let (_fixture, controller, role) = setup().await;
    create(&controller, user_body(&role, "+15550001")).await;

    let mut second = user_body(&role, "+15550001");
    second["email"] = json!("other@example.com");
    let err = controller
        .handle("createUser", RequestContext::new().with_body(second))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict { .. }));
}

#[tokio::test]
async fn test_me_requires_identity() {
    let (_fixture, controller, _role) = setup().await;
    for method in ["getMe", "updateMe", "disableMe"] {
        let err = controller
            .handle(method, RequestContext::new().with_body(json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Authentication { .. }), "{method}");
    }
}

#[tokio::test]
async fn test_me_flow() {
    let (fixture, controller, role) = setup().await;
    let user = create(&controller, user_body(&role, "+15550001")).await;
    let id = user["id"].as_str().unwrap();
    fixture.queue.run_all().await;

    let me = controller
        .handle("getMe", RequestContext::new().with_identity(identity(id)))
        .await
        .unwrap();
    assert_eq!(me.body.unwrap()["firstName"], "Ada");
    assert!(fixture.cache.exists(&format!("users:me:{id}")).await.unwrap());

    // Role and status are not self-service fields
    let err = controller
        .handle(
            "updateMe",
            RequestContext::new()
                .with_identity(identity(id))
                .with_body(json!({"role": role})),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let updated = controller
        .handle(
            "updateMe",
            RequestContext::new()
                .with_identity(identity(id))
                .with_body(json!({"firstName": "Augusta"})),
        )
        .await
        .unwrap();
    assert_eq!(updated.body.unwrap()["firstName"], "Augusta");
    fixture.queue.run_all().await;
    assert!(!fixture.cache.exists(&format!("users:me:{id}")).await.unwrap());

    let disabled = controller
        .handle(
            "disableMe",
            RequestContext::new().with_identity(identity(id)),
        )
        .await
        .unwrap();
    assert_eq!(disabled.body.unwrap()["status"], "disabled");
    assert_eq!(fixture.queue.run_all().await, vec!["users.disable_me"]);
    // welcome + account disabled
    assert_eq!(fixture.notifications.sent(), 2);
}

#[tokio::test]
async fn test_get_me_for_deleted_account_is_404() {
    let (_fixture, controller, _role) = setup().await;
    let reply = controller
        .handle(
            "getMe",
            RequestContext::new().with_identity(identity("ghost")),
        )
        .await
        .unwrap();
    assert_eq!(reply.status, 404);
    assert_eq!(reply.body.unwrap()["error"], "User not found");
}

#[tokio::test]
async fn test_list_search_and_geo_filter() {
    let (fixture, controller, role) = setup().await;
    create(&controller, user_body(&role, "+15550001")).await;
    let mut far = user_body(&role, "+15550002");
    far["firstName"] = json!("Grace");
    far["email"] = json!("grace@example.com");
    far["address"]["location"]["coordinates"] = json!([-74.0060, 40.7128]);
    create(&controller, far).await;
    fixture.queue.run_all().await;

    let search = controller
        .handle(
            "getAllUsers",
            RequestContext::new().with_query("searchTerm", "grace"),
        )
        .await
        .unwrap()
        .body
        .unwrap();
    assert_eq!(search["users"][0]["firstName"], "Grace");
    assert_eq!(search["pagination"]["total"], 1);

    let near_london = controller
        .handle(
            "getAllUsers",
            RequestContext::new()
                .with_query("latitude", "51.5")
                .with_query("longitude", "-0.12")
                .with_query("radius", "50"),
        )
        .await
        .unwrap()
        .body
        .unwrap();
    assert_eq!(near_london["pagination"]["total"], 1);
    assert_eq!(near_london["users"][0]["firstName"], "Ada");
}

#[tokio::test]
async fn test_delete_user() {
    let (_fixture, controller, role) = setup().await;
    let user = create(&controller, user_body(&role, "+15550001")).await;
    let id = user["id"].as_str().unwrap();

    let reply = controller
        .handle("deleteUser", RequestContext::new().with_param("id", id))
        .await
        .unwrap();
    assert_eq!(reply.status, 204);

    let again = controller
        .handle("deleteUser", RequestContext::new().with_param("id", id))
        .await
        .unwrap();
    assert_eq!(again.status, 404);
}
