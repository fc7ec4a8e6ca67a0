//! Roles controller flows

use charisma_application::dispatch::{Controller, RequestContext};
use charisma_domain::error::Error;
use charisma_domain::ports::CacheProvider;
use serde_json::{Value, json};

use crate::support::Fixture;

fn create_body(name: &str) -> Value {
    json!({
        "name": name,
        "createdBy": "user-1",
        "permissions": ["roles:read"],
        "businessId": "biz-1",
    })
}

async fn create(controller: &impl Controller, name: &str) -> Value {
    let reply = controller
        .handle(
            "createRole",
            RequestContext::new().with_body(create_body(name)),
        )
        .await
        .unwrap();
    assert_eq!(reply.status, 201);
    reply.body.unwrap()
}

#[tokio::test]
async fn test_create_then_get_is_cached() {
    let fixture = Fixture::new();
    let controller = fixture.roles_controller();
    let role = create(&controller, "admin").await;
    let id = role["id"].as_str().unwrap();
    assert_eq!(role["status"], "active");
    assert_eq!(role["createdBy"], "user-1");

    let reply = controller
        .handle("getRoleById", RequestContext::new().with_param("id", id))
        .await
        .unwrap();
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body.unwrap()["name"], "admin");
    assert!(
        fixture
            .cache
            .exists(&format!("roles:single:{id}"))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_duplicate_name_conflicts() {
    let fixture = Fixture::new();
    let controller = fixture.roles_controller();
    create(&controller, "admin").await;

    let err = controller
        .handle(
            "createRole",
            RequestContext::new().with_body(create_body("admin")),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict { .. }));
}

#[tokio::test]
async fn test_invalid_body_rejected() {
    let controller = Fixture::new().roles_controller();
    for body in [
        json!({"name": "a", "createdBy": "u"}),
        json!({"name": "admin", "createdBy": "u", "permissions": [" "]}),
        json!({"name": "admin", "createdBy": "u", "unexpected": true}),
    ] {
        let err = controller
            .handle("createRole", RequestContext::new().with_body(body))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }), "{err}");
    }
}

#[tokio::test]
async fn test_missing_role_is_404() {
    let controller = Fixture::new().roles_controller();
    for method in ["getRoleById", "deleteRole", "disableRole"] {
        let reply = controller
            .handle(method, RequestContext::new().with_param("id", "nope"))
            .await
            .unwrap();
        assert_eq!(reply.status, 404, "{method}");
        assert_eq!(reply.body.unwrap()["error"], "Role not found");
    }
}

#[tokio::test]
async fn test_write_invalidates_cached_lists() {
    let fixture = Fixture::new();
    let controller = fixture.roles_controller();
    create(&controller, "admin").await;
    fixture.queue.run_all().await;

    let list = controller
        .handle("getAllRoles", RequestContext::new())
        .await
        .unwrap()
        .body
        .unwrap();
    assert_eq!(list["roles"].as_array().unwrap().len(), 1);
    assert_eq!(list["pagination"]["total"], 1);
    assert_eq!(fixture.cache.size().await.unwrap(), 1);

    create(&controller, "editor").await;
    // Invalidation runs in the background, so the stale list is still served
    assert_eq!(fixture.queue.pending(), 1);
    assert_eq!(fixture.queue.run_all().await, vec!["roles.create"]);

    let list = controller
        .handle("getAllRoles", RequestContext::new())
        .await
        .unwrap()
        .body
        .unwrap();
    assert_eq!(list["roles"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_rename_invalidates_old_name_key() {
    let fixture = Fixture::new();
    let controller = fixture.roles_controller();
    let role = create(&controller, "admin").await;
    let id = role["id"].as_str().unwrap();

    controller
        .handle(
            "getRoleByName",
            RequestContext::new().with_param("name", "admin"),
        )
        .await
        .unwrap();
    assert!(fixture.cache.exists("roles:name:admin").await.unwrap());

    let reply = controller
        .handle(
            "updateRole",
            RequestContext::new()
                .with_param("id", id)
                .with_body(json!({"name": "superuser"})),
        )
        .await
        .unwrap();
    assert_eq!(reply.body.unwrap()["name"], "superuser");
    fixture.queue.run_all().await;
    assert!(!fixture.cache.exists("roles:name:admin").await.unwrap());

    let old = controller
        .handle(
            "getRoleByName",
            RequestContext::new().with_param("name", "admin"),
        )
        .await
        .unwrap();
    assert_eq!(old.status, 404);
}

#[tokio::test]
async fn test_permissions_and_filtered_lists() {
    let fixture = Fixture::new();
    let controller = fixture.roles_controller();
    let role = create(&controller, "auditor").await;
    create(&controller, "viewer").await;
    let id = role["id"].as_str().unwrap();

    let reply = controller
        .handle(
            "updateRolePermissions",
            RequestContext::new()
                .with_param("id", id)
                .with_body(json!({"permissions": ["audit:read", "audit:export"]})),
        )
        .await
        .unwrap();
    assert_eq!(reply.body.unwrap()["permissions"][1], "audit:export");

    let by_permission = controller
        .handle(
            "getRolesByPermission",
            RequestContext::new().with_param("permission", "audit:read"),
        )
        .await
        .unwrap()
        .body
        .unwrap();
    assert_eq!(by_permission["roles"][0]["name"], "auditor");
    assert_eq!(by_permission["pagination"]["total"], 1);

    let by_business = controller
        .handle(
            "getRolesByBusinessId",
            RequestContext::new().with_param("businessId", "biz-1"),
        )
        .await
        .unwrap()
        .body
        .unwrap();
    assert_eq!(by_business["pagination"]["total"], 2);

    let by_creator = controller
        .handle(
            "getRolesByCreatedBy",
            RequestContext::new().with_param("userId", "someone-else"),
        )
        .await
        .unwrap()
        .body
        .unwrap();
    assert_eq!(by_creator["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_disable_and_delete() {
    let fixture = Fixture::new();
    let controller = fixture.roles_controller();
    let role = create(&controller, "temp").await;
    let id = role["id"].as_str().unwrap();

    let disabled = controller
        .handle("disableRole", RequestContext::new().with_param("id", id))
        .await
        .unwrap();
    assert_eq!(disabled.body.unwrap()["status"], "disabled");

    let deleted = controller
        .handle("deleteRole", RequestContext::new().with_param("id", id))
        .await
        .unwrap();
    assert_eq!(deleted.status, 204);
    assert!(deleted.body.is_none());
}

#[tokio::test]
async fn test_list_query_validation() {
    let controller = Fixture::new().roles_controller();
    for (key, value) in [("limit", "500"), ("page", "0"), ("sortBy", "colour")] {
        let err = controller
            .handle("getAllRoles", RequestContext::new().with_query(key, value))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }), "{key}={value}");
    }
}

#[tokio::test]
async fn test_unknown_method() {
    let controller = Fixture::new().roles_controller();
    let err = controller
        .handle("launchRockets", RequestContext::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MethodNotFound { .. }));
}
