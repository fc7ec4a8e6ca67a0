//! Dispatch handler tests

use charisma_domain::constants::{CACHE_SERVICE_KEY, ROLES_CONTROLLER_KEY};
use charisma_server::ROUTE_TABLES;
use charisma_server::routes::{ROLE_ROUTES, RouteSpec};
use rocket::http::{ContentType, Method, Status};
use serde_json::json;

use crate::support::{client, client_with, create_role, handle_for, json_body, test_config};

const BROKEN_ROUTES: &[RouteSpec] = &[
    RouteSpec::new(Method::Get, "/ghosts", "ghostController", "list"),
    RouteSpec::new(Method::Get, "/not-a-controller", CACHE_SERVICE_KEY, "list"),
    RouteSpec::new(Method::Get, "/explode", ROLES_CONTROLLER_KEY, "explode"),
];

#[rocket::async_test]
async fn test_list_roles() {
    let (client, _) = client().await;
    create_role(&client, "Admin").await;

    let response = client.get("/roles?limit=5").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response).await;
    assert_eq!(body["roles"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["pagination"]["limit"], json!(5));
    assert_eq!(body["pagination"]["total"], json!(1));
}

#[rocket::async_test]
async fn test_path_parameters_are_decoded() {
    let (client, _) = client().await;
    let id = create_role(&client, "Team Lead").await;

    let response = client.get("/roles/name/Team%20Lead").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(json_body(response).await["id"], json!(id));

    let response = client.get(format!("/roles/{id}")).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(json_body(response).await["name"], json!("Team Lead"));
}

#[rocket::async_test]
async fn test_missing_role_is_404() {
    let (client, _) = client().await;
    let response = client.get("/roles/does-not-exist").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(json_body(response).await, json!({ "error": "Role not found" }));
}

#[rocket::async_test]
async fn test_write_status_codes() {
    let (client, _) = client().await;
    let id = create_role(&client, "Editor").await;

    let response = client
        .post("/roles")
        .header(ContentType::JSON)
        .body(json!({ "name": "Editor", "createdBy": "seed-user" }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Conflict);

    let response = client
        .patch(format!("/roles/{id}/permissions"))
        .header(ContentType::JSON)
        .body(json!({ "permissions": ["roles:read"] }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        json_body(response).await["permissions"],
        json!(["roles:read"])
    );

    let response = client.delete(format!("/roles/{id}")).dispatch().await;
    assert_eq!(response.status(), Status::NoContent);
    assert!(response.body().is_none());

    let response = client.delete(format!("/roles/{id}")).dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}

#[rocket::async_test]
async fn test_invalid_input_is_400() {
    let (client, _) = client().await;

    let response = client
        .post("/roles")
        .header(ContentType::JSON)
        .body(json!({ "name": "A", "createdBy": "seed-user" }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);

    let response = client
        .post("/roles")
        .header(ContentType::JSON)
        .body("{ not json")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);

    let response = client.post("/roles").dispatch().await;
    assert_eq!(response.status(), Status::BadRequest);

    let response = client.get("/roles?page=0").dispatch().await;
    assert_eq!(response.status(), Status::BadRequest);

    let response = client.get("/roles?limit=abc").dispatch().await;
    assert_eq!(response.status(), Status::BadRequest);
}

#[rocket::async_test]
async fn test_unregistered_route_key_fails_only_that_request() {
    let tables: &[&[RouteSpec]] = &[ROLE_ROUTES, BROKEN_ROUTES];
    let (client, _) = client_with(&test_config(), tables).await;

    for path in ["/ghosts", "/not-a-controller", "/explode"] {
        let response = client.get(path).dispatch().await;
        assert_eq!(response.status(), Status::InternalServerError, "{path}");
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Internal server error" })
        );
    }

    let response = client.get("/roles").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
}

#[rocket::async_test]
async fn test_swapped_container_observed_by_routes() {
    let config = test_config();
    let (client, handle) = client_with(&config, ROUTE_TABLES).await;
    create_role(&client, "Admin").await;

    let previous = handle.swap(handle_for(&config).load());
    previous.teardown().await;

    let response = client.get("/roles").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(json_body(response).await["pagination"]["total"], json!(0));
}

#[rocket::async_test]
async fn test_unknown_path_uses_json_catcher() {
    let (client, _) = client().await;
    let response = client.get("/nowhere").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(json_body(response).await, json!({ "error": "Not Found" }));
}
