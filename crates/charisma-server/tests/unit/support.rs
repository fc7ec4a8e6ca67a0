//! Shared fixtures for server tests

use charisma_domain::constants::TOKENS_SERVICE_KEY;
use charisma_domain::ports::{TokenKind, TokenService};
use charisma_domain::value_objects::Claims;
use charisma_infrastructure::config::AppConfig;
use charisma_infrastructure::di::build_container;
use charisma_server::routes::RouteSpec;
use charisma_server::{ContainerHandle, ROUTE_TABLES, build_rocket};
use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::Client;
use serde_json::{Value, json};

pub const ACCESS_SECRET: &str = "access-secret-that-is-at-least-32-chars";
pub const REFRESH_SECRET: &str = "refresh-secret-that-is-at-least-32-chars";

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt.access_secret = ACCESS_SECRET.to_string();
    config.auth.jwt.refresh_secret = REFRESH_SECRET.to_string();
    config
}

pub fn handle_for(config: &AppConfig) -> ContainerHandle {
    ContainerHandle::new(build_container(config).expect("container builds"))
}

pub async fn client_with(
    config: &AppConfig,
    tables: &[&[RouteSpec]],
) -> (Client, ContainerHandle) {
    let handle = handle_for(config);
    let rocket = build_rocket(config, handle.clone(), tables);
    let client = Client::tracked(rocket).await.expect("valid rocket instance");
    (client, handle)
}

pub async fn client() -> (Client, ContainerHandle) {
    client_with(&test_config(), ROUTE_TABLES).await
}

pub fn issue(handle: &ContainerHandle, kind: TokenKind, subject: &str) -> String {
    let mut claims = Claims::new();
    claims.insert("sub".to_string(), json!(subject));
    handle
        .load()
        .resolve_as::<dyn TokenService>(TOKENS_SERVICE_KEY)
        .expect("token service resolves")
        .issue(kind, claims)
        .expect("token issues")
}

pub fn bearer(token: &str) -> Header<'static> {
    Header::new("Authorization", format!("Bearer {token}"))
}

pub async fn json_body(response: rocket::local::asynchronous::LocalResponse<'_>) -> Value {
    response.into_json::<Value>().await.expect("JSON body")
}

/// Create a role through the API and return its id
pub async fn create_role(client: &Client, name: &str) -> String {
    let response = client
        .post("/roles")
        .header(ContentType::JSON)
        .body(json!({ "name": name, "createdBy": "seed-user" }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Created);
    json_body(response).await["id"]
        .as_str()
        .expect("role id")
        .to_string()
}

/// Create a user through the API and return its id
pub async fn create_user(client: &Client, role_id: &str) -> String {
    let response = client
        .post("/users")
        .header(ContentType::JSON)
        .body(
            json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "phone": "+1 555 0100",
                "role": role_id,
            })
            .to_string(),
        )
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Created);
    json_body(response).await["id"]
        .as_str()
        .expect("user id")
        .to_string()
}
