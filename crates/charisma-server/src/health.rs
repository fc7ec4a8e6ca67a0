//! Health, liveness and fallback error routes

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Catcher, Request, Route, State, catch, catchers, get, routes};
use serde_json::{Value, json};

use crate::handle::ContainerHandle;

/// Container status; 503 once the container is torn down
#[get("/health")]
fn health(handle: &State<ContainerHandle>) -> (Status, Json<Value>) {
    let container = handle.load();
    let (status, label) = if container.is_closed() {
        (Status::ServiceUnavailable, "closed")
    } else {
        (Status::Ok, "ok")
    };
    (
        status,
        Json(json!({
            "status": label,
            "registered": container.keys().len(),
            "resolved": container.resolved_count(),
        })),
    )
}

/// Process liveness
#[get("/live")]
fn live() -> Json<Value> {
    Json(json!({ "status": "alive" }))
}

#[catch(default)]
fn json_catcher(status: Status, _req: &Request<'_>) -> (Status, Json<Value>) {
    (
        status,
        Json(json!({ "error": status.reason().unwrap_or("Unknown error") })),
    )
}

/// `/health` and `/live`
pub fn health_routes() -> Vec<Route> {
    routes![health, live]
}

/// Default catcher answering unmatched requests with a JSON error
pub fn error_catchers() -> Vec<Catcher> {
    catchers![json_catcher]
}
