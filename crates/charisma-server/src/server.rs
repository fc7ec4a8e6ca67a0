//! Server lifecycle
//!
//! ```text
//! load config → init logging → scan → register → validate graph
//!     → validate routes → launch HTTP → (shutdown) → teardown
//! ```

use charisma_domain::constants::TOKENS_SERVICE_KEY;
use charisma_domain::error::{Error, Result};
use charisma_domain::ports::{TokenKind, TokenService};
use charisma_domain::value_objects::Claims;
use charisma_infrastructure::config::AppConfig;
use charisma_infrastructure::di::build_container;
use rocket::{Build, Rocket};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::auth::AuthFairing;
use crate::constants::SERVER_IDENT;
use crate::handle::ContainerHandle;
use crate::health::{error_catchers, health_routes};
use crate::routes::{RouteSpec, ROUTE_TABLES, controller_routes, validate_routes};

/// Assemble the Rocket application over a container handle
pub fn build_rocket(
    config: &AppConfig,
    handle: ContainerHandle,
    tables: &[&[RouteSpec]],
) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", config.server.host.clone()))
        .merge(("port", config.server.port))
        .merge(("ident", SERVER_IDENT))
        .merge(("log_level", "critical"))
        .merge(("shutdown.grace", config.server.shutdown_grace_secs));

    rocket::custom(figment)
        .manage(handle)
        .attach(AuthFairing::from_config(&config.auth))
        .mount("/", health_routes())
        .mount("/", controller_routes(tables))
        .register("/", error_catchers())
}

/// Build the container and check the route tables against it
pub fn prepare(config: &AppConfig) -> Result<ContainerHandle> {
    let container = build_container(config)?;
    validate_routes(&container, ROUTE_TABLES)?;
    Ok(ContainerHandle::new(container))
}

/// Build and validate the container, then serve until shutdown
///
/// The container is torn down after the server stops, whether it stopped
/// cleanly or not.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let handle = prepare(config).inspect_err(|e| {
        if e.is_startup_fatal() {
            error!(error = %e, "Startup aborted");
        }
    })?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        "Starting HTTP server"
    );
    let launched = build_rocket(config, handle.clone(), ROUTE_TABLES)
        .launch()
        .await;

    handle.load().teardown().await;
    match launched {
        Ok(_) => {
            info!("HTTP server stopped");
            Ok(())
        }
        Err(e) => Err(Error::infrastructure(format!("HTTP server failed: {e}"))),
    }
}

/// Access and refresh credentials for one subject
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedTokens {
    /// Short-lived access credential
    pub access_token: String,
    /// Long-lived refresh credential
    pub refresh_token: String,
}

/// Parse extra claims given as a JSON object
pub fn parse_claims(raw: Option<&str>) -> Result<Claims> {
    match raw {
        None => Ok(Claims::new()),
        Some(raw) => match serde_json::from_str::<Value>(raw)? {
            Value::Object(claims) => Ok(claims),
            _ => Err(Error::invalid_argument("claims must be a JSON object")),
        },
    }
}

/// Issue a credential pair with the configured token service
pub async fn issue_tokens(config: &AppConfig, subject: &str, mut claims: Claims) -> Result<IssuedTokens> {
    if subject.trim().is_empty() {
        return Err(Error::invalid_argument("subject cannot be empty"));
    }
    claims.insert("sub".to_string(), Value::String(subject.to_string()));

    let container = build_container(config)?;
    let issued = container
        .resolve_as::<dyn TokenService>(TOKENS_SERVICE_KEY)
        .and_then(|tokens| {
            Ok(IssuedTokens {
                access_token: tokens.issue(TokenKind::Access, claims.clone())?,
                refresh_token: tokens.issue(TokenKind::Refresh, claims)?,
            })
        });
    container.teardown().await;
    issued
}
