//! Charisma API Server
//!
//! Rocket HTTP layer over the service container.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`auth`] | Bearer authentication fairing and the request identity |
//! | [`dispatch`] | Route handler resolving controllers by registration key |
//! | [`routes`] | Route tables and their startup validation |
//! | [`handle`] | Swappable container handle |
//! | [`health`] | `/health`, `/live` and the JSON fallback catcher |
//! | [`error`] | Error to HTTP status mapping |
//! | [`server`] | Rocket assembly and the serve lifecycle |
//! | [`cli`] | Command line interface |

pub mod auth;
pub mod cli;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod handle;
pub mod health;
pub mod routes;
pub mod server;

pub use auth::{AuthFairing, Authenticated};
pub use handle::ContainerHandle;
pub use routes::{ROUTE_TABLES, RouteSpec};
pub use server::{build_rocket, serve};
