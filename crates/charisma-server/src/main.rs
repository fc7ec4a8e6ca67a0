//! Charisma API server binary
//!
//! See [`charisma_server::cli`] for the available commands.

// Force-link charisma-providers so its module registrations are included
extern crate charisma_providers;

use charisma_server::cli::{Cli, run};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Cli::parse()).await
}
