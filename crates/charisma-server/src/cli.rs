//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `serve` (default) | Run the HTTP server |
//! | `check-modules --root <dir>…` | Compare module files on disk with linked registrations |
//! | `issue-token --subject <id> [--claims <json>]` | Print an access/refresh credential pair |

use std::path::PathBuf;

use anyhow::{Context, bail};
use charisma_infrastructure::config::ConfigLoader;
use charisma_infrastructure::di::{ModuleScanner, check_modules};
use charisma_infrastructure::logging::init_logging;
use clap::{Parser, Subcommand};

use crate::server::{issue_tokens, parse_claims, serve};

/// Charisma API server
#[derive(Parser, Debug)]
#[command(name = "charisma")]
#[command(about = "Charisma API - role and user management server")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to run; defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Check that every module file on disk is registered
    CheckModules {
        /// Source root to walk; repeat for several roots
        #[arg(long = "root", required = true)]
        roots: Vec<PathBuf>,
    },

    /// Issue an access and refresh credential for a subject
    IssueToken {
        /// Subject (user id) of the credential
        #[arg(long)]
        subject: String,

        /// Extra claims as a JSON object
        #[arg(long)]
        claims: Option<String>,
    },
}

impl Cli {
    fn loader(&self) -> ConfigLoader {
        match &self.config {
            Some(path) => ConfigLoader::new().with_config_path(path),
            None => ConfigLoader::new(),
        }
    }
}

/// Run the parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.clone().unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = cli.loader().load().context("Failed to load configuration")?;
            init_logging(&config.logging)?;
            serve(&config).await?;
        }
        Command::CheckModules { roots } => {
            let report = check_modules(&ModuleScanner::default(), &roots);
            for key in &report.unregistered {
                println!("unregistered: {key}");
            }
            for key in &report.stale {
                println!("stale: {key}");
            }
            if !report.is_clean() {
                bail!(
                    "{} unregistered and {} stale module(s)",
                    report.unregistered.len(),
                    report.stale.len()
                );
            }
            println!("All module files are registered");
        }
        Command::IssueToken { subject, claims } => {
            let config = cli.loader().load().context("Failed to load configuration")?;
            let claims = parse_claims(claims.as_deref())?;
            let tokens = issue_tokens(&config, &subject, claims).await?;
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        }
    }
    Ok(())
}
