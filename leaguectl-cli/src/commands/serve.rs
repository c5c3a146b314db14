//! HTTP server command
//!
//! Opens the configured store and runs the league API until Ctrl+C/SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use leaguectl_core::{Backend, League, LeagueConfig};
use leaguectl_server::{open_store, run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides [server].bind)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS on /api and /admin (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Run schema migrations first (postgres backend only)
    #[arg(long)]
    pub migrate: bool,
}

pub async fn run_serve(args: ServeArgs, config: LeagueConfig) -> Result<()> {
    if args.migrate {
        if config.store.backend == Backend::Postgres {
            super::run_migrate(&config).await?;
        } else {
            tracing::warn!(backend = %config.store.backend, "--migrate ignored: not a postgres backend");
        }
    }

    let store = open_store(&config.store)
        .await
        .context("Failed to open store")?;

    let mut server = ServerConfig::from(&config.server);
    if let Some(bind) = args.bind {
        server.bind_addr = bind;
    }
    server.cors_permissive |= args.cors_permissive;

    tracing::info!(backend = %config.store.backend, "Starting leaguectl server on {}", server.bind_addr);

    run_server(League::new(store), server)
        .await
        .context("Server error")?;

    Ok(())
}
