//! League-wide totals

use anyhow::{Context, Result};
use clap::Parser;

use leaguectl_core::{League, LeagueConfig};
use leaguectl_server::open_store;

#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Fail on a store error instead of reporting zeros
    #[arg(long)]
    pub strict: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn run_stats(args: StatsArgs, config: LeagueConfig) -> Result<()> {
    let store = open_store(&config.store)
        .await
        .context("Failed to open store")?;
    let league = League::new(store);

    let stats = if args.strict {
        league.try_stats().await.context("Failed to count records")?
    } else {
        league.stats().await
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("teams     {:>6}", stats.total_teams);
        println!("players   {:>6}", stats.total_players);
        println!("matches   {:>6}", stats.total_matches);
        println!("items     {:>6}", stats.total_items);
    }
    Ok(())
}
