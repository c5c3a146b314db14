use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use leaguectl_core::LeagueConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a default config file
    Init(InitArgs),
    /// Print the effective config (file + environment), secrets masked
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

/// Config file in use: `--config` or ~/.leaguectl/config.toml
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(LeagueConfig::config_path)
}

/// Load the file (if any) and apply environment overrides.
pub fn load(explicit: Option<&Path>) -> Result<LeagueConfig> {
    let mut config = LeagueConfig::load(explicit).context("Failed to load config")?;
    config
        .apply_env()
        .context("Invalid environment override")?;
    Ok(config)
}

pub fn run_config(args: ConfigArgs, explicit: Option<&Path>) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args, &resolve_path(explicit)),
        ConfigCommands::Show => run_show(explicit),
        ConfigCommands::Path => {
            println!("{}", resolve_path(explicit).display());
            Ok(())
        }
    }
}

fn run_init(args: InitArgs, path: &Path) -> Result<()> {
    if path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            path
        ));
    }

    LeagueConfig::default()
        .save(path)
        .context(format!("Failed to write config file: {:?}", path))?;

    println!("Created config at: {:?}", path);
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {:?}", path);
    println!("  2. Pick a [store] backend: memory, postgres or rest");
    println!("  3. Run: leaguectl config show");

    Ok(())
}

fn run_show(explicit: Option<&Path>) -> Result<()> {
    let config = load(explicit)?;
    let toml_str = config
        .masked()
        .to_toml()
        .context("Failed to serialize config to TOML")?;

    println!("{}", toml_str);
    Ok(())
}
