//! leaguectl CLI - sports league data service
//!
//! Entry point for the `leaguectl` command-line tool:
//! - `serve`: HTTP API (`/get-news`, `/api` reads, `/admin` mutations)
//! - `migrate`: create the PostgreSQL schema
//! - `stats`, `news`: read the league from the configured store
//! - `config`: manage ~/.leaguectl/config.toml

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "leaguectl",
    author,
    version,
    about = "Serve and inspect league data: teams, players, matches, news and the shop",
    long_about = "Runs the league data service over an in-memory, PostgreSQL or hosted \
                  PostgREST store, and reads the same data from the command line."
)]
struct Cli {
    /// Config file (default: ~/.leaguectl/config.toml)
    #[arg(long, short = 'c', global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create or update the PostgreSQL schema
    Migrate,
    /// Show league totals (teams, players, matches, shop items)
    Stats(commands::stats::StatsArgs),
    /// List published news, newest first
    News(commands::news::NewsArgs),
    /// Manage leaguectl configuration (init, show, path)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let explicit = cli.config.as_deref();
    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config::load(explicit)?).await?,
        Commands::Migrate => commands::run_migrate(&config::load(explicit)?).await?,
        Commands::Stats(args) => commands::run_stats(args, config::load(explicit)?).await?,
        Commands::News(args) => commands::run_news(args, config::load(explicit)?).await?,
        Commands::Config(args) => config::run_config(args, explicit)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
