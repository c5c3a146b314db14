//! Published news, as `/get-news` would serve it

use anyhow::{Context, Result};
use clap::Parser;

use leaguectl_core::{League, LeagueConfig, NewsFilter};
use leaguectl_server::open_store;

#[derive(Parser, Debug)]
pub struct NewsArgs {
    /// Only featured articles
    #[arg(long)]
    pub featured: bool,

    /// Maximum number of articles
    #[arg(long, short = 'n')]
    pub limit: Option<u32>,

    /// Print JSON instead of one line per article
    #[arg(long)]
    pub json: bool,
}

pub async fn run_news(args: NewsArgs, config: LeagueConfig) -> Result<()> {
    let store = open_store(&config.store)
        .await
        .context("Failed to open store")?;
    let league = League::new(store);

    let filter = NewsFilter {
        featured: args.featured,
        limit: args.limit,
    };
    let news = league
        .news()
        .list(filter)
        .await
        .context("Failed to list news")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&news)?);
        return Ok(());
    }

    if news.is_empty() {
        println!("No published news.");
    }
    for article in &news {
        let star = if article.is_featured { "*" } else { " " };
        println!(
            "{} {}  {}  ({})",
            star,
            article.created_at.format("%Y-%m-%d"),
            article.title,
            article.author
        );
    }
    Ok(())
}
