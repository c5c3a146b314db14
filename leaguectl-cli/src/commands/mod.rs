//! Command implementations for the leaguectl CLI

pub mod migrate;
pub mod news;
pub mod serve;
pub mod stats;

pub use migrate::run_migrate;
pub use news::run_news;
pub use serve::run_serve;
pub use stats::run_stats;
