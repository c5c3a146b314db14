//! Dashboard counts

use serde::{Deserialize, Serialize};

use crate::error::DataResult;
use crate::models::Table;
use crate::store::Store;

/// Row counts shown on the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_teams: u64,
    pub total_players: u64,
    pub total_matches: u64,
    pub total_items: u64,
}

impl Stats {
    /// Issue the four counts concurrently; the first failure wins.
    pub async fn collect(store: &dyn Store) -> DataResult<Self> {
        let (total_teams, total_players, total_matches, total_items) = futures::try_join!(
            store.count(Table::Teams),
            store.count(Table::Players),
            store.count(Table::Matches),
            store.count(Table::ShopItems),
        )?;

        Ok(Self {
            total_teams,
            total_players,
            total_matches,
            total_items,
        })
    }

    /// All-zero on any failure. An empty league and a failed count look the same.
    pub async fn collect_or_zero(store: &dyn Store) -> Self {
        match Self::collect(store).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(error = %e, "stats unavailable, reporting zero counts");
                Self::default()
            }
        }
    }
}
