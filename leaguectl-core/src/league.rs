//! League facade: owns the store handle and hands out repositories

use std::sync::Arc;

use crate::error::DataResult;
use crate::repos::{
    MatchRepo, NewsRepo, PlayerRepo, ShopCategoryRepo, ShopItemRepo, Stats, TeamRepo,
};
use crate::store::Store;

/// Entry point to the data-access contract.
///
/// Built once at startup from an explicitly constructed store and cloned
/// into whatever needs it (HTTP state, CLI commands, tests). Cloning shares
/// the same store.
#[derive(Clone)]
pub struct League {
    store: Arc<dyn Store>,
}

impl League {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub fn teams(&self) -> TeamRepo<'_> {
        TeamRepo::new(self.store())
    }

    pub fn players(&self) -> PlayerRepo<'_> {
        PlayerRepo::new(self.store())
    }

    pub fn matches(&self) -> MatchRepo<'_> {
        MatchRepo::new(self.store())
    }

    pub fn news(&self) -> NewsRepo<'_> {
        NewsRepo::new(self.store())
    }

    pub fn shop_items(&self) -> ShopItemRepo<'_> {
        ShopItemRepo::new(self.store())
    }

    pub fn shop_categories(&self) -> ShopCategoryRepo<'_> {
        ShopCategoryRepo::new(self.store())
    }

    /// Dashboard counts, or the first count that failed.
    pub async fn try_stats(&self) -> DataResult<Stats> {
        Stats::collect(self.store()).await
    }

    /// Dashboard counts, all zero if any count failed.
    pub async fn stats(&self) -> Stats {
        Stats::collect_or_zero(self.store()).await
    }
}

impl std::fmt::Debug for League {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("League").finish_non_exhaustive()
    }
}
