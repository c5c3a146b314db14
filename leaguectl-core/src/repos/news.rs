//! News repository

use async_trait::async_trait;
use uuid::Uuid;

use super::{fetch_all, fetch_one, insert, remove, replace, Mutations};
use crate::error::{DataError, DataResult};
use crate::models::{Entity, News, NewsFilter, NewsInput, Table};
use crate::store::{Direction, Select, Store};

/// News repository
pub struct NewsRepo<'a> {
    store: &'a dyn Store,
}

impl<'a> NewsRepo<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Published news, newest first, optionally featured-only and capped.
    pub async fn list(&self, filter: NewsFilter) -> DataResult<Vec<News>> {
        let mut query = Select::from(Table::News).eq("published", true);
        if filter.featured {
            query = query.eq("is_featured", true);
        }
        query = query.order_by("created_at", Direction::Desc);
        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }
        fetch_all(self.store, &query).await
    }

    /// Front-page strip: the newest featured articles.
    pub async fn featured(&self) -> DataResult<Vec<News>> {
        self.list(NewsFilter::featured()).await
    }

    /// Any article, published or not (admin reads).
    pub async fn get(&self, id: Uuid) -> DataResult<News> {
        fetch_one(self.store, id).await
    }

    /// Public detail read; unpublished articles are not found.
    pub async fn get_published(&self, id: Uuid) -> DataResult<News> {
        let query = Select::from(Table::News)
            .by_id(id)
            .eq("published", true)
            .limit(1);
        fetch_all(self.store, &query)
            .await?
            .pop()
            .ok_or_else(|| DataError::not_found(News::RESOURCE, id))
    }
}

#[async_trait]
impl<'a> Mutations for NewsRepo<'a> {
    type Input = NewsInput;
    type Record = News;

    async fn create(&self, input: &NewsInput) -> DataResult<News> {
        insert(self.store, input).await
    }

    async fn update(&self, id: Uuid, input: &NewsInput) -> DataResult<News> {
        replace(self.store, id, input).await
    }

    async fn delete(&self, id: Uuid) -> DataResult<()> {
        remove::<News>(self.store, id).await
    }
}
