//! Shop repositories - items (with their category) and categories

use async_trait::async_trait;
use uuid::Uuid;

use super::{fetch_all, fetch_one, insert, remove, replace, Mutations};
use crate::error::DataResult;
use crate::models::{ShopCategory, ShopCategoryInput, ShopItem, ShopItemInput, Table};
use crate::projection::{Projector, ShopItemView};
use crate::store::{Direction, Select, Store};

/// Shop item repository
pub struct ShopItemRepo<'a> {
    store: &'a dyn Store,
}

impl<'a> ShopItemRepo<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Items on sale (`is_available`), with category, ordered by name.
    pub async fn list(&self) -> DataResult<Vec<ShopItemView>> {
        let query = Select::from(Table::ShopItems)
            .eq("is_available", true)
            .order_by("name", Direction::Asc);
        let items: Vec<ShopItem> = fetch_all(self.store, &query).await?;
        Projector::new(self.store).shop_items(items).await
    }

    pub async fn get(&self, id: Uuid) -> DataResult<ShopItemView> {
        let item: ShopItem = fetch_one(self.store, id).await?;
        let mut views = Projector::new(self.store).shop_items(vec![item]).await?;
        Ok(views.remove(0))
    }
}

#[async_trait]
impl<'a> Mutations for ShopItemRepo<'a> {
    type Input = ShopItemInput;
    type Record = ShopItem;

    async fn create(&self, input: &ShopItemInput) -> DataResult<ShopItem> {
        insert(self.store, input).await
    }

    async fn update(&self, id: Uuid, input: &ShopItemInput) -> DataResult<ShopItem> {
        replace(self.store, id, input).await
    }

    async fn delete(&self, id: Uuid) -> DataResult<()> {
        remove::<ShopItem>(self.store, id).await
    }
}

/// Shop category repository
pub struct ShopCategoryRepo<'a> {
    store: &'a dyn Store,
}

impl<'a> ShopCategoryRepo<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// All categories, ordered by name.
    pub async fn list(&self) -> DataResult<Vec<ShopCategory>> {
        let query = Select::from(Table::ShopCategories).order_by("name", Direction::Asc);
        fetch_all(self.store, &query).await
    }

    pub async fn get(&self, id: Uuid) -> DataResult<ShopCategory> {
        fetch_one(self.store, id).await
    }
}

#[async_trait]
impl<'a> Mutations for ShopCategoryRepo<'a> {
    type Input = ShopCategoryInput;
    type Record = ShopCategory;

    async fn create(&self, input: &ShopCategoryInput) -> DataResult<ShopCategory> {
        insert(self.store, input).await
    }

    async fn update(&self, id: Uuid, input: &ShopCategoryInput) -> DataResult<ShopCategory> {
        replace(self.store, id, input).await
    }

    async fn delete(&self, id: Uuid) -> DataResult<()> {
        remove::<ShopCategory>(self.store, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn unavailable_items_are_hidden_from_list() {
        let store = MemoryStore::new();
        let repo = ShopItemRepo::new(&store);
        repo.create(&ShopItemInput::new("Scarf", 800.0)).await.unwrap();
        let hidden = repo
            .create(&ShopItemInput {
                is_available: false,
                ..ShopItemInput::new("Away jersey", 2500.0)
            })
            .await
            .unwrap();
        repo.create(&ShopItemInput::new("Ball", 1200.0)).await.unwrap();

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.item.name)
            .collect();
        assert_eq!(names, ["Ball", "Scarf"]);

        // Direct reads still reach unavailable items.
        assert_eq!(repo.get(hidden.id).await.unwrap().item.name, "Away jersey");
    }

    #[tokio::test]
    async fn item_read_carries_category() {
        let store = MemoryStore::new();
        let category = ShopCategoryRepo::new(&store)
            .create(&ShopCategoryInput {
                name: "Apparel".into(),
                description: Some("Jerseys and scarves".into()),
            })
            .await
            .unwrap();

        let repo = ShopItemRepo::new(&store);
        let item = repo
            .create(&ShopItemInput {
                category_id: Some(category.id),
                ..ShopItemInput::new("Home jersey", 2500.0)
            })
            .await
            .unwrap();

        let view = repo.get(item.id).await.unwrap();
        let summary = view.category.unwrap();
        assert_eq!(summary.name, "Apparel");
        assert_eq!(summary.description.as_deref(), Some("Jerseys and scarves"));
        assert_eq!(view.item.stock_quantity, 0);
    }
}
