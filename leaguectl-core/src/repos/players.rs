//! Player repository - reads carry the player's team

use async_trait::async_trait;
use uuid::Uuid;

use super::{fetch_all, fetch_one, insert, remove, replace, Mutations};
use crate::error::DataResult;
use crate::models::{Player, PlayerInput, Table};
use crate::projection::{PlayerView, Projector};
use crate::store::{Direction, Select, Store};

/// Player repository
pub struct PlayerRepo<'a> {
    store: &'a dyn Store,
}

impl<'a> PlayerRepo<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// All players with `team {name, city}`, ordered by name.
    pub async fn list(&self) -> DataResult<Vec<PlayerView>> {
        let query = Select::from(Table::Players).order_by("name", Direction::Asc);
        let players: Vec<Player> = fetch_all(self.store, &query).await?;
        Projector::new(self.store).players(players).await
    }

    pub async fn get(&self, id: Uuid) -> DataResult<PlayerView> {
        let player: Player = fetch_one(self.store, id).await?;
        let mut views = Projector::new(self.store).players(vec![player]).await?;
        Ok(views.remove(0))
    }
}

#[async_trait]
impl<'a> Mutations for PlayerRepo<'a> {
    type Input = PlayerInput;
    type Record = Player;

    async fn create(&self, input: &PlayerInput) -> DataResult<Player> {
        insert(self.store, input).await
    }

    async fn update(&self, id: Uuid, input: &PlayerInput) -> DataResult<Player> {
        replace(self.store, id, input).await
    }

    async fn delete(&self, id: Uuid) -> DataResult<()> {
        remove::<Player>(self.store, id).await
    }
}
