//! Team repository

use async_trait::async_trait;
use uuid::Uuid;

use super::{fetch_all, fetch_one, insert, remove, replace, Mutations};
use crate::error::DataResult;
use crate::models::{Player, Table, Team, TeamInput};
use crate::store::{Direction, Select, Store};

/// Team repository
pub struct TeamRepo<'a> {
    store: &'a dyn Store,
}

impl<'a> TeamRepo<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// All teams, ordered by name.
    pub async fn list(&self) -> DataResult<Vec<Team>> {
        let query = Select::from(Table::Teams).order_by("name", Direction::Asc);
        fetch_all(self.store, &query).await
    }

    pub async fn get(&self, id: Uuid) -> DataResult<Team> {
        fetch_one(self.store, id).await
    }

    /// Squad list for one team, ordered by jersey number (unnumbered last).
    pub async fn players(&self, team_id: Uuid) -> DataResult<Vec<Player>> {
        let query = Select::from(Table::Players)
            .eq("team_id", team_id.to_string())
            .order_by("jersey_number", Direction::Asc);
        fetch_all(self.store, &query).await
    }
}

#[async_trait]
impl<'a> Mutations for TeamRepo<'a> {
    type Input = TeamInput;
    type Record = Team;

    async fn create(&self, input: &TeamInput) -> DataResult<Team> {
        insert(self.store, input).await
    }

    async fn update(&self, id: Uuid, input: &TeamInput) -> DataResult<Team> {
        replace(self.store, id, input).await
    }

    async fn delete(&self, id: Uuid) -> DataResult<()> {
        remove::<Team>(self.store, id).await
    }
}
