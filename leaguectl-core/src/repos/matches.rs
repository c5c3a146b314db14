//! Match repository
//!
//! Writes snapshot both team names onto the match row. Reads attach the
//! live `home_team`/`away_team` badges next to that snapshot.

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::{fetch_all, fetch_one, insert_row, remove, replace_row, to_row, Mutations};
use crate::error::{DataError, DataResult};
use crate::models::{Entity, EntityInput, Match, MatchInput, Table, Team};
use crate::projection::{MatchView, Projector};
use crate::store::{Direction, Row, Select, Store};

/// Match repository
pub struct MatchRepo<'a> {
    store: &'a dyn Store,
}

impl<'a> MatchRepo<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// All matches with both team badges, most recent first.
    pub async fn list(&self) -> DataResult<Vec<MatchView>> {
        let query = Select::from(Table::Matches).order_by("match_date", Direction::Desc);
        let matches: Vec<Match> = fetch_all(self.store, &query).await?;
        Projector::new(self.store).matches(matches).await
    }

    pub async fn get(&self, id: Uuid) -> DataResult<MatchView> {
        let fixture: Match = fetch_one(self.store, id).await?;
        let mut views = Projector::new(self.store).matches(vec![fixture]).await?;
        Ok(views.remove(0))
    }

    /// Validate, then build the row with the current team names copied in.
    async fn snapshot(&self, input: &MatchInput) -> DataResult<Row> {
        input.validate()?;
        let (home_id, away_id) = input.teams()?;

        let query = Select::from(Table::Teams).is_in("id", [home_id.to_string(), away_id.to_string()]);
        let teams: Vec<Team> = fetch_all(self.store, &query).await?;
        let name_of = |id: Uuid| {
            teams
                .iter()
                .find(|t| t.id == id)
                .map(|t| t.name.clone())
                .ok_or_else(|| DataError::not_found(Team::RESOURCE, id))
        };

        let mut row = to_row(&input.normalized())?;
        row.insert("home_team_name".into(), Value::String(name_of(home_id)?));
        row.insert("away_team_name".into(), Value::String(name_of(away_id)?));
        Ok(row)
    }
}

#[async_trait]
impl<'a> Mutations for MatchRepo<'a> {
    type Input = MatchInput;
    type Record = Match;

    async fn create(&self, input: &MatchInput) -> DataResult<Match> {
        let row = self.snapshot(input).await?;
        insert_row(self.store, row).await
    }

    async fn update(&self, id: Uuid, input: &MatchInput) -> DataResult<Match> {
        let row = self.snapshot(input).await?;
        replace_row(self.store, id, row).await
    }

    async fn delete(&self, id: Uuid) -> DataResult<()> {
        remove::<Match>(self.store, id).await
    }
}
