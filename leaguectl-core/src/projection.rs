//! Read projections: records with their related rows attached
//!
//! Joins happen at read time, so a renamed team shows its new name on the
//! next player read. Related rows are fetched in one batched `IN` query per
//! relation (no N+1). A null foreign key or a dangling reference leaves the
//! relation field `None`; it is never an error.
//!
//! Projected fields are output only. Writes always go through the foreign
//! key id on the input record.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use crate::error::DataResult;
use crate::models::{Entity, Match, Player, ShopCategory, ShopItem, Team};
use crate::repos::fetch_all;
use crate::store::{Select, Store};

/// Team fields attached to a player read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub name: String,
    pub city: Option<String>,
}

/// Team fields attached to each side of a match read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamBadge {
    pub name: String,
    pub logo_url: Option<String>,
}

/// Category fields attached to a shop item read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    #[serde(flatten)]
    pub player: Player,
    pub team: Option<TeamSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchView {
    #[serde(flatten)]
    pub fixture: Match,
    pub home_team: Option<TeamBadge>,
    pub away_team: Option<TeamBadge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopItemView {
    #[serde(flatten)]
    pub item: ShopItem,
    pub category: Option<CategorySummary>,
}

impl From<&Team> for TeamSummary {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            city: team.city.clone(),
        }
    }
}

impl From<&Team> for TeamBadge {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            logo_url: team.logo_url.clone(),
        }
    }
}

impl From<&ShopCategory> for CategorySummary {
    fn from(category: &ShopCategory) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone(),
        }
    }
}

/// Fetch the rows of `E` with the given ids in a single query.
async fn lookup<E: Entity>(
    store: &dyn Store,
    ids: impl IntoIterator<Item = Uuid>,
) -> DataResult<HashMap<Uuid, E>> {
    let ids: HashSet<Uuid> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let query = Select::from(E::TABLE).is_in("id", ids.iter().map(Uuid::to_string));
    let rows: Vec<E> = fetch_all(store, &query).await?;
    Ok(rows.into_iter().map(|row| (row.id(), row)).collect())
}

/// Builds joined read views on top of plain records
pub struct Projector<'a> {
    store: &'a dyn Store,
}

impl<'a> Projector<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    pub async fn players(&self, players: Vec<Player>) -> DataResult<Vec<PlayerView>> {
        let teams: HashMap<Uuid, Team> =
            lookup(self.store, players.iter().filter_map(|p| p.team_id)).await?;

        Ok(players
            .into_iter()
            .map(|player| PlayerView {
                team: player.team_id.and_then(|id| teams.get(&id)).map(TeamSummary::from),
                player,
            })
            .collect())
    }

    pub async fn matches(&self, matches: Vec<Match>) -> DataResult<Vec<MatchView>> {
        let teams: HashMap<Uuid, Team> = lookup(
            self.store,
            matches
                .iter()
                .flat_map(|m| [m.home_team_id, m.away_team_id]),
        )
        .await?;

        Ok(matches
            .into_iter()
            .map(|fixture| MatchView {
                home_team: teams.get(&fixture.home_team_id).map(TeamBadge::from),
                away_team: teams.get(&fixture.away_team_id).map(TeamBadge::from),
                fixture,
            })
            .collect())
    }

    pub async fn shop_items(&self, items: Vec<ShopItem>) -> DataResult<Vec<ShopItemView>> {
        let categories: HashMap<Uuid, ShopCategory> =
            lookup(self.store, items.iter().filter_map(|i| i.category_id)).await?;

        Ok(items
            .into_iter()
            .map(|item| ShopItemView {
                category: item
                    .category_id
                    .and_then(|id| categories.get(&id))
                    .map(CategorySummary::from),
                item,
            })
            .collect())
    }
}
