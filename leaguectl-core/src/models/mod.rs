//! Entity model: record shapes, input records, defaults, and enum domains
//!
//! Records (`Team`, `Player`, ...) are what the store returns. Inputs
//! (`TeamInput`, ...) are what callers hand to create/update; they are
//! validated by a pure predicate before any store call and never carry
//! the store-assigned `id`/`created_at`.

pub mod defaults;
pub mod matches;
pub mod news;
pub mod player;
pub mod shop;
pub mod team;
pub mod validation;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use matches::{Match, MatchInput, MatchStatus};
pub use news::{News, NewsFilter, NewsInput};
pub use player::{Player, PlayerInput, Position};
pub use shop::{ShopCategory, ShopCategoryInput, ShopItem, ShopItemInput};
pub use team::{Team, TeamInput};
pub use validation::ValidationError;

/// Backing tables, one per entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Teams,
    Players,
    Matches,
    News,
    ShopItems,
    ShopCategories,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teams => "teams",
            Self::Players => "players",
            Self::Matches => "matches",
            Self::News => "news",
            Self::ShopItems => "shop_items",
            Self::ShopCategories => "shop_categories",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Teams,
            Self::Players,
            Self::Matches,
            Self::News,
            Self::ShopItems,
            Self::ShopCategories,
        ]
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored record kind.
pub trait Entity: DeserializeOwned + Send + 'static {
    const TABLE: Table;
    /// Singular name used in not-found messages
    const RESOURCE: &'static str;

    fn id(&self) -> Uuid;
}

/// Caller-supplied fields for create/update.
pub trait EntityInput: Serialize + Send + Sync {
    /// Required fields and domain invariants; no I/O.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Blank optionals nulled and documented defaults substituted.
    fn normalized(&self) -> Self
    where
        Self: Sized;
}
