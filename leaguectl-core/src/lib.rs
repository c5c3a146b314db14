pub mod config;
pub mod envelope;
pub mod error;
pub mod league;
pub mod models;
pub mod projection;
pub mod repos;
pub mod session;
pub mod store;

pub use config::{Backend, LeagueConfig};
pub use envelope::Envelope;
pub use error::{DataError, DataResult};
pub use league::League;
pub use models::{
    Match, MatchInput, MatchStatus, News, NewsFilter, NewsInput, Player, PlayerInput, Position,
    ShopCategory, ShopCategoryInput, ShopItem, ShopItemInput, Table, Team, TeamInput,
    ValidationError,
};
pub use projection::{MatchView, PlayerView, ShopItemView};
pub use repos::{Mutations, Stats};
pub use session::{EditSession, Notice, NoticeLevel, SessionError, SessionState};
pub use store::{MemoryStore, Store, StoreError};
