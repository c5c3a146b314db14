//! Admin edit forms
//!
//! A form holds field text exactly as typed. `to_input` is the only place
//! text becomes typed input: empty numeric text is null, anything else
//! must parse or the form is rejected with the field named.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::defaults::{DEFAULT_AUTHOR, DEFAULT_COMPETITION, DEFAULT_NATIONALITY};
use crate::models::{
    Entity, EntityInput, Match, MatchInput, MatchStatus, News, NewsInput, Player, PlayerInput,
    Position, ShopCategory, ShopCategoryInput, ShopItem, ShopItemInput, Team, TeamInput,
    ValidationError,
};

/// Form state for one entity kind
pub trait EditForm: Default + Clone + Send + Sync {
    type Record: Entity + Sync;
    type Input: EntityInput;

    /// Populate from a stored record, documented defaults for missing fields.
    fn from_record(record: &Self::Record) -> Self;

    /// Parse and validate. No store access.
    fn to_input(&self) -> Result<Self::Input, ValidationError>;
}

/// Trimmed text, or `None` when blank.
fn text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

pub fn parse_int(field: &'static str, value: &str) -> Result<Option<i32>, ValidationError> {
    match value.trim() {
        "" => Ok(None),
        v => v.parse().map(Some).map_err(|_| ValidationError::InvalidFormat {
            field,
            reason: "must be a whole number",
        }),
    }
}

pub fn parse_uuid(field: &'static str, value: &str) -> Result<Option<Uuid>, ValidationError> {
    match value.trim() {
        "" => Ok(None),
        v => Uuid::parse_str(v)
            .map(Some)
            .map_err(|_| ValidationError::InvalidFormat {
                field,
                reason: "must be a valid id",
            }),
    }
}

pub fn parse_price(value: &str) -> Result<Option<f64>, ValidationError> {
    match value.trim() {
        "" => Ok(None),
        v => v.parse().map(Some).map_err(|_| ValidationError::InvalidFormat {
            field: "price",
            reason: "must be a number",
        }),
    }
}

fn show<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn checked<I: EntityInput>(input: I) -> Result<I, ValidationError> {
    input.validate()?;
    Ok(input)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamForm {
    pub name: String,
    pub city: String,
    pub coach: String,
    pub home_stadium: String,
    pub founded_year: String,
    pub logo_url: String,
    pub description: String,
}

impl EditForm for TeamForm {
    type Record = Team;
    type Input = TeamInput;

    fn from_record(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            city: show(team.city.as_ref()),
            coach: show(team.coach.as_ref()),
            home_stadium: show(team.home_stadium.as_ref()),
            founded_year: show(team.founded_year),
            logo_url: show(team.logo_url.as_ref()),
            description: show(team.description.as_ref()),
        }
    }

    fn to_input(&self) -> Result<TeamInput, ValidationError> {
        checked(TeamInput {
            name: self.name.trim().to_owned(),
            city: text(&self.city),
            coach: text(&self.coach),
            home_stadium: text(&self.home_stadium),
            founded_year: parse_int("founded_year", &self.founded_year)?,
            logo_url: text(&self.logo_url),
            description: text(&self.description),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerForm {
    pub name: String,
    pub team_id: String,
    pub position: String,
    pub jersey_number: String,
    pub age: String,
    pub nationality: String,
    pub height: String,
    pub weight: String,
    pub bio: String,
    pub image_url: String,
}

impl Default for PlayerForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            team_id: String::new(),
            position: String::new(),
            jersey_number: String::new(),
            age: String::new(),
            nationality: DEFAULT_NATIONALITY.to_owned(),
            height: String::new(),
            weight: String::new(),
            bio: String::new(),
            image_url: String::new(),
        }
    }
}

impl EditForm for PlayerForm {
    type Record = Player;
    type Input = PlayerInput;

    fn from_record(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            team_id: show(player.team_id),
            position: player.position.map(|p| p.as_str().to_owned()).unwrap_or_default(),
            jersey_number: show(player.jersey_number),
            age: show(player.age),
            nationality: text(&player.nationality).unwrap_or_else(|| DEFAULT_NATIONALITY.to_owned()),
            height: show(player.height),
            weight: show(player.weight),
            bio: show(player.bio.as_ref()),
            image_url: show(player.image_url.as_ref()),
        }
    }

    fn to_input(&self) -> Result<PlayerInput, ValidationError> {
        checked(PlayerInput {
            name: self.name.trim().to_owned(),
            team_id: parse_uuid("team_id", &self.team_id)?,
            position: Position::parse(&self.position)?,
            jersey_number: parse_int("jersey_number", &self.jersey_number)?,
            age: parse_int("age", &self.age)?,
            nationality: text(&self.nationality),
            height: parse_int("height", &self.height)?,
            weight: parse_int("weight", &self.weight)?,
            bio: text(&self.bio),
            image_url: text(&self.image_url),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchForm {
    pub home_team_id: String,
    pub away_team_id: String,
    pub match_date: DateTime<Utc>,
    pub venue: String,
    pub referee: String,
    pub status: String,
    pub home_score: String,
    pub away_score: String,
    pub round: String,
    pub competition: String,
}

impl Default for MatchForm {
    fn default() -> Self {
        Self {
            home_team_id: String::new(),
            away_team_id: String::new(),
            match_date: Utc::now(),
            venue: String::new(),
            referee: String::new(),
            status: MatchStatus::Scheduled.as_str().to_owned(),
            home_score: String::new(),
            away_score: String::new(),
            round: String::new(),
            competition: DEFAULT_COMPETITION.to_owned(),
        }
    }
}

impl EditForm for MatchForm {
    type Record = Match;
    type Input = MatchInput;

    fn from_record(fixture: &Match) -> Self {
        Self {
            home_team_id: fixture.home_team_id.to_string(),
            away_team_id: fixture.away_team_id.to_string(),
            match_date: fixture.match_date,
            venue: show(fixture.venue.as_ref()),
            referee: show(fixture.referee.as_ref()),
            status: fixture.status.as_str().to_owned(),
            home_score: fixture.home_score.to_string(),
            away_score: fixture.away_score.to_string(),
            round: fixture.round.clone(),
            competition: text(&fixture.competition)
                .unwrap_or_else(|| DEFAULT_COMPETITION.to_owned()),
        }
    }

    fn to_input(&self) -> Result<MatchInput, ValidationError> {
        checked(MatchInput {
            home_team_id: parse_uuid("home_team_id", &self.home_team_id)?,
            away_team_id: parse_uuid("away_team_id", &self.away_team_id)?,
            match_date: Some(self.match_date),
            venue: text(&self.venue),
            referee: text(&self.referee),
            status: MatchStatus::parse(&self.status)?,
            home_score: parse_int("home_score", &self.home_score)?,
            away_score: parse_int("away_score", &self.away_score)?,
            round: text(&self.round),
            competition: text(&self.competition),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsForm {
    pub title: String,
    pub content: String,
    pub author: String,
    pub image_url: String,
    pub is_featured: bool,
    pub published: bool,
}

impl Default for NewsForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            author: DEFAULT_AUTHOR.to_owned(),
            image_url: String::new(),
            is_featured: false,
            published: true,
        }
    }
}

impl EditForm for NewsForm {
    type Record = News;
    type Input = NewsInput;

    fn from_record(news: &News) -> Self {
        Self {
            title: news.title.clone(),
            content: news.content.clone(),
            author: text(&news.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_owned()),
            image_url: show(news.image_url.as_ref()),
            is_featured: news.is_featured,
            published: news.published,
        }
    }

    fn to_input(&self) -> Result<NewsInput, ValidationError> {
        checked(NewsInput {
            title: self.title.trim().to_owned(),
            content: self.content.trim().to_owned(),
            author: text(&self.author),
            image_url: text(&self.image_url),
            is_featured: self.is_featured,
            published: self.published,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShopItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock_quantity: String,
    pub size: String,
    pub color: String,
    pub image_url: String,
    pub category_id: String,
    pub is_available: bool,
}

impl Default for ShopItemForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            stock_quantity: String::new(),
            size: String::new(),
            color: String::new(),
            image_url: String::new(),
            category_id: String::new(),
            is_available: true,
        }
    }
}

impl EditForm for ShopItemForm {
    type Record = ShopItem;
    type Input = ShopItemInput;

    fn from_record(item: &ShopItem) -> Self {
        Self {
            name: item.name.clone(),
            description: show(item.description.as_ref()),
            price: item.price.to_string(),
            stock_quantity: item.stock_quantity.to_string(),
            size: show(item.size.as_ref()),
            color: show(item.color.as_ref()),
            image_url: show(item.image_url.as_ref()),
            category_id: show(item.category_id),
            is_available: item.is_available,
        }
    }

    fn to_input(&self) -> Result<ShopItemInput, ValidationError> {
        checked(ShopItemInput {
            name: self.name.trim().to_owned(),
            description: text(&self.description),
            price: parse_price(&self.price)?,
            stock_quantity: parse_int("stock_quantity", &self.stock_quantity)?,
            size: text(&self.size),
            color: text(&self.color),
            image_url: text(&self.image_url),
            category_id: parse_uuid("category_id", &self.category_id)?,
            is_available: self.is_available,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopCategoryForm {
    pub name: String,
    pub description: String,
}

impl EditForm for ShopCategoryForm {
    type Record = ShopCategory;
    type Input = ShopCategoryInput;

    fn from_record(category: &ShopCategory) -> Self {
        Self {
            name: category.name.clone(),
            description: show(category.description.as_ref()),
        }
    }

    fn to_input(&self) -> Result<ShopCategoryInput, ValidationError> {
        checked(ShopCategoryInput {
            name: self.name.trim().to_owned(),
            description: text(&self.description),
        })
    }
}
