//! Player records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::defaults;
use super::validation::{blank_to_none, non_negative, require, ValidationError};
use super::{Entity, EntityInput, Table};

/// Playing position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goalkeeper => "goalkeeper",
            Self::Defender => "defender",
            Self::Midfielder => "midfielder",
            Self::Forward => "forward",
        }
    }

    /// Parse form text; empty means "no position".
    pub fn parse(s: &str) -> Result<Option<Self>, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        Self::all()
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .map(Some)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "position",
                value: s.to_owned(),
            })
    }

    pub fn all() -> &'static [Self] {
        &[Self::Goalkeeper, Self::Defender, Self::Midfielder, Self::Forward]
    }
}

/// Player as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub team_id: Option<Uuid>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub jersey_number: Option<i32>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(
        default = "defaults::nationality",
        deserialize_with = "defaults::null_as_nationality"
    )]
    pub nationality: String,
    #[serde(default)]
    pub height: Option<i32>,
    #[serde(default)]
    pub weight: Option<i32>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Player {
    const TABLE: Table = Table::Players;
    const RESOURCE: &'static str = "player";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Fields accepted by create/update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub team_id: Option<Uuid>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub jersey_number: Option<i32>,
    #[serde(default)]
    pub age: Option<i32>,
    /// Omitted or blank ⇒ "Mauritania"
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub height: Option<i32>,
    #[serde(default)]
    pub weight: Option<i32>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl PlayerInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl EntityInput for PlayerInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        non_negative("jersey_number", self.jersey_number)?;
        non_negative("age", self.age)?;
        non_negative("height", self.height)?;
        non_negative("weight", self.weight)
    }

    fn normalized(&self) -> Self {
        let this = self.clone();
        Self {
            nationality: Some(defaults::text_or(this.nationality, defaults::nationality)),
            bio: blank_to_none(this.bio),
            image_url: blank_to_none(this.image_url),
            ..this
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_parsing() {
        assert_eq!(Position::parse("").unwrap(), None);
        assert_eq!(Position::parse("Forward").unwrap(), Some(Position::Forward));
        assert!(matches!(
            Position::parse("striker"),
            Err(ValidationError::InvalidVariant { field: "position", .. })
        ));
    }

    #[test]
    fn nationality_defaults_when_blank() {
        let input = PlayerInput {
            nationality: Some("  ".into()),
            ..PlayerInput::named("Aboubakar Kamara")
        };
        assert_eq!(input.normalized().nationality.as_deref(), Some("Mauritania"));

        let input = PlayerInput {
            nationality: Some("Senegal".into()),
            ..PlayerInput::named("Moussa Ndiaye")
        };
        assert_eq!(input.normalized().nationality.as_deref(), Some("Senegal"));
    }

    #[test]
    fn null_nationality_reads_back_as_default() {
        let player: Player = serde_json::from_value(serde_json::json!({
            "id": "0d3c7a0e-3b8e-4d6b-9d6c-1c8a3d3f5e21",
            "name": "Hemeya Tanjy",
            "team_id": null,
            "position": "defender",
            "nationality": null,
            "created_at": "2024-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(player.nationality, "Mauritania");
        assert_eq!(player.position, Some(Position::Defender));
    }

    #[test]
    fn negative_jersey_rejected() {
        let input = PlayerInput {
            jersey_number: Some(-7),
            ..PlayerInput::named("Sidi Mohamed")
        };
        assert!(matches!(
            input.validate(),
            Err(ValidationError::OutOfRange { field: "jersey_number", .. })
        ));
    }
}
