//! Team records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{blank_to_none, require, ValidationError};
use super::{Entity, EntityInput, Table};

/// Team as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub coach: Option<String>,
    #[serde(default)]
    pub home_stadium: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Team {
    const TABLE: Table = Table::Teams;
    const RESOURCE: &'static str = "team";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Fields accepted by create/update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub coach: Option<String>,
    #[serde(default)]
    pub home_stadium: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TeamInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl EntityInput for TeamInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)
    }

    fn normalized(&self) -> Self {
        let this = self.clone();
        Self {
            name: this.name,
            city: blank_to_none(this.city),
            coach: blank_to_none(this.coach),
            home_stadium: blank_to_none(this.home_stadium),
            founded_year: this.founded_year,
            logo_url: blank_to_none(this.logo_url),
            description: blank_to_none(this.description),
        }
    }
}
