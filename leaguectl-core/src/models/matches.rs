//! Match records
//!
//! `home_team_name`/`away_team_name` are copied from the team rows when the
//! match is written and are never refreshed afterwards. A renamed team keeps
//! its old name on historical fixtures; live names come from the
//! `home_team`/`away_team` projection instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::defaults;
use super::validation::{blank_to_none, non_negative, require_some, ValidationError};
use super::{Entity, EntityInput, Table};

/// Match lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Live,
    Completed,
    Cancelled,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Live => "live",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse form text; empty means the default (`scheduled`).
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "status",
                value: s.to_owned(),
            })
    }

    pub fn all() -> &'static [Self] {
        &[Self::Scheduled, Self::Live, Self::Completed, Self::Cancelled]
    }
}

/// Match as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    #[serde(default, deserialize_with = "defaults::null_as_default")]
    pub home_team_name: String,
    #[serde(default, deserialize_with = "defaults::null_as_default")]
    pub away_team_name: String,
    pub match_date: DateTime<Utc>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub referee: Option<String>,
    #[serde(default, deserialize_with = "defaults::null_as_default")]
    pub status: MatchStatus,
    #[serde(default, deserialize_with = "defaults::null_as_default")]
    pub home_score: i32,
    #[serde(default, deserialize_with = "defaults::null_as_default")]
    pub away_score: i32,
    #[serde(default = "defaults::round", deserialize_with = "defaults::null_as_round")]
    pub round: String,
    #[serde(
        default = "defaults::competition",
        deserialize_with = "defaults::null_as_competition"
    )]
    pub competition: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Match {
    const TABLE: Table = Table::Matches;
    const RESOURCE: &'static str = "match";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Fields accepted by create/update.
///
/// Team names are not accepted here: the match repository snapshots them
/// from the referenced team rows at write time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchInput {
    #[serde(default)]
    pub home_team_id: Option<Uuid>,
    #[serde(default)]
    pub away_team_id: Option<Uuid>,
    #[serde(default)]
    pub match_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub referee: Option<String>,
    #[serde(default, deserialize_with = "defaults::null_as_default")]
    pub status: MatchStatus,
    /// Omitted ⇒ 0
    #[serde(default)]
    pub home_score: Option<i32>,
    /// Omitted ⇒ 0
    #[serde(default)]
    pub away_score: Option<i32>,
    /// Omitted or blank ⇒ "regular"
    #[serde(default)]
    pub round: Option<String>,
    /// Omitted or blank ⇒ "Super-D1"
    #[serde(default)]
    pub competition: Option<String>,
}

impl MatchInput {
    pub fn between(home: Uuid, away: Uuid, match_date: DateTime<Utc>) -> Self {
        Self {
            home_team_id: Some(home),
            away_team_id: Some(away),
            match_date: Some(match_date),
            ..Self::default()
        }
    }

    /// Both team ids, once validated.
    pub fn teams(&self) -> Result<(Uuid, Uuid), ValidationError> {
        let home = require_some("home_team_id", self.home_team_id)?;
        let away = require_some("away_team_id", self.away_team_id)?;
        if home == away {
            return Err(ValidationError::SameTeam);
        }
        Ok((home, away))
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl EntityInput for MatchInput {
    fn validate(&self) -> Result<(), ValidationError> {
        self.teams()?;
        require_some("match_date", self.match_date)?;
        non_negative("home_score", self.home_score)?;
        non_negative("away_score", self.away_score)
    }

    fn normalized(&self) -> Self {
        let this = self.clone();
        Self {
            venue: blank_to_none(this.venue),
            referee: blank_to_none(this.referee),
            home_score: Some(this.home_score.unwrap_or(0)),
            away_score: Some(this.away_score.unwrap_or(0)),
            round: Some(defaults::text_or(this.round, defaults::round)),
            competition: Some(defaults::text_or(this.competition, defaults::competition)),
            ..this
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (Uuid, Uuid) {
        (Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn distinct_teams_required() {
        let (home, _) = ids();
        let input = MatchInput::between(home, home, Utc::now());
        assert_eq!(input.validate(), Err(ValidationError::SameTeam));
        assert!(!input.is_valid());
    }

    #[test]
    fn both_teams_required() {
        let (home, _) = ids();
        let input = MatchInput {
            home_team_id: Some(home),
            match_date: Some(Utc::now()),
            ..MatchInput::default()
        };
        assert_eq!(
            input.validate(),
            Err(ValidationError::Empty { field: "away_team_id" })
        );
    }

    #[test]
    fn scores_must_be_non_negative() {
        let (home, away) = ids();
        let input = MatchInput {
            away_score: Some(-2),
            ..MatchInput::between(home, away, Utc::now())
        };
        assert!(matches!(
            input.validate(),
            Err(ValidationError::OutOfRange { field: "away_score", .. })
        ));
    }

    #[test]
    fn normalization_fills_defaults() {
        let (home, away) = ids();
        let input = MatchInput {
            round: Some(String::new()),
            ..MatchInput::between(home, away, Utc::now())
        }
        .normalized();

        assert_eq!(input.home_score, Some(0));
        assert_eq!(input.away_score, Some(0));
        assert_eq!(input.round.as_deref(), Some("regular"));
        assert_eq!(input.competition.as_deref(), Some("Super-D1"));
        assert_eq!(input.status, MatchStatus::Scheduled);
    }

    #[test]
    fn null_status_means_scheduled() {
        let (home, away) = ids();
        let input: MatchInput = serde_json::from_value(serde_json::json!({
            "home_team_id": home,
            "away_team_id": away,
            "match_date": "2025-03-01T16:00:00Z",
            "status": null
        }))
        .unwrap();
        assert_eq!(input.status, MatchStatus::Scheduled);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn status_parsing() {
        assert_eq!(MatchStatus::parse("").unwrap(), MatchStatus::Scheduled);
        assert_eq!(MatchStatus::parse("LIVE").unwrap(), MatchStatus::Live);
        assert!(MatchStatus::parse("postponed").is_err());
    }
}
