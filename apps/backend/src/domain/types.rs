//! Enumerations shared by the model, the engine, and the wire format.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

pub type RoomId = String;
pub type PlayerId = i64;
pub type GameId = i64;
pub type CardId = i64;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub fn opposite(self) -> Team {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::Red => "red",
            Team::Blue => "blue",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Team {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Team::Red),
            "blue" => Ok(Team::Blue),
            _ => Err(DomainError::validation(
                ValidationKind::InvalidTeam,
                "invalid team",
            )),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Spymaster,
    Operative,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Spymaster => "spymaster",
            Role::Operative => "operative",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spymaster" => Ok(Role::Spymaster),
            "operative" => Ok(Role::Operative),
            _ => Err(DomainError::validation(
                ValidationKind::InvalidRole,
                "invalid role",
            )),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Red,
    Blue,
    Neutral,
    Assassin,
}

impl CardType {
    /// The team that owns this card, if any.
    pub fn team(self) -> Option<Team> {
        match self {
            CardType::Red => Some(Team::Red),
            CardType::Blue => Some(Team::Blue),
            CardType::Neutral | CardType::Assassin => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CardType::Red => "red",
            CardType::Blue => "blue",
            CardType::Neutral => "neutral",
            CardType::Assassin => "assassin",
        }
    }
}

impl From<Team> for CardType {
    fn from(team: Team) -> Self {
        match team {
            Team::Red => CardType::Red,
            Team::Blue => CardType::Blue,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Lobby,
    Playing,
    Finished,
}

/// Serde adapter encoding `None` as the empty string, matching the
/// `""` = unassigned convention of the client protocol.
pub mod empty_as_none {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(D::Error::custom)
    }
}

/// Parse an optional team where `""` means "leave team".
pub fn parse_optional_team(raw: &str) -> Result<Option<Team>, DomainError> {
    if raw.is_empty() {
        Ok(None)
    } else {
        raw.parse().map(Some)
    }
}

/// Parse an optional role where `""` means "no role".
pub fn parse_optional_role(raw: &str) -> Result<Option<Role>, DomainError> {
    if raw.is_empty() {
        Ok(None)
    } else {
        raw.parse().map(Some)
    }
}
