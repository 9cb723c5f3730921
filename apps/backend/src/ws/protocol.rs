//! Wire protocol for the room channel.
//!
//! Inbound frames are a flat JSON envelope keyed by `type`; decoding turns
//! them into a typed `ClientCommand`. Outbound frames are `room_state`
//! broadcasts and unicast `error`s.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::{parse_optional_role, parse_optional_team};
use crate::domain::view::RoomState;
use crate::domain::{CardId, Role, Team};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid message format")]
    Malformed(#[from] serde_json::Error),
    #[error("binary frames are not supported")]
    Binary,
    #[error("unknown message type: {0}")]
    UnknownType(String),
    #[error("{}", .0.detail())]
    Invalid(#[from] DomainError),
}

/// `card_id` arrives as a number from most clients and as a string from some.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CardIdRepr {
    Number(CardId),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub clue: Option<String>,
    #[serde(default)]
    pub number: Option<i32>,
    #[serde(default)]
    card_id: Option<CardIdRepr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// `team = None` leaves the current team.
    JoinTeam {
        team: Option<Team>,
        role: Option<Role>,
    },
    SetRole {
        role: Role,
    },
    StartGame,
    GiveClue {
        clue: String,
        number: i32,
    },
    GuessCard {
        card_id: CardId,
    },
    EndGuessing,
    NewGame,
}

impl ClientCommand {
    /// Wording used in the generic error sent when storage fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            ClientCommand::JoinTeam { .. } => "failed to join team",
            ClientCommand::SetRole { .. } => "failed to set role",
            ClientCommand::StartGame => "failed to start game",
            ClientCommand::GiveClue { .. } => "failed to give clue",
            ClientCommand::GuessCard { .. } => "failed to guess card",
            ClientCommand::EndGuessing => "failed to end guessing",
            ClientCommand::NewGame => "failed to reset",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClientCommand::JoinTeam { .. } => "join_team",
            ClientCommand::SetRole { .. } => "set_role",
            ClientCommand::StartGame => "start_game",
            ClientCommand::GiveClue { .. } => "give_clue",
            ClientCommand::GuessCard { .. } => "guess_card",
            ClientCommand::EndGuessing => "end_guessing",
            ClientCommand::NewGame => "new_game",
        }
    }
}

impl TryFrom<ClientEnvelope> for ClientCommand {
    type Error = ProtocolError;

    fn try_from(env: ClientEnvelope) -> Result<Self, Self::Error> {
        let cmd = match env.kind.as_str() {
            "join_team" => ClientCommand::JoinTeam {
                team: parse_optional_team(env.team.as_deref().unwrap_or_default())?,
                role: parse_optional_role(env.role.as_deref().unwrap_or_default())?,
            },
            "set_role" => {
                let role = env
                    .role
                    .as_deref()
                    .unwrap_or_default()
                    .parse::<Role>()?;
                ClientCommand::SetRole { role }
            }
            "start_game" => ClientCommand::StartGame,
            "give_clue" => ClientCommand::GiveClue {
                clue: env.clue.unwrap_or_default(),
                number: env.number.unwrap_or_default(),
            },
            "guess_card" => {
                let card_id = match env.card_id {
                    Some(CardIdRepr::Number(id)) => id,
                    Some(CardIdRepr::Text(raw)) => raw.trim().parse().map_err(|_| {
                        DomainError::validation(ValidationKind::MissingField, "invalid card_id")
                    })?,
                    None => {
                        return Err(DomainError::validation(
                            ValidationKind::MissingField,
                            "card_id is required",
                        )
                        .into())
                    }
                };
                ClientCommand::GuessCard { card_id }
            }
            "end_guessing" => ClientCommand::EndGuessing,
            "new_game" => ClientCommand::NewGame,
            other => return Err(ProtocolError::UnknownType(other.to_string())),
        };
        Ok(cmd)
    }
}

/// Decode one text frame.
pub fn decode(text: &str) -> Result<ClientCommand, ProtocolError> {
    let envelope: ClientEnvelope = serde_json::from_str(text)?;
    ClientCommand::try_from(envelope)
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    RoomState { state: RoomState },
    Error { error: String },
}

impl ServerMsg {
    pub fn error(message: impl Into<String>) -> Self {
        ServerMsg::Error {
            error: message.into(),
        }
    }
}
