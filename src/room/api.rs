//! Request payloads and the request-level entry points.
//!
//! Each entry point looks the room up (directory lock released straight
//! away), runs one room operation, and lets the room notify its players
//! once its own lock is released. Payloads are plain `serde` structs; the
//! transport decodes them and maps `GameError`s to responses.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::board::HoleIndex;
use crate::core::{GameError, Result, RoomConfig, SUPPORTED_PLAYER_COUNT};
use crate::triggers::Rule;

use super::connection::{Connection, ConnectionId};
use super::directory::RoomDirectory;
use super::room::{ActionOutcome, MoveAction};
use super::snapshot::RoomSnapshot;

fn default_size() -> usize {
    SUPPORTED_PLAYER_COUNT
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequest {
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default)]
    pub hotseat: bool,
}

impl Default for CreateRequest {
    fn default() -> Self {
        Self {
            size: default_size(),
            hotseat: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResponse {
    pub code: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveRequest {
    pub code: String,
    pub player: String,
    pub index: HoleIndex,
    pub reset: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinRequest {
    pub code: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateRequest {
    pub code: String,
}

/// Add `rule`, or with `delete` set remove the rule at `id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleRequest {
    pub code: String,
    pub delete: bool,
    pub id: usize,
    pub rule: Option<Rule>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PingRequest {
    pub code: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamRequest {
    pub code: String,
    pub name: String,
}

fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        Err(GameError::MissingField(field))
    } else {
        Ok(value)
    }
}

impl RoomDirectory {
    /// Create a room and return its code.
    pub fn create_room(&self, req: &CreateRequest) -> Result<CreateResponse> {
        let config = RoomConfig::default()
            .with_player_count(req.size)
            .with_hotseat(req.hotseat);
        let room = self.create(&config)?;
        Ok(CreateResponse {
            code: room.code().to_string(),
        })
    }

    /// Play a move, or reset a finished game.
    pub fn apply_move(&self, req: &MoveRequest) -> Result<ActionOutcome> {
        let room = self.get(require("code", &req.code)?)?;
        let player = require("player", &req.player)?;
        let action = MoveAction::new(player, req.index).with_reset(req.reset);
        room.apply_action(&action)
    }

    /// Seat a player (idempotent) and return the room state.
    pub fn join(&self, req: &JoinRequest) -> Result<RoomSnapshot> {
        let room = self.get(require("code", &req.code)?)?;
        let name = require("name", &req.name)?;
        Ok(room.join(name))
    }

    pub fn state(&self, req: &StateRequest) -> Result<RoomSnapshot> {
        let room = self.get(require("code", &req.code)?)?;
        Ok(room.snapshot())
    }

    /// Add or delete a rule.
    pub fn edit_rules(&self, req: &RuleRequest) -> Result<()> {
        let room = self.get(require("code", &req.code)?)?;
        if req.delete {
            room.delete_rule(req.id)?;
            return Ok(());
        }
        let rule = req.rule.clone().ok_or(GameError::MissingField("rule"))?;
        room.add_rule(rule);
        Ok(())
    }

    /// Nudge the player to move. Returns the number of notices delivered.
    pub fn ping(&self, req: &PingRequest) -> Result<usize> {
        let room = self.get(require("code", &req.code)?)?;
        let name = require("name", &req.name)?;
        Ok(room.ping(name))
    }

    /// Attach a live connection for an already-joined player.
    pub fn open_stream(&self, req: &StreamRequest, conn: Arc<dyn Connection>) -> Result<ConnectionId> {
        let room = self.get(require("code", &req.code)?)?;
        let name = require("name", &req.name)?;
        room.connect(name, conn)
    }
}
