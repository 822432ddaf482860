//! Game state: the single persisted value object.
//!
//! ## GameState
//!
//! Everything a game session needs to resume:
//! - `players_order`: turn order (insertion order at game start)
//! - `players`: per-player attributes, fixed at game start
//! - `board`: each player's last roll, if any
//! - `turn`: the turn cursor (current player, round, advisory commands)
//!
//! The state is either wholly absent (game not started, represented as
//! `Option::None` by the model) or fully populated. It must survive a JSON
//! round-trip losslessly, including the order of `players_order` and of
//! the player-keyed maps — hence `IndexMap` rather than a hash map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::{PlayerAttrs, PlayerId};
use crate::commands::Command;

/// A recorded dice roll: two dice, in roll order.
pub type Roll = (u8, u8);

/// The turn cursor: whose turn it is, which round, and what they may play.
///
/// `commands` is advisory only — the engine reports what is legally
/// playable next but does not enforce it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnCursor {
    /// Current player, unset until the first `StartTurn`.
    pub player_id: Option<PlayerId>,

    /// Round number; 0 before the first round, incremented once per round.
    pub round: u32,

    /// Commands legally playable next (advisory).
    pub commands: SmallVec<[Command; 2]>,
}

impl TurnCursor {
    fn empty() -> Self {
        Self {
            player_id: None,
            round: 0,
            commands: SmallVec::new(),
        }
    }
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Turn order; unique ids, fixed at game start.
    pub players_order: Vec<PlayerId>,

    /// Per-player attributes keyed by id; same key set as `players_order`.
    pub players: IndexMap<PlayerId, PlayerAttrs>,

    /// Last roll per player; `None` until the player first rolls.
    pub board: IndexMap<PlayerId, Option<Roll>>,

    /// The turn cursor.
    pub turn: TurnCursor,
}

impl GameState {
    /// Create the empty-but-structured state template installed by
    /// `StartGame` before any players are added.
    #[must_use]
    pub fn template() -> Self {
        Self {
            players_order: Vec::new(),
            players: IndexMap::new(),
            board: IndexMap::new(),
            turn: TurnCursor::empty(),
        }
    }

    /// Get a player's attributes.
    #[must_use]
    pub fn attrs(&self, player: &PlayerId) -> Option<&PlayerAttrs> {
        self.players.get(player)
    }

    /// Successor of the current player in turn order.
    ///
    /// Wraps to the first player when the cursor is unset (new game) or
    /// points at the last entry. `None` only when there are no players.
    #[must_use]
    pub fn successor(&self) -> Option<&PlayerId> {
        let next_index = match &self.turn.player_id {
            None => 0,
            Some(current) => {
                let pos = self.players_order.iter().position(|p| p == current)?;
                (pos + 1) % self.players_order.len()
            }
        };
        self.players_order.get(next_index)
    }

    /// Whether the current player is the last entry of the turn order.
    ///
    /// False when the cursor is unset.
    #[must_use]
    pub fn current_is_last(&self) -> bool {
        match (&self.turn.player_id, self.players_order.last()) {
            (Some(current), Some(last)) => current == last,
            _ => false,
        }
    }
}
