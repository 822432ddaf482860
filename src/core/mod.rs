//! Core engine types: players, state, dice.
//!
//! This module contains the fundamental value types. Game behavior lives
//! in `commands`; ownership and mutation of state lives in `model`.

pub mod player;
pub mod rng;
pub mod state;

pub use player::{Brain, PlayerAttrs, PlayerId};
pub use rng::{DiceRng, DiceSource, ScriptedDice};
pub use state::{GameState, Roll, TurnCursor};
