//! # turnwheel
//!
//! A deterministic turn-based dice game engine: discrete command
//! envelopes in, human-readable output lines out.
//!
//! ## Design Principles
//!
//! 1. **Validated state machine**: every command checks its preconditions
//!    against the current state before mutating anything.
//!
//! 2. **Chained transitions**: turn progression is a synchronous call
//!    tree of commands (`StartGame` → `StartRound` → `StartTurn` → ...),
//!    not an event loop.
//!
//! 3. **Injection over singletons**: the model, command factory and dice
//!    source are constructed explicitly and passed in, so tests can script
//!    every roll.
//!
//! ## Architecture
//!
//! - **Serializable State**: the whole game lives in one JSON-round-trip
//!   value object; `Model::unload`/`load` persist and resume a session.
//!
//! - **Tagged-variant commands**: one fieldless enum dispatched by name,
//!   each variant implementing the `validate`/`execute` capability pair.
//!
//! ## Modules
//!
//! - `core`: player identity, game state, dice sampling
//! - `model`: exclusive owner and mutator of the state
//! - `commands`: the command set, factory and chaining
//! - `controller`: envelope validation and dispatch
//! - `error`: the error taxonomy
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use turnwheel::Controller;
//!
//! let mut game = Controller::with_seed(42);
//!
//! let output = game.execute(json!({
//!     "command": "StartGame",
//!     "players": {
//!         "H1": { "brain": "human", "color": "blue" },
//!         "R2": { "brain": "robot", "color": "green" },
//!     }
//! })).unwrap();
//!
//! assert_eq!(output.lines()[0], "Game Started!");
//! ```

pub mod commands;
pub mod controller;
pub mod core;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use crate::commands::{Command, CommandFactory, Context, Output};
pub use crate::controller::Controller;
pub use crate::core::{Brain, DiceRng, DiceSource, GameState, PlayerAttrs, PlayerId, Roll, ScriptedDice, TurnCursor};
pub use crate::error::GameError;
pub use crate::model::Model;
