//! The model: exclusive owner of the game state.
//!
//! No other component mutates state fields directly. Commands express
//! their effects through the named operations here; the model knows
//! nothing about command semantics or validation order.
//!
//! The state is `None` until `StartGame` installs the template. Every
//! state-touching operation fails with [`GameError::NotStarted`] while the
//! state is absent.

use tracing::trace;

use crate::commands::Command;
use crate::core::{GameState, PlayerAttrs, PlayerId, Roll};
use crate::error::GameError;

/// Owns `Option<GameState>` and exposes the mutation vocabulary used by
/// commands.
#[derive(Clone, Debug, Default)]
pub struct Model {
    state: Option<GameState>,
}

impl Model {
    /// Create a model, optionally resuming from an existing state.
    #[must_use]
    pub fn new(state: Option<GameState>) -> Self {
        Self { state }
    }

    /// True iff the state is absent (game not started).
    #[must_use]
    pub fn stateless(&self) -> bool {
        self.state.is_none()
    }

    /// Read access to the state, if present.
    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    fn state_ref(&self) -> Result<&GameState, GameError> {
        self.state.as_ref().ok_or(GameError::NotStarted)
    }

    fn state_mut(&mut self) -> Result<&mut GameState, GameError> {
        self.state.as_mut().ok_or(GameError::NotStarted)
    }

    /// Install the empty-but-structured state template.
    ///
    /// Fails with `AlreadyStarted` if a state is already present.
    pub fn create_state_template(&mut self) -> Result<(), GameError> {
        if self.state.is_some() {
            return Err(GameError::AlreadyStarted);
        }
        trace!("installing state template");
        self.state = Some(GameState::template());
        Ok(())
    }

    /// Register a player: append to the turn order, store attributes,
    /// leave the board slot unset.
    ///
    /// Player ids must be unique; a duplicate is an `Input` error.
    pub fn add_player(&mut self, id: PlayerId, attrs: PlayerAttrs) -> Result<(), GameError> {
        let state = self.state_mut()?;
        if state.players.contains_key(&id) {
            return Err(GameError::Input(format!("duplicate player id `{id}`")));
        }
        trace!(player = %id, "adding player");
        state.players_order.push(id.clone());
        state.players.insert(id.clone(), attrs);
        state.board.insert(id, None);
        Ok(())
    }

    /// Bump the round counter; returns the new round number.
    pub fn increase_round(&mut self) -> Result<u32, GameError> {
        let state = self.state_mut()?;
        state.turn.round += 1;
        trace!(round = state.turn.round, "round increased");
        Ok(state.turn.round)
    }

    /// Current round number.
    pub fn round(&self) -> Result<u32, GameError> {
        Ok(self.state_ref()?.turn.round)
    }

    /// Advance the turn cursor to the next player in order, wrapping to
    /// the first when the cursor is unset or at the last player, and reset
    /// the advisory commands to `[RollDice]`.
    ///
    /// Returns the new current player.
    pub fn move_to_next_turn(&mut self) -> Result<PlayerId, GameError> {
        let state = self.state_mut()?;
        let next = state
            .successor()
            .cloned()
            .ok_or_else(|| GameError::Input("cannot advance the turn: no players registered".into()))?;
        trace!(player = %next, "turn moved");
        state.turn.player_id = Some(next.clone());
        state.turn.commands.clear();
        state.turn.commands.push(Command::RollDice);
        Ok(next)
    }

    /// Whether the current player is the last entry of the turn order.
    pub fn is_last_turn(&self) -> Result<bool, GameError> {
        Ok(self.state_ref()?.current_is_last())
    }

    /// The player the cursor points at, if any.
    pub fn current_player(&self) -> Result<Option<PlayerId>, GameError> {
        Ok(self.state_ref()?.turn.player_id.clone())
    }

    /// Whether the current player has a robot brain.
    ///
    /// False when the cursor is unset.
    pub fn current_player_is_robot(&self) -> Result<bool, GameError> {
        let state = self.state_ref()?;
        Ok(state
            .turn
            .player_id
            .as_ref()
            .and_then(|id| state.attrs(id))
            .is_some_and(|attrs| attrs.brain.is_robot()))
    }

    /// Record a player's roll on the board.
    pub fn record_roll(&mut self, player: &PlayerId, roll: Roll) -> Result<(), GameError> {
        let state = self.state_mut()?;
        let slot = state
            .board
            .get_mut(player)
            .ok_or_else(|| GameError::Input(format!("unknown player `{player}`")))?;
        trace!(player = %player, roll = ?roll, "roll recorded");
        *slot = Some(roll);
        Ok(())
    }

    /// Replace the advisory next-legal-commands list.
    pub fn set_next_commands(
        &mut self,
        commands: impl IntoIterator<Item = Command>,
    ) -> Result<(), GameError> {
        let state = self.state_mut()?;
        state.turn.commands.clear();
        state.turn.commands.extend(commands);
        Ok(())
    }

    /// Serialize the (optional) state to a JSON blob.
    ///
    /// An absent state unloads as `"null"` and loads back as absent.
    pub fn unload(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(&self.state)?)
    }

    /// Replace the state from a JSON blob produced by [`Model::unload`].
    pub fn load(&mut self, blob: &str) -> Result<(), GameError> {
        self.state = serde_json::from_str(blob)?;
        Ok(())
    }
}
