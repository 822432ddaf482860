//! The command set: validation, execution and chaining.
//!
//! ## Dispatch
//!
//! Commands are a fieldless enum dispatched by name. Each variant
//! implements the same capability pair:
//! - `validate`: check preconditions against the model, read-only
//! - `execute`: mutate the model and return output lines
//!
//! The serde derives give each variant its canonical name string
//! ("StartGame", "RollDice", ...), used both in command envelopes and in
//! the turn cursor's advisory list.
//!
//! ## Chaining
//!
//! A command's `execute` may run child commands as part of its own effect,
//! forming a synchronous call tree:
//!
//! ```text
//! StartGame -> StartRound -> StartTurn -> [PlayRobotTurn -> SkipTurn -> EndTurn]
//! EndTurn   -> EndRound -> StartRound -> StartTurn   (last player)
//! EndTurn   -> StartTurn                             (otherwise)
//! ```
//!
//! Children are constructed with synthesized, always-valid params, so only
//! externally-driven `EndTurn`/`RollDice` can fail validation. Chained
//! execution is best-effort: mutations committed by earlier links are not
//! rolled back if a later link fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::{DiceSource, PlayerAttrs, PlayerId, Roll};
use crate::error::GameError;
use crate::model::Model;

/// Execution context: the model plus the injected dice capability.
///
/// Commands never own these; the controller lends them per call.
pub struct Context<'a> {
    pub model: &'a mut Model,
    pub dice: &'a mut dyn DiceSource,
}

/// What a command hands back to the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum Output {
    /// Ordered human-readable lines; display text, not a structured API.
    Lines(Vec<String>),
    /// The input envelope, returned verbatim (`Echo` only).
    Params(Value),
}

impl Output {
    /// The output lines, empty for `Params`.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        match self {
            Output::Lines(lines) => lines,
            Output::Params(_) => &[],
        }
    }
}

/// The command vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Echo,
    StartGame,
    StartRound,
    StartTurn,
    EndTurn,
    EndRound,
    RollDice,
    SkipTurn,
    PlayRobotTurn,
}

/// Maps command-name strings to commands.
///
/// Explicitly constructed and handed to the controller rather than being
/// a process-wide singleton, so tests can wire their own.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandFactory;

impl CommandFactory {
    /// Create a factory.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Look up a command by name.
    ///
    /// Fails with `CommandNotFound` for any unrecognized name, including
    /// the empty string.
    pub fn get(&self, name: &str) -> Result<Command, GameError> {
        match name {
            "Echo" => Ok(Command::Echo),
            "StartGame" => Ok(Command::StartGame),
            "StartRound" => Ok(Command::StartRound),
            "StartTurn" => Ok(Command::StartTurn),
            "EndTurn" => Ok(Command::EndTurn),
            "EndRound" => Ok(Command::EndRound),
            "RollDice" => Ok(Command::RollDice),
            "SkipTurn" => Ok(Command::SkipTurn),
            "PlayRobotTurn" => Ok(Command::PlayRobotTurn),
            other => Err(GameError::CommandNotFound(other.to_string())),
        }
    }
}

impl Command {
    /// The canonical envelope name of this command.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Command::Echo => "Echo",
            Command::StartGame => "StartGame",
            Command::StartRound => "StartRound",
            Command::StartTurn => "StartTurn",
            Command::EndTurn => "EndTurn",
            Command::EndRound => "EndRound",
            Command::RollDice => "RollDice",
            Command::SkipTurn => "SkipTurn",
            Command::PlayRobotTurn => "PlayRobotTurn",
        }
    }

    /// Check preconditions against the model without mutating it.
    pub fn validate(self, model: &Model, params: &Value) -> Result<(), GameError> {
        match self {
            Command::StartGame => {
                // AlreadyStarted wins over input-shape complaints.
                if !model.stateless() {
                    return Err(GameError::AlreadyStarted);
                }
                expect_keys(params, &["command", "players"])?;
                parse_players(params).map(|_| ())
            }
            Command::EndTurn | Command::RollDice => {
                if model.stateless() {
                    return Err(GameError::NotStarted);
                }
                expect_keys(params, &["command", "player"])?;
                let player = player_param(params)?;
                if model.current_player()?.as_ref() != Some(&player) {
                    return Err(GameError::NotYourTurn(player));
                }
                Ok(())
            }
            _ => {
                if model.stateless() {
                    Err(GameError::NotStarted)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Mutate the model and return output, running chained children.
    pub fn execute(self, ctx: &mut Context<'_>, params: &Value) -> Result<Output, GameError> {
        debug!(command = self.name(), "executing");
        match self {
            Command::Echo => Ok(Output::Params(params.clone())),

            Command::StartGame => {
                let players = parse_players(params)?;
                ctx.model.create_state_template()?;
                for (id, attrs) in players {
                    ctx.model.add_player(id, attrs)?;
                }

                let mut lines = vec!["Game Started!".to_string()];
                chain(Command::StartRound, ctx, &mut lines)?;
                Ok(Output::Lines(lines))
            }

            Command::StartRound => {
                let round = ctx.model.increase_round()?;

                let mut lines = vec![format!("Round {round} has started.")];
                chain(Command::StartTurn, ctx, &mut lines)?;
                Ok(Output::Lines(lines))
            }

            Command::StartTurn => {
                let player = ctx.model.move_to_next_turn()?;

                let mut lines = vec![format!("{player}, now it is your turn.")];
                if ctx.model.current_player_is_robot()? {
                    chain(Command::PlayRobotTurn, ctx, &mut lines)?;
                }
                Ok(Output::Lines(lines))
            }

            Command::EndTurn => {
                let player = player_param(params)?;

                let mut lines = vec![format!("{player} has ended their turn.")];
                if ctx.model.is_last_turn()? {
                    chain(Command::EndRound, ctx, &mut lines)?;
                } else {
                    chain(Command::StartTurn, ctx, &mut lines)?;
                }
                Ok(Output::Lines(lines))
            }

            Command::EndRound => {
                let round = ctx.model.round()?;

                let mut lines = vec![format!("Round {round} has ended.")];
                chain(Command::StartRound, ctx, &mut lines)?;
                Ok(Output::Lines(lines))
            }

            Command::RollDice => {
                let player = player_param(params)?;
                let roll = roll_pair(ctx.dice.sample(2, 6))?;

                let lines = vec![record_roll(ctx.model, &player, roll)?];
                ctx.model.set_next_commands([Command::EndTurn])?;
                Ok(Output::Lines(lines))
            }

            Command::SkipTurn => {
                let player = current_player(ctx.model)?;

                let mut lines = vec![format!("{player} skipped their turn.")];
                // A skip counts as the dullest possible roll.
                lines.push(record_roll(ctx.model, &player, (1, 1))?);

                let end = serde_json::json!({ "command": "EndTurn", "player": player });
                chain_with(Command::EndTurn, ctx, &end, &mut lines)?;
                Ok(Output::Lines(lines))
            }

            Command::PlayRobotTurn => {
                let player = current_player(ctx.model)?;

                let mut lines = vec![
                    format!("{player} is a brainless Robot!"),
                    format!("{player} doesn't know what to do!"),
                ];
                chain(Command::SkipTurn, ctx, &mut lines)?;
                Ok(Output::Lines(lines))
            }
        }
    }

    /// Validate then execute.
    pub fn run(self, ctx: &mut Context<'_>, params: &Value) -> Result<Output, GameError> {
        self.validate(ctx.model, params)?;
        self.execute(ctx, params)
    }
}

/// Run a chained child with a bare synthesized envelope.
fn chain(cmd: Command, ctx: &mut Context<'_>, lines: &mut Vec<String>) -> Result<(), GameError> {
    let params = serde_json::json!({ "command": cmd.name() });
    chain_with(cmd, ctx, &params, lines)
}

/// Run a chained child with explicit params, appending its output lines.
fn chain_with(
    cmd: Command,
    ctx: &mut Context<'_>,
    params: &Value,
    lines: &mut Vec<String>,
) -> Result<(), GameError> {
    match cmd.run(ctx, params)? {
        Output::Lines(child) => lines.extend(child),
        // Echo is never chained.
        Output::Params(_) => {}
    }
    Ok(())
}

/// Require the envelope's key set to be exactly `expected`.
fn expect_keys(params: &Value, expected: &[&str]) -> Result<(), GameError> {
    let obj = params.as_object().ok_or(GameError::ParamsMalformed)?;

    let mut found: Vec<&str> = obj.keys().map(String::as_str).collect();
    found.sort_unstable();
    let mut want: Vec<&str> = expected.to_vec();
    want.sort_unstable();

    if found != want {
        return Err(GameError::Input(format!(
            "expected keys {want:?}, found keys {found:?}"
        )));
    }
    Ok(())
}

/// Extract the acting player from the envelope.
fn player_param(params: &Value) -> Result<PlayerId, GameError> {
    params
        .get("player")
        .and_then(Value::as_str)
        .map(PlayerId::from)
        .ok_or_else(|| GameError::Input("`player` must be a string".into()))
}

/// Parse the `players` mapping in envelope document order.
fn parse_players(params: &Value) -> Result<Vec<(PlayerId, PlayerAttrs)>, GameError> {
    let players = params
        .get("players")
        .and_then(Value::as_object)
        .ok_or_else(|| GameError::Input("`players` must be an object of id -> attributes".into()))?;

    players
        .iter()
        .map(|(id, attrs)| {
            let attrs: PlayerAttrs = serde_json::from_value(attrs.clone())
                .map_err(|e| GameError::Input(format!("bad attributes for player `{id}`: {e}")))?;
            Ok((PlayerId::new(id.clone()), attrs))
        })
        .collect()
}

/// The player the cursor points at; an error outside a turn.
fn current_player(model: &Model) -> Result<PlayerId, GameError> {
    model
        .current_player()?
        .ok_or_else(|| GameError::Input("no turn is in progress".into()))
}

/// Record a roll on the board and produce its output line.
fn record_roll(model: &mut Model, player: &PlayerId, roll: Roll) -> Result<String, GameError> {
    model.record_roll(player, roll)?;
    Ok(format!("{player} rolled 2d6: {}, {}.", roll.0, roll.1))
}

/// Convert a sampled pair into a board roll.
fn roll_pair(sampled: Vec<u8>) -> Result<Roll, GameError> {
    match sampled[..] {
        [a, b] => Ok((a, b)),
        _ => Err(GameError::Input(format!(
            "dice source returned {} dice, expected 2",
            sampled.len()
        ))),
    }
}
