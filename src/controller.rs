//! The controller: engine entry point.
//!
//! Validates the command envelope, resolves the command through the
//! factory, runs validate + execute, and returns the output verbatim.
//! State mutation happens on the owned model as a side effect.
//!
//! The controller is single-threaded and synchronous: a command's whole
//! chain runs to completion on the call stack before `execute` returns.
//! One caller drives one controller/model pair; concurrent callers need
//! an external lock.

use serde_json::Value;
use tracing::debug;

use crate::commands::{CommandFactory, Context, Output};
use crate::core::{DiceRng, DiceSource};
use crate::error::GameError;
use crate::model::Model;

/// Entry point binding a model, a command factory and a dice source.
///
/// All three are injected; [`Controller::with_seed`] wires the defaults
/// for a fresh deterministic game.
pub struct Controller {
    model: Model,
    factory: CommandFactory,
    dice: Box<dyn DiceSource>,
}

impl Controller {
    /// Create a controller from injected parts.
    #[must_use]
    pub fn new(model: Model, factory: CommandFactory, dice: Box<dyn DiceSource>) -> Self {
        Self {
            model,
            factory,
            dice,
        }
    }

    /// Fresh unstarted game with a seeded dice source.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(
            Model::new(None),
            CommandFactory::new(),
            Box::new(DiceRng::new(seed)),
        )
    }

    /// The model, for state inspection and load/unload.
    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Mutable model access, for loading a saved state blob.
    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    /// Execute one command envelope.
    ///
    /// 1. `ParamsMalformed` unless `params` is an object with a string
    ///    `command` field.
    /// 2. Factory lookup (propagates `CommandNotFound`).
    /// 3. `validate()` then `execute()`, propagating any error.
    /// 4. Returns the command output; the model is already updated.
    pub fn execute(&mut self, params: Value) -> Result<Output, GameError> {
        let name = params
            .as_object()
            .and_then(|obj| obj.get("command"))
            .and_then(Value::as_str)
            .ok_or(GameError::ParamsMalformed)?;

        debug!(command = name, "dispatching");
        let command = self.factory.get(name)?;

        let mut ctx = Context {
            model: &mut self.model,
            dice: self.dice.as_mut(),
        };
        command.run(&mut ctx, &params)
    }
}
