//! Error taxonomy for the engine.
//!
//! Every error is user-facing, deterministic and non-retryable: the same
//! input against the same state always fails the same way.

use thiserror::Error;

use crate::core::PlayerId;

/// All ways a command can be refused or a state blob rejected.
#[derive(Debug, Error)]
pub enum GameError {
    /// The envelope is not a JSON object with a string `command` field.
    #[error("params must be an object with a `command` field")]
    ParamsMalformed,

    /// The command name is not one the factory knows (including "").
    #[error("command `{0}` not found")]
    CommandNotFound(String),

    /// Command-specific required fields are missing, extra or malformed.
    #[error("bad command input: {0}")]
    Input(String),

    /// A state-reading command arrived before `StartGame`.
    #[error("the game has not started yet")]
    NotStarted,

    /// `StartGame` arrived when the game is already running.
    #[error("the game has already started")]
    AlreadyStarted,

    /// The acting player does not match the current turn cursor.
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    /// A state blob failed to serialize or deserialize.
    #[error("bad state blob: {0}")]
    BadStateBlob(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            GameError::CommandNotFound("Dance".into()).to_string(),
            "command `Dance` not found"
        );
        assert_eq!(
            GameError::NotYourTurn(PlayerId::new("H2")).to_string(),
            "it is not H2's turn"
        );
        assert_eq!(GameError::NotStarted.to_string(), "the game has not started yet");
    }
}
