//! Error types for the session orchestrator.

use howl_core::{CoreError, Phase, PlayerId};
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors raised when the orchestrator is driven out of order or fed input
/// it refuses to pass on to the rules engine.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The operation is not allowed in the current phase.
    #[error("cannot {action} during {phase}")]
    WrongPhase {
        /// What was attempted.
        action: &'static str,
        /// The phase the game is in.
        phase: Phase,
    },

    /// The game already has a winner.
    #[error("the game is over")]
    GameOver,

    /// No deck exists for this many players.
    #[error("no standard deck for {0} players")]
    UnsupportedPlayerCount(usize),

    /// The player does not hold the role the operation needs.
    #[error("{player} is not a {expected}")]
    RoleMismatch {
        /// Who tried.
        player: PlayerId,
        /// The role required.
        expected: howl_core::Character,
    },

    /// A dead player tried to vote.
    #[error("{0} is dead and cannot vote")]
    DeadVoter(PlayerId),

    /// A vote named a player who cannot be expelled.
    #[error("{0} is not a valid vote target")]
    InvalidVoteTarget(PlayerId),

    /// A shot was submitted by someone who is not owed one.
    #[error("{0} has no shot to fire")]
    NoShotOwed(PlayerId),

    /// Hunters still have to fire or waive their shots.
    #[error("{0} shot(s) still pending")]
    ShotsPending(usize),

    /// The step was already resolved for this round.
    #[error("the {0} has already been resolved")]
    AlreadyResolved(&'static str),

    /// The step must be resolved before moving on.
    #[error("the {0} has not been resolved yet")]
    Unresolved(&'static str),

    /// The history is empty.
    #[error("nothing to undo")]
    NothingToUndo,

    /// Roster error.
    #[error("{0}")]
    Core(#[from] CoreError),
}
