use crate::player::PlayerId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building or editing a roster.
///
/// The rules engine itself never fails on malformed input; these errors only
/// surface from setup helpers that validate what the orchestrator feeds in.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A role name could not be parsed.
    #[error("unknown character: {0}")]
    UnknownCharacter(String),

    /// The referenced player does not exist in the roster.
    #[error("player not found: {0}")]
    UnknownPlayer(PlayerId),

    /// The number of names and roles handed to roster creation differ.
    #[error("roster size mismatch: {players} players but {characters} characters")]
    RosterSize {
        /// Number of player names supplied.
        players: usize,
        /// Number of characters supplied.
        characters: usize,
    },

    /// A roster must contain at least one player.
    #[error("roster is empty")]
    EmptyRoster,

    /// A pairing or copy was requested that the roster cannot apply.
    #[error("invalid pairing: {0}")]
    InvalidPairing(String),
}
