//! Core types for Howl: players, roles, actions, and game state.
//!
//! This crate defines the data model shared by the rules engine and the
//! session orchestrator. Everything here is plain data with serde support;
//! the rules that act on it live in `howl-rules`.

/// Night actions and their typed payloads.
pub mod action;
/// The fixed set of roles and their alignments.
pub mod character;
/// Per-game ruleset toggles.
pub mod config;
/// Error types used throughout the crate.
pub mod error;
/// Player identity and per-game status.
pub mod player;
/// Ordered player collection with bond helpers.
pub mod roster;
/// Whole-game state handed to the victory evaluator.
pub mod state;

/// Re-export action types.
pub use action::{Action, ActionId, ActionKind};
/// Re-export role types.
pub use character::{Character, Team};
/// Re-export configuration.
pub use config::GameConfig;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export player types.
pub use player::{Player, PlayerId};
/// Re-export the roster.
pub use roster::Roster;
/// Re-export game state types.
pub use state::{GameState, Phase};
