//! In-memory game orchestration for Howl.
//!
//! [`GameSession`] owns the game state between phases: it deals roles, runs
//! the setup abilities, hands each night's actions to the rules engine,
//! tallies day votes with a seeded RNG, and keeps an append-only history of
//! snapshots so any step can be undone.

pub mod deck;
pub mod error;
pub mod history;
pub mod journal;
pub mod session;

pub use deck::{deal, standard_deck};
pub use error::{SessionError, SessionResult};
pub use history::{History, Snapshot};
pub use journal::{Journal, JournalEntry};
pub use session::{DayReport, GameSession, NightReport, ShotReport};
