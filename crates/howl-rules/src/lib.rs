//! Rules engine for Howl.
//!
//! Pure functions over a roster: night resolution, bond cascades, victory
//! checks, and vote tallying. None of them keep state between calls; the
//! session crate threads the roster from one phase to the next.

/// Secondary deaths through love and blood bonds.
pub mod bonds;
/// Night action resolution.
pub mod night;
/// Win-condition evaluation.
pub mod victory;
/// Vote tallying with random tie-breaks.
pub mod vote;

/// Re-export bond propagation.
pub use bonds::{BondDeath, BondKind, cascade_deaths, propagate_secondary_deaths};
/// Re-export the night resolver and its result types.
pub use night::{ActionResult, DeathCause, Investigation, NightEvent, resolve_night};
/// Re-export the victory evaluator.
pub use victory::{VictoryReason, VictoryResult, evaluate_victory};
/// Re-export the vote tally.
pub use vote::{Ballot, VoteResult, tally_votes};
