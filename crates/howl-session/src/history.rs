//! Append-only log of game snapshots backing undo.

use chrono::{DateTime, Utc};
use howl_core::GameState;
use howl_rules::VictoryResult;
use serde::{Deserialize, Serialize};

/// The full game as it stood before a step was applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// What the step was about to do (e.g. "night 2").
    pub label: String,
    /// State before the step.
    pub state: GameState,
    /// Victory result before the step.
    pub victory: Option<VictoryResult>,
    /// Pending hunter shots before the step.
    pub pending_shots: Vec<howl_core::PlayerId>,
    /// Journal length before the step.
    pub journal_len: usize,
    /// When the snapshot was taken.
    pub recorded_at: DateTime<Utc>,
}

/// Snapshots in the order they were taken.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    snapshots: Vec<Snapshot>,
    max_snapshots: usize,
}

impl History {
    /// Create a history holding at most `max_snapshots` entries (0 = unlimited).
    pub fn new(max_snapshots: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            max_snapshots,
        }
    }

    /// Append a snapshot, dropping the oldest ones past capacity.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
        if self.max_snapshots > 0 && self.snapshots.len() > self.max_snapshots {
            let drain_count = self.snapshots.len() - self.max_snapshots;
            self.snapshots.drain(..drain_count);
        }
    }

    /// Remove and return the newest snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop()
    }

    /// The newest snapshot.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Labels of all snapshots, oldest first.
    pub fn labels(&self) -> Vec<&str> {
        self.snapshots.iter().map(|s| s.label.as_str()).collect()
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether there is anything to undo.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use howl_core::{Character, GameConfig, Roster};

    fn snapshot(label: &str) -> Snapshot {
        let roster = Roster::new(["A", "B"], &[Character::Werewolf, Character::Seer]).unwrap();
        Snapshot {
            label: label.to_string(),
            state: GameState::new(roster, GameConfig::default()),
            victory: None,
            pending_shots: Vec::new(),
            journal_len: 0,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn push_and_pop() {
        let mut h = History::new(0);
        assert!(h.is_empty());
        h.push(snapshot("night 1"));
        h.push(snapshot("day 1"));
        assert_eq!(h.len(), 2);
        assert_eq!(h.latest().unwrap().label, "day 1");
        assert_eq!(h.pop().unwrap().label, "day 1");
        assert_eq!(h.labels(), vec!["night 1"]);
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut h = History::new(2);
        h.push(snapshot("a"));
        h.push(snapshot("b"));
        h.push(snapshot("c"));
        assert_eq!(h.labels(), vec!["b", "c"]);
    }
}
