//! Per-game ruleset toggles.

use serde::{Deserialize, Serialize};

/// Ruleset toggles fixed for the duration of a game.
///
/// Read-only input to the rules engine; nothing in the engine mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// A hunter's last-stand shot goes straight through a talisman.
    pub shot_ignores_talisman: bool,
    /// A tied vote expels nobody instead of picking one of the tied players.
    pub no_expulsion_on_tie: bool,
    /// Bond deaths cascade through chains of bonds instead of a single hop.
    pub transitive_bond_deaths: bool,
    /// RNG seed for tie-breaks and role shuffling.
    pub seed: u64,
    /// Maximum number of undo snapshots kept. 0 = unlimited.
    pub max_history: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            shot_ignores_talisman: false,
            no_expulsion_on_tie: false,
            transitive_bond_deaths: false,
            seed: 42,
            max_history: 0,
        }
    }
}

impl GameConfig {
    /// Let last-stand shots ignore the talisman.
    pub fn with_shot_ignores_talisman(mut self, enabled: bool) -> Self {
        self.shot_ignores_talisman = enabled;
        self
    }

    /// Let tied votes end with no expulsion.
    pub fn with_no_expulsion_on_tie(mut self, enabled: bool) -> Self {
        self.no_expulsion_on_tie = enabled;
        self
    }

    /// Cascade bond deaths transitively.
    pub fn with_transitive_bond_deaths(mut self, enabled: bool) -> Self {
        self.transitive_bond_deaths = enabled;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Cap the undo history (0 = unlimited).
    pub fn with_max_history(mut self, max: usize) -> Self {
        self.max_history = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = GameConfig::default();
        assert!(!config.shot_ignores_talisman);
        assert!(!config.no_expulsion_on_tie);
        assert!(!config.transitive_bond_deaths);
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_history, 0);
    }

    #[test]
    fn builder_chain() {
        let config = GameConfig::default()
            .with_shot_ignores_talisman(true)
            .with_no_expulsion_on_tie(true)
            .with_seed(7)
            .with_max_history(10);
        assert!(config.shot_ignores_talisman);
        assert!(config.no_expulsion_on_tie);
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_history, 10);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"seed": 9}"#).unwrap();
        assert_eq!(config.seed, 9);
        assert!(!config.shot_ignores_talisman);
    }
}
