pub mod check;
pub mod play;
pub mod roles;

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use howl_core::{Action, Character, GameConfig, PlayerId};
use howl_rules::Ballot;
use howl_session::{GameSession, standard_deck};

/// A scripted game.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: GameConfig,
    pub players: Vec<Seat>,
    #[serde(default)]
    pub setup: Setup,
    #[serde(default)]
    pub rounds: Vec<Round>,
}

/// One player. Without a character the whole table is dealt from the
/// standard deck.
#[derive(Debug, Deserialize)]
pub struct Seat {
    pub name: String,
    #[serde(default)]
    pub character: Option<Character>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Setup {
    #[serde(default)]
    pub lovers: Option<(PlayerId, PlayerId)>,
    #[serde(default)]
    pub copies: Vec<RoleCopy>,
}

#[derive(Debug, Deserialize)]
pub struct RoleCopy {
    pub occult: PlayerId,
    pub source: PlayerId,
}

/// A night followed by a day.
#[derive(Debug, Default, Deserialize)]
pub struct Round {
    #[serde(default)]
    pub night: Vec<Action>,
    /// Last-stand shots fired after the night.
    #[serde(default)]
    pub night_shots: Vec<Action>,
    #[serde(default)]
    pub votes: BTreeMap<PlayerId, Ballot>,
    /// Last-stand shots fired after the expulsion.
    #[serde(default)]
    pub day_shots: Vec<Action>,
}

impl Scenario {
    /// Every action in the script, in order.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.rounds
            .iter()
            .flat_map(|r| r.night.iter().chain(&r.night_shots).chain(&r.day_shots))
    }
}

/// Read and parse a scenario file.
fn load_scenario(path: &Path) -> Result<Scenario, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let scenario: Scenario =
        serde_json::from_str(&text).map_err(|e| format!("invalid scenario: {e}"))?;
    if scenario.players.is_empty() {
        return Err("scenario has no players".into());
    }
    Ok(scenario)
}

/// Seat the table and apply setup. Returns the session still in setup.
fn build_session(scenario: &Scenario, seed: Option<u64>) -> Result<GameSession, String> {
    let mut config = scenario.config.clone();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let names = scenario.players.iter().map(|s| s.name.clone());

    let assigned: Vec<Character> = scenario
        .players
        .iter()
        .filter_map(|s| s.character)
        .collect();
    let session = if assigned.is_empty() {
        let deck = standard_deck(scenario.players.len()).map_err(|e| e.to_string())?;
        GameSession::with_random_roles(names, &deck, config)
    } else if assigned.len() == scenario.players.len() {
        GameSession::new(names, &assigned, config)
    } else {
        return Err("either every player or no player must have a character".into());
    };
    let mut session = session.map_err(|e| e.to_string())?;

    if let Some((a, b)) = scenario.setup.lovers {
        session.bind_lovers(a, b).map_err(|e| e.to_string())?;
    }
    for copy in &scenario.setup.copies {
        session
            .copy_character(copy.occult, copy.source)
            .map_err(|e| e.to_string())?;
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"{
        "config": { "no_expulsion_on_tie": true, "seed": 3 },
        "players": [
            { "name": "Ada", "character": "werewolf" },
            { "name": "Bo", "character": "seer" },
            { "name": "Cy", "character": "matchmaker" },
            { "name": "Dee", "character": "occult" }
        ],
        "setup": { "lovers": [2, 3], "copies": [{ "occult": 4, "source": 1 }] },
        "rounds": [
            {
                "night": [{ "actor": 1, "kind": { "type": "kill" }, "target": 2 }],
                "votes": { "1": { "for": 4 }, "4": "abstain" }
            }
        ]
    }"#;

    #[test]
    fn parses_a_scenario() {
        let s: Scenario = serde_json::from_str(SCENARIO).unwrap();
        assert!(s.config.no_expulsion_on_tie);
        assert_eq!(s.players.len(), 4);
        assert_eq!(s.setup.lovers, Some((PlayerId(2), PlayerId(3))));
        assert_eq!(s.rounds[0].votes[&PlayerId(4)], Ballot::Abstain);
        assert_eq!(s.actions().count(), 1);
    }

    #[test]
    fn builds_a_session_with_setup_applied() {
        let s: Scenario = serde_json::from_str(SCENARIO).unwrap();
        let session = build_session(&s, None).unwrap();
        let dee = session.player(PlayerId(4)).unwrap();
        assert_eq!(dee.character, Character::Werewolf);
        assert!(session.player(PlayerId(2)).unwrap().is_in_love());
    }

    #[test]
    fn mixed_assignment_is_rejected() {
        let s: Scenario = serde_json::from_str(
            r#"{ "players": [{ "name": "A", "character": "seer" }, { "name": "B" }] }"#,
        )
        .unwrap();
        assert!(build_session(&s, None).is_err());
    }

    #[test]
    fn unassigned_table_is_dealt() {
        let s: Scenario = serde_json::from_str(
            r#"{ "players": [{ "name": "A" }, { "name": "B" }, { "name": "C" }, { "name": "D" }] }"#,
        )
        .unwrap();
        let session = build_session(&s, Some(1)).unwrap();
        let wolves = session
            .state()
            .players
            .iter()
            .filter(|p| p.is_wolf())
            .count();
        assert_eq!(wolves, 1);
    }
}
