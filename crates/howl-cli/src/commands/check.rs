use std::collections::BTreeSet;
use std::path::Path;

use howl_core::PlayerId;
use howl_rules::Ballot;

pub fn run(path: &Path) -> Result<(), String> {
    let scenario = super::load_scenario(path)?;
    let session = super::build_session(&scenario, None)?;

    let known = |id: PlayerId| session.player(id).is_some();
    let mut problems = BTreeSet::new();
    for action in scenario.actions() {
        if !known(action.actor) {
            problems.insert(format!("action '{action}': unknown actor {}", action.actor));
        }
        if let Some(target) = action.target {
            if !known(target) {
                problems.insert(format!("action '{action}': unknown target {target}"));
            }
        }
    }
    for (n, round) in scenario.rounds.iter().enumerate() {
        for (voter, ballot) in &round.votes {
            if !known(*voter) {
                problems.insert(format!("round {}: unknown voter {voter}", n + 1));
            }
            if let Ballot::For(target) = ballot {
                if !known(*target) {
                    problems.insert(format!("round {}: vote for unknown {target}", n + 1));
                }
            }
        }
    }

    if !problems.is_empty() {
        for p in &problems {
            eprintln!("  {p}");
        }
        return Err(format!("{} problem(s) found", problems.len()));
    }

    println!("  All checks passed for '{}'.", path.display());
    println!(
        "  {} players, {} rounds, {} actions",
        scenario.players.len(),
        scenario.rounds.len(),
        scenario.actions().count()
    );
    Ok(())
}
