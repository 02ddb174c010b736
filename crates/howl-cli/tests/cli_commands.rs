//! Integration tests for the `howl` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Five players: the wolf is caught on the first day.
const VILLAGE_WINS: &str = r#"{
    "players": [
        { "name": "Ada", "character": "werewolf" },
        { "name": "Bo", "character": "seer" },
        { "name": "Cy", "character": "doctor" },
        { "name": "Dee", "character": "villager" },
        { "name": "Eve", "character": "villager" }
    ],
    "rounds": [
        {
            "night": [
                { "actor": 1, "kind": { "type": "kill" }, "target": 4 },
                { "actor": 2, "kind": { "type": "investigate" }, "target": 1 }
            ],
            "votes": { "2": { "for": 1 }, "3": { "for": 1 }, "5": { "for": 1 }, "1": { "for": 2 } }
        }
    ]
}"#;

/// A hunter dies at night and takes the wolf down.
const HUNTER_SHOT: &str = r#"{
    "players": [
        { "name": "Ada", "character": "werewolf" },
        { "name": "Bo", "character": "hunter" },
        { "name": "Cy", "character": "villager" },
        { "name": "Dee", "character": "villager" }
    ],
    "rounds": [
        {
            "night": [{ "actor": 1, "kind": { "type": "kill" }, "target": 2 }],
            "night_shots": [{ "actor": 2, "kind": { "type": "shoot" }, "target": 1 }]
        }
    ]
}"#;

fn scenario(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("game.json");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

fn howl() -> Command {
    Command::cargo_bin("howl").unwrap()
}

// ---------------------------------------------------------------------------
// roles
// ---------------------------------------------------------------------------

#[test]
fn roles_lists_every_role() {
    howl()
        .arg("roles")
        .assert()
        .success()
        .stdout(predicate::str::contains("Talisman Bearer"))
        .stdout(predicate::str::contains("Alpha Wolf"))
        .stdout(predicate::str::contains("18 roles"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_village_wins() {
    let (_dir, path) = scenario(VILLAGE_WINS);
    howl()
        .arg("play")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Night 1"))
        .stdout(predicate::str::contains("Dee was killed during the night."))
        .stdout(predicate::str::contains("Ada was expelled by the village."))
        .stdout(predicate::str::contains("rooted out every killer"));
}

#[test]
fn play_verbose_shows_private_results() {
    let (_dir, path) = scenario(VILLAGE_WINS);
    howl()
        .args(["play", "--verbose"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Bo learns"))
        .stdout(predicate::str::contains("Game Journal"));
}

#[test]
fn play_hunter_shot() {
    let (_dir, path) = scenario(HUNTER_SHOT);
    howl()
        .arg("play")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Bo fires a last shot."))
        .stdout(predicate::str::contains("Ada was shot."))
        .stdout(predicate::str::contains("Winner:"));
}

#[test]
fn play_unfinished_game() {
    let (_dir, path) = scenario(
        r#"{
            "players": [
                { "name": "Ada", "character": "werewolf" },
                { "name": "Bo", "character": "seer" },
                { "name": "Cy", "character": "villager" },
                { "name": "Dee", "character": "villager" }
            ],
            "rounds": [{}]
        }"#,
    );
    howl()
        .arg("play")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing happened."))
        .stdout(predicate::str::contains("No winner yet"));
}

#[test]
fn play_dead_voter_fails() {
    let (_dir, path) = scenario(
        r#"{
            "players": [
                { "name": "Ada", "character": "werewolf" },
                { "name": "Bo", "character": "seer" },
                { "name": "Cy", "character": "villager" },
                { "name": "Dee", "character": "villager" }
            ],
            "rounds": [{
                "night": [{ "actor": 1, "kind": { "type": "kill" }, "target": 2 }],
                "votes": { "2": { "for": 1 } }
            }]
        }"#,
    );
    howl()
        .arg("play")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("dead and cannot vote"));
}

#[test]
fn play_missing_file_fails() {
    howl()
        .args(["play", "/nonexistent/game.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_valid_scenario() {
    let (_dir, path) = scenario(VILLAGE_WINS);
    howl()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"))
        .stdout(predicate::str::contains("5 players, 1 rounds, 2 actions"));
}

#[test]
fn check_unknown_target() {
    let (_dir, path) = scenario(
        r#"{
            "players": [
                { "name": "Ada", "character": "werewolf" },
                { "name": "Bo", "character": "seer" }
            ],
            "rounds": [{ "night": [{ "actor": 1, "kind": { "type": "kill" }, "target": 9 }] }]
        }"#,
    );
    howl()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown target #9"));
}

#[test]
fn check_invalid_json() {
    let (_dir, path) = scenario("{ not json");
    howl()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid scenario"));
}

#[test]
fn check_bad_lovers() {
    let (_dir, path) = scenario(
        r#"{
            "players": [
                { "name": "Ada", "character": "werewolf" },
                { "name": "Bo", "character": "matchmaker" }
            ],
            "setup": { "lovers": [1, 1] }
        }"#,
    );
    howl()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be paired"));
}
