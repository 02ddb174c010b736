//! Night resolution.
//!
//! [`resolve_night`] applies one night's batch of secret actions to a copy of
//! the roster in a fixed order:
//!
//! 1. protections
//! 2. blood bonds
//! 3. kill and poison aggregation
//! 4. cures
//! 5. deaths for each pending target (heal, then protection, then talisman)
//! 6. last-stand shots
//! 7. infections
//! 8. silences
//! 9. investigations
//! 10. bluff-kills
//!
//! Malformed actions (missing or unknown target, unknown actor) have no effect.

pub mod event;

pub use event::{ActionResult, DeathCause, Investigation, NightEvent, Rescue};

use std::collections::{BTreeMap, HashSet};

use howl_core::action::{Action, ActionKind};
use howl_core::character::{Character, Team};
use howl_core::config::GameConfig;
use howl_core::player::{Player, PlayerId};
use howl_core::roster::{find, find_mut, link_blood};

use crate::bonds::cascade_deaths;

/// Working state for one resolution pass.
struct Night<'a> {
    players: Vec<Player>,
    config: &'a GameConfig,
    dead: Vec<PlayerId>,
    events: Vec<NightEvent>,
    investigations: BTreeMap<PlayerId, Investigation>,
}

impl<'a> Night<'a> {
    fn new(players: &[Player], config: &'a GameConfig) -> Self {
        Self {
            players: players.to_vec(),
            config,
            dead: Vec::new(),
            events: Vec::new(),
            investigations: BTreeMap::new(),
        }
    }

    fn player(&self, id: PlayerId) -> Option<&Player> {
        find(&self.players, id)
    }

    fn is_alive(&self, id: PlayerId) -> bool {
        self.player(id).is_some_and(|p| p.is_alive)
    }

    fn name(&self, id: PlayerId) -> String {
        self.player(id).map(|p| p.name.clone()).unwrap_or_default()
    }

    /// Kill `id` and everyone bonded to them. No-op if already dead.
    fn kill(&mut self, id: PlayerId, cause: DeathCause) {
        let died = find_mut(&mut self.players, id).is_some_and(|p| p.kill());
        if !died {
            return;
        }
        tracing::debug!(player = %id, ?cause, "player died");
        self.record_death(id, cause);

        let bonds = cascade_deaths(&mut self.players, id, self.config.transitive_bond_deaths);
        for bond in bonds {
            self.record_death(bond.player, DeathCause::Bond(bond.bond));
        }
    }

    fn record_death(&mut self, id: PlayerId, cause: DeathCause) {
        if !self.dead.contains(&id) {
            self.dead.push(id);
        }
        let name = self.name(id);
        self.events.push(NightEvent::Died {
            player: id,
            name,
            cause,
        });
    }

    /// Spend the target's talisman if they still have one.
    fn consume_talisman(&mut self, id: PlayerId) -> bool {
        let Some(p) = find_mut(&mut self.players, id) else {
            return false;
        };
        if !p.has_protection {
            return false;
        }
        p.has_protection = false;
        let name = p.name.clone();
        tracing::debug!(player = %id, "talisman consumed");
        self.events.push(NightEvent::TalismanShattered { player: id, name });
        true
    }

    fn finish(self) -> ActionResult {
        let pending_shots = self
            .dead
            .iter()
            .copied()
            .filter(|id| {
                find(&self.players, *id)
                    .is_some_and(|p| p.effective_character() == Character::Hunter)
            })
            .collect();
        let messages = self
            .events
            .iter()
            .filter(|e| e.is_public())
            .map(ToString::to_string)
            .collect();
        ActionResult {
            dead_players: self.dead,
            updated_players: self.players,
            messages,
            investigations: self.investigations,
            events: self.events,
            pending_shots,
        }
    }
}

/// Resolve one night's actions against the roster.
///
/// Pure: `players` and `actions` are only read; the returned result carries
/// the updated roster.
pub fn resolve_night(players: &[Player], actions: &[Action], config: &GameConfig) -> ActionResult {
    let mut night = Night::new(players, config);

    // Drop anything that cannot apply before any rule looks at it.
    let actions: Vec<(&Action, PlayerId)> = actions
        .iter()
        .filter_map(|a| {
            if night.player(a.actor).is_none() {
                tracing::debug!(action = %a, "ignoring action from unknown actor");
                return None;
            }
            match a.target {
                Some(t) if night.player(t).is_some() => Some((a, t)),
                _ => {
                    tracing::debug!(action = %a, "ignoring action without a valid target");
                    None
                }
            }
        })
        .collect();
    let targets = |kind: fn(&ActionKind) -> bool| {
        actions
            .iter()
            .filter(move |(a, _)| kind(&a.kind))
            .map(|(a, t)| (*a, *t))
    };

    // 1. Protections
    let protected: HashSet<PlayerId> = targets(|k| *k == ActionKind::Protect)
        .map(|(_, t)| t)
        .collect();

    // 2. Blood bonds
    for (a, t) in targets(|k| *k == ActionKind::BloodBond) {
        if link_blood(&mut night.players, a.actor, t) {
            night.events.push(NightEvent::BondSealed { a: a.actor, b: t });
        }
    }

    // 3. Kill aggregation. The first cause recorded for a target is the one
    // narrated.
    let mut pending: Vec<(PlayerId, DeathCause)> = Vec::new();
    for (a, t) in targets(|k| matches!(k, ActionKind::Kill | ActionKind::Poison)) {
        if pending.iter().any(|(id, _)| *id == t) {
            continue;
        }
        let cause = match a.kind {
            ActionKind::Poison => DeathCause::Poisoned,
            _ => DeathCause::Attacked,
        };
        pending.push((t, cause));
    }

    // 4. Cures only count for someone under attack.
    let healed: HashSet<PlayerId> = targets(|k| *k == ActionKind::Heal)
        .map(|(_, t)| t)
        .filter(|t| pending.iter().any(|(id, _)| id == t))
        .collect();

    // 5. Deaths
    for (target, cause) in pending {
        if !night.is_alive(target) {
            continue;
        }
        if healed.contains(&target) {
            night.events.push(NightEvent::Saved {
                player: target,
                by: Rescue::Healed,
            });
        } else if protected.contains(&target) {
            // Guardian protection leaves a talisman untouched.
            night.events.push(NightEvent::Saved {
                player: target,
                by: Rescue::Protected,
            });
        } else if !night.consume_talisman(target) {
            night.kill(target, cause);
        }
    }

    // 6. Last-stand shots, each on its own.
    for (_, t) in targets(|k| *k == ActionKind::Shoot) {
        if !night.is_alive(t) {
            let name = night.name(t);
            night.events.push(NightEvent::ShotWasted { player: t, name });
            continue;
        }
        if night.config.shot_ignores_talisman || !night.consume_talisman(t) {
            night.kill(t, DeathCause::Shot);
        }
    }

    // 7. Infections
    for (_, t) in targets(|k| *k == ActionKind::Infect) {
        if let Some(p) = find_mut(&mut night.players, t).filter(|p| p.is_alive) {
            p.is_infected = true;
            night.events.push(NightEvent::Infected { player: t });
        }
    }

    // 8. Silences
    for (_, t) in targets(|k| *k == ActionKind::Silence) {
        if let Some(p) = find_mut(&mut night.players, t).filter(|p| p.is_alive) {
            p.is_silenced = true;
            let name = p.name.clone();
            night.events.push(NightEvent::Silenced { player: t, name });
        }
    }

    // 9. Investigations
    for (a, t) in targets(|k| *k == ActionKind::Investigate) {
        let (Some(investigator), Some(target)) = (night.player(a.actor), night.player(t)) else {
            continue;
        };
        let result = match investigator.effective_character() {
            Character::Seer => Some(Investigation::Alignment {
                target: t,
                alignment: match target.team {
                    Team::Evil => Team::Evil,
                    _ => Team::Good,
                },
            }),
            Character::Medium if !target.is_alive => Some(Investigation::Autopsy {
                target: t,
                character: target.character,
            }),
            _ => None,
        };
        if let Some(result) = result {
            night.investigations.insert(a.actor, result);
        }
    }

    // 10. Bluff-kills ignore every kind of protection.
    for (a, t) in targets(|k| matches!(k, ActionKind::BluffKill { .. })) {
        let ActionKind::BluffKill { guess } = a.kind else {
            continue;
        };
        let is_alpha = night
            .player(a.actor)
            .is_some_and(|p| p.effective_character() == Character::AlphaWolf);
        if !is_alpha {
            tracing::debug!(action = %a, "bluff-kill from a player who is not an alpha wolf");
            continue;
        }
        let Some(target) = night.player(t).filter(|p| p.is_alive) else {
            continue;
        };
        if target.character == guess {
            night.kill(t, DeathCause::Unmasked);
        } else {
            night.kill(a.actor, DeathCause::Backfire);
        }
    }

    night.finish()
}
