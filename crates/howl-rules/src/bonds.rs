//! Love and blood bonds: when one partner dies, the other follows.

use std::fmt;

use howl_core::player::{Player, PlayerId};
use howl_core::roster::{find, find_mut};
use serde::{Deserialize, Serialize};

/// Which bond carried a death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BondKind {
    /// Lovers paired by the matchmaker.
    Love,
    /// A blood bond.
    Blood,
}

impl fmt::Display for BondKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Love => write!(f, "love"),
            Self::Blood => write!(f, "blood"),
        }
    }
}

/// A death caused by a bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondDeath {
    /// The partner who died.
    pub player: PlayerId,
    /// The partner whose death triggered this one.
    pub through: PlayerId,
    /// The bond involved.
    pub bond: BondKind,
}

/// Kill the living partners of a player who just died.
///
/// Checks the love bond first, then the blood bond; both may fire. Returns the
/// ids that died here, in that order, and applies the deaths to `players`.
/// This is a single hop: the partners' own bonds are not followed. Call again
/// per returned id, or use [`cascade_deaths`], for a full chain.
pub fn propagate_secondary_deaths(players: &mut [Player], deceased: PlayerId) -> Vec<PlayerId> {
    hop(players, deceased).into_iter().map(|d| d.player).collect()
}

fn hop(players: &mut [Player], deceased: PlayerId) -> Vec<BondDeath> {
    let Some(dead) = find(players, deceased) else {
        return Vec::new();
    };
    let links = [
        (dead.love_partner, BondKind::Love),
        (dead.blood_bond_partner, BondKind::Blood),
    ];

    let mut out = Vec::new();
    for (partner, bond) in links {
        let Some(partner) = partner else { continue };
        let died = find_mut(players, partner).is_some_and(|p| p.kill());
        if died {
            tracing::debug!(player = %partner, through = %deceased, %bond, "bond death");
            out.push(BondDeath {
                player: partner,
                through: deceased,
                bond,
            });
        }
    }
    out
}

/// Propagate bond deaths from `deceased`, either one hop or until no more
/// partners die.
pub fn cascade_deaths(
    players: &mut [Player],
    deceased: PlayerId,
    transitive: bool,
) -> Vec<BondDeath> {
    let mut out = hop(players, deceased);
    if !transitive {
        return out;
    }
    let mut next = 0;
    while next < out.len() {
        let from = out[next].player;
        let more = hop(players, from);
        out.extend(more);
        next += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use howl_core::{Character, Roster};

    fn roster(n: usize) -> Roster {
        let names: Vec<String> = (1..=n).map(|i| format!("P{i}")).collect();
        Roster::new(names, &vec![Character::Villager; n]).unwrap()
    }

    fn kill(r: &mut Roster, id: u32) {
        r.get_mut(PlayerId(id)).unwrap().kill();
    }

    #[test]
    fn lover_follows() {
        let mut r = roster(3);
        r.bind_lovers(PlayerId(1), PlayerId(2)).unwrap();
        kill(&mut r, 1);
        let dead = propagate_secondary_deaths(r.players_mut(), PlayerId(1));
        assert_eq!(dead, vec![PlayerId(2)]);
        assert!(!r.get(PlayerId(2)).unwrap().is_alive);
        assert!(r.get(PlayerId(3)).unwrap().is_alive);
    }

    #[test]
    fn both_bonds_fire() {
        let mut r = roster(3);
        r.bind_lovers(PlayerId(1), PlayerId(2)).unwrap();
        r.bind_blood(PlayerId(1), PlayerId(3)).unwrap();
        kill(&mut r, 1);
        let dead = propagate_secondary_deaths(r.players_mut(), PlayerId(1));
        assert_eq!(dead, vec![PlayerId(2), PlayerId(3)]);
    }

    #[test]
    fn same_partner_on_both_bonds_dies_once() {
        let mut r = roster(2);
        r.bind_lovers(PlayerId(1), PlayerId(2)).unwrap();
        r.bind_blood(PlayerId(1), PlayerId(2)).unwrap();
        kill(&mut r, 1);
        let dead = propagate_secondary_deaths(r.players_mut(), PlayerId(1));
        assert_eq!(dead, vec![PlayerId(2)]);
    }

    #[test]
    fn dead_partner_is_skipped() {
        let mut r = roster(2);
        r.bind_lovers(PlayerId(1), PlayerId(2)).unwrap();
        kill(&mut r, 2);
        kill(&mut r, 1);
        assert!(propagate_secondary_deaths(r.players_mut(), PlayerId(1)).is_empty());
    }

    #[test]
    fn unknown_id_is_noop() {
        let mut r = roster(2);
        assert!(propagate_secondary_deaths(r.players_mut(), PlayerId(42)).is_empty());
    }

    #[test]
    fn single_hop_stops_at_first_partner() {
        // 1 loves 2, 2 is blood-bound to 3.
        let mut r = roster(3);
        r.bind_lovers(PlayerId(1), PlayerId(2)).unwrap();
        r.bind_blood(PlayerId(2), PlayerId(3)).unwrap();
        kill(&mut r, 1);
        let deaths = cascade_deaths(r.players_mut(), PlayerId(1), false);
        assert_eq!(deaths.len(), 1);
        assert_eq!(deaths[0].player, PlayerId(2));
        assert_eq!(deaths[0].bond, BondKind::Love);
        assert!(r.get(PlayerId(3)).unwrap().is_alive);
    }

    #[test]
    fn transitive_follows_the_chain() {
        let mut r = roster(3);
        r.bind_lovers(PlayerId(1), PlayerId(2)).unwrap();
        r.bind_blood(PlayerId(2), PlayerId(3)).unwrap();
        kill(&mut r, 1);
        let deaths = cascade_deaths(r.players_mut(), PlayerId(1), true);
        let ids: Vec<_> = deaths.iter().map(|d| d.player).collect();
        assert_eq!(ids, vec![PlayerId(2), PlayerId(3)]);
        assert_eq!(deaths[1].through, PlayerId(2));
        assert_eq!(deaths[1].bond, BondKind::Blood);
    }
}
