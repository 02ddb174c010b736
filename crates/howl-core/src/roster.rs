use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::error::{CoreError, CoreResult};
use crate::player::{Player, PlayerId};

/// Find a player by id.
pub fn find(players: &[Player], id: PlayerId) -> Option<&Player> {
    players.iter().find(|p| p.id == id)
}

/// Find a player by id, mutably.
pub fn find_mut(players: &mut [Player], id: PlayerId) -> Option<&mut Player> {
    players.iter_mut().find(|p| p.id == id)
}

/// Pair two players as lovers. Returns false (and changes nothing) if either
/// id is unknown, the ids are equal, or either player is already in love.
pub fn link_lovers(players: &mut [Player], a: PlayerId, b: PlayerId) -> bool {
    link(players, a, b, |p| &mut p.love_partner)
}

/// Seal a blood bond between two players. Same rules as [`link_lovers`]:
/// an existing bond is never overwritten.
pub fn link_blood(players: &mut [Player], a: PlayerId, b: PlayerId) -> bool {
    link(players, a, b, |p| &mut p.blood_bond_partner)
}

fn link(
    players: &mut [Player],
    a: PlayerId,
    b: PlayerId,
    slot: impl Fn(&mut Player) -> &mut Option<PlayerId>,
) -> bool {
    if a == b {
        return false;
    }
    let free = |players: &mut [Player], id: PlayerId| {
        find_mut(players, id).is_some_and(|p| slot(p).is_none())
    };
    if !free(players, a) || !free(players, b) {
        return false;
    }
    if let Some(p) = find_mut(players, a) {
        *slot(p) = Some(b);
    }
    if let Some(p) = find_mut(players, b) {
        *slot(p) = Some(a);
    }
    true
}

/// The ordered set of players in a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Seat players in order, assigning ids starting at 1.
    pub fn new<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        characters: &[Character],
    ) -> CoreResult<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(CoreError::EmptyRoster);
        }
        if names.len() != characters.len() {
            return Err(CoreError::RosterSize {
                players: names.len(),
                characters: characters.len(),
            });
        }
        let players = names
            .into_iter()
            .zip(characters.iter().copied())
            .zip(1u32..)
            .map(|((name, character), n)| Player::new(PlayerId(n), name, character))
            .collect();
        Ok(Self { players })
    }

    /// Wrap an existing list of players.
    pub fn from_players(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// All players in seat order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// All players, mutably.
    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    /// Consume the roster, returning the player list.
    pub fn into_players(self) -> Vec<Player> {
        self.players
    }

    /// Look up a player.
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        find(&self.players, id)
    }

    /// Look up a player mutably.
    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        find_mut(&mut self.players, id)
    }

    /// Look up a player, failing on unknown ids.
    pub fn require(&self, id: PlayerId) -> CoreResult<&Player> {
        self.get(id).ok_or(CoreError::UnknownPlayer(id))
    }

    /// Iterate over living players.
    pub fn alive(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive)
    }

    /// Number of living players.
    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// Pair two players as lovers.
    pub fn bind_lovers(&mut self, a: PlayerId, b: PlayerId) -> CoreResult<()> {
        self.require(a)?;
        self.require(b)?;
        if link_lovers(&mut self.players, a, b) {
            Ok(())
        } else {
            Err(CoreError::InvalidPairing(format!(
                "{a} and {b} cannot be paired as lovers"
            )))
        }
    }

    /// Seal a blood bond between two players.
    pub fn bind_blood(&mut self, a: PlayerId, b: PlayerId) -> CoreResult<()> {
        self.require(a)?;
        self.require(b)?;
        if link_blood(&mut self.players, a, b) {
            Ok(())
        } else {
            Err(CoreError::InvalidPairing(format!(
                "{a} and {b} cannot share a blood bond"
            )))
        }
    }

    /// Apply the Occult copy-ability: `copier` takes on `source`'s role.
    pub fn copy_character(&mut self, copier: PlayerId, source: PlayerId) -> CoreResult<()> {
        if copier == source {
            return Err(CoreError::InvalidPairing(format!(
                "{copier} cannot copy their own role"
            )));
        }
        let copied = self.require(source)?.character;
        let player = self.get_mut(copier).ok_or(CoreError::UnknownPlayer(copier))?;
        if player.original_character.is_some() {
            return Err(CoreError::InvalidPairing(format!(
                "{copier} has already copied a role"
            )));
        }
        player.set_character(copied);
        Ok(())
    }

    /// Lift every silence. Called once the silenced day is over.
    pub fn clear_silences(&mut self) {
        for p in &mut self.players {
            p.is_silenced = false;
        }
    }
}

impl Deref for Roster {
    type Target = [Player];

    fn deref(&self) -> &[Player] {
        &self.players
    }
}

impl DerefMut for Roster {
    fn deref_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }
}

impl From<Vec<Player>> for Roster {
    fn from(players: Vec<Player>) -> Self {
        Self::from_players(players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roster() -> Roster {
        Roster::new(
            ["Ada", "Bo", "Cy", "Dee"],
            &[
                Character::Werewolf,
                Character::Seer,
                Character::Occult,
                Character::Villager,
            ],
        )
        .unwrap()
    }

    #[test]
    fn ids_are_sequential() {
        let r = roster();
        let ids: Vec<_> = r.players().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PlayerId(1), PlayerId(2), PlayerId(3), PlayerId(4)]);
        assert_eq!(r.alive_count(), 4);
    }

    #[test]
    fn size_mismatch() {
        let err = Roster::new(["Ada"], &[Character::Seer, Character::Villager]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::RosterSize {
                players: 1,
                characters: 2
            }
        ));
        let empty: [&str; 0] = [];
        assert!(matches!(
            Roster::new(empty, &[]).unwrap_err(),
            CoreError::EmptyRoster
        ));
    }

    #[test]
    fn lovers_are_symmetric() {
        let mut r = roster();
        r.bind_lovers(PlayerId(1), PlayerId(2)).unwrap();
        assert_eq!(r.get(PlayerId(1)).unwrap().love_partner, Some(PlayerId(2)));
        assert_eq!(r.get(PlayerId(2)).unwrap().love_partner, Some(PlayerId(1)));
        assert!(r.get(PlayerId(2)).unwrap().is_in_love());
    }

    #[test]
    fn bonds_are_not_overwritten() {
        let mut r = roster();
        r.bind_blood(PlayerId(1), PlayerId(2)).unwrap();
        assert!(r.bind_blood(PlayerId(2), PlayerId(3)).is_err());
        assert_eq!(r.get(PlayerId(2)).unwrap().blood_bond_partner, Some(PlayerId(1)));
        assert_eq!(r.get(PlayerId(3)).unwrap().blood_bond_partner, None);
    }

    #[test]
    fn self_pairing_and_unknown_ids_rejected() {
        let mut r = roster();
        assert!(r.bind_lovers(PlayerId(1), PlayerId(1)).is_err());
        assert!(matches!(
            r.bind_lovers(PlayerId(1), PlayerId(9)).unwrap_err(),
            CoreError::UnknownPlayer(PlayerId(9))
        ));
        assert!(!link_blood(r.players_mut(), PlayerId(9), PlayerId(1)));
        assert!(r.get(PlayerId(1)).unwrap().love_partner.is_none());
    }

    #[test]
    fn occult_copy() {
        let mut r = roster();
        r.copy_character(PlayerId(3), PlayerId(1)).unwrap();
        let occult = r.get(PlayerId(3)).unwrap();
        assert_eq!(occult.character, Character::Werewolf);
        assert_eq!(occult.original_character, Some(Character::Occult));
        assert!(r.copy_character(PlayerId(3), PlayerId(2)).is_err());
        assert!(r.copy_character(PlayerId(4), PlayerId(4)).is_err());
    }

    #[test]
    fn clear_silences() {
        let mut r = roster();
        r.get_mut(PlayerId(2)).unwrap().is_silenced = true;
        r.clear_silences();
        assert!(r.players().iter().all(|p| !p.is_silenced));
    }

    proptest! {
        #[test]
        fn pairings_stay_symmetric(pairs in proptest::collection::vec((1u32..=6, 1u32..=6), 0..12)) {
            let mut r = Roster::new(
                ["a", "b", "c", "d", "e", "f"],
                &[Character::Villager; 6],
            ).unwrap();
            for (i, (a, b)) in pairs.into_iter().enumerate() {
                if i % 2 == 0 {
                    let _ = r.bind_lovers(PlayerId(a), PlayerId(b));
                } else {
                    let _ = r.bind_blood(PlayerId(a), PlayerId(b));
                }
            }
            for p in r.players() {
                if let Some(partner) = p.love_partner {
                    prop_assert_eq!(r.get(partner).unwrap().love_partner, Some(p.id));
                }
                if let Some(partner) = p.blood_bond_partner {
                    prop_assert_eq!(r.get(partner).unwrap().blood_bond_partner, Some(p.id));
                }
            }
        }
    }
}
