//! Role decks and dealing.

use howl_core::Character;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{SessionError, SessionResult};

/// Roles in the order they are added as the table grows.
const DECK_ORDER: [Character; 20] = [
    Character::Werewolf,
    Character::Seer,
    Character::Guardian,
    Character::Villager,
    Character::Doctor,
    Character::Hunter,
    Character::TalismanBearer,
    Character::WolfCub,
    Character::Medium,
    Character::Matchmaker,
    Character::Minion,
    Character::Villager,
    Character::AlphaWolf,
    Character::Silencer,
    Character::SerialKiller,
    Character::Bloodbinder,
    Character::Plaguebearer,
    Character::Occult,
    Character::Witch,
    Character::Villager,
];

/// Smallest table a standard deck supports.
pub const MIN_PLAYERS: usize = 4;

/// The standard deck for `players` seats (4 to 20).
pub fn standard_deck(players: usize) -> SessionResult<Vec<Character>> {
    if !(MIN_PLAYERS..=DECK_ORDER.len()).contains(&players) {
        return Err(SessionError::UnsupportedPlayerCount(players));
    }
    Ok(DECK_ORDER[..players].to_vec())
}

/// Shuffle a deck for dealing, one card per seat in seat order.
pub fn deal<R: Rng + ?Sized>(deck: &[Character], rng: &mut R) -> Vec<Character> {
    let mut cards = deck.to_vec();
    cards.shuffle(rng);
    cards
}
