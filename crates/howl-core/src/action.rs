use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::character::Character;
use crate::player::PlayerId;

/// Unique identifier for a submitted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub Uuid);

impl ActionId {
    /// Generate a new random action ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// What an action does. Only variants that need extra data carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    /// Attack the target.
    Kill,
    /// Kill the target by naming their role; a wrong guess kills the actor.
    BluffKill {
        /// The role the actor believes the target holds.
        guess: Character,
    },
    /// Shield the target for this night.
    Protect,
    /// Learn something about the target.
    Investigate,
    /// Cure the target if they are under attack.
    Heal,
    /// Poison the target.
    Poison,
    /// Covertly infect the target.
    Infect,
    /// Silence the target for the next day.
    Silence,
    /// Seal a blood bond between actor and target.
    BloodBond,
    /// Last-stand shot fired by a dying hunter.
    Shoot,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kill => write!(f, "kill"),
            Self::BluffKill { guess } => write!(f, "bluff-kill (guess: {guess})"),
            Self::Protect => write!(f, "protect"),
            Self::Investigate => write!(f, "investigate"),
            Self::Heal => write!(f, "heal"),
            Self::Poison => write!(f, "poison"),
            Self::Infect => write!(f, "infect"),
            Self::Silence => write!(f, "silence"),
            Self::BloodBond => write!(f, "blood bond"),
            Self::Shoot => write!(f, "shoot"),
        }
    }
}

/// One use of an ability during a night, or a shot fired after an expulsion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Unique id.
    #[serde(default)]
    pub id: ActionId,
    /// Who acted.
    pub actor: PlayerId,
    /// What was done.
    pub kind: ActionKind,
    /// Who it was aimed at. Missing targets are ignored by the resolver.
    #[serde(default)]
    pub target: Option<PlayerId>,
    /// Night this action belongs to.
    #[serde(default)]
    pub night: u32,
}

impl Action {
    /// Create an action with a fresh id.
    pub fn new(actor: PlayerId, kind: ActionKind, target: Option<PlayerId>, night: u32) -> Self {
        Self {
            id: ActionId::new(),
            actor,
            kind,
            target,
            night,
        }
    }

    /// A kill on `target`.
    pub fn kill(actor: PlayerId, target: PlayerId, night: u32) -> Self {
        Self::new(actor, ActionKind::Kill, Some(target), night)
    }

    /// A guess-the-role kill on `target`.
    pub fn bluff_kill(actor: PlayerId, target: PlayerId, guess: Character, night: u32) -> Self {
        Self::new(actor, ActionKind::BluffKill { guess }, Some(target), night)
    }

    /// A protection on `target`.
    pub fn protect(actor: PlayerId, target: PlayerId, night: u32) -> Self {
        Self::new(actor, ActionKind::Protect, Some(target), night)
    }

    /// An investigation of `target`.
    pub fn investigate(actor: PlayerId, target: PlayerId, night: u32) -> Self {
        Self::new(actor, ActionKind::Investigate, Some(target), night)
    }

    /// A cure on `target`.
    pub fn heal(actor: PlayerId, target: PlayerId, night: u32) -> Self {
        Self::new(actor, ActionKind::Heal, Some(target), night)
    }

    /// A poisoning of `target`.
    pub fn poison(actor: PlayerId, target: PlayerId, night: u32) -> Self {
        Self::new(actor, ActionKind::Poison, Some(target), night)
    }

    /// An infection of `target`.
    pub fn infect(actor: PlayerId, target: PlayerId, night: u32) -> Self {
        Self::new(actor, ActionKind::Infect, Some(target), night)
    }

    /// A silence on `target`.
    pub fn silence(actor: PlayerId, target: PlayerId, night: u32) -> Self {
        Self::new(actor, ActionKind::Silence, Some(target), night)
    }

    /// A blood bond with `target`.
    pub fn blood_bond(actor: PlayerId, target: PlayerId, night: u32) -> Self {
        Self::new(actor, ActionKind::BloodBond, Some(target), night)
    }

    /// A last-stand shot at `target`.
    pub fn shoot(actor: PlayerId, target: PlayerId, night: u32) -> Self {
        Self::new(actor, ActionKind::Shoot, Some(target), night)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            Some(t) => write!(f, "{} {} {t}", self.actor, self.kind),
            None => write!(f, "{} {} (no target)", self.actor, self.kind),
        }
    }
}
