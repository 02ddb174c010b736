//! The game orchestrator.
//!
//! `GameSession` threads a [`GameState`] through setup, nights and days. It
//! owns the seeded RNG used for dealing and vote ties, records a snapshot
//! before every step so the step can be undone, and narrates into a
//! [`Journal`]. All rule decisions are delegated to `howl-rules`.

use std::collections::BTreeMap;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use howl_core::{
    Action, ActionKind, Character, GameConfig, GameState, Phase, Player, PlayerId, Roster,
};
use howl_rules::{
    ActionResult, Ballot, DeathCause, NightEvent, VictoryResult, VoteResult, cascade_deaths,
    evaluate_victory, resolve_night, tally_votes,
};

use crate::deck::deal;
use crate::error::{SessionError, SessionResult};
use crate::history::{History, Snapshot};
use crate::journal::{Journal, JournalEntry};

/// What came out of a night.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NightReport {
    /// Night number.
    pub night: u32,
    /// Raw resolver output, including private investigations.
    pub result: ActionResult,
    /// Victory check after the night.
    pub victory: VictoryResult,
}

/// What came out of a last-stand shot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotReport {
    /// The hunter who fired.
    pub hunter: PlayerId,
    /// Resolver output for the shot.
    pub result: ActionResult,
    /// Victory check after the shot.
    pub victory: VictoryResult,
}

/// What came out of a day vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayReport {
    /// Day number.
    pub day: u32,
    /// The tally.
    pub vote: VoteResult,
    /// Who was expelled, if anyone.
    pub expelled: Option<PlayerId>,
    /// Everyone who died: the expelled player first, then bond deaths.
    pub dead: Vec<PlayerId>,
    /// Public narration.
    pub messages: Vec<String>,
    /// Victory check after the expulsion.
    pub victory: VictoryResult,
}

/// An in-memory game from setup to victory.
pub struct GameSession {
    state: GameState,
    history: History,
    journal: Journal,
    victory: Option<VictoryResult>,
    pending_shots: Vec<PlayerId>,
    rng: StdRng,
}

impl GameSession {
    /// Seat players with the given characters, in seat order.
    pub fn new<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        characters: &[Character],
        config: GameConfig,
    ) -> SessionResult<Self> {
        let rng = StdRng::seed_from_u64(config.seed);
        let roster = Roster::new(names, characters)?;
        Ok(Self::seated(roster, config, rng))
    }

    /// Seat players and deal them a shuffled `deck`.
    pub fn with_random_roles<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        deck: &[Character],
        config: GameConfig,
    ) -> SessionResult<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let cards = deal(deck, &mut rng);
        let roster = Roster::new(names, &cards)?;
        Ok(Self::seated(roster, config, rng))
    }

    fn seated(roster: Roster, config: GameConfig, rng: StdRng) -> Self {
        let players = roster.len();
        let history = History::new(config.max_history);
        let mut journal = Journal::new();
        journal.append(JournalEntry::Setup {
            players,
            timestamp: Utc::now(),
        });
        tracing::info!(players, seed = config.seed, "game set up");
        Self {
            state: GameState::new(roster, config),
            history,
            journal,
            victory: None,
            pending_shots: Vec::new(),
            rng,
        }
    }

    /// The current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Look up a player.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.state.players.get(id)
    }

    /// The narration so far.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Snapshots available to [`undo`](Self::undo).
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The latest victory check, if any step has been resolved.
    pub fn victory(&self) -> Option<&VictoryResult> {
        self.victory.as_ref()
    }

    /// Hunters still owed a last-stand shot.
    pub fn pending_shots(&self) -> &[PlayerId] {
        &self.pending_shots
    }

    /// Whether a winner has been declared.
    pub fn is_over(&self) -> bool {
        self.state.is_game_ended
    }

    /// The Occult takes on `source`'s role. Setup only.
    pub fn copy_character(&mut self, occult: PlayerId, source: PlayerId) -> SessionResult<()> {
        self.expect_phase("copy a role", &[Phase::Setup])?;
        let copier = self.state.players.require(occult)?;
        if copier.character != Character::Occult {
            return Err(SessionError::RoleMismatch {
                player: occult,
                expected: Character::Occult,
            });
        }
        self.state.players.require(source)?;
        self.checkpoint(format!("copy {occult} <- {source}"));
        self.state.players.copy_character(occult, source)?;
        tracing::debug!(%occult, %source, "role copied");
        Ok(())
    }

    /// Pair two players as lovers. Setup only.
    pub fn bind_lovers(&mut self, a: PlayerId, b: PlayerId) -> SessionResult<()> {
        self.expect_phase("pair lovers", &[Phase::Setup])?;
        let mut players = self.state.players.clone();
        players.bind_lovers(a, b)?;
        self.checkpoint(format!("lovers {a} & {b}"));
        self.state.players = players;
        tracing::debug!(%a, %b, "lovers paired");
        Ok(())
    }

    /// Start the next night. Silences from the previous day are lifted.
    pub fn begin_night(&mut self) -> SessionResult<()> {
        self.expect_phase("begin a night", &[Phase::Setup, Phase::Day])?;
        if self.state.phase == Phase::Day && !self.day_voted() {
            return Err(SessionError::Unresolved("vote"));
        }
        self.expect_no_shots()?;
        self.checkpoint(format!("begin night {}", self.state.night + 1));
        self.state.night += 1;
        self.state.phase = Phase::Night;
        self.state.players.clear_silences();
        tracing::info!(night = self.state.night, "night falls");
        Ok(())
    }

    /// Resolve the night's actions, then check for a winner.
    pub fn resolve_night(&mut self, actions: &[Action]) -> SessionResult<NightReport> {
        self.expect_phase("resolve a night", &[Phase::Night])?;
        if self.night_resolved() {
            return Err(SessionError::AlreadyResolved("night"));
        }
        let night = self.state.night;
        self.checkpoint(format!("night {night}"));

        let result = resolve_night(&self.state.players, actions, &self.state.config);
        self.state.players = Roster::from(result.updated_players.clone());
        self.pending_shots.extend(result.pending_shots.iter().copied());
        tracing::info!(night, dead = result.dead_players.len(), "night resolved");

        self.journal.append(JournalEntry::Night {
            night,
            messages: result.messages.clone(),
            timestamp: Utc::now(),
        });
        let victory = self.settle();
        Ok(NightReport {
            night,
            result,
            victory,
        })
    }

    /// Fire a hunter's last-stand shot.
    pub fn resolve_shot(&mut self, shot: Action) -> SessionResult<ShotReport> {
        self.expect_live()?;
        let hunter = shot.actor;
        if shot.kind != ActionKind::Shoot || !self.pending_shots.contains(&hunter) {
            return Err(SessionError::NoShotOwed(hunter));
        }
        self.checkpoint(format!("shot by {hunter}"));

        let result = resolve_night(
            &self.state.players,
            std::slice::from_ref(&shot),
            &self.state.config,
        );
        self.state.players = Roster::from(result.updated_players.clone());
        self.pending_shots.retain(|id| *id != hunter);
        self.pending_shots.extend(result.pending_shots.iter().copied());
        tracing::info!(%hunter, target = ?shot.target, "shot fired");

        self.journal.append(JournalEntry::Shot {
            hunter,
            messages: result.messages.clone(),
            timestamp: Utc::now(),
        });
        let victory = self.settle();
        Ok(ShotReport {
            hunter,
            result,
            victory,
        })
    }

    /// Give up a hunter's last-stand shot.
    pub fn waive_shot(&mut self, hunter: PlayerId) -> SessionResult<()> {
        self.expect_live()?;
        if !self.pending_shots.contains(&hunter) {
            return Err(SessionError::NoShotOwed(hunter));
        }
        self.checkpoint(format!("waive shot by {hunter}"));
        self.pending_shots.retain(|id| *id != hunter);
        tracing::debug!(%hunter, "shot waived");
        Ok(())
    }

    /// Start the day after a resolved night.
    pub fn begin_day(&mut self) -> SessionResult<()> {
        self.expect_phase("begin a day", &[Phase::Night])?;
        if !self.night_resolved() {
            return Err(SessionError::Unresolved("night"));
        }
        self.expect_no_shots()?;
        self.checkpoint(format!("begin day {}", self.state.day + 1));
        self.state.day += 1;
        self.state.phase = Phase::Day;
        tracing::info!(day = self.state.day, "day breaks");
        Ok(())
    }

    /// Tally the day's ballots, expel the winner and check for a winner.
    ///
    /// Every voter must be alive, and every ballot must name a living player.
    pub fn vote(&mut self, ballots: &BTreeMap<PlayerId, Ballot>) -> SessionResult<DayReport> {
        self.expect_phase("vote", &[Phase::Day])?;
        if self.day_voted() {
            return Err(SessionError::AlreadyResolved("vote"));
        }
        self.expect_no_shots()?;
        for (voter, ballot) in ballots {
            if !self.state.players.require(*voter)?.is_alive {
                return Err(SessionError::DeadVoter(*voter));
            }
            if let Ballot::For(target) = ballot {
                if !self.player(*target).is_some_and(|p| p.is_alive) {
                    return Err(SessionError::InvalidVoteTarget(*target));
                }
            }
        }

        let day = self.state.day;
        self.checkpoint(format!("day {day}"));
        let vote = tally_votes(ballots, &mut self.rng);
        let expelled = match vote.winner {
            Some(_) if vote.tied && self.state.config.no_expulsion_on_tie => {
                tracing::info!(day, "tied vote, nobody expelled");
                None
            }
            other => other,
        };

        let mut dead = Vec::new();
        let mut messages = Vec::new();
        if let Some(id) = expelled {
            if let Some(p) = self.state.players.get_mut(id) {
                p.kill();
                messages.push(format!("{} was expelled by the village.", p.name));
                dead.push(id);
            }
            let transitive = self.state.config.transitive_bond_deaths;
            for bond in cascade_deaths(&mut self.state.players, id, transitive) {
                let name = self.name_of(bond.player);
                let event = NightEvent::Died {
                    player: bond.player,
                    name,
                    cause: DeathCause::Bond(bond.bond),
                };
                messages.push(event.to_string());
                dead.push(bond.player);
            }
            tracing::info!(day, expelled = %id, dead = dead.len(), "expulsion");
        }
        for id in &dead {
            let hunter = self
                .player(*id)
                .is_some_and(|p| p.effective_character() == Character::Hunter);
            if hunter {
                self.pending_shots.push(*id);
            }
        }

        let tally = vote
            .counts
            .iter()
            .map(|(id, n)| (self.name_of(*id), *n))
            .collect();
        self.journal.append(JournalEntry::Vote {
            day,
            tally,
            tied: vote.tied,
            expelled: expelled.map(|id| self.name_of(id)),
            messages: messages.clone(),
            timestamp: Utc::now(),
        });
        let victory = self.settle();
        Ok(DayReport {
            day,
            vote,
            expelled,
            dead,
            messages,
            victory,
        })
    }

    /// Roll back the most recent step.
    pub fn undo(&mut self) -> SessionResult<String> {
        let snapshot = self.history.pop().ok_or(SessionError::NothingToUndo)?;
        self.state = snapshot.state;
        self.victory = snapshot.victory;
        self.pending_shots = snapshot.pending_shots;
        self.journal.truncate(snapshot.journal_len);
        tracing::info!(label = %snapshot.label, "step undone");
        Ok(snapshot.label)
    }

    /// Evaluate victory and close the game if someone won.
    fn settle(&mut self) -> VictoryResult {
        let victory = evaluate_victory(&self.state);
        if victory.has_winner {
            self.state.phase = Phase::Ended;
            self.state.is_game_ended = true;
            self.pending_shots.clear();
            let winners = victory.winners.iter().map(|id| self.name_of(*id)).collect();
            self.journal.append(JournalEntry::Victory {
                reason: victory.reason.to_string(),
                winners,
                timestamp: Utc::now(),
            });
        }
        self.victory = Some(victory.clone());
        victory
    }

    fn checkpoint(&mut self, label: String) {
        self.history.push(Snapshot {
            label,
            state: self.state.clone(),
            victory: self.victory.clone(),
            pending_shots: self.pending_shots.clone(),
            journal_len: self.journal.len(),
            recorded_at: Utc::now(),
        });
    }

    fn expect_live(&self) -> SessionResult<()> {
        if self.state.is_game_ended {
            return Err(SessionError::GameOver);
        }
        Ok(())
    }

    fn expect_phase(&self, action: &'static str, allowed: &[Phase]) -> SessionResult<()> {
        self.expect_live()?;
        if !allowed.contains(&self.state.phase) {
            return Err(SessionError::WrongPhase {
                action,
                phase: self.state.phase,
            });
        }
        Ok(())
    }

    fn expect_no_shots(&self) -> SessionResult<()> {
        if self.pending_shots.is_empty() {
            Ok(())
        } else {
            Err(SessionError::ShotsPending(self.pending_shots.len()))
        }
    }

    fn night_resolved(&self) -> bool {
        let night = self.state.night;
        self.journal
            .entries()
            .iter()
            .any(|e| matches!(e, JournalEntry::Night { night: n, .. } if *n == night))
    }

    fn day_voted(&self) -> bool {
        let day = self.state.day;
        self.journal
            .entries()
            .iter()
            .any(|e| matches!(e, JournalEntry::Vote { day: d, .. } if *d == day))
    }

    fn name_of(&self, id: PlayerId) -> String {
        self.player(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}
