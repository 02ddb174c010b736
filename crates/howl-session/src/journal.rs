//! Chronological narration of a game.

use chrono::{DateTime, Utc};
use howl_core::PlayerId;
use serde::{Deserialize, Serialize};

/// A single entry in the game journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JournalEntry {
    /// Roles were dealt and the game was set up.
    Setup {
        /// Number of seated players.
        players: usize,
        /// When the game was set up.
        timestamp: DateTime<Utc>,
    },
    /// A night was resolved.
    Night {
        /// Night number.
        night: u32,
        /// Public narration of the night.
        messages: Vec<String>,
        /// When the night was resolved.
        timestamp: DateTime<Utc>,
    },
    /// A hunter fired their last shot.
    Shot {
        /// The hunter.
        hunter: PlayerId,
        /// Public narration of the shot.
        messages: Vec<String>,
        /// When the shot was resolved.
        timestamp: DateTime<Utc>,
    },
    /// The day vote concluded.
    Vote {
        /// Day number.
        day: u32,
        /// Votes received per target, as display strings.
        tally: Vec<(String, u32)>,
        /// Whether the top count was shared.
        tied: bool,
        /// Who was expelled, if anyone.
        expelled: Option<String>,
        /// Narration of the expulsion and any bond deaths.
        messages: Vec<String>,
        /// When the vote concluded.
        timestamp: DateTime<Utc>,
    },
    /// The game ended.
    Victory {
        /// Why the game ended.
        reason: String,
        /// Names of the winners.
        winners: Vec<String>,
        /// When the game ended.
        timestamp: DateTime<Utc>,
    },
}

/// A chronological log of game events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the journal.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Drop entries past `len`. Used when a step is undone.
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// Get all entries.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the journal as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Game Journal\n============\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::Setup { players, .. } => {
                    out.push_str(&format!("{players} players take their seats.\n\n"));
                }
                JournalEntry::Night {
                    night, messages, ..
                } => {
                    out.push_str(&format!("--- Night {night} ---\n"));
                    if messages.is_empty() {
                        out.push_str("The night passes quietly.\n");
                    }
                    for m in messages {
                        out.push_str(&format!("{m}\n"));
                    }
                    out.push('\n');
                }
                JournalEntry::Shot { messages, .. } => {
                    out.push_str("A last shot rings out.\n");
                    for m in messages {
                        out.push_str(&format!("{m}\n"));
                    }
                    out.push('\n');
                }
                JournalEntry::Vote {
                    day,
                    tally,
                    tied,
                    expelled,
                    messages,
                    ..
                } => {
                    out.push_str(&format!("--- Day {day} ---\n"));
                    let votes: Vec<String> =
                        tally.iter().map(|(name, n)| format!("{name}: {n}")).collect();
                    if votes.is_empty() {
                        out.push_str("Nobody voted.\n");
                    } else {
                        out.push_str(&format!("Votes: {}\n", votes.join(", ")));
                    }
                    if *tied {
                        out.push_str("The vote was tied.\n");
                    }
                    match expelled {
                        Some(name) => out.push_str(&format!("{name} was expelled.\n")),
                        None => out.push_str("Nobody was expelled.\n"),
                    }
                    for m in messages {
                        out.push_str(&format!("{m}\n"));
                    }
                    out.push('\n');
                }
                JournalEntry::Victory {
                    reason, winners, ..
                } => {
                    out.push_str(&format!("{reason}\n"));
                    out.push_str(&format!("Winners: {}\n", winners.join(", ")));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_journal() {
        let j = Journal::new();
        assert!(j.is_empty());
        assert_eq!(j.export_text(), "Game Journal\n============\n\n");
    }

    #[test]
    fn export_night_and_vote() {
        let mut j = Journal::new();
        j.append(JournalEntry::Night {
            night: 1,
            messages: vec!["Ada was killed during the night.".into()],
            timestamp: Utc::now(),
        });
        j.append(JournalEntry::Vote {
            day: 1,
            tally: vec![("Bo".into(), 2), ("Cy".into(), 1)],
            tied: false,
            expelled: Some("Bo".into()),
            messages: Vec::new(),
            timestamp: Utc::now(),
        });
        let text = j.export_text();
        assert!(text.contains("--- Night 1 ---\nAda was killed during the night.\n"));
        assert!(text.contains("Votes: Bo: 2, Cy: 1\n"));
        assert!(text.contains("Bo was expelled.\n"));
    }

    #[test]
    fn quiet_night_and_truncate() {
        let mut j = Journal::new();
        j.append(JournalEntry::Night {
            night: 2,
            messages: Vec::new(),
            timestamp: Utc::now(),
        });
        assert!(j.export_text().contains("The night passes quietly."));
        j.truncate(0);
        assert!(j.is_empty());
    }

    #[test]
    fn serde_roundtrip() {
        let mut j = Journal::new();
        j.append(JournalEntry::Victory {
            reason: "The wolves have overrun the village.".into(),
            winners: vec!["Ada".into()],
            timestamp: Utc::now(),
        });
        let json = serde_json::to_string(&j).unwrap();
        let back: Journal = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.export_text(), j.export_text());
    }
}
