//! Tournament data models for Swiss-system play.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tournament ID type
pub type TournamentId = i64;

/// Player ID type
pub type PlayerId = i64;

/// Match ID type
pub type MatchId = i64;

/// Title given to the tournament created when none exists yet
pub const DEFAULT_TOURNAMENT_TITLE: &str = "default";

/// Stored tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Player as returned by the store, in registration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredPlayer {
    pub id: PlayerId,
    pub name: String,
}

/// One player's side of one recorded match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchParticipation {
    pub player_id: PlayerId,
    pub won: bool,
    pub match_id: MatchId,
}

/// A player's line in the standings
///
/// `matches >= wins` always holds for rows produced by
/// [`aggregate_standings`](super::aggregate_standings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub player_id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub matches: u32,
}

impl StandingRow {
    /// Row for a player with no recorded matches
    pub fn new(player_id: PlayerId, name: String) -> Self {
        Self {
            player_id,
            name,
            wins: 0,
            matches: 0,
        }
    }

    /// Matches played and lost
    pub fn losses(&self) -> u32 {
        self.matches.saturating_sub(self.wins)
    }
}

/// Identity of one side of a pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedPlayer {
    pub id: PlayerId,
    pub name: String,
}

impl From<&StandingRow> for PairedPlayer {
    fn from(row: &StandingRow) -> Self {
        Self {
            id: row.player_id,
            name: row.name.clone(),
        }
    }
}

/// Two players meeting in the next round, higher-ranked player first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub first: PairedPlayer,
    pub second: PairedPlayer,
}

impl Pairing {
    pub fn new(first: &StandingRow, second: &StandingRow) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Both player ids, higher-ranked first
    pub fn ids(&self) -> (PlayerId, PlayerId) {
        (self.first.id, self.second.id)
    }
}

/// Pairings for the next round
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRound {
    /// Adjacent pairs in standings order
    pub pairs: Vec<Pairing>,
    /// Lowest-ranked player left over when the field is odd
    pub unpaired: Option<StandingRow>,
}

impl PairingRound {
    /// Whether every player was paired
    pub fn is_complete(&self) -> bool {
        self.unpaired.is_none()
    }

    /// Number of players covered, including the unpaired one
    pub fn player_count(&self) -> usize {
        self.pairs.len() * 2 + usize::from(self.unpaired.is_some())
    }
}
