//! In-memory `TournamentStore`, used by tests, benchmarks and the CLI's
//! `demo` command.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::repository::TournamentStore;
use crate::tournament::{
    MatchId, MatchParticipation, PlayerId, RegisteredPlayer, Tournament, TournamentError,
    TournamentId, TournamentResult,
};

#[derive(Debug, Clone)]
struct StoredPlayer {
    id: PlayerId,
    tournament_id: TournamentId,
    name: String,
}

#[derive(Debug, Clone, Copy)]
struct StoredMatch {
    id: MatchId,
    tournament_id: TournamentId,
}

#[derive(Debug, Default)]
struct MemoryState {
    tournaments: Vec<Tournament>,
    players: Vec<StoredPlayer>,
    matches: Vec<StoredMatch>,
    participations: Vec<MatchParticipation>,
    next_tournament_id: i64,
    next_player_id: i64,
    next_match_id: i64,
}

impl MemoryState {
    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }

    fn has_tournament(&self, tournament_id: TournamentId) -> bool {
        self.tournaments.iter().any(|t| t.id == tournament_id)
    }

    fn is_registered(&self, tournament_id: TournamentId, player_id: PlayerId) -> bool {
        self.players
            .iter()
            .any(|p| p.id == player_id && p.tournament_id == tournament_id)
    }

    fn remove_matches(&mut self, tournament_id: TournamentId) -> u64 {
        let before = self.matches.len();
        self.matches.retain(|m| m.tournament_id != tournament_id);
        let remaining: HashSet<MatchId> = self.matches.iter().map(|m| m.id).collect();
        self.participations.retain(|p| remaining.contains(&p.match_id));
        (before - self.matches.len()) as u64
    }
}

/// Store holding everything in process memory behind an async mutex
///
/// Ids are assigned from 1 upward per entity, like database serials, and
/// writes are checked the way the PostgreSQL schema checks them.
#[derive(Debug, Default)]
pub struct MemoryTournamentStore {
    state: Mutex<MemoryState>,
}

impl MemoryTournamentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TournamentStore for MemoryTournamentStore {
    async fn create_tournament(&self, title: &str) -> TournamentResult<TournamentId> {
        let mut state = self.state.lock().await;
        let id = MemoryState::next_id(&mut state.next_tournament_id);
        state.tournaments.push(Tournament {
            id,
            title: title.to_string(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn latest_tournament(&self) -> TournamentResult<Option<TournamentId>> {
        let state = self.state.lock().await;
        Ok(state.tournaments.iter().map(|t| t.id).max())
    }

    async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>> {
        let state = self.state.lock().await;
        Ok(state.tournaments.iter().rev().cloned().collect())
    }

    async fn register_player(
        &self,
        tournament_id: TournamentId,
        name: &str,
    ) -> TournamentResult<PlayerId> {
        let mut state = self.state.lock().await;
        if !state.has_tournament(tournament_id) {
            return Err(TournamentError::ConstraintViolation(format!(
                "tournament {tournament_id} does not exist"
            )));
        }

        let id = MemoryState::next_id(&mut state.next_player_id);
        state.players.push(StoredPlayer {
            id,
            tournament_id,
            name: name.to_string(),
        });
        Ok(id)
    }

    async fn count_players(&self, tournament_id: TournamentId) -> TournamentResult<usize> {
        let state = self.state.lock().await;
        Ok(state
            .players
            .iter()
            .filter(|p| p.tournament_id == tournament_id)
            .count())
    }

    async fn fetch_registered_players(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<RegisteredPlayer>> {
        let state = self.state.lock().await;
        Ok(state
            .players
            .iter()
            .filter(|p| p.tournament_id == tournament_id)
            .map(|p| RegisteredPlayer {
                id: p.id,
                name: p.name.clone(),
            })
            .collect())
    }

    async fn fetch_match_participations(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<MatchParticipation>> {
        let state = self.state.lock().await;
        let match_ids: HashSet<MatchId> = state
            .matches
            .iter()
            .filter(|m| m.tournament_id == tournament_id)
            .map(|m| m.id)
            .collect();

        Ok(state
            .participations
            .iter()
            .filter(|p| match_ids.contains(&p.match_id))
            .copied()
            .collect())
    }

    async fn insert_match(
        &self,
        tournament_id: TournamentId,
        winner_id: PlayerId,
        loser_id: PlayerId,
    ) -> TournamentResult<MatchId> {
        let mut state = self.state.lock().await;

        // Checked up front so a rejected write leaves nothing behind
        for player_id in [winner_id, loser_id] {
            if !state.is_registered(tournament_id, player_id) {
                return Err(TournamentError::ConstraintViolation(format!(
                    "player {player_id} is not registered in tournament {tournament_id}"
                )));
            }
        }
        if winner_id == loser_id {
            return Err(TournamentError::ConstraintViolation(format!(
                "player {winner_id} cannot take both sides of a match"
            )));
        }

        let id = MemoryState::next_id(&mut state.next_match_id);
        state.matches.push(StoredMatch { id, tournament_id });
        state.participations.push(MatchParticipation {
            player_id: winner_id,
            won: true,
            match_id: id,
        });
        state.participations.push(MatchParticipation {
            player_id: loser_id,
            won: false,
            match_id: id,
        });
        Ok(id)
    }

    async fn delete_matches(&self, tournament_id: TournamentId) -> TournamentResult<u64> {
        let mut state = self.state.lock().await;
        Ok(state.remove_matches(tournament_id))
    }

    async fn delete_players(&self, tournament_id: TournamentId) -> TournamentResult<u64> {
        let mut state = self.state.lock().await;
        state.remove_matches(tournament_id);
        let before = state.players.len();
        state.players.retain(|p| p.tournament_id != tournament_id);
        Ok((before - state.players.len()) as u64)
    }
}
