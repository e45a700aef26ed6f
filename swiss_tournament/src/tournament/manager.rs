//! Tournament manager tying a store to the standings and pairing engine.

use std::sync::Arc;

use log::{debug, info, warn};

use super::context::TournamentContext;
use super::errors::{TournamentError, TournamentResult, ensure_id, ensure_name};
use super::models::{MatchId, PairingRound, PlayerId, StandingRow, Tournament, TournamentId};
use super::pairing::pair_adjacent;
use super::standings::aggregate_standings;
use crate::db::TournamentStore;

/// Tournament manager
///
/// Holds no state of its own besides the store handle: standings are
/// recomputed from the store on every call.
#[derive(Clone)]
pub struct TournamentManager {
    store: Arc<dyn TournamentStore>,
}

impl TournamentManager {
    /// Create a new tournament manager
    pub fn new(store: Arc<dyn TournamentStore>) -> Self {
        Self { store }
    }

    /// The store this manager reads from and writes to
    pub fn store(&self) -> &dyn TournamentStore {
        self.store.as_ref()
    }

    /// Resolve the tournament for the next operation through `context`
    pub async fn resolve(
        &self,
        context: &mut TournamentContext,
        explicit: Option<TournamentId>,
    ) -> TournamentResult<TournamentId> {
        context.resolve(self.store.as_ref(), explicit).await
    }

    /// Create a new tournament
    ///
    /// # Errors
    ///
    /// * `TournamentError::InvalidArgument` - Blank title
    pub async fn create_tournament(&self, title: &str) -> TournamentResult<TournamentId> {
        let title = ensure_name("tournament title", title)?;
        let tournament_id = self.store.create_tournament(&title).await?;
        info!("Created tournament {} ({})", tournament_id, title);
        Ok(tournament_id)
    }

    /// List all tournaments, newest first
    pub async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>> {
        self.store.list_tournaments().await
    }

    /// Register a player for a tournament
    ///
    /// Names need not be unique; the store assigns the id.
    pub async fn register_player(
        &self,
        tournament_id: TournamentId,
        name: &str,
    ) -> TournamentResult<PlayerId> {
        ensure_id("tournament", tournament_id)?;
        let name = ensure_name("player name", name)?;
        let player_id = self.store.register_player(tournament_id, &name).await?;
        info!(
            "Registered player {} ({}) in tournament {}",
            player_id, name, tournament_id
        );
        Ok(player_id)
    }

    /// Number of players registered in the tournament
    pub async fn count_players(&self, tournament_id: TournamentId) -> TournamentResult<usize> {
        ensure_id("tournament", tournament_id)?;
        self.store.count_players(tournament_id).await
    }

    /// Players ranked by wins, ties in registration order
    ///
    /// A tournament without players yields an empty list.
    pub async fn compute_standings(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<StandingRow>> {
        ensure_id("tournament", tournament_id)?;

        let players = self.store.fetch_registered_players(tournament_id).await?;
        let participations = self.store.fetch_match_participations(tournament_id).await?;
        let standings = aggregate_standings(players, &participations);

        debug!(
            "Computed standings for tournament {}: {} players, {} participations",
            tournament_id,
            standings.len(),
            participations.len()
        );
        Ok(standings)
    }

    /// Pair adjacent players in the current standings for the next round
    pub async fn generate_pairings(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<PairingRound> {
        let standings = self.compute_standings(tournament_id).await?;
        let round = pair_adjacent(standings);

        if let Some(unpaired) = &round.unpaired {
            warn!(
                "Odd field in tournament {}: player {} ({}) left unpaired",
                tournament_id, unpaired.player_id, unpaired.name
            );
        }
        debug!(
            "Generated {} pairings for tournament {}",
            round.pairs.len(),
            tournament_id
        );
        Ok(round)
    }

    /// Record the outcome of a single match
    ///
    /// # Errors
    ///
    /// * `TournamentError::InvalidArgument` - Non-positive id, or the winner is the loser
    /// * Store errors when either player is not registered in the tournament;
    ///   nothing is written in that case
    pub async fn record_match(
        &self,
        tournament_id: TournamentId,
        winner_id: PlayerId,
        loser_id: PlayerId,
    ) -> TournamentResult<MatchId> {
        ensure_id("tournament", tournament_id)?;
        ensure_id("winner", winner_id)?;
        ensure_id("loser", loser_id)?;
        if winner_id == loser_id {
            return Err(TournamentError::InvalidArgument(format!(
                "player {winner_id} cannot play against themselves"
            )));
        }

        let match_id = self
            .store
            .insert_match(tournament_id, winner_id, loser_id)
            .await?;
        info!(
            "Recorded match {} in tournament {}: {} beat {}",
            match_id, tournament_id, winner_id, loser_id
        );
        Ok(match_id)
    }

    /// Remove every match recorded in the tournament
    pub async fn delete_matches(&self, tournament_id: TournamentId) -> TournamentResult<u64> {
        ensure_id("tournament", tournament_id)?;
        let removed = self.store.delete_matches(tournament_id).await?;
        info!("Deleted {} matches from tournament {}", removed, tournament_id);
        Ok(removed)
    }

    /// Remove every player (and their matches) from the tournament
    pub async fn delete_players(&self, tournament_id: TournamentId) -> TournamentResult<u64> {
        ensure_id("tournament", tournament_id)?;
        let removed = self.store.delete_players(tournament_id).await?;
        info!("Deleted {} players from tournament {}", removed, tournament_id);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryTournamentStore;

    async fn setup() -> (TournamentManager, TournamentId) {
        let manager = TournamentManager::new(Arc::new(MemoryTournamentStore::new()));
        let tournament_id = manager.create_tournament("Test Open").await.unwrap();
        (manager, tournament_id)
    }

    #[tokio::test]
    async fn test_rejects_blank_names() {
        let (manager, t) = setup().await;
        assert!(matches!(
            manager.create_tournament("  ").await,
            Err(TournamentError::InvalidArgument(_))
        ));
        assert!(matches!(
            manager.register_player(t, "").await,
            Err(TournamentError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_non_positive_tournament() {
        let (manager, _) = setup().await;
        for id in [0, -1] {
            assert!(matches!(
                manager.compute_standings(id).await,
                Err(TournamentError::InvalidArgument(_))
            ));
            assert!(matches!(
                manager.generate_pairings(id).await,
                Err(TournamentError::InvalidArgument(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_rejects_non_positive_player_ids() {
        let (manager, t) = setup().await;
        let b = manager.register_player(t, "B").await.unwrap();

        for (winner, loser) in [(0, b), (b, 0), (-3, b), (b, -3)] {
            assert!(matches!(
                manager.record_match(t, winner, loser).await,
                Err(TournamentError::InvalidArgument(_))
            ));
        }
        assert!(matches!(
            manager.record_match(0, b, b + 1).await,
            Err(TournamentError::InvalidArgument(_))
        ));
        assert_eq!(manager.compute_standings(t).await.unwrap()[0].matches, 0);
    }

    #[tokio::test]
    async fn test_self_match_rejected_without_write() {
        let (manager, t) = setup().await;
        let x = manager.register_player(t, "X").await.unwrap();

        let err = manager.record_match(t, x, x).await.unwrap_err();
        assert!(matches!(err, TournamentError::InvalidArgument(_)));

        let standings = manager.compute_standings(t).await.unwrap();
        assert_eq!(standings[0].matches, 0);
    }

    #[tokio::test]
    async fn test_unknown_player_is_data_access_error() {
        let (manager, t) = setup().await;
        let a = manager.register_player(t, "A").await.unwrap();

        let err = manager.record_match(t, a, 404).await.unwrap_err();
        assert!(err.is_data_access());
        assert_eq!(manager.compute_standings(t).await.unwrap()[0].matches, 0);
    }

    #[tokio::test]
    async fn test_unknown_tournament_has_empty_standings() {
        let (manager, _) = setup().await;
        assert!(manager.compute_standings(999).await.unwrap().is_empty());
        assert_eq!(manager.generate_pairings(999).await.unwrap(), PairingRound::default());
    }

    #[tokio::test]
    async fn test_resolve_through_manager() {
        let (manager, t) = setup().await;
        let mut context = TournamentContext::new();
        assert_eq!(manager.resolve(&mut context, None).await.unwrap(), t);
    }

    #[tokio::test]
    async fn test_count_and_reset() {
        let (manager, t) = setup().await;
        let a = manager.register_player(t, "A").await.unwrap();
        let b = manager.register_player(t, "B").await.unwrap();
        manager.record_match(t, a, b).await.unwrap();
        assert_eq!(manager.count_players(t).await.unwrap(), 2);

        assert_eq!(manager.delete_matches(t).await.unwrap(), 1);
        let standings = manager.compute_standings(t).await.unwrap();
        assert!(standings.iter().all(|r| r.matches == 0));

        assert_eq!(manager.delete_players(t).await.unwrap(), 2);
        assert_eq!(manager.count_players(t).await.unwrap(), 0);
    }
}
