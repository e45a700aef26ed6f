//! Tournament store trait and its PostgreSQL implementation.
//!
//! The standings and pairing engine only reads players and match
//! participations and appends match results; everything else here is
//! bookkeeping around those tables.
#![allow(clippy::needless_raw_string_hashes)]

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};

use super::timeouts::{with_default_timeout, with_transaction_timeout};
use crate::tournament::{
    MatchId, MatchParticipation, PlayerId, RegisteredPlayer, Tournament, TournamentError,
    TournamentId, TournamentResult,
};

/// Storage collaborator for tournaments, players and matches
#[async_trait]
pub trait TournamentStore: Send + Sync {
    /// Create a tournament and return its id
    async fn create_tournament(&self, title: &str) -> TournamentResult<TournamentId>;

    /// Most recently created tournament, if any
    async fn latest_tournament(&self) -> TournamentResult<Option<TournamentId>>;

    /// All tournaments, newest first
    async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>>;

    /// Register a player and return the assigned id
    async fn register_player(
        &self,
        tournament_id: TournamentId,
        name: &str,
    ) -> TournamentResult<PlayerId>;

    /// Number of players registered in the tournament
    async fn count_players(&self, tournament_id: TournamentId) -> TournamentResult<usize>;

    /// Players of the tournament in registration order
    async fn fetch_registered_players(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<RegisteredPlayer>>;

    /// Every participation of every match in the tournament
    async fn fetch_match_participations(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<MatchParticipation>>;

    /// Write one match and both participations, all or nothing
    async fn insert_match(
        &self,
        tournament_id: TournamentId,
        winner_id: PlayerId,
        loser_id: PlayerId,
    ) -> TournamentResult<MatchId>;

    /// Remove the tournament's matches; returns how many were removed
    async fn delete_matches(&self, tournament_id: TournamentId) -> TournamentResult<u64>;

    /// Remove the tournament's matches and players; returns players removed
    async fn delete_players(&self, tournament_id: TournamentId) -> TournamentResult<u64>;
}

/// PostgreSQL implementation of `TournamentStore`
#[derive(Clone)]
pub struct PgTournamentStore {
    pool: PgPool,
}

impl PgTournamentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_participation(
        tx: &mut Transaction<'_, Postgres>,
        tournament_id: TournamentId,
        match_id: MatchId,
        player_id: PlayerId,
        won: bool,
    ) -> TournamentResult<()> {
        // Selecting through players keeps foreign players out of the match
        let result = sqlx::query(
            r#"
            INSERT INTO match_participations (match_id, player_id, won)
            SELECT $1, id, $2 FROM players WHERE id = $3 AND tournament_id = $4
            "#,
        )
        .bind(match_id)
        .bind(won)
        .bind(player_id)
        .bind(tournament_id)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() != 1 {
            return Err(TournamentError::ConstraintViolation(format!(
                "player {player_id} is not registered in tournament {tournament_id}"
            )));
        }

        Ok(())
    }

    async fn insert_match_in_transaction(
        &self,
        tournament_id: TournamentId,
        winner_id: PlayerId,
        loser_id: PlayerId,
    ) -> TournamentResult<MatchId> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO matches (tournament_id, winner_id)
            SELECT $1, id FROM players WHERE id = $2 AND tournament_id = $1
            RETURNING id
            "#,
        )
        .bind(tournament_id)
        .bind(winner_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            TournamentError::ConstraintViolation(format!(
                "player {winner_id} is not registered in tournament {tournament_id}"
            ))
        })?;

        let match_id: MatchId = row.get("id");

        Self::insert_participation(&mut tx, tournament_id, match_id, winner_id, true).await?;
        Self::insert_participation(&mut tx, tournament_id, match_id, loser_id, false).await?;

        tx.commit().await?;
        Ok(match_id)
    }

    async fn delete_players_in_transaction(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<u64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM matches WHERE tournament_id = $1")
            .bind(tournament_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM players WHERE tournament_id = $1")
            .bind(tournament_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TournamentStore for PgTournamentStore {
    async fn create_tournament(&self, title: &str) -> TournamentResult<TournamentId> {
        let row = with_default_timeout(
            sqlx::query("INSERT INTO tournaments (title) VALUES ($1) RETURNING id")
                .bind(title)
                .fetch_one(&self.pool),
        )
        .await?;

        Ok(row.get("id"))
    }

    async fn latest_tournament(&self) -> TournamentResult<Option<TournamentId>> {
        let row = with_default_timeout(
            sqlx::query("SELECT MAX(id) AS id FROM tournaments").fetch_one(&self.pool),
        )
        .await?;

        Ok(row.get::<Option<i64>, _>("id"))
    }

    async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>> {
        let rows = with_default_timeout(
            sqlx::query("SELECT id, title, created_at FROM tournaments ORDER BY id DESC")
                .fetch_all(&self.pool),
        )
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Tournament {
                id: r.get("id"),
                title: r.get("title"),
                created_at: r.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
            })
            .collect())
    }

    async fn register_player(
        &self,
        tournament_id: TournamentId,
        name: &str,
    ) -> TournamentResult<PlayerId> {
        let row = with_default_timeout(
            sqlx::query("INSERT INTO players (tournament_id, name) VALUES ($1, $2) RETURNING id")
                .bind(tournament_id)
                .bind(name)
                .fetch_one(&self.pool),
        )
        .await?;

        Ok(row.get("id"))
    }

    async fn count_players(&self, tournament_id: TournamentId) -> TournamentResult<usize> {
        let row = with_default_timeout(
            sqlx::query("SELECT COUNT(*) AS count FROM players WHERE tournament_id = $1")
                .bind(tournament_id)
                .fetch_one(&self.pool),
        )
        .await?;

        let count: i64 = row.get("count");
        Ok(count as usize)
    }

    async fn fetch_registered_players(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<RegisteredPlayer>> {
        let rows = with_default_timeout(
            sqlx::query("SELECT id, name FROM players WHERE tournament_id = $1 ORDER BY id")
                .bind(tournament_id)
                .fetch_all(&self.pool),
        )
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RegisteredPlayer {
                id: r.get("id"),
                name: r.get("name"),
            })
            .collect())
    }

    async fn fetch_match_participations(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<MatchParticipation>> {
        let rows = with_default_timeout(
            sqlx::query(
                r#"
                SELECT mp.player_id, mp.won, mp.match_id
                FROM match_participations AS mp
                JOIN matches AS m ON m.id = mp.match_id
                WHERE m.tournament_id = $1
                ORDER BY mp.match_id, mp.won DESC
                "#,
            )
            .bind(tournament_id)
            .fetch_all(&self.pool),
        )
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| MatchParticipation {
                player_id: r.get("player_id"),
                won: r.get("won"),
                match_id: r.get("match_id"),
            })
            .collect())
    }

    async fn insert_match(
        &self,
        tournament_id: TournamentId,
        winner_id: PlayerId,
        loser_id: PlayerId,
    ) -> TournamentResult<MatchId> {
        with_transaction_timeout(self.insert_match_in_transaction(tournament_id, winner_id, loser_id))
            .await
    }

    async fn delete_matches(&self, tournament_id: TournamentId) -> TournamentResult<u64> {
        let result = with_default_timeout(
            sqlx::query("DELETE FROM matches WHERE tournament_id = $1")
                .bind(tournament_id)
                .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_players(&self, tournament_id: TournamentId) -> TournamentResult<u64> {
        with_transaction_timeout(self.delete_players_in_transaction(tournament_id)).await
    }
}
