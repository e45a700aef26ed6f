//! # Swiss Tournament
//!
//! Standings and pairing engine for Swiss-system tournaments.
//!
//! Players register into a tournament, match outcomes are recorded as one
//! winner and one loser, and every round the engine ranks players by wins
//! and pairs neighbours in that ranking.
//!
//! ## Core Modules
//!
//! - [`tournament`]: Standings calculation, adjacency pairing, tournament context
//!   resolution and the [`TournamentManager`] façade
//! - [`db`]: Storage abstraction with PostgreSQL and in-memory implementations
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use swiss_tournament::{MemoryTournamentStore, TournamentManager};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), swiss_tournament::TournamentError> {
//! let manager = TournamentManager::new(Arc::new(MemoryTournamentStore::new()));
//! let tournament = manager.create_tournament("Club Night").await?;
//!
//! let alice = manager.register_player(tournament, "Alice").await?;
//! let bob = manager.register_player(tournament, "Bob").await?;
//! manager.record_match(tournament, alice, bob).await?;
//!
//! let round = manager.generate_pairings(tournament).await?;
//! assert_eq!(round.pairs.len(), 1);
//! # Ok(())
//! # }
//! ```

/// Storage collaborators: connection pool, configuration and stores.
pub mod db;
pub use db::{
    Database, DatabaseConfig, MemoryTournamentStore, PgTournamentStore, TournamentStore,
};

/// Standings, pairings and tournament bookkeeping.
pub mod tournament;
pub use tournament::{
    MatchId, MatchParticipation, Pairing, PairingRound, PairedPlayer, PlayerId,
    RegisteredPlayer, StandingRow, Tournament, TournamentContext, TournamentError,
    TournamentId, TournamentManager, TournamentResult,
};
