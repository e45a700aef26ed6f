//! Tournament module for Swiss-system standings and pairings.
//!
//! This module provides:
//! - Standings calculation (wins descending, registration order on ties)
//! - Adjacency pairing of the standings for the next round
//! - Atomic match recording through the injected store
//! - Caller-owned tournament context resolution
//!
//! ## Example
//!
//! ```no_run
//! use swiss_tournament::db::{Database, PgTournamentStore};
//! use swiss_tournament::tournament::{TournamentContext, TournamentManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let manager = TournamentManager::new(Arc::new(PgTournamentStore::new(db.pool().clone())));
//!
//!     let mut context = TournamentContext::new();
//!     let tournament_id = manager.resolve(&mut context, None).await?;
//!
//!     for pairing in manager.generate_pairings(tournament_id).await?.pairs {
//!         println!("{} vs {}", pairing.first.name, pairing.second.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod errors;
pub mod manager;
pub mod models;
pub mod pairing;
pub mod standings;

pub use context::TournamentContext;
pub use errors::{TournamentError, TournamentResult};
pub use manager::TournamentManager;
pub use models::{
    DEFAULT_TOURNAMENT_TITLE, MatchId, MatchParticipation, Pairing, PairingRound, PairedPlayer,
    PlayerId, RegisteredPlayer, StandingRow, Tournament, TournamentId,
};
pub use pairing::pair_adjacent;
pub use standings::aggregate_standings;
