//! Caller-owned selection of the tournament an operation applies to.

use log::info;
use serde::{Deserialize, Serialize};

use super::errors::{TournamentResult, ensure_id};
use super::models::{DEFAULT_TOURNAMENT_TITLE, TournamentId};
use crate::db::TournamentStore;

/// Remembers the last tournament resolved in a session
///
/// Resolution order:
/// 1. an explicit id passed by the caller
/// 2. the last id this context resolved
/// 3. the most recently created tournament in the store
/// 4. a newly created tournament titled [`DEFAULT_TOURNAMENT_TITLE`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentContext {
    last_used: Option<TournamentId>,
}

impl TournamentContext {
    /// Context with nothing resolved yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Context that already points at `tournament_id`
    pub fn with_tournament(tournament_id: TournamentId) -> TournamentResult<Self> {
        ensure_id("tournament", tournament_id)?;
        Ok(Self {
            last_used: Some(tournament_id),
        })
    }

    /// Tournament resolved most recently, if any
    pub fn last_used(&self) -> Option<TournamentId> {
        self.last_used
    }

    /// Drop the remembered tournament
    pub fn forget(&mut self) {
        self.last_used = None;
    }

    /// Pick the tournament for the next operation and remember it
    ///
    /// # Errors
    ///
    /// * `TournamentError::InvalidArgument` - `explicit` is zero or negative
    /// * Store errors while looking up or creating a tournament
    pub async fn resolve(
        &mut self,
        store: &dyn TournamentStore,
        explicit: Option<TournamentId>,
    ) -> TournamentResult<TournamentId> {
        let tournament_id = match (explicit, self.last_used) {
            (Some(id), _) => {
                ensure_id("tournament", id)?;
                id
            }
            (None, Some(id)) => id,
            (None, None) => match store.latest_tournament().await? {
                Some(id) => id,
                None => {
                    let id = store.create_tournament(DEFAULT_TOURNAMENT_TITLE).await?;
                    info!("Created default tournament {}", id);
                    id
                }
            },
        };

        self.last_used = Some(tournament_id);
        Ok(tournament_id)
    }
}
