//! Standings aggregation.

use std::collections::HashMap;

use super::models::{MatchParticipation, PlayerId, RegisteredPlayer, StandingRow};

/// Rank players by wins from their recorded match participations.
///
/// `players` must be in registration order. Every player gets a row, even
/// with no matches played. Rows are ordered by wins descending; the sort is
/// stable, so players with equal wins keep their registration order and
/// repeated calls over the same data return the same sequence.
///
/// Participations naming a player outside `players` are ignored.
pub fn aggregate_standings(
    players: Vec<RegisteredPlayer>,
    participations: &[MatchParticipation],
) -> Vec<StandingRow> {
    let index: HashMap<PlayerId, usize> = players
        .iter()
        .enumerate()
        .map(|(position, player)| (player.id, position))
        .collect();

    let mut rows: Vec<StandingRow> = players
        .into_iter()
        .map(|player| StandingRow::new(player.id, player.name))
        .collect();

    for participation in participations {
        if let Some(&position) = index.get(&participation.player_id) {
            let row = &mut rows[position];
            row.matches += 1;
            if participation.won {
                row.wins += 1;
            }
        }
    }

    rows.sort_by(|a, b| b.wins.cmp(&a.wins));
    rows
}
