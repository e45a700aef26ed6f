//! Adjacency pairing of ranked standings.

use super::models::{Pairing, PairingRound, StandingRow};

/// Pair neighbours in the standings: positions (0,1), (2,3), ...
///
/// The higher-ranked player of each pair comes first and pairs follow the
/// standings order. With an odd field the last player is returned in
/// [`PairingRound::unpaired`] instead of a pair. Previous meetings are not
/// considered, so two players may be paired again.
pub fn pair_adjacent(standings: Vec<StandingRow>) -> PairingRound {
    let mut pairs = Vec::with_capacity(standings.len() / 2);
    let mut rows = standings.into_iter();

    let unpaired = loop {
        match (rows.next(), rows.next()) {
            (Some(first), Some(second)) => pairs.push(Pairing::new(&first, &second)),
            (leftover, _) => break leftover,
        }
    };

    PairingRound { pairs, unpaired }
}
