//! Plain-text rendering of tournament results.

use std::fmt::Write;

use swiss_tournament::{PairingRound, StandingRow, Tournament};

pub fn standings_table(rows: &[StandingRow]) -> String {
    if rows.is_empty() {
        return "No players registered.\n".to_string();
    }

    let width = name_width(rows.iter().map(|r| r.name.as_str()));
    let mut out = format!(
        "{:>4}  {:>6}  {:<width$}  {:>4}  {:>7}\n",
        "#", "ID", "NAME", "WINS", "MATCHES"
    );
    for (rank, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:>6}  {:<width$}  {:>4}  {:>7}",
            rank + 1,
            row.player_id,
            row.name,
            row.wins,
            row.matches
        );
    }
    out
}

pub fn pairings_table(round: &PairingRound) -> String {
    let mut out = String::new();
    if round.pairs.is_empty() {
        out.push_str("No pairings.\n");
    }

    let firsts: Vec<String> = round
        .pairs
        .iter()
        .map(|p| format!("{} ({})", p.first.name, p.first.id))
        .collect();
    let width = firsts.iter().map(|f| f.chars().count()).max().unwrap_or(0);
    for (table, (first, pairing)) in firsts.iter().zip(&round.pairs).enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<width$}  vs  {} ({})",
            table + 1,
            first,
            pairing.second.name,
            pairing.second.id
        );
    }

    if let Some(unpaired) = &round.unpaired {
        let _ = writeln!(out, "Unpaired: {} ({})", unpaired.name, unpaired.player_id);
    }
    out
}

pub fn tournaments_table(tournaments: &[Tournament]) -> String {
    if tournaments.is_empty() {
        return "No tournaments.\n".to_string();
    }

    let mut out = String::new();
    for t in tournaments {
        let _ = writeln!(
            out,
            "{:>6}  {}  {}",
            t.id,
            t.created_at.format("%Y-%m-%d %H:%M"),
            t.title
        );
    }
    out
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0).max(4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use swiss_tournament::Pairing;

    fn row(id: i64, name: &str, wins: u32, matches: u32) -> StandingRow {
        StandingRow {
            player_id: id,
            name: name.to_string(),
            wins,
            matches,
        }
    }

    #[test]
    fn test_standings_table() {
        let table = standings_table(&[row(1, "Ada", 1, 1), row(2, "Bo", 0, 1)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("WINS"));
        assert!(lines[1].contains("Ada"));
        assert!(lines[2].trim_start().starts_with('2'));
    }

    #[test]
    fn test_empty_standings() {
        assert_eq!(standings_table(&[]), "No players registered.\n");
    }

    #[test]
    fn test_pairings_with_unpaired() {
        let round = PairingRound {
            pairs: vec![Pairing::new(&row(1, "Ada", 1, 1), &row(3, "Cy", 1, 1))],
            unpaired: Some(row(2, "Bo", 0, 1)),
        };
        let text = pairings_table(&round);
        assert!(text.contains("Ada (1)  vs  Cy (3)"));
        assert!(text.contains("Unpaired: Bo (2)"));
    }

    #[test]
    fn test_pairings_align_on_widest_first_column() {
        let round = PairingRound {
            pairs: vec![
                Pairing::new(&row(1, "Ada", 1, 1), &row(2, "Bo", 1, 1)),
                Pairing::new(&row(13, "Melpomene", 0, 1), &row(4, "Di", 0, 1)),
            ],
            unpaired: None,
        };
        let text = pairings_table(&round);
        let columns: Vec<usize> = text.lines().map(|l| l.find("  vs  ").unwrap()).collect();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0], columns[1]);
    }

    #[test]
    fn test_no_pairings() {
        assert_eq!(pairings_table(&PairingRound::default()), "No pairings.\n");
    }
}
