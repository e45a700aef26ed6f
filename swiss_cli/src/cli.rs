//! Command-line argument parsing.

use anyhow::{Error, bail};
use pico_args::Arguments;
use swiss_tournament::{PlayerId, TournamentId};

pub const HELP: &str = "\
Manage a Swiss-system tournament

USAGE:
  swiss [OPTIONS] <COMMAND> [ARGS]

COMMANDS:
  migrate                     Apply the database schema
  new       <TITLE>           Create a tournament
  list                        List tournaments, newest first
  register  <NAME>            Register a player
  count                       Count registered players
  report    <WINNER> <LOSER>  Record a match by player ids
  standings                   Show players ranked by wins
  pairings                    Show pairings for the next round
  reset-matches               Delete every match of the tournament
  reset-players               Delete every player of the tournament
  demo      [PLAYERS] [ROUNDS]  Simulate rounds in memory [default: 8 3]

OPTIONS:
  --db-url      URL           Database connection string  [default: env DATABASE_URL]
  --tournament  ID            Tournament to act on, for tournament-scoped commands
                              [default: env SWISS_TOURNAMENT, else most recent]
  --json                      Print results as JSON

FLAGS:
  -h, --help                  Print help information

ENVIRONMENT:
  DATABASE_URL                PostgreSQL connection string
  SWISS_TOURNAMENT            Default tournament id
  RUST_LOG                    Log filter (e.g. info, swiss_tournament=debug)
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Migrate,
    New { title: String },
    List,
    Register { name: String },
    Count,
    Report { winner: PlayerId, loser: PlayerId },
    Standings,
    Pairings,
    ResetMatches,
    ResetPlayers,
    Demo { players: usize, rounds: usize },
}

impl Command {
    /// Whether the command acts on a single resolved tournament
    pub fn needs_tournament(&self) -> bool {
        !matches!(
            self,
            Command::Help
                | Command::Migrate
                | Command::New { .. }
                | Command::List
                | Command::Demo { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub database_url: Option<String>,
    pub tournament: Option<TournamentId>,
    pub json: bool,
    pub command: Command,
}

impl Args {
    pub fn parse(mut pargs: Arguments) -> Result<Self, Error> {
        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(Self {
                database_url: None,
                tournament: None,
                json: false,
                command: Command::Help,
            });
        }

        let database_url = pargs.opt_value_from_str("--db-url")?;
        let tournament = pargs.opt_value_from_str("--tournament")?;
        let json = pargs.contains("--json");

        let command = match pargs.subcommand()?.as_deref() {
            None => Command::Help,
            Some("migrate") => Command::Migrate,
            Some("new") => Command::New {
                title: join_words(free_words(&mut pargs)?, "TITLE")?,
            },
            Some("list") => Command::List,
            Some("register") => Command::Register {
                name: join_words(free_words(&mut pargs)?, "NAME")?,
            },
            Some("count") => Command::Count,
            Some("report") => Command::Report {
                winner: pargs.free_from_str()?,
                loser: pargs.free_from_str()?,
            },
            Some("standings") => Command::Standings,
            Some("pairings") => Command::Pairings,
            Some("reset-matches") => Command::ResetMatches,
            Some("reset-players") => Command::ResetPlayers,
            Some("demo") => Command::Demo {
                players: pargs.opt_free_from_str()?.unwrap_or(8),
                rounds: pargs.opt_free_from_str()?.unwrap_or(3),
            },
            Some(other) => bail!("Unknown command '{}'; see --help", other),
        };

        let leftover = pargs.finish();
        if !leftover.is_empty() {
            bail!("Unexpected arguments: {:?}", leftover);
        }

        if tournament.is_some() && command != Command::Help && !command.needs_tournament() {
            bail!("--tournament does not apply to this command; see --help");
        }

        Ok(Self {
            database_url,
            tournament,
            json,
            command,
        })
    }
}

/// Take every remaining free argument
fn free_words(pargs: &mut Arguments) -> Result<Vec<String>, Error> {
    let mut words = Vec::new();
    while let Some(word) = pargs.opt_free_from_str::<String>()? {
        words.push(word);
    }
    Ok(words)
}

/// Join words into one space-separated value
fn join_words(words: Vec<String>, what: &str) -> Result<String, Error> {
    if words.is_empty() {
        bail!("Missing {}", what);
    }
    Ok(words.join(" "))
}
