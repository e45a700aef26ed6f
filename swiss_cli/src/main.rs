//! Command-line harness for Swiss-system tournaments.
//!
//! Every command runs once against PostgreSQL and exits; `demo` runs a
//! scripted event against the in-memory store instead.

mod cli;
mod render;

use std::sync::Arc;

use anyhow::{Context, Error, anyhow};
use log::info;
use pico_args::Arguments;
use swiss_tournament::{
    Database, DatabaseConfig, MemoryTournamentStore, TournamentContext, TournamentId,
    TournamentManager,
};

use cli::{Args, Command, HELP};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let args = Args::parse(Arguments::from_env())?;
    if args.command == Command::Help {
        print!("{HELP}");
        return Ok(());
    }

    env_logger::builder().format_target(false).init();

    if let Command::Demo { players, rounds } = args.command {
        return run_demo(players, rounds, args.json).await;
    }

    let config = DatabaseConfig::from_env_with_override(args.database_url.clone())?;
    info!("Connecting to database");
    let db = Database::new(&config)
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    let result = run(&db, &args).await;
    db.close().await;
    result
}

/// Tournament id from `SWISS_TOURNAMENT`, if set
fn env_tournament() -> Result<Option<TournamentId>, Error> {
    match std::env::var("SWISS_TOURNAMENT") {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("SWISS_TOURNAMENT is not a valid id: '{}'", value)),
        Err(_) => Ok(None),
    }
}

async fn run(db: &Database, args: &Args) -> Result<(), Error> {
    if args.command == Command::Migrate {
        db.migrate().await.context("Failed to apply migrations")?;
        println!("Schema is up to date.");
        return Ok(());
    }

    let manager = TournamentManager::new(Arc::new(db.tournament_store()));

    if !args.command.needs_tournament() {
        match &args.command {
            Command::New { title } => {
                let id = manager.create_tournament(title).await?;
                println!("{id}");
            }
            Command::List => {
                let tournaments = manager.list_tournaments().await?;
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&tournaments)?);
                } else {
                    print!("{}", render::tournaments_table(&tournaments));
                }
            }
            _ => {}
        }
        return Ok(());
    }

    let explicit = args.tournament.or(env_tournament()?);
    let mut context = TournamentContext::new();
    let tournament_id = manager.resolve(&mut context, explicit).await?;

    match &args.command {
        Command::Register { name } => {
            let id = manager.register_player(tournament_id, name).await?;
            println!("{id}");
        }
        Command::Count => {
            println!("{}", manager.count_players(tournament_id).await?);
        }
        Command::Report { winner, loser } => {
            let id = manager.record_match(tournament_id, *winner, *loser).await?;
            println!("{id}");
        }
        Command::Standings => {
            let standings = manager.compute_standings(tournament_id).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&standings)?);
            } else {
                print!("{}", render::standings_table(&standings));
            }
        }
        Command::Pairings => {
            let round = manager.generate_pairings(tournament_id).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&round)?);
            } else {
                print!("{}", render::pairings_table(&round));
            }
        }
        Command::ResetMatches => {
            let removed = manager.delete_matches(tournament_id).await?;
            println!("Deleted {removed} matches from tournament {tournament_id}.");
        }
        Command::ResetPlayers => {
            let removed = manager.delete_players(tournament_id).await?;
            println!("Deleted {removed} players from tournament {tournament_id}.");
        }
        Command::Help
        | Command::Migrate
        | Command::New { .. }
        | Command::List
        | Command::Demo { .. } => {}
    }

    Ok(())
}

/// Play `rounds` Swiss rounds in memory; the higher-ranked player of each
/// pairing wins
async fn run_demo(players: usize, rounds: usize, json: bool) -> Result<(), Error> {
    let manager = TournamentManager::new(Arc::new(MemoryTournamentStore::new()));
    let mut context = TournamentContext::new();
    let tournament_id = manager.resolve(&mut context, None).await?;

    for i in 1..=players {
        manager
            .register_player(tournament_id, &format!("Player {i}"))
            .await?;
    }

    for round in 1..=rounds {
        let pairings = manager.generate_pairings(tournament_id).await?;
        if !json {
            println!("Round {round}");
            print!("{}", render::pairings_table(&pairings));
            println!();
        }
        for pairing in &pairings.pairs {
            manager
                .record_match(tournament_id, pairing.first.id, pairing.second.id)
                .await?;
        }
    }

    let standings = manager.compute_standings(tournament_id).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&standings)?);
    } else {
        println!("Final standings");
        print!("{}", render::standings_table(&standings));
    }

    Ok(())
}
