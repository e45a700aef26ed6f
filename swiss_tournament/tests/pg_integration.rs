//! Integration tests for the PostgreSQL tournament store.
//!
//! Requires a reachable database in `DATABASE_URL`; run with
//! `cargo test -- --ignored`. Tests are serialized because they share the
//! tournament tables.

use serial_test::serial;
use sqlx::PgPool;
use std::sync::Arc;
use swiss_tournament::db::{Database, DatabaseConfig};
use swiss_tournament::{
    PgTournamentStore, TournamentContext, TournamentError, TournamentId, TournamentManager,
};

/// Helper to connect and migrate a test database
async fn setup_test_db() -> Database {
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://postgres@localhost/tournament_test".to_string());

    let config = DatabaseConfig {
        database_url,
        max_connections: 5,
        min_connections: 1,
        connection_timeout_secs: 5,
        idle_timeout_secs: 300,
        max_lifetime_secs: 1800,
    };

    let db = Database::new(&config)
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");
    db
}

async fn setup_manager(title: &str) -> (TournamentManager, TournamentId, PgPool) {
    let db = setup_test_db().await;
    let manager = TournamentManager::new(Arc::new(PgTournamentStore::new(db.pool().clone())));
    let tournament_id = manager.create_tournament(title).await.unwrap();
    (manager, tournament_id, db.pool().clone())
}

/// Helper to cleanup a test tournament
async fn cleanup_tournament(pool: &PgPool, tournament_id: TournamentId) {
    let _ = sqlx::query("DELETE FROM tournaments WHERE id = $1")
        .bind(tournament_id)
        .execute(pool)
        .await;
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn test_pg_four_player_round() {
    let (manager, t, pool) = setup_manager("pg_four_player_round").await;

    let a = manager.register_player(t, "A").await.unwrap();
    let b = manager.register_player(t, "B").await.unwrap();
    let c = manager.register_player(t, "C").await.unwrap();
    let d = manager.register_player(t, "D").await.unwrap();

    manager.record_match(t, a, b).await.unwrap();
    manager.record_match(t, c, d).await.unwrap();

    let standings = manager.compute_standings(t).await.unwrap();
    let summary: Vec<(i64, u32, u32)> = standings
        .iter()
        .map(|r| (r.player_id, r.wins, r.matches))
        .collect();
    assert_eq!(summary, vec![(a, 1, 1), (c, 1, 1), (b, 0, 1), (d, 0, 1)]);

    let round = manager.generate_pairings(t).await.unwrap();
    let pairs: Vec<(i64, i64)> = round.pairs.iter().map(|p| p.ids()).collect();
    assert_eq!(pairs, vec![(a, c), (b, d)]);

    cleanup_tournament(&pool, t).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn test_pg_failed_match_leaves_no_rows() {
    let (manager, t, pool) = setup_manager("pg_failed_match").await;
    let a = manager.register_player(t, "A").await.unwrap();

    // Loser does not exist: the match row must roll back with it
    let err = manager.record_match(t, a, i64::MAX).await.unwrap_err();
    assert!(err.is_data_access());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM matches WHERE tournament_id = $1")
        .bind(t)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    let self_match = manager.record_match(t, a, a).await.unwrap_err();
    assert!(matches!(self_match, TournamentError::InvalidArgument(_)));

    cleanup_tournament(&pool, t).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn test_pg_cross_tournament_match_rejected() {
    let (manager, spring, pool) = setup_manager("pg_spring").await;
    let autumn = manager.create_tournament("pg_autumn").await.unwrap();

    let a = manager.register_player(spring, "A").await.unwrap();
    let b = manager.register_player(autumn, "B").await.unwrap();

    let err = manager.record_match(spring, a, b).await.unwrap_err();
    assert!(matches!(err, TournamentError::ConstraintViolation(_)));
    assert_eq!(manager.compute_standings(spring).await.unwrap()[0].matches, 0);

    cleanup_tournament(&pool, spring).await;
    cleanup_tournament(&pool, autumn).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn test_pg_resets_and_counts() {
    let (manager, t, pool) = setup_manager("pg_resets").await;
    let a = manager.register_player(t, "A").await.unwrap();
    let b = manager.register_player(t, "B").await.unwrap();
    manager.record_match(t, a, b).await.unwrap();

    assert_eq!(manager.count_players(t).await.unwrap(), 2);
    assert_eq!(manager.delete_matches(t).await.unwrap(), 1);
    assert!(
        manager
            .compute_standings(t)
            .await
            .unwrap()
            .iter()
            .all(|r| r.matches == 0)
    );

    manager.record_match(t, b, a).await.unwrap();
    assert_eq!(manager.delete_players(t).await.unwrap(), 2);
    assert_eq!(manager.count_players(t).await.unwrap(), 0);

    cleanup_tournament(&pool, t).await;
}

#[tokio::test]
#[serial]
#[ignore = "requires PostgreSQL (set DATABASE_URL)"]
async fn test_pg_context_uses_latest_tournament() {
    let (manager, t, pool) = setup_manager("pg_latest").await;

    let mut context = TournamentContext::new();
    assert_eq!(manager.resolve(&mut context, None).await.unwrap(), t);

    let listed = manager.list_tournaments().await.unwrap();
    assert_eq!(listed.first().map(|t| t.title.as_str()), Some("pg_latest"));

    cleanup_tournament(&pool, t).await;
}
