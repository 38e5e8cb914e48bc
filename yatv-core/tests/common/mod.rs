//! Shared fixtures for store integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use chrono::NaiveDate;
use yatv_core::{
    SqliteStore,
    config::HashingConfig,
    execute::ExecutionContext,
};

const SCHEMA: &str = include_str!("../fixtures/schema.sql");
const SEED: &str = include_str!("../fixtures/seed.sql");

/// In-memory store with the schema and the seed catalog loaded
pub async fn seeded_store() -> SqliteStore {
    let store = empty_schema_store().await;
    sqlx::raw_sql(SEED)
        .execute(&store.pool)
        .await
        .expect("seed data should load");
    store
}

/// In-memory store with the schema but no rows
pub async fn empty_schema_store() -> SqliteStore {
    let store = SqliteStore::in_memory()
        .await
        .expect("in-memory SQLite should open");
    sqlx::raw_sql(SCHEMA)
        .execute(&store.pool)
        .await
        .expect("schema should load");
    store
}

/// Fixed "today" used by subscription tests
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

/// Execution context with cheap hashing parameters
pub fn context() -> ExecutionContext {
    ExecutionContext {
        today: today(),
        hashing: HashingConfig {
            work_factor: 1,
            memory_kib: 1024,
        },
    }
}

/// Row count of a table
pub async fn count_rows(store: &SqliteStore, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&store.pool)
        .await
        .unwrap()
}
