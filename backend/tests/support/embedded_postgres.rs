//! Embedded PostgreSQL helpers for integration tests.
//!
//! - One shared cluster per test binary.
//! - A template database carries the migrated schema; every test clones it so
//!   suites never see each other's rows.
//! - Seeding goes through `postgres` directly, bypassing the adapters under
//!   test.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use idea_platform::outbound::persistence::run_migrations;
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "ideas_template";

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, String> {
    let hash = hash_directory(migrations_dir()).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Start (or reuse) the cluster shared by this test binary.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    shared_cluster_handle().map_err(|err| format!("{err:?}"))
}

/// Create or reuse a template database with every migration applied.
fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template_name);
        run_migrations(&url).map_err(|err| err.to_string())?;
    }
    Ok(template_name)
}

/// Provision a throwaway database cloned from the migrated template.
pub fn provision_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let template_name = ensure_template_database(cluster)?;
    let db_name = format!("test_{}", Uuid::new_v4());
    cluster
        .temporary_database_from_template(db_name.as_str(), template_name.as_str())
        .map_err(|err| format!("create database from template: {err:?}"))
}

fn connect(url: &str) -> Client {
    Client::connect(url, NoTls)
        .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)))
}

/// Insert a user with the given balance and return its id.
pub fn seed_user(url: &str, mail: &str, score: i64) -> i32 {
    let mut client = connect(url);
    let row = client
        .query_one(
            "INSERT INTO users (last_name, first_name, mail, password_hash, score) \
             VALUES ('Lovelace', 'Ada', $1, '$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHRzYWx0$aGFzaA', $2) RETURNING id",
            &[&mail, &score],
        )
        .unwrap_or_else(|err| panic!("seed user: {}", format_postgres_error(&err)));
    row.get(0)
}

/// Insert a product and return its id.
pub fn seed_product(url: &str, title: &str, price: i64, quantity: i32) -> i32 {
    let mut client = connect(url);
    let row = client
        .query_one(
            "INSERT INTO products (title, price, quantity) VALUES ($1, $2, $3) RETURNING id",
            &[&title, &price, &quantity],
        )
        .unwrap_or_else(|err| panic!("seed product: {}", format_postgres_error(&err)));
    row.get(0)
}

/// Number of ownership rows recorded for `user_id`.
pub fn ownership_count(url: &str, user_id: i32) -> i64 {
    let mut client = connect(url);
    let row = client
        .query_one(
            "SELECT COUNT(*) FROM user_products WHERE user_id = $1",
            &[&user_id],
        )
        .unwrap_or_else(|err| panic!("count ownerships: {}", format_postgres_error(&err)));
    row.get(0)
}

/// Remaining stock recorded for `product_id`.
pub fn quantity_of(url: &str, product_id: i32) -> i32 {
    let mut client = connect(url);
    let row = client
        .query_one(
            "SELECT quantity FROM products WHERE id = $1",
            &[&product_id],
        )
        .unwrap_or_else(|err| panic!("read quantity: {}", format_postgres_error(&err)));
    row.get(0)
}
