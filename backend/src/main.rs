//! Backend entry-point: loads settings, prepares the database and serves the
//! REST API with its OpenAPI docs.

mod server;

use std::fs;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use idea_platform::inbound::http::health::HealthState;
use idea_platform::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use idea_platform::settings::AppSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load settings")?;
    let key = load_session_key(&settings)?;
    let bind_addr: SocketAddr = settings
        .bind_addr()
        .parse()
        .wrap_err_with(|| format!("invalid bind address {}", settings.bind_addr()))?;

    let database_url = settings.database_url()?.to_owned();
    let migration_url = database_url.clone();
    let applied = tokio::task::spawn_blocking(move || run_migrations(&migration_url))
        .await
        .wrap_err("migration task panicked")??;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .wrap_err("failed to build database pool")?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(
        key,
        settings.cookie_secure,
        SameSite::Lax,
        bind_addr,
        pool,
    );
    info!(%bind_addr, "starting http server");
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}

fn load_session_key(settings: &AppSettings) -> Result<Key> {
    let key_path = settings.session_key_file();
    match fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) if settings.allows_ephemeral_session_key() => {
            warn!(path = %key_path.display(), error = %e, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(e) => Err(e).wrap_err_with(|| {
            format!("failed to read session key at {}", key_path.display())
        }),
    }
}
