//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `IDEAS_*` environment variables and config
//! files, in increasing order of precedence as defined by `ortho_config`.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised when settings are present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("database_url is required (set IDEAS_DATABASE_URL)")]
    MissingDatabaseUrl,
}

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "IDEAS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// File holding the session signing and encryption key material.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to a random session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
}

impl AppSettings {
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Debug builds always accept an ephemeral key.
    pub fn allows_ephemeral_session_key(&self) -> bool {
        cfg!(debug_assertions) || self.session_allow_ephemeral
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const ALL_KEYS: [&str; 6] = [
        "IDEAS_BIND_ADDR",
        "IDEAS_DATABASE_URL",
        "IDEAS_DB_MAX_CONNECTIONS",
        "IDEAS_SESSION_KEY_FILE",
        "IDEAS_SESSION_ALLOW_EPHEMERAL",
        "IDEAS_COOKIE_SECURE",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("idea-platform")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(ALL_KEYS.map(|key| (key, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(settings.db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from(DEFAULT_SESSION_KEY_FILE)
        );
        assert!(settings.cookie_secure);
        assert!(!settings.session_allow_ephemeral);
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("IDEAS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "IDEAS_DATABASE_URL",
                Some("postgres://localhost/ideas".to_owned()),
            ),
            ("IDEAS_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("IDEAS_SESSION_KEY_FILE", Some("/tmp/key".to_owned())),
            ("IDEAS_SESSION_ALLOW_EPHEMERAL", Some("true".to_owned())),
            ("IDEAS_COOKIE_SECURE", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "127.0.0.1:9000");
        assert_eq!(settings.database_url(), Ok("postgres://localhost/ideas"));
        assert_eq!(settings.db_max_connections(), 4);
        assert_eq!(settings.session_key_file(), PathBuf::from("/tmp/key"));
        assert!(settings.allows_ephemeral_session_key());
        assert!(!settings.cookie_secure);
    }

    #[rstest]
    fn blank_database_url_counts_as_missing() {
        let _guard = lock_env(ALL_KEYS.map(|key| {
            let value = (key == "IDEAS_DATABASE_URL").then(|| "   ".to_owned());
            (key, value)
        }));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        );
    }
}
