//! Process settings read from the environment.

use crate::models::LeagueError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE_PATH: &str = "pong_league.db";
/// Local development fallback; deployments set ADMIN_PASSWORD.
const DEFAULT_ADMIN_PASSWORD: &str = "secret";

#[derive(Clone, Debug)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    admin_password: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl Settings {
    /// HOST, PORT, DATABASE_PATH and ADMIN_PASSWORD, each falling back to its default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database_path: lookup("DATABASE_PATH").unwrap_or(defaults.database_path),
            admin_password: lookup("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
        }
    }

    pub fn with_admin_password(mut self, password: impl Into<String>) -> Self {
        self.admin_password = password.into();
        self
    }

    /// Byte-for-byte comparison of the submitted secret.
    pub fn authorize(&self, submitted: Option<&str>) -> Result<(), LeagueError> {
        match submitted {
            Some(value) if value.as_bytes() == self.admin_password.as_bytes() => Ok(()),
            _ => {
                log::warn!("Rejected admin request: incorrect password");
                Err(LeagueError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_apply_when_unset() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.database_path, "pong_league.db");
        assert!(settings.authorize(Some("secret")).is_ok());
    }

    #[test]
    fn environment_overrides_defaults() {
        let env: HashMap<&str, &str> = [
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("DATABASE_PATH", "/tmp/league.db"),
            ("ADMIN_PASSWORD", "paddle"),
        ]
        .into_iter()
        .collect();
        let settings = Settings::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.database_path, "/tmp/league.db");
        assert!(settings.authorize(Some("paddle")).is_ok());
    }

    #[test]
    fn unparsable_port_falls_back() {
        let settings = Settings::from_lookup(|key| (key == "PORT").then(|| "eighty".to_string()));
        assert_eq!(settings.port, 8080);
    }

    #[test]
    fn authorize_rejects_mismatch_and_missing() {
        let settings = Settings::default().with_admin_password("Paddle");
        assert_eq!(settings.authorize(Some("paddle")), Err(LeagueError::Unauthorized));
        assert_eq!(settings.authorize(Some("Paddle ")), Err(LeagueError::Unauthorized));
        assert_eq!(settings.authorize(None), Err(LeagueError::Unauthorized));
        assert_eq!(settings.authorize(Some("Paddle")), Ok(()));
    }
}
