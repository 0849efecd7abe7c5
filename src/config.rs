//! Runtime configuration.
//!
//! Grounded on the teacher's `DatabaseConfig` (`src/common/mod.rs`): a
//! plain struct with a `Default` impl, overridden from the process
//! environment at startup rather than from a config file — the teacher's
//! `main.rs` does the same thing (start from `DatabaseConfig::default()`,
//! then override a couple of fields) instead of wiring a file-based
//! loader into the binary.

use std::env;

/// Gates development-only surface area, namely the clear-the-board route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn allows_clear(self) -> bool {
        matches!(self, Environment::Development)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub port: u16,
    pub environment: Environment,
    pub request_timeout_secs: u64,
    pub max_body_size: usize,
    pub enable_cors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            request_timeout_secs: 30,
            max_body_size: 1024 * 1024,
            enable_cors: true,
        }
    }
}

impl Config {
    /// Start from defaults, then apply `LEADERBOARD_*` environment
    /// overrides where present. Malformed overrides are logged and
    /// ignored rather than failing startup.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = env::var("LEADERBOARD_LISTEN_ADDR") {
            config.listen_addr = addr;
        }
        if let Ok(port) = env::var("LEADERBOARD_PORT") {
            match port.parse() {
                Ok(p) => config.port = p,
                Err(_) => tracing::warn!(value = %port, "ignoring invalid LEADERBOARD_PORT"),
            }
        }
        if let Ok(env_name) = env::var("LEADERBOARD_ENV") {
            config.environment = match env_name.to_lowercase().as_str() {
                "production" | "prod" => Environment::Production,
                "development" | "dev" => Environment::Development,
                other => {
                    tracing::warn!(value = %other, "ignoring unknown LEADERBOARD_ENV");
                    config.environment
                }
            };
        }
        if let Ok(secs) = env::var("LEADERBOARD_REQUEST_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(s) => config.request_timeout_secs = s,
                Err(_) => tracing::warn!(value = %secs, "ignoring invalid LEADERBOARD_REQUEST_TIMEOUT_SECS"),
            }
        }

        config
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.listen_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_development() {
        let config = Config::default();
        assert!(config.environment.allows_clear());
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn production_disallows_clear() {
        assert!(!Environment::Production.allows_clear());
    }
}
