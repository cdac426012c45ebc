use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

/// Runtime configuration, loaded from the environment.
///
/// Polling intervals are deliberately not configurable; they are part of the
/// engine's contract and live as constants in [`crate::poller`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend, e.g. `https://foodly-backend.example.com`.
    pub base_url: String,
    /// Directory for client-side persisted state (review-prompt flags).
    pub state_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            base_url: try_load("FOODLY_API_URL", "http://localhost:8080"),
            state_dir: PathBuf::from(try_load::<String>("FOODLY_STATE_DIR", ".foodly")),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_is_unset() {
        env::remove_var("FOODLY_API_URL");
        env::remove_var("FOODLY_STATE_DIR");
        let config = Config::load();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.state_dir, PathBuf::from(".foodly"));
    }
}
