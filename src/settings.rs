use crate::api::{Error, API_URL, DEFAULT_USER_AGENT};
use config::Config;

pub const ENV_PREFIX: &str = "FOXESS";

/// Client inputs read from the process environment.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub token: String,
    pub user_agent: String,
}

/// Read `FOXESS_TOKEN`, `FOXESS_USER_AGENT` and `FOXESS_API_URL`.
pub fn read_settings() -> Result<Settings, Error> {
    read_settings_with_prefix(ENV_PREFIX)
}

pub fn read_settings_with_prefix(prefix: &str) -> Result<Settings, Error> {
    let mut settings = Config::default();
    settings
        .set_default("api_url", API_URL)?
        .set_default("user_agent", DEFAULT_USER_AGENT)?
        .merge(config::Environment::with_prefix(prefix))?;

    settings.try_into().map_err(Error::Config)
}
