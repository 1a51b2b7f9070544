use anyhow::{Context, Result};
use mdsync_mangadex::{Credentials, TokenState, TokenStore};

use crate::infrastructure::settings::EnvFile;

pub mod keys {
    pub const BASE_URL: &str = "MD_BASE_URL";
    pub const USER_NAME: &str = "MD_USER_NAME";
    pub const USER_PASSWORD: &str = "MD_USER_PASSWORD";
    pub const CLIENT_ID: &str = "MD_CLIENT_ID";
    pub const CLIENT_SECRET: &str = "MD_CLIENT_SECRET";
    pub const ACCESS_TOKEN: &str = "MD_ACCESS_TOKEN";
    pub const REFRESH_TOKEN: &str = "MD_REFRESH_TOKEN";
    pub const TOKEN_EXPIRY: &str = "MD_TOKEN_EXPIRY";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
}

/// Startup configuration, read once from the settings store and immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub credentials: Credentials,
    pub log_level: Option<String>,
}

impl Config {
    pub fn from_env_file(env: &EnvFile) -> Result<Self> {
        Ok(Self {
            base_url: required(env, keys::BASE_URL)?,
            credentials: Credentials {
                username: required(env, keys::USER_NAME)?,
                password: required(env, keys::USER_PASSWORD)?,
                client_id: required(env, keys::CLIENT_ID)?,
                client_secret: required(env, keys::CLIENT_SECRET)?,
            },
            log_level: env.get(keys::LOG_LEVEL).map(str::to_string),
        })
    }
}

fn required(env: &EnvFile, key: &str) -> Result<String> {
    env.get(key)
        .map(str::to_string)
        .with_context(|| format!("missing required setting {key}"))
}

/// Previously persisted tokens, if any. The expiry is stored as a numeric
/// string and may be fractional.
pub fn load_token_state(env: &EnvFile) -> TokenState {
    TokenState {
        access_token: env.get(keys::ACCESS_TOKEN).map(str::to_string),
        refresh_token: env.get(keys::REFRESH_TOKEN).map(str::to_string),
        expires_at: env
            .get(keys::TOKEN_EXPIRY)
            .and_then(|value| value.parse::<f64>().ok())
            .map(|value| value as i64),
    }
}

impl TokenStore for EnvFile {
    fn save(&mut self, state: &TokenState) -> Result<()> {
        if let Some(access_token) = state.access_token.as_deref() {
            self.set(keys::ACCESS_TOKEN, access_token)?;
        }
        if let Some(refresh_token) = state.refresh_token.as_deref() {
            self.set(keys::REFRESH_TOKEN, refresh_token)?;
        }
        if let Some(expires_at) = state.expires_at {
            self.set(keys::TOKEN_EXPIRY, &expires_at.to_string())?;
        }
        debug!("tokens saved to settings file");

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_config_requires_credentials() {
        let env = EnvFile::open(std::env::temp_dir().join("mdsync-config-empty.env")).unwrap();

        let result = Config::from_env_file(&env);

        assert!(result.is_err());
    }

    #[test]
    fn test_persisted_tokens_reload_fresh() {
        let path = std::env::temp_dir().join("mdsync-config-roundtrip.env");
        let _ = std::fs::remove_file(&path);

        let now = Utc::now().timestamp();
        let state = TokenState {
            access_token: Some("access".to_string()),
            refresh_token: Some("refresh".to_string()),
            expires_at: Some(now + 900),
        };

        let mut env = EnvFile::open(&path).unwrap();
        env.save(&state).unwrap();

        let reloaded = load_token_state(&EnvFile::open(&path).unwrap());
        assert_eq!(reloaded, state);
        assert!(reloaded.is_fresh(now));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_fractional_expiry_is_accepted() {
        let path = std::env::temp_dir().join("mdsync-config-fractional.env");
        let _ = std::fs::remove_file(&path);

        let mut env = EnvFile::open(&path).unwrap();
        env.set(keys::TOKEN_EXPIRY, "1754600000.25").unwrap();

        let state = load_token_state(&env);
        assert_eq!(state.expires_at, Some(1754600000));

        let _ = std::fs::remove_file(&path);
    }
}
