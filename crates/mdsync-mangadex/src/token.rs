use serde::Deserialize;

/// Tokens within this window of their nominal expiry are renewed before use
/// so they cannot expire mid-flight.
pub const EXPIRY_LEEWAY_SECS: i64 = 60;

/// Token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Persisted token credentials. `expires_at` is an absolute unix timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenState {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_at: Option<i64>,
}

/// How a usable access token gets acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renewal {
    /// Current token is usable as is.
    None,
    /// Exchange the refresh token for a new access token.
    Refresh,
    /// Full password-grant authorization.
    Authorize,
}

impl TokenState {
    /// An access token with no known expiry is never fresh.
    pub fn is_fresh(&self, now: i64) -> bool {
        match (self.access_token.as_ref(), self.expires_at) {
            (Some(_), Some(expires_at)) => now < expires_at - EXPIRY_LEEWAY_SECS,
            _ => false,
        }
    }

    pub fn renewal(&self, now: i64) -> Renewal {
        if self.is_fresh(now) {
            Renewal::None
        } else if self.refresh_token.is_some() {
            Renewal::Refresh
        } else {
            Renewal::Authorize
        }
    }
}

/// Durable storage for token credentials, written after every successful
/// grant.
pub trait TokenStore: Send {
    fn save(&mut self, state: &TokenState) -> Result<(), anyhow::Error>;
}

#[cfg(test)]
mod test {
    use super::*;

    fn state(access: Option<&str>, refresh: Option<&str>, expires_at: Option<i64>) -> TokenState {
        TokenState {
            access_token: access.map(str::to_string),
            refresh_token: refresh.map(str::to_string),
            expires_at,
        }
    }

    #[test]
    fn test_fresh_token_is_reused() {
        let state = state(Some("abc"), Some("def"), Some(1000));

        assert!(state.is_fresh(1000 - EXPIRY_LEEWAY_SECS - 1));
        assert_eq!(state.renewal(1000 - EXPIRY_LEEWAY_SECS - 1), Renewal::None);
    }

    #[test]
    fn test_token_inside_leeway_window_is_renewed() {
        let state = state(Some("abc"), Some("def"), Some(1000));

        assert!(!state.is_fresh(1000 - EXPIRY_LEEWAY_SECS));
        assert_eq!(state.renewal(1000 - EXPIRY_LEEWAY_SECS), Renewal::Refresh);
        assert_eq!(state.renewal(2000), Renewal::Refresh);
    }

    #[test]
    fn test_missing_access_token_refreshes() {
        let state = state(None, Some("def"), None);

        assert_eq!(state.renewal(0), Renewal::Refresh);
    }

    #[test]
    fn test_access_token_without_expiry_is_not_fresh() {
        let state = state(Some("abc"), None, None);

        assert!(!state.is_fresh(0));
        assert_eq!(state.renewal(0), Renewal::Authorize);
    }

    #[test]
    fn test_no_tokens_authorizes() {
        let state = TokenState::default();

        assert_eq!(state.renewal(0), Renewal::Authorize);
    }
}
