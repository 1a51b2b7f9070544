use anyhow::anyhow;
use chrono::Utc;
use serde::Deserialize;

use crate::{
    Error,
    token::{Renewal, Token, TokenState, TokenStore},
};

pub const TOKEN_URL: &str =
    "https://auth.mangadex.org/realms/mangadex/protocol/openid-connect/token";

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct MangaTitle {
    pub en: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct MangaAttributes {
    pub title: MangaTitle,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Manga {
    pub id: String,
    pub attributes: MangaAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MangaListResponse {
    pub data: Vec<Manga>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadMarker {
    pub chapter: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadMarkersResponse {
    pub data: Vec<ReadMarker>,
}

pub struct MangaDex<S> {
    base_url: String,
    credentials: Credentials,
    state: TokenState,
    store: S,
    api_client: reqwest::Client,
}

impl<S: TokenStore> MangaDex<S> {
    pub fn new(base_url: &str, credentials: Credentials, state: TokenState, store: S) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            state,
            store,
            api_client: reqwest::Client::new(),
        }
    }

    /// Returns a bearer token that will not expire mid-flight, acquired
    /// through the cheapest path available: reuse, refresh grant, then
    /// password grant. A rejected refresh falls back to a single password
    /// grant within the same call; a rejected password grant propagates.
    pub async fn ensure_valid(&mut self) -> Result<String, Error> {
        match self.state.renewal(Utc::now().timestamp()) {
            Renewal::None => {
                debug!("using existing valid token");
            }
            Renewal::Refresh => {
                if let Err(e) = self.refresh().await {
                    warn!("token refresh failed: {e}, falling back to full authorization");
                    self.authorize().await?;
                }
            }
            Renewal::Authorize => {
                info!("no refresh token available, performing full authorization");
                self.authorize().await?;
            }
        }

        self.state
            .access_token
            .clone()
            .ok_or_else(|| Error::Other(anyhow!("no access token after renewal")))
    }

    async fn authorize(&mut self) -> Result<(), Error> {
        info!("authorizing with username and password");
        let params = [
            ("grant_type", "password"),
            ("username", self.credentials.username.as_str()),
            ("password", self.credentials.password.as_str()),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ];

        let token = self
            .token_request(&params)
            .await
            .map_err(|e| Error::AuthFailed(format!("{e}")))?;
        info!("authorization successful");
        self.save_tokens(token);

        Ok(())
    }

    async fn refresh(&mut self) -> Result<(), Error> {
        info!("refreshing access token");
        let refresh_token = self
            .state
            .refresh_token
            .clone()
            .ok_or_else(|| Error::RefreshFailed("no refresh token".to_string()))?;
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ];

        let token = self
            .token_request(&params)
            .await
            .map_err(|e| Error::RefreshFailed(format!("{e}")))?;
        info!("token refresh successful");
        self.save_tokens(token);

        Ok(())
    }

    async fn token_request(&self, params: &[(&str, &str)]) -> Result<Token, anyhow::Error> {
        let res = self.api_client.post(TOKEN_URL).form(params).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(anyhow!("token endpoint returned {status}"));
        }

        Ok(res.json().await?)
    }

    /// Replaces the in-memory state in one assignment, then persists.
    /// Persistence is best-effort and never fails the token operation.
    fn save_tokens(&mut self, token: Token) {
        info!("received new token valid for {} seconds", token.expires_in);
        self.state = TokenState {
            access_token: Some(token.access_token),
            refresh_token: Some(token.refresh_token),
            expires_at: Some(Utc::now().timestamp() + token.expires_in),
        };

        if let Err(e) = self.store.save(&self.state) {
            warn!("failed to persist tokens: {e}");
        }
    }

    pub async fn followed_manga(&mut self) -> Result<Vec<Manga>, Error> {
        info!("fetching followed manga");
        let token = self.ensure_valid().await?;

        let res: MangaListResponse = self
            .api_client
            .get(format!("{}/user/follows/manga", self.base_url))
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!("fetched {} followed manga", res.data.len());

        Ok(res.data)
    }

    pub async fn read_chapters(&mut self, manga_id: &str) -> Result<Vec<String>, Error> {
        info!("fetching read chapters for manga {manga_id}");
        let token = self.ensure_valid().await?;

        let res: ReadMarkersResponse = self
            .api_client
            .get(format!("{}/manga/{manga_id}/read", self.base_url))
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!("read chapters: {:?}", res.data);

        Ok(res.data.into_iter().map(|marker| marker.chapter).collect())
    }
}
