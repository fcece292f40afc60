use std::path::PathBuf;

use chrono::Utc;

use crate::{config, spotify, types::Token, warning};

/// Seconds before expiry at which a token is refreshed proactively.
const EXPIRY_MARGIN: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(&path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns the access token, refreshing it first if it is about to expire.
    /// If the refresh fails the current token is returned; the API will then
    /// reject it and the caller's re-authentication path takes over.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired() {
            if let Err(e) = self.force_refresh().await {
                warning!("Failed to refresh the access token: {}", e);
            }
        }

        self.token.access_token.clone()
    }

    /// Refreshes the token regardless of its expiry and persists the result.
    pub async fn force_refresh(&mut self) -> Result<String, String> {
        self.token = spotify::auth::refresh_token(&self.token.refresh_token).await?;
        // a token that cannot be cached is still good for this run
        if let Err(e) = self.persist().await {
            warning!(
                "Failed to save the refreshed token, the next run may need spotify-xspf auth: {}",
                e
            );
        }
        Ok(self.token.access_token.clone())
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }
}
