use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config, error,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// Initiates the complete OAuth 2.0 PKCE authentication flow with Spotify.
///
/// This function orchestrates the entire authentication process including:
/// 1. Generating PKCE code verifier and challenge
/// 2. Starting a local callback server
/// 3. Opening the authorization URL in the user's browser
/// 4. Waiting for the OAuth callback
/// 5. Persisting the obtained token for the export command
///
/// # Arguments
///
/// * `shared_state` - Thread-safe shared state for storing PKCE information
///   and the resulting token between the auth flow and callback handler
///
/// # Error Handling
///
/// - A missing client id terminates the program with a hint where to get one
/// - Browser launch failures result in a warning with manual URL instructions
/// - Token persistence failures terminate the program with an error
/// - Authentication timeouts or failures terminate with an error message
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tokio::sync::Mutex;
///
/// let shared_state = Arc::new(Mutex::new(None));
/// auth(shared_state).await;
/// ```
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    let client_id = match config::spotify_client_id() {
        Ok(id) => id,
        Err(e) => error!(
            "{}\nYou can create your app and get your client ID at: https://developer.spotify.com/dashboard",
            e
        ),
    };

    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    // start API server
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    let auth_url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        spotify_auth_url = &config::spotify_apiauth_url(),
        client_id = client_id,
        redirect_uri = &config::spotify_redirect_uri(),
        code_challenge = code_challenge,
        scope = &config::spotify_scope()
    );

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier: code_verifier.clone(),
            token: None,
        });
    }

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    match wait_for_token(shared_state).await {
        Some(t) => {
            let token_manager = TokenManager::new(t);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Polls the shared state for the token set by the callback handler.
/// Gives up after 60 seconds.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Refreshes an access token using a refresh token.
///
/// Spotify may rotate the refresh token; if the response carries none the
/// one passed in stays in use.
///
/// # Errors
///
/// Returns a message if the client id is not configured, the request fails,
/// Spotify rejects the refresh token, or the response is malformed. The
/// caller should direct the user to run `spotify-xspf auth` again.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, String> {
    let client_id = config::spotify_client_id().map_err(|e| e.to_string())?;

    let response = Client::new()
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(|e| e.to_string())?;

    let json: TokenResponse = response.json().await.map_err(|e| e.to_string())?;
    Ok(into_token(json, refresh_token))
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// The code verifier proves that the same client that initiated the auth flow
/// is completing it. The authorization code is single-use and expires quickly,
/// so the exchange happens right when the callback arrives.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, String> {
    let client_id = config::spotify_client_id().map_err(|e| e.to_string())?;
    let redirect_uri = config::spotify_redirect_uri();

    let response = Client::new()
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(|e| e.to_string())?;

    let json: TokenResponse = response.json().await.map_err(|e| e.to_string())?;
    Ok(into_token(json, ""))
}

fn into_token(response: TokenResponse, previous_refresh_token: &str) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .unwrap_or_else(|| previous_refresh_token.to_string()),
        scope: response.scope,
        expires_in: response.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
