//! Configuration management for the Spotify XSPF exporter.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, the local callback server and
//! the defaults of the export command.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command-line flags (export options only)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{
    Res,
    error::ExportError,
    exporter::{DEFAULT_SONG_LIMIT, ExportOptions},
    spotify::client::{DEFAULT_API_URL, MAX_PAGE_SIZE},
};

pub const APP_NAME: &str = "spotify-xspf";

/// Returns the application directory inside the platform's local data directory.
///
/// - Linux: `~/.local/share/spotify-xspf`
/// - macOS: `~/Library/Application Support/spotify-xspf`
/// - Windows: `%LOCALAPPDATA%/spotify-xspf`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_NAME);
    path
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the application data directory if it doesn't exist. A missing `.env`
/// file is not an error since every value can also come from the environment.
///
/// # Errors
///
/// This function will return an error if:
/// - The data directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
///
/// # Example
///
/// ```
/// use spotify_xspf::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Res<()> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir).await?;

    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("Failed to load {}: {}", path.display(), e))?;
    Ok(())
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parsed_var_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Returns the address the local OAuth callback server binds to
/// (`SERVER_ADDRESS`, default `127.0.0.1:8888`).
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", "127.0.0.1:8888")
}

/// Returns the Spotify API client ID for authentication.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable which
/// contains the client ID obtained when registering the application with
/// Spotify's developer platform.
///
/// # Errors
///
/// Returns [`ExportError::Config`] if the variable is not set. Create an app at
/// <https://developer.spotify.com/dashboard> to obtain one.
pub fn spotify_client_id() -> Result<String, ExportError> {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ExportError::Config("SPOTIFY_API_AUTH_CLIENT_ID must be set".to_string()))
}

/// Returns the Spotify OAuth redirect URI (`SPOTIFY_API_REDIRECT_URI`).
///
/// This must match the redirect URI registered in the Spotify application
/// settings and point at [`server_addr`].
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:8888/callback")
}

/// Returns the scope requested during authorization (`SPOTIFY_API_AUTH_SCOPE`).
/// Reading private playlists and the library is all the exporter needs.
pub fn spotify_scope() -> String {
    var_or(
        "SPOTIFY_API_AUTH_SCOPE",
        "playlist-read-private,user-library-read",
    )
}

/// Returns the Spotify OAuth authorization URL (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    var_or(
        "SPOTIFY_API_AUTH_URL",
        "https://accounts.spotify.com/authorize",
    )
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`), without the
/// `/v1` version prefix.
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Returns the Spotify OAuth token exchange URL (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    var_or(
        "SPOTIFY_API_TOKEN_URL",
        "https://accounts.spotify.com/api/token",
    )
}

/// Returns the directory exports are written to (`XSPF_OUTPUT_DIR`,
/// default `~/Playlists`).
pub fn output_dir() -> PathBuf {
    match env::var("XSPF_OUTPUT_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Playlists"),
    }
}

/// Returns the page size for collection requests (`XSPF_PAGE_SIZE`, at most 50).
pub fn page_size() -> u32 {
    parsed_var_or("XSPF_PAGE_SIZE", MAX_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Returns the soft per-playlist track limit (`XSPF_SONG_LIMIT`, default 100).
pub fn song_limit() -> u64 {
    parsed_var_or("XSPF_SONG_LIMIT", DEFAULT_SONG_LIMIT)
}

/// Builds export options from the environment.
pub fn export_options() -> ExportOptions {
    let mut options = ExportOptions::new(output_dir());
    options.page_size = page_size();
    options.song_limit = song_limit();
    options
}
