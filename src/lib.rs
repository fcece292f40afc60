//! Spotify XSPF Exporter Library
//!
//! This library exports a Spotify user's playlists and saved tracks into XSPF
//! playlist files, one file per playlist plus an optional file for the saved
//! tracks. It includes modules for API communication, pagination, XSPF
//! rendering, configuration management and the CLI commands.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error type of the export pipeline
//! - `exporter` - Export orchestration and reporting
//! - `management` - Token cache and output file management
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//! - `xspf` - XSPF document rendering
//!
//! # Example
//!
//! ```
//! use spotify_xspf::{exporter::{ExportOptions, Exporter}, spotify::client::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> spotify_xspf::Res<()> {
//!     let client = SpotifyClient::new("https://api.spotify.com", "BQC...");
//!     let mut exporter = Exporter::new(client, ExportOptions::new("/tmp/playlists"));
//!     exporter.run().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod exporter;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod xspf;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern for the top-level glue of the
/// application using a boxed dynamic error trait object. This allows for
/// flexible error handling while maintaining Send + Sync bounds for async
/// contexts.
///
/// # Example
///
/// ```
/// use spotify_xspf::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Starting authentication process...");
/// info!("Collected {} playlists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// success!("Wrote {} playlists", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// such as missing credentials or a rejected token.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. Failures that only affect a single playlist use
/// [`failed!`] instead.
///
/// # Example
///
/// ```
/// error!("Failed to load token. Please run spotify-xspf auth");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a failure message with a red cross and carries on.
///
/// Used when a single collection could not be exported while the rest of
/// the run continues. The failure still counts towards the exit status.
///
/// # Example
///
/// ```
/// failed!("Unable to export playlist {}: {}", name, reason);
/// ```
#[macro_export]
macro_rules! failed {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "x".red().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues that don't stop an export, such as a playlist over the
/// soft track limit or a collection that could only be fetched partially.
///
/// # Example
///
/// ```
/// warning!("Backed up playlist over the limit of {} tracks: {}", limit, name);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
