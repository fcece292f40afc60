//! # CLI Module
//!
//! This module provides the command-line interface layer of the exporter. It
//! implements the user-facing commands and coordinates between configuration,
//! token management, the Spotify client and the export pipeline.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the Spotify OAuth flow with PKCE and caches the token
//! - [`export`] - Writes every playlist (and optionally the saved tracks) as XSPF
//! - [`track`] - Shows the exported fields of a single track
//!
//! ## Error Handling
//!
//! A missing or rejected token ends the command with a hint to run
//! `spotify-xspf auth`. During `export` a rejected token is refreshed once and
//! the run resumes with the collections that are not written yet. Failures
//! of single playlists are reported at the end and make the process exit
//! with status 1, while the remaining playlists are still exported.
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotify-xspf auth                                   # Authenticate with Spotify
//! spotify-xspf export                                 # Export all playlists to ~/Playlists
//! spotify-xspf export --saved-tracks --include-album  # Also export liked songs, with albums
//! spotify-xspf export --output-dir ./backup --page-size 20
//! spotify-xspf track spotify:track:4uLU6hMCjMI75M1A2tKUQC
//! ```

mod auth;
mod export;
mod track;

pub use auth::auth;
pub use export::export;
pub use track::track;
