//! # Spotify Integration Module
//!
//! This module is the integration layer between the exporter and the Spotify
//! Web API. It handles authentication, HTTP communication, pagination and the
//! mapping of Spotify's JSON records onto the exporter's own types.
//!
//! ## Architecture
//!
//! ```text
//! Exporter (export orchestration)
//!          ↓
//! Endpoint wrappers (playlists, library, tracks)
//!          ↓
//! Paginator (collect_all) ── Normalizer (normalize_track, playlist_summary)
//!          ↓
//! SpotifyClient (reqwest, JSON, error classification)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`client`] - Issues one request per call against the configured base URL,
//!   attaches the bearer token and classifies the response into a tagged
//!   [`client::FetchOutcome`]. A rejected token is the only hard error.
//! - [`pagination`] - Walks offset-paginated collections to the declared total,
//!   keeping page order and reporting partial results instead of hiding them.
//! - [`normalize`] - Turns raw track and playlist objects into
//!   [`crate::types::Track`] and [`crate::types::PlaylistSummary`], tolerating
//!   missing fields.
//! - [`playlists`], [`library`], [`tracks`] - One function per consumed endpoint.
//! - [`auth`] - OAuth 2.0 PKCE flow, code exchange and token refresh.
//!
//! ## API Coverage
//!
//! - `GET /v1/me/playlists?limit&offset` - Playlists of the current user
//! - `GET /v1/playlists/{id}/tracks?limit&offset` - Items of one playlist
//! - `GET /v1/me/tracks?limit&offset` - Tracks saved in the user's library
//! - `GET /v1/tracks/{id}` - A single track
//! - `POST /api/token` - Token exchange and refresh
//!
//! ## Error Handling
//!
//! Nothing in this module retries. A non-success status, a transport error or
//! a malformed body stops the current collection and is reported with the
//! resource, the status code and Spotify's `error.message`. `401 Unauthorized`
//! surfaces as [`crate::error::ExportError::Unauthorized`] so the caller can
//! refresh the token and resume.
//!
//! ## Concurrency
//!
//! Requests are issued strictly one after another; pages of a collection are
//! never fetched concurrently so their order is preserved.

pub mod auth;
pub mod client;
pub mod library;
pub mod normalize;
pub mod pagination;
pub mod playlists;
pub mod tracks;
