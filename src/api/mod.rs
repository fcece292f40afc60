//! # API Module
//!
//! HTTP endpoints of the short-lived local server that runs during
//! `spotify-xspf auth`.
//!
//! - [`callback`] - Receives the authorization code from Spotify's redirect and
//!   exchanges it, together with the PKCE verifier, for an access token.
//! - [`health`] - Reports the service name and version; handy to check that the
//!   redirect URI points at the right address.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
