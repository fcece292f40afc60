use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Body of the token endpoint response. Spotify may omit the refresh token
/// when refreshing, in which case the previous one stays valid.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Error envelope returned by the Web API on non-success responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub status: Option<u16>,
    pub message: String,
}

/// A single exported track. Only the primary artist is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

impl Track {
    pub fn new(title: Option<&str>, artist: Option<&str>, album: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_string),
            artist: artist.map(str::to_string),
            album: album.map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.album.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub track_count: u64,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub title: String,
    pub artist: String,
    pub album: String,
}

impl From<&Track> for TrackTableRow {
    fn from(track: &Track) -> Self {
        Self {
            title: track.title.clone().unwrap_or_default(),
            artist: track.artist.clone().unwrap_or_default(),
            album: track.album.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
pub struct ExportTableRow {
    pub name: String,
    pub tracks: usize,
    pub file: String,
}
