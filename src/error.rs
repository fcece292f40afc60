use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort an export step.
///
/// Remote data failures (non-success status, malformed page bodies) are not
/// represented here: the client reports them as
/// [`FetchOutcome::Failed`](crate::spotify::client::FetchOutcome) so pagination
/// can stop and keep what it has. Only a rejected token is fatal for the
/// whole run, and it is kept apart from everything else so the caller can
/// decide to re-authenticate.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Spotify rejected the access token: {0}")]
    Unauthorized(String),

    #[error("Cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExportError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ExportError::Unauthorized(_))
    }
}
