use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

/// Base name used when neither the playlist title nor its id leave any
/// allowed character behind.
pub const FALLBACK_FILE_NAME: &str = "Playlist";

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Derives a filesystem-safe base name from a playlist title.
///
/// Keeps ASCII letters, ASCII digits, spaces and parentheses and drops every
/// other character. The result may be empty, and two different titles may
/// map to the same name; [`FileNameRegistry`] deals with both.
///
/// # Example
///
/// ```
/// assert_eq!(sanitize_filename("AC/DC: Live!"), "ACDC Live");
/// ```
pub fn sanitize_filename(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '(' | ')'))
        .collect()
}

/// Output name handed out by [`FileNameRegistry::assign`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedName {
    /// Sanitized form of the title that was asked for.
    pub requested: String,
    /// Base name that was actually reserved.
    pub name: String,
}

impl AssignedName {
    pub fn is_unnamed(&self) -> bool {
        self.requested.trim().is_empty()
    }

    pub fn is_renamed(&self) -> bool {
        !self.is_unnamed() && self.requested != self.name
    }
}

/// Keeps track of the base names used during one export run so that no two
/// collections end up in the same file.
///
/// Names are compared case-insensitively since several common filesystems
/// do not distinguish `Rock.xspf` from `rock.xspf`.
#[derive(Debug, Default)]
pub struct FileNameRegistry {
    taken: HashSet<String>,
}

impl FileNameRegistry {
    /// Creates an empty registry for one export run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `name` as used. Returns `false` if it was already taken.
    pub fn reserve(&mut self, name: &str) -> bool {
        self.taken.insert(name.to_lowercase())
    }

    /// Whether `name` was already reserved or assigned, ignoring case.
    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(&name.to_lowercase())
    }

    /// Assigns a unique base name for the collection `title` with provider id `id`.
    ///
    /// The sanitized title is used when free. An empty title falls back to the
    /// sanitized id and then to [`FALLBACK_FILE_NAME`]. A taken name gets the
    /// sanitized id appended in parentheses, followed by a counter if needed.
    pub fn assign(&mut self, title: &str, id: &str) -> AssignedName {
        let requested = sanitize_filename(title);
        let tag = sanitize_filename(id).trim().to_string();

        let base = if !requested.trim().is_empty() {
            requested.clone()
        } else if !tag.is_empty() {
            tag.clone()
        } else {
            FALLBACK_FILE_NAME.to_string()
        };

        if self.reserve(&base) {
            return AssignedName {
                requested,
                name: base,
            };
        }

        let mut counter = 1u32;
        loop {
            let candidate = match (tag.is_empty() || tag.eq_ignore_ascii_case(&base), counter) {
                (false, 1) => format!("{base} ({tag})"),
                (false, n) => format!("{base} ({tag} {n})"),
                (true, n) => format!("{base} ({})", n + 1),
            };
            if self.reserve(&candidate) {
                return AssignedName {
                    requested,
                    name: candidate,
                };
            }
            counter += 1;
        }
    }
}

/// Extracts the track id from a bare id, a `spotify:track:` URI or an
/// `open.spotify.com/track/` link.
///
/// # Example
///
/// ```
/// assert_eq!(parse_track_id("spotify:track:4uLU6hMCjMI75M1A2tKUQC").as_deref(), Some("4uLU6hMCjMI75M1A2tKUQC"));
/// ```
pub fn parse_track_id(input: &str) -> Option<String> {
    let input = input.trim();
    let id = if let Some(rest) = input.strip_prefix("spotify:track:") {
        rest
    } else if let Some((_, rest)) = input.split_once("open.spotify.com/track/") {
        rest.split(['?', '/', '#']).next().unwrap_or_default()
    } else {
        input
    };

    if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(id.to_string())
    } else {
        None
    }
}
