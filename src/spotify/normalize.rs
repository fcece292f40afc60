use serde_json::Value;

use crate::types::{PlaylistSummary, Track};

/// Maps a raw Spotify track object onto a [`Track`].
///
/// `name` becomes the title, `artists[0].name` the artist and `album.name`
/// the album. Missing or non-string fields are left empty; a `null` record
/// yields an empty track.
pub fn normalize_track(raw: &Value) -> Track {
    Track {
        title: string_at(raw, "/name"),
        artist: string_at(raw, "/artists/0/name"),
        album: string_at(raw, "/album/name"),
    }
}

/// Maps a playlist or library item (`{ "added_at": .., "track": {..} }`).
/// Items whose track was removed from the catalogue carry `"track": null`.
pub fn normalize_item(item: &Value) -> Track {
    item.get("track").map(normalize_track).unwrap_or_default()
}

/// Maps a simplified playlist object from the playlist listing.
/// Returns `None` if the entry has no id to fetch its tracks with.
pub fn playlist_summary(raw: &Value) -> Option<PlaylistSummary> {
    let id = raw.get("id")?.as_str()?.to_string();

    Some(PlaylistSummary {
        id,
        name: string_at(raw, "/name").unwrap_or_default(),
        track_count: raw
            .pointer("/tracks/total")
            .and_then(Value::as_u64)
            .unwrap_or(0),
    })
}

fn string_at(raw: &Value, pointer: &str) -> Option<String> {
    raw.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}
